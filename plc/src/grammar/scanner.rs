use super::token::{double_char_token, keyword, single_char_token, Token, TokenKind};
use crate::error::LexError;
use mepa::Word;

/// Longest identifier the language accepts.
pub const MAX_IDENT_LEN: usize = 20;

/// Lazy token source over one source text.
///
/// Holds at most one character of rewind: every lookahead the language
/// needs is resolved by consuming one character and, if it does not extend
/// the current token, handing it back.
pub struct Scanner<'a> {
    code: &'a str,
    pos: usize,
    prev: Option<usize>,
    line: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            pos: 0,
            prev: None,
            line: 1,
            failed: false,
        }
    }

    /// Current 1-based line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of source lines consumed so far; a final newline does not open a new line.
    pub fn lines(&self) -> usize {
        if self.pos > 0 && self.code[..self.pos].ends_with('\n') {
            self.line - 1
        } else {
            self.line
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Scanner<'a> {
    fn bump(&mut self) -> Option<char> {
        let ch = self.code[self.pos..].chars().next()?;
        self.prev = Some(self.pos);
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Push back the most recently consumed character.
    fn rewind(&mut self) {
        if let Some(prev) = self.prev.take() {
            self.pos = prev;
        }
    }

    fn bump_if<F: Fn(char) -> bool>(&mut self, cond: F) -> Option<char> {
        match self.bump() {
            Some(ch) if cond(ch) => Some(ch),
            Some(_) => {
                self.rewind();
                None
            }
            None => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.bump_if(|ch| matches!(ch, ' ' | '\t' | '\r' | '\n')) {
            if ch == '\n' {
                self.line += 1;
            }
        }
    }

    /// Skip the body of `(* ... *)`, the opening marker already consumed.
    fn block_comment(&mut self) -> Result<(), LexError> {
        loop {
            match self.bump() {
                None => return Err(LexError::UnterminatedComment { line: self.line }),
                Some('\n') => self.line += 1,
                Some('*') => {
                    if self.bump_if(|ch| ch == ')').is_some() {
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Skip the body of `// ...` up to and including the newline.
    fn line_comment(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                self.line += 1;
                break;
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tokens
// ----------------------------------------------------------------------------

impl<'a> Scanner<'a> {
    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, LexError> {
        loop {
            self.skip_whitespace();

            let start = self.pos;
            let line = self.line;
            let Some(ch0) = self.bump() else {
                return Ok(None);
            };

            // 1. Comments
            if ch0 == '(' && self.bump_if(|ch| ch == '*').is_some() {
                self.block_comment()?;
                continue;
            }
            if ch0 == '/' && self.bump_if(|ch| ch == '/').is_some() {
                self.line_comment();
                continue;
            }

            // 2. Number literal
            if ch0.is_ascii_digit() {
                return self.number(start, line).map(Some);
            }

            // 3. Identifier or keyword
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                return self.word(start, line).map(Some);
            }

            // 4. Double character token
            if let Some(ch1) = self.bump() {
                if let Some(kind) = double_char_token(ch0, ch1) {
                    return Ok(Some(Token::new(kind, &self.code[start..self.pos], line)));
                }
                self.rewind();
            }

            // 5. Single character token
            return match single_char_token(ch0) {
                Some(kind) => Ok(Some(Token::new(kind, &self.code[start..self.pos], line))),
                None => Err(LexError::InvalidChar { ch: ch0, line }),
            };
        }
    }

    fn number(&mut self, start: usize, line: usize) -> Result<Token<'a>, LexError> {
        while self.bump_if(|ch| ch.is_ascii_digit()).is_some() {}
        let lexeme = &self.code[start..self.pos];
        match lexeme.parse::<Word>() {
            Ok(value) => Ok(Token::number(lexeme, line, value)),
            Err(_) => Err(LexError::NumberOutOfRange {
                lexeme: lexeme.to_string(),
                line,
            }),
        }
    }

    fn word(&mut self, start: usize, line: usize) -> Result<Token<'a>, LexError> {
        while self
            .bump_if(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            .is_some()
        {}
        let lexeme = &self.code[start..self.pos];
        if lexeme.len() > MAX_IDENT_LEN {
            return Err(LexError::IdentTooLong {
                ident: lexeme.to_string(),
                line,
            });
        }
        let kind = keyword(lexeme).unwrap_or(TokenKind::Ident);
        Ok(Token::new(kind, lexeme, line))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(code: &str) -> Vec<TokenKind> {
        Scanner::new(code)
            .map(|token| token.map(|t| t.kind))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn rewind_is_single_step() {
        let mut scanner = Scanner::new("ab");
        assert_eq!(scanner.bump(), Some('a'));
        assert_eq!(scanner.bump(), Some('b'));
        scanner.rewind();
        scanner.rewind();
        assert_eq!(scanner.bump(), Some('b'));
        assert_eq!(scanner.bump(), None);
    }

    #[test]
    fn operator_followed_by_operand() {
        use TokenKind::*;
        assert_eq!(kinds("x:=1"), vec![Ident, Assign, Number]);
        assert_eq!(kinds("a<b"), vec![Ident, Less, Ident]);
        assert_eq!(kinds("a<>b"), vec![Ident, NotEqual, Ident]);
        assert_eq!(kinds("a:b"), vec![Ident, Colon, Ident]);
    }

    #[test]
    fn stops_after_error() {
        let mut scanner = Scanner::new("a ? b");
        assert!(matches!(scanner.next(), Some(Ok(_))));
        assert!(matches!(scanner.next(), Some(Err(LexError::InvalidChar { ch: '?', .. }))));
        assert!(scanner.next().is_none());
    }

    #[test]
    fn comment_lines_are_counted() {
        let mut scanner = Scanner::new("(* one\ntwo *) // three\nx");
        let token = scanner.next_token().unwrap().unwrap();
        assert_eq!(token.lexeme, "x");
        assert_eq!(token.line, 3);
    }
}
