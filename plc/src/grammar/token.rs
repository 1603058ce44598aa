use mepa::Word;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub line: usize,
    pub value: Option<Word>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, lexeme: &'a str, line: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            value: None,
        }
    }

    pub fn number(lexeme: &'a str, line: usize, value: Word) -> Self {
        Token {
            kind: TokenKind::Number,
            lexeme,
            line,
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Keywords
    Program,
    Var,
    Integer,
    Boolean,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Read,
    Write,
    Div,
    Mod,
    And,
    Or,
    Not,
    True,
    False,

    // Identifier and literal
    Ident,
    Number,

    // Double character tokens
    Assign,       // ':='
    LessEqual,    // '<='
    NotEqual,     // '<>'
    GreaterEqual, // '>='

    // Single character tokens
    Semicolon, // ';'
    Comma,     // ','
    Period,    // '.'
    Plus,      // '+'
    Minus,     // '-'
    Star,      // '*'
    Slash,     // '/'
    LParen,    // '('
    RParen,    // ')'
    Equal,     // '='
    Colon,     // ':'
    Less,      // '<'
    Greater,   // '>'
}

/// Name of a lookahead for diagnostics, `EOF` once input is exhausted.
pub fn describe(kind: &Option<TokenKind>) -> String {
    match kind {
        Some(kind) => kind.to_string(),
        None => "EOF".to_string(),
    }
}

pub fn keyword(word: &str) -> Option<TokenKind> {
    use TokenKind::*;
    match word.to_ascii_lowercase().as_str() {
        "program" => Some(Program),
        "var" => Some(Var),
        "integer" => Some(Integer),
        "boolean" => Some(Boolean),
        "begin" => Some(Begin),
        "end" => Some(End),
        "if" => Some(If),
        "then" => Some(Then),
        "else" => Some(Else),
        "while" => Some(While),
        "do" => Some(Do),
        "read" => Some(Read),
        "write" => Some(Write),
        "div" => Some(Div),
        "mod" => Some(Mod),
        "and" => Some(And),
        "or" => Some(Or),
        "not" => Some(Not),
        "true" => Some(True),
        "false" => Some(False),
        _ => None,
    }
}

pub fn single_char_token(ch: char) -> Option<TokenKind> {
    use TokenKind::*;
    match ch {
        ';' => Some(Semicolon),
        ',' => Some(Comma),
        '.' => Some(Period),
        '+' => Some(Plus),
        '-' => Some(Minus),
        '*' => Some(Star),
        '/' => Some(Slash),
        '(' => Some(LParen),
        ')' => Some(RParen),
        '=' => Some(Equal),
        ':' => Some(Colon),
        '<' => Some(Less),
        '>' => Some(Greater),
        _ => None,
    }
}

pub fn double_char_token(ch0: char, ch1: char) -> Option<TokenKind> {
    use TokenKind::*;
    match (ch0, ch1) {
        (':', '=') => Some(Assign),
        ('<', '=') => Some(LessEqual),
        ('<', '>') => Some(NotEqual),
        ('>', '=') => Some(GreaterEqual),
        _ => None,
    }
}
