use super::scanner::Scanner;
use super::token::{Token, TokenKind};
use crate::error::{Error, SyntaxError};
use crate::labels::Labels;
use crate::sink::Sink;
use crate::symbols::Symbols;
use log::debug;
use mepa::{Inst, Label};

/// Deepest nesting of statements and expressions accepted before giving up.
pub const MAX_DEPTH: usize = 128;

/// Recursive-descent recognizer that emits code while it recognizes.
///
/// Owns the symbol table and label counter for the one compilation it runs.
pub struct Parser<'a, S: Sink> {
    scanner: Scanner<'a>,
    lookahead: Option<Token<'a>>,
    depth: usize,
    pub(super) symbols: Symbols,
    pub(super) labels: Labels,
    pub(super) sink: S,
}

/// Everything a finished compilation leaves behind.
#[derive(Debug)]
pub struct Compilation<S> {
    pub code: S,
    pub symbols: Symbols,
    pub labels: Labels,
    pub lines: usize,
}

impl<'a, S: Sink> Parser<'a, S> {
    pub fn new(code: &'a str, sink: S) -> Result<Self, Error> {
        let mut parser = Parser {
            scanner: Scanner::new(code),
            lookahead: None,
            depth: 0,
            symbols: Symbols::new(),
            labels: Labels::new(),
            sink,
        };
        parser.advance()?;
        Ok(parser)
    }

    pub(super) fn finish(self) -> Compilation<S> {
        Compilation {
            code: self.sink,
            symbols: self.symbols,
            labels: self.labels,
            lines: self.scanner.lines(),
        }
    }
}

impl<'a, S: Sink> Parser<'a, S> {
    /// Pull the next token into the lookahead slot
    fn advance(&mut self) -> Result<(), Error> {
        self.lookahead = self.scanner.next_token()?;
        if let Some(token) = &self.lookahead {
            debug!(
                "line {} - token {} lexeme {}",
                token.line, token.kind, token.lexeme
            );
        }
        Ok(())
    }

    /// Line of the lookahead, or where scanning stopped at end of input
    pub fn line(&self) -> usize {
        match &self.lookahead {
            Some(token) => token.line,
            None => self.scanner.line(),
        }
    }

    pub fn peek(&self) -> Option<TokenKind> {
        self.lookahead.map(|token| token.kind)
    }

    pub(super) fn lookahead(&self) -> Option<Token<'a>> {
        self.lookahead
    }

    /// Peek and check next token is of `kind`
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Consume the lookahead whatever it is
    pub(super) fn next(&mut self) -> Result<Option<Token<'a>>, Error> {
        let token = self.lookahead;
        self.advance()?;
        Ok(token)
    }

    /// Next token must be of `kind`
    pub fn consume(&mut self, kind: TokenKind) -> Result<Token<'a>, Error> {
        match self.lookahead {
            Some(token) if token.kind == kind => {
                self.advance()?;
                Ok(token)
            }
            _ => Err(SyntaxError::Expected {
                expected: kind,
                found: self.peek(),
                line: self.line(),
            }
            .into()),
        }
    }

    /// Enter one level of statement or expression nesting
    pub(super) fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::TooDeep { line: self.line() }.into());
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a level opened by `enter`. Errors skip this, they end the compilation anyway
    pub(super) fn leave(&mut self) {
        self.depth -= 1;
    }

    pub(super) fn emit(&mut self, inst: Inst) -> Result<(), Error> {
        self.sink.emit(inst)
    }

    pub(super) fn define(&mut self, label: Label) -> Result<(), Error> {
        self.labels.define(label, &mut self.sink)
    }
}

/// Parse `following` only if the next token is `trigger`, consuming it
#[macro_export]
macro_rules! optional {
    ($parser:expr, $trigger:expr, $following:expr) => {
        if $parser.check($trigger) {
            $parser.consume($trigger)?;
            Some($following)
        } else {
            None
        }
    };
}

/// Parse `element { delimiter element }`
#[macro_export]
macro_rules! repeat {
    ($parser:expr, $elem:expr, $delimiter:expr) => {{
        let mut items = vec![$elem?];
        while $parser.check($delimiter) {
            $parser.consume($delimiter)?;
            items.push($elem?);
        }
        items
    }};
}
