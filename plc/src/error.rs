use crate::grammar::parsercore::MAX_DEPTH;
use crate::grammar::scanner::MAX_IDENT_LEN;
use crate::grammar::token::{describe, TokenKind};
use color_print::cprintln;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("unterminated comment at line {line}")]
    UnterminatedComment { line: usize },

    #[error("identifier `{ident}` longer than {} characters at line {line}", MAX_IDENT_LEN)]
    IdentTooLong { ident: String, line: usize },

    #[error("invalid character `{ch}` at line {line}")]
    InvalidChar { ch: char, line: usize },

    #[error("numeric literal `{lexeme}` out of range at line {line}")]
    NumberOutOfRange { lexeme: String, line: usize },
}

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("expected [{expected}] found [{}] at line {line}", describe(.found))]
    Expected {
        expected: TokenKind,
        found: Option<TokenKind>,
        line: usize,
    },

    #[error("invalid statement starting with [{}] at line {line}", describe(.found))]
    InvalidStatement {
        found: Option<TokenKind>,
        line: usize,
    },

    #[error("expected expression found [{}] at line {line}", describe(.found))]
    ExpectedExpression {
        found: Option<TokenKind>,
        line: usize,
    },

    #[error("unexpected [{found}] after end of program at line {line}")]
    TrailingInput { found: TokenKind, line: usize },

    #[error("nesting deeper than {} levels at line {line}", MAX_DEPTH)]
    TooDeep { line: usize },
}

#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("variable `{ident}` already declared at line {line}")]
    Duplicate { ident: String, line: usize },

    #[error("variable `{ident}` not declared at line {line}")]
    Undeclared { ident: String, line: usize },

    #[error("invalid variable type `{found}` at line {line}")]
    InvalidType { found: String, line: usize },
}

// Unified error type for a compilation
#[derive(Debug, Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Source line the error was detected on.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Lex(e) => Some(match e {
                LexError::UnterminatedComment { line }
                | LexError::IdentTooLong { line, .. }
                | LexError::InvalidChar { line, .. }
                | LexError::NumberOutOfRange { line, .. } => *line,
            }),
            Error::Syntax(e) => Some(match e {
                SyntaxError::Expected { line, .. }
                | SyntaxError::InvalidStatement { line, .. }
                | SyntaxError::ExpectedExpression { line, .. }
                | SyntaxError::TrailingInput { line, .. }
                | SyntaxError::TooDeep { line } => *line,
            }),
            Error::Semantic(e) => Some(match e {
                SemanticError::Duplicate { line, .. }
                | SemanticError::Undeclared { line, .. }
                | SemanticError::InvalidType { line, .. } => *line,
            }),
            Error::Io(_) | Error::Yaml(_) => None,
        }
    }

    /// Compilation phase that failed.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex(_) => "lexical",
            Error::Syntax(_) => "syntax",
            Error::Semantic(_) => "semantic",
            Error::Io(_) => "io",
            Error::Yaml(_) => "yaml",
        }
    }

    /// Print error with the offending source line
    pub fn print_diag(&self, file: &str, code: &str) {
        cprintln!("<red,bold>error</>: {}", self);

        let Some(line_num) = self.line() else {
            return;
        };
        let line_content = code.lines().nth(line_num.saturating_sub(1)).unwrap_or("");

        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }
}
