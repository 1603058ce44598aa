//! Single-pass PascalLite compiler emitting MEPA stack machine code.
//!
//! Scanning, parsing and code emission happen in one pass: the parser pulls
//! tokens from the [`Scanner`] one at a time and writes instructions to a
//! [`Sink`] as each grammar rule is recognized. No syntax tree is built.

mod error;
mod grammar;
mod labels;
mod sink;
mod symbols;

pub use error::{Error, LexError, SemanticError, SyntaxError};
pub use grammar::parsercore::{Compilation, Parser, MAX_DEPTH};
pub use grammar::scanner::{Scanner, MAX_IDENT_LEN};
pub use grammar::token::{Token, TokenKind};
pub use labels::Labels;
pub use mepa::{Inst, Label, Word};
pub use sink::{yaml, Sink, Stream};
pub use symbols::{Entry, Symbols, Type};

/// Compile `code` into an in-memory listing.
pub fn compile(code: &str) -> Result<Compilation<Vec<Inst>>, Error> {
    compile_into(code, Vec::new())
}

/// Compile `code`, handing each instruction to `sink` as it is emitted.
pub fn compile_into<S: Sink>(code: &str, sink: S) -> Result<Compilation<S>, Error> {
    Parser::new(code, sink)?.parse()
}
