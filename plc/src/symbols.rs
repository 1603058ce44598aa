use crate::error::SemanticError;
use indexmap::IndexMap;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Type {
    Integer,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub addr: usize,
    pub ty: Type,
}

/// Flat variable table. Addresses follow declaration order from 0 and
/// entries are never removed, so the next address is always `len()`.
#[derive(Debug, Default)]
pub struct Symbols(IndexMap<String, Entry>);

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, ident: &str, ty: Type, line: usize) -> Result<usize, SemanticError> {
        if self.0.contains_key(ident) {
            return Err(SemanticError::Duplicate {
                ident: ident.to_string(),
                line,
            });
        }
        let addr = self.0.len();
        self.0.insert(ident.to_string(), Entry { addr, ty });
        Ok(addr)
    }

    pub fn resolve(&self, ident: &str, line: usize) -> Result<usize, SemanticError> {
        self.get(ident)
            .map(|entry| entry.addr)
            .ok_or_else(|| SemanticError::Undeclared {
                ident: ident.to_string(),
                line,
            })
    }

    pub fn get(&self, ident: &str) -> Option<&Entry> {
        self.0.get(ident)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}
