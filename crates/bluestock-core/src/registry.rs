//! Ordered, deduplicated set of symbols queued for analysis

use crate::symbol::Symbol;

/// Symbols the user wants analyzed, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolRegistry {
    symbols: Vec<Symbol>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize `raw` and append it unless it is blank or already present.
    ///
    /// Returns the symbol when it was newly added.
    pub fn add(&mut self, raw: &str) -> Option<&Symbol> {
        let symbol = Symbol::parse(raw)?;
        if self.contains(&symbol) {
            return None;
        }
        self.symbols.push(symbol);
        self.symbols.last()
    }

    /// Remove `symbol` if present. Returns whether anything was removed.
    pub fn remove(&mut self, symbol: &Symbol) -> bool {
        if let Some(pos) = self.symbols.iter().position(|s| s == symbol) {
            self.symbols.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Snapshot of the registry in display order
    pub fn to_vec(&self) -> Vec<Symbol> {
        self.symbols.clone()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymbolRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        for raw in iter {
            registry.add(raw.as_ref());
        }
        registry
    }
}

impl<'a> IntoIterator for &'a SymbolRegistry {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
