//! Symbols, optionally qualified with a namespace.

use std::fmt;

use crate::{Map, Metadata};

/// A symbol, optionally qualified by a namespace.
///
/// Symbols compare equal when both their namespace and name are equal;
/// attached metadata does not take part in comparison.
///
/// ```
/// # use rouge_reader::Symbol;
/// let sym = Symbol::parse("rouge.core/map");
/// assert_eq!(sym.ns(), Some("rouge.core"));
/// assert_eq!(sym.name(), "map");
/// assert_eq!(Symbol::parse("/").name(), "/");
/// ```
#[derive(Clone)]
pub struct Symbol {
    ns: Option<Box<str>>,
    name: Box<str>,
    meta: Option<Box<Map>>,
}

impl Symbol {
    /// Constructs an unqualified symbol. No splitting at `/` takes place.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Symbol {
            ns: None,
            name: name.into(),
            meta: None,
        }
    }

    /// Constructs a symbol qualified by the namespace `ns`.
    pub fn qualified(ns: impl Into<Box<str>>, name: impl Into<Box<str>>) -> Self {
        Symbol {
            ns: Some(ns.into()),
            name: name.into(),
            meta: None,
        }
    }

    /// Constructs a symbol from its textual form.
    ///
    /// The text is split at the first `/` when there is text on both sides of
    /// it; otherwise the whole text is the unqualified name.
    pub fn parse(text: &str) -> Self {
        match text.find('/') {
            Some(idx) if idx > 0 && idx + 1 < text.len() => {
                Symbol::qualified(&text[..idx], &text[idx + 1..])
            }
            _ => Symbol::new(text),
        }
    }

    /// The namespace qualifying this symbol, if any.
    pub fn ns(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    /// The name part of the symbol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the symbol carries a namespace.
    pub fn is_qualified(&self) -> bool {
        self.ns.is_some()
    }
}

impl Metadata for Symbol {
    fn meta(&self) -> Option<&Map> {
        self.meta.as_deref()
    }

    fn set_meta(&mut self, meta: Option<Map>) {
        self.meta = meta.map(Box::new);
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Symbol) -> bool {
        self.ns == other.ns && self.name == other.name
    }
}

impl Eq for Symbol {}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ns {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}
