//! Vars, the named references that syntax-quote resolves symbols to.

use std::fmt;

use crate::Form;

/// A var as produced by the reader: a name and a root value.
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    name: Box<str>,
    root: Root,
}

/// The root binding of a [`Var`].
#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    /// No value has been bound.
    Unbound,
    /// The var is bound to a value.
    Bound(Box<Form>),
}

impl Var {
    /// Creates an unbound var.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Var {
            name: name.into(),
            root: Root::Unbound,
        }
    }

    /// Creates a var bound to `root`.
    pub fn bound(name: impl Into<Box<str>>, root: impl Into<Form>) -> Self {
        Var {
            name: name.into(),
            root: Root::Bound(Box::new(root.into())),
        }
    }

    /// The name of the var.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root binding.
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// The bound root value; `None` while unbound.
    pub fn value(&self) -> Option<&Form> {
        match &self.root {
            Root::Unbound => None,
            Root::Bound(form) => Some(form),
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Var {}>", self.name)
    }
}
