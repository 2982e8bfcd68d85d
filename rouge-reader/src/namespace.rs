//! The namespace lookup used to qualify symbols inside syntax-quote.
//!
//! The reader does not own namespaces; it only asks the current one to
//! resolve bare symbol names through the [`Namespace`] trait. [`Table`] is a
//! small in-memory implementation, sufficient for tools and tests that have
//! no evaluator behind them.

use std::collections::HashMap;
use std::error;
use std::fmt;

/// A resolved var: the namespace owning it and its name there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    /// Name of the namespace the var is interned in.
    pub ns: String,
    /// Name of the var within its namespace.
    pub name: String,
}

/// Failure to resolve a name in a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarNotFound {
    /// The namespace the lookup was performed in.
    pub namespace: String,
    /// The name that was looked up.
    pub name: String,
}

impl fmt::Display for VarNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no var {} in namespace {}", self.name, self.namespace)
    }
}

impl error::Error for VarNotFound {}

/// The namespace a reader qualifies symbols against.
pub trait Namespace {
    /// Name of this namespace.
    fn name(&self) -> &str;

    /// Resolves `name` to the var it denotes in this namespace, either
    /// interned here or referred from another namespace.
    fn resolve(&self, name: &str) -> Result<VarRef, VarNotFound>;
}

impl<'a, N: Namespace + ?Sized> Namespace for &'a N {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&self, name: &str) -> Result<VarRef, VarNotFound> {
        (**self).resolve(name)
    }
}

/// An in-memory namespace table.
///
/// ```
/// # use rouge_reader::{Namespace, Table};
/// let ns = Table::new("user")
///     .intern("x")
///     .refer("rouge.core", "map");
///
/// assert_eq!(ns.resolve("x").unwrap().ns, "user");
/// assert_eq!(ns.resolve("map").unwrap().ns, "rouge.core");
/// assert!(ns.resolve("y").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    vars: HashMap<String, VarRef>,
}

impl Table {
    /// Creates an empty namespace called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            vars: HashMap::new(),
        }
    }

    /// Interns a var named `name` in this namespace.
    pub fn intern(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let var = VarRef {
            ns: self.name.clone(),
            name: name.clone(),
        };
        self.vars.insert(name, var);
        self
    }

    /// Makes the var `name` of namespace `ns` resolvable from this namespace.
    pub fn refer(mut self, ns: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let var = VarRef {
            ns: ns.into(),
            name: name.clone(),
        };
        self.vars.insert(name, var);
        self
    }
}

impl Namespace for Table {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, name: &str) -> Result<VarRef, VarNotFound> {
        self.vars.get(name).cloned().ok_or_else(|| VarNotFound {
            namespace: self.name.clone(),
            name: name.into(),
        })
    }
}
