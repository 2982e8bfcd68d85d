//! Syntax-quote expansion.
//!
//! A syntax-quoted form is rewritten into an expression which, when
//! evaluated, rebuilds the form: atoms become `(quote x)`, sequences are
//! rebuilt through `list`, `concat`, `seq` and `apply`, and unquoted parts are
//! substituted as they are.

use std::iter;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Form, Namespace, Symbol};

/// Source of gensym scope ids, shared by all readers in the process.
static GENSYM_SCOPE: AtomicU64 = AtomicU64::new(0);

/// Allocates a fresh gensym scope id.
pub(crate) fn next_scope() -> u64 {
    GENSYM_SCOPE.fetch_add(1, Ordering::Relaxed) + 1
}

#[derive(Clone, Copy)]
enum Shape {
    List,
    Vector,
    Set,
}

pub(crate) struct Expander<'a, N: ?Sized> {
    ns: &'a N,
    scope: u64,
}

impl<'a, N: Namespace + ?Sized> Expander<'a, N> {
    pub fn new(ns: &'a N, scope: u64) -> Self {
        Expander { ns, scope }
    }

    pub fn expand(&self, form: Form) -> Form {
        match form {
            Form::List(list) => self.expand_seq(list, Shape::List),
            Form::Vector(items) => self.expand_seq(items, Shape::Vector),
            Form::Set(items) => self.expand_seq(items, Shape::Set),
            Form::Map(map) => Form::Map(
                map.into_iter()
                    .map(|(k, v)| (self.expand(k), self.expand(v)))
                    .collect(),
            ),
            Form::Dequote(inner) | Form::Splice(inner) => *inner,
            Form::Symbol(sym) => Form::quote(self.qualify(sym)),
            other => Form::quote(other),
        }
    }

    fn expand_seq<I>(&self, items: I, shape: Shape) -> Form
    where
        I: IntoIterator<Item = Form>,
    {
        let mut parts = Vec::new();
        let mut group = Vec::new();
        for item in items {
            match item {
                Form::Splice(inner) => {
                    if !group.is_empty() {
                        parts.push(call("list", mem::take(&mut group)));
                    }
                    parts.push(*inner);
                }
                item => group.push(self.expand(item)),
            }
        }
        if !group.is_empty() {
            parts.push(call("list", group));
        }

        let spliced = parts.len() > 1;
        let combined = if parts.len() == 1 {
            parts.remove(0)
        } else {
            call("concat", parts)
        };

        match shape {
            Shape::Vector => call("apply", vec![Form::symbol("vector"), combined]),
            Shape::Set => call("apply", vec![Form::symbol("hash-set"), combined]),
            Shape::List if spliced => call("seq", vec![combined]),
            Shape::List => combined,
        }
    }

    fn qualify(&self, sym: Symbol) -> Symbol {
        if sym.is_qualified() {
            return sym;
        }
        let name = sym.name();
        if let Some(base) = name.strip_suffix('#') {
            return Symbol::new(format!("{}__{}__auto__", base, self.scope));
        }
        if name.starts_with('.') || name == "&" || name == "|" {
            return sym;
        }
        match self.ns.resolve(name) {
            Ok(var) => Symbol::qualified(var.ns, var.name),
            Err(_) => Symbol::qualified(self.ns.name(), name),
        }
    }
}

/// Builds the call form `(head args...)`.
fn call(head: &str, args: Vec<Form>) -> Form {
    Form::list(iter::once(Form::symbol(head)).chain(args))
}
