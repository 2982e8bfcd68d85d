//! The `Form` enum, a loosely typed way of representing any value produced by
//! the reader.
//!
//! # Constructing forms
//!
//! Forms are usually obtained by reading source text, but they can also be
//! built directly, either via the constructor functions on `Form`, through
//! the `From` conversions, or by using the `form!` macro (behind the
//! `form-macro` feature):
//!
//! ```
//! # use rouge_reader::{Form, List};
//! let call = Form::list(vec![Form::symbol("inc"), Form::from(41)]);
//! assert_eq!(call.to_string(), "(inc 41)");
//! assert_eq!(Form::symbol("nil"), Form::Nil);
//! ```
use std::fmt;

use crate::{List, Map, Metadata, Number, Set, Symbol, Var, Vector};

pub use self::index::Index;

/// Represents any valid Rouge form.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    /// The `nil` value.
    Nil,

    /// A boolean, `true` or `false`.
    Bool(bool),

    /// An integer of arbitrary precision or a floating point number.
    Number(Number),

    /// A string.
    String(Box<str>),

    /// A keyword, stored without its leading colon.
    Keyword(Box<str>),

    /// A possibly namespace-qualified symbol.
    Symbol(Symbol),

    /// A list, written as `(...)`.
    List(List),

    /// A vector, written as `[...]`.
    Vector(Vector),

    /// A map, written as `{...}`.
    Map(Map),

    /// A set, written as `#{...}`.
    Set(Set),

    /// A compiled regular expression, written as `#"..."`.
    Regex(Regex),

    /// A var.
    Var(Box<Var>),

    /// An unquoted form, `~x`. Only exists while a syntax-quote is read.
    Dequote(Box<Form>),

    /// An unquote-spliced form, `~@x`. Only exists while a syntax-quote is
    /// read.
    Splice(Box<Form>),

    /// A value marked as a macro by the surrounding system.
    Macro(Box<Form>),

    /// A value marked as a builtin by the surrounding system.
    Builtin(Box<Form>),
}

/// A regular expression literal.
///
/// Two literals are equal when their pattern text is equal.
#[derive(Clone)]
pub struct Regex(regex::Regex);

impl Regex {
    /// Wraps a compiled regular expression.
    pub fn new(re: regex::Regex) -> Self {
        Regex(re)
    }

    /// The pattern text the expression was compiled from.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The compiled expression.
    pub fn as_regex(&self) -> &regex::Regex {
        &self.0
    }
}

impl PartialEq for Regex {
    fn eq(&self, other: &Regex) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Regex({:?})", self.as_str())
    }
}

impl Form {
    /// Constructs a symbol form from its textual representation.
    ///
    /// The names `true`, `false` and `nil` denote the boolean and nil values
    /// rather than symbols. Text containing a `/` with characters on both
    /// sides yields a namespace-qualified symbol.
    ///
    /// ```
    /// # use rouge_reader::Form;
    /// assert_eq!(Form::symbol("true"), Form::Bool(true));
    /// assert_eq!(Form::symbol("a/b").as_symbol().unwrap().ns(), Some("a"));
    /// ```
    pub fn symbol(text: impl AsRef<str>) -> Self {
        match text.as_ref() {
            "nil" => Form::Nil,
            "true" => Form::Bool(true),
            "false" => Form::Bool(false),
            text => Form::Symbol(Symbol::parse(text)),
        }
    }

    /// Constructs a keyword form; `name` excludes the leading colon.
    pub fn keyword(name: impl Into<Box<str>>) -> Self {
        Form::Keyword(name.into())
    }

    /// Constructs a string form.
    pub fn string(s: impl Into<Box<str>>) -> Self {
        Form::String(s.into())
    }

    /// Constructs a list form from an iterator of elements.
    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Form>,
    {
        Form::List(elements.into_iter().map(Into::into).collect())
    }

    /// Constructs a vector form from an iterator of elements.
    pub fn vector<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Form>,
    {
        Form::Vector(elements.into_iter().map(Into::into).collect())
    }

    /// Constructs a map form from key/value pairs; later keys win.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Form>,
        V: Into<Form>,
    {
        Form::Map(entries.into_iter().collect())
    }

    /// Constructs a set form, dropping duplicate elements.
    pub fn set<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Form>,
    {
        Form::Set(elements.into_iter().collect())
    }

    /// Constructs the two-element list `(quote form)`.
    pub fn quote(form: impl Into<Form>) -> Self {
        Form::list(vec![Form::symbol("quote"), form.into()])
    }

    /// Wraps `inner` as a macro.
    pub fn macro_(inner: impl Into<Form>) -> Self {
        Form::Macro(Box::new(inner.into()))
    }

    /// Wraps `inner` as a builtin.
    pub fn builtin(inner: impl Into<Form>) -> Self {
        Form::Builtin(Box::new(inner.into()))
    }

    /// Returns true for `nil`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Form::Nil)
    }

    /// Returns true for booleans.
    pub fn is_bool(&self) -> bool {
        self.as_bool().is_some()
    }

    /// If the form is a boolean, returns its value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Form::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns true for numbers.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// If the form is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Form::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the form is an integer fitting an `i64`, returns it.
    ///
    /// ```
    /// # use rouge_reader::Form;
    /// assert_eq!(Form::from(42).as_i64(), Some(42));
    /// assert_eq!(Form::from(4.2).as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// If the form is a number, returns it as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Returns true for strings.
    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// If the form is a string, returns its contents.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Form::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for keywords.
    pub fn is_keyword(&self) -> bool {
        self.as_keyword().is_some()
    }

    /// If the form is a keyword, returns its name.
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Form::Keyword(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for symbols.
    pub fn is_symbol(&self) -> bool {
        self.as_symbol().is_some()
    }

    /// If the form is a symbol, returns a reference to it.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Form::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Returns true for lists, including the empty list.
    pub fn is_list(&self) -> bool {
        self.as_list().is_some()
    }

    /// If the form is a list, returns a reference to it.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Form::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns true for vectors.
    pub fn is_vector(&self) -> bool {
        self.as_vector().is_some()
    }

    /// If the form is a vector, returns a reference to it.
    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Form::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Returns true for maps.
    pub fn is_map(&self) -> bool {
        self.as_map().is_some()
    }

    /// If the form is a map, returns a reference to it.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Form::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns true for sets.
    pub fn is_set(&self) -> bool {
        self.as_set().is_some()
    }

    /// If the form is a set, returns a reference to it.
    pub fn as_set(&self) -> Option<&Set> {
        match self {
            Form::Set(s) => Some(s),
            _ => None,
        }
    }

    /// If the form is a regular expression, returns a reference to it.
    pub fn as_regex(&self) -> Option<&Regex> {
        match self {
            Form::Regex(re) => Some(re),
            _ => None,
        }
    }

    /// If the form is a var, returns a reference to it.
    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Form::Var(var) => Some(var),
            _ => None,
        }
    }

    /// Returns true for the transient unquote markers.
    pub fn is_marker(&self) -> bool {
        matches!(self, Form::Dequote(_) | Form::Splice(_))
    }

    /// A short, human-readable name of the form's type.
    pub fn kind(&self) -> &'static str {
        match self {
            Form::Nil => "nil",
            Form::Bool(_) => "boolean",
            Form::Number(_) => "number",
            Form::String(_) => "string",
            Form::Keyword(_) => "keyword",
            Form::Symbol(_) => "symbol",
            Form::List(List::Empty) => "empty list",
            Form::List(List::Cons(_)) => "list",
            Form::Vector(_) => "vector",
            Form::Map(_) => "map",
            Form::Set(_) => "set",
            Form::Regex(_) => "regex",
            Form::Var(_) => "var",
            Form::Dequote(_) => "unquote",
            Form::Splice(_) => "unquote-splicing",
            Form::Macro(_) => "macro",
            Form::Builtin(_) => "builtin",
        }
    }

    /// Returns true if metadata can be attached to this form.
    ///
    /// ```
    /// # use rouge_reader::Form;
    /// assert!(Form::symbol("x").supports_meta());
    /// assert!(Form::list(vec![1]).supports_meta());
    /// assert!(!Form::list(Vec::<Form>::new()).supports_meta());
    /// assert!(!Form::from(1).supports_meta());
    /// ```
    pub fn supports_meta(&self) -> bool {
        matches!(
            self,
            Form::Symbol(_)
                | Form::List(List::Cons(_))
                | Form::Vector(_)
                | Form::Map(_)
                | Form::Set(_)
        )
    }

    /// Returns the metadata attached to this form, if any.
    pub fn meta(&self) -> Option<&Map> {
        match self {
            Form::Symbol(sym) => sym.meta(),
            Form::List(List::Cons(cell)) => cell.meta(),
            Form::Vector(v) => v.meta(),
            Form::Map(m) => m.meta(),
            Form::Set(s) => s.meta(),
            _ => None,
        }
    }

    /// Returns the metadata capability of this form, unless its type does
    /// not support metadata.
    pub fn meta_mut(&mut self) -> Option<&mut dyn Metadata> {
        match self {
            Form::Symbol(sym) => Some(sym),
            Form::List(List::Cons(cell)) => Some(cell),
            Form::Vector(v) => Some(v),
            Form::Map(m) => Some(m),
            Form::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Index into a list, vector or map.
    ///
    /// A `usize` index selects an element of a list or vector; a string
    /// selects the value stored under the keyword of that name in a map, and
    /// a `Form` selects the value stored under an equal key.
    ///
    /// ```
    /// # use rouge_reader::Form;
    /// let v = Form::vector(vec![1, 2, 3]);
    /// assert_eq!(v.get(1), Some(&Form::from(2)));
    /// let m = Form::map(vec![(Form::keyword("a"), 1)]);
    /// assert_eq!(m.get("a"), Some(&Form::from(1)));
    /// assert_eq!(m.get("b"), None);
    /// ```
    pub fn get<I: Index>(&self, index: I) -> Option<&Form> {
        index.index_into(self)
    }
}

impl fmt::Display for Form {
    /// Display a form using its textual representation, as it would be read.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct WriterFormatter<'a, 'b: 'a> {
            inner: &'a mut fmt::Formatter<'b>,
        }

        impl<'a, 'b> std::io::Write for WriterFormatter<'a, 'b> {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                let s = std::str::from_utf8(buf)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                self.inner
                    .write_str(s)
                    .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "fmt error"))?;
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut wr = WriterFormatter { inner: f };
        crate::print::to_writer(&mut wr, self).map_err(|_| fmt::Error)
    }
}

mod from;
mod index;
