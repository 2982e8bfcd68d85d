#![deny(missing_docs)]

//! This crate provides the reader of the Rouge language, a Lisp in the
//! Clojure family: it turns source text into [`Form`] values and expands
//! syntax-quoted templates while reading.
//!
//! ```clojure
//! (defmacro unless [test & body]
//!   `(if ~test nil (do ~@body)))
//!
//! #(+ % 1)            ; anonymous function literal
//! ^:private {:a 1}    ; metadata
//! #{1 2 3}            ; set
//! #"[a-z]+"           ; regex literal
//! ```
//!
//! # Reading
//!
//! A [`Reader`] reads one top-level form at a time from a string. Symbols
//! inside syntax-quote are qualified with the namespace that owns them, so
//! every reader is given a [`Namespace`] to resolve names against. [`Table`]
//! is a small in-memory implementation of that trait.
//!
//! ```
//! use rouge_reader::{read_str, Form, Table, read::Error};
//!
//! fn example() -> Result<(), Error> {
//!     let ns = Table::new("user").refer("rouge.core", "inc");
//!
//!     let form = read_str(&ns, "`(inc ~x)")?;
//!     assert_eq!(form.to_string(), "(list (quote rouge.core/inc) x)");
//!
//!     let form = read_str(&ns, "{:name \"Ann\" :langs [rust clojure]}")?;
//!     assert_eq!(form["langs"][1], Form::symbol("clojure"));
//!
//!     Ok(())
//! }
//! #
//! # fn main() {
//! #     example().unwrap();
//! # }
//! ```
//!
//! # The form model
//!
//! Read forms are represented by the [`Form`] enum:
//!
//! - `nil`, `true` and `false` are [`Form::Nil`] and [`Form::Bool`]. The
//!   reader never produces symbols with these names.
//! - Numbers are [`Number`]s: integers of arbitrary precision, written in
//!   decimal, hexadecimal (`0x1F`), binary (`0b101`) or octal (`010`), and
//!   floating point numbers (`1.5e2`).
//! - Strings, keywords (`:kw`, `:"with spaces"`) and [`Symbol`]s, which may be
//!   namespace-qualified (`rouge.core/map`).
//! - Lists are [`List`]s of [`Cons`] cells, ending in the shared empty list.
//!   Vectors, maps and sets are [`Vector`], [`Map`] and [`Set`].
//! - Symbols and collections can carry a metadata [`Map`], accessible
//!   through the [`Metadata`] trait. Metadata never affects equality.
//!
//! # Printing
//!
//! The [`print`] module writes forms back out as text the reader accepts;
//! `Display` for `Form` uses it.
//!
//! # Building forms in Rust
//!
//! With the `form-macro` feature, the `form!` macro builds forms from
//! Rust tokens using reader-like syntax.

extern crate self as rouge_reader;

/// Construct a [`Form`] using syntax similar to Rouge source.
///
/// # Atoms
///
/// ```
/// # use rouge_reader::{form, Form};
/// assert_eq!(form!(nil), Form::Nil);
/// assert_eq!(form!(true), Form::Bool(true));
/// assert_eq!(form!(-42), Form::from(-42));
/// assert_eq!(form!("text"), Form::from("text"));
/// ```
///
/// # Symbols and keywords
///
/// Symbols that are not Rust identifiers are written with `#"..."`, as are
/// keywords with `:"..."`.
///
/// ```
/// # use rouge_reader::{form, Form};
/// assert_eq!(form!(foo), Form::symbol("foo"));
/// assert_eq!(form!(#"rouge.core/deref"), Form::symbol("rouge.core/deref"));
/// assert_eq!(form!(:key), Form::keyword("key"));
/// assert_eq!(form!(:"two words"), Form::keyword("two words"));
/// ```
///
/// # Collections
///
/// ```
/// # use rouge_reader::{form, Form};
/// let list = form!((f 1 [2 3] {:a 1} #{4}));
/// assert_eq!(list.to_string(), "(f 1 [2 3] {:a 1} #{4})");
/// ```
///
/// # Interpolation
///
/// A Rust expression preceded by a comma is converted into a form:
///
/// ```
/// # use rouge_reader::{form, Form};
/// let n = 41 + 1;
/// assert_eq!(form!((inc ,n)), form!((inc 42)));
/// ```
#[cfg(feature = "form-macro")]
pub use rouge_reader_macros::form;

pub mod coll;
pub mod cons;
pub mod form;
pub mod meta;
pub mod namespace;
pub mod number;
pub mod print;
pub mod read;
pub mod symbol;
pub mod var;

#[doc(inline)]
pub use self::read::{read_all, read_str, read_str_custom, Reader};

#[doc(inline)]
pub use self::print::{to_string, to_vec, to_writer, Printer};

#[doc(inline)]
pub use form::{Form, Index, Regex};

#[doc(inline)]
pub use cons::{Cons, List};

#[doc(inline)]
pub use coll::{Map, Set, Vector};

#[doc(inline)]
pub use meta::Metadata;

#[doc(inline)]
pub use namespace::{Namespace, Table, VarNotFound, VarRef};

#[doc(inline)]
pub use number::Number;

#[doc(inline)]
pub use symbol::Symbol;

#[doc(inline)]
pub use var::{Root, Var};

#[cfg(test)]
mod tests;
