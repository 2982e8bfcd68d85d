use std::ops;

use crate::Form;

/// A type that can be used to index into a `rouge_reader::Form`.
///
/// The [`get`] method of `Form` accepts any type that implements `Index`, as
/// does the [square-bracket indexing operator]. This trait is implemented for
/// `usize`, which indexes lists and vectors by position, for strings, which
/// look up keyword keys of a map, and for `Form`, which looks up arbitrary map
/// keys.
///
/// [`get`]: enum.Form.html#method.get
/// [square-bracket indexing operator]: enum.Form.html#impl-Index%3CI%3E
///
/// This trait is sealed and cannot be implemented for types outside of
/// `rouge_reader`.
///
/// # Examples
///
/// ```
/// # use rouge_reader::{Form, read_str, Table};
/// let data = read_str(&Table::new("user"), r#"{:name "Ann" :tags [a b c]}"#).unwrap();
///
/// assert_eq!(data["name"], Form::from("Ann"));
/// assert_eq!(data["tags"][1], Form::symbol("b"));
/// ```
pub trait Index: private::Sealed {
    /// Return None if the key is not present.
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v Form) -> Option<&'v Form>;
}

// Prevent users from implementing the Index trait.
mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<'a, T: ?Sized> Sealed for &'a T where T: Sealed {}
    impl Sealed for super::Form {}
}

impl Index for usize {
    fn index_into<'v>(&self, v: &'v Form) -> Option<&'v Form> {
        match v {
            Form::List(list) => list.get(*self),
            Form::Vector(items) => items.get(*self),
            _ => None,
        }
    }
}

impl Index for str {
    fn index_into<'v>(&self, v: &'v Form) -> Option<&'v Form> {
        match v {
            Form::Map(map) => map
                .iter()
                .find_map(|(k, v)| if k.as_keyword() == Some(self) { Some(v) } else { None }),
            _ => None,
        }
    }
}

impl Index for String {
    fn index_into<'v>(&self, v: &'v Form) -> Option<&'v Form> {
        self[..].index_into(v)
    }
}

impl<'a, T: ?Sized> Index for &'a T
where
    T: Index,
{
    fn index_into<'v>(&self, v: &'v Form) -> Option<&'v Form> {
        (**self).index_into(v)
    }
}

impl Index for Form {
    fn index_into<'v>(&self, v: &'v Form) -> Option<&'v Form> {
        match v {
            Form::Map(map) => map.get(self),
            _ => None,
        }
    }
}

// Indexing does not panic on misses; a missing element reads as `nil`, which
// suits poking at read data without checking every intermediate type.
impl<I> ops::Index<I> for Form
where
    I: Index,
{
    type Output = Form;

    /// Index into a `rouge_reader::Form` using the syntax `form[0]` or
    /// `form["k"]`.
    ///
    /// Returns `nil` if the type of `self` does not match the type of the
    /// index, if the map has no such key, or if the index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rouge_reader::Form;
    /// let data = Form::map(vec![(Form::keyword("a"), Form::vector(vec![1, 2]))]);
    ///
    /// assert_eq!(data["a"][0], Form::from(1));
    /// assert_eq!(data["b"], Form::Nil);
    /// assert_eq!(data["a"][7], Form::Nil);
    /// ```
    fn index(&self, index: I) -> &Form {
        static NIL: Form = Form::Nil;
        index.index_into(self).unwrap_or(&NIL)
    }
}
