//! List "cons cell" data type and accompanying iterator types.
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use crate::{Form, Map, Metadata};

/// A list, either empty or a chain of cons cells.
///
/// The empty list is a single shared value; every empty list, however it was
/// obtained, is `List::Empty` and compares equal to any other. A non-empty list
/// is a [`Cons`] cell whose tail is again a `List`, so improper ("dotted")
/// lists can not be constructed.
///
/// ```
/// # use rouge_reader::{Form, List};
/// let list: List = vec![1, 2, 3].into();
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(1), Some(&Form::from(2)));
/// assert_eq!(List::new(), List::Empty);
/// ```
#[derive(Default)]
pub enum List {
    /// The empty list, `()`.
    #[default]
    Empty,
    /// A non-empty list.
    Cons(Cons),
}

/// A cons cell, the building block of non-empty lists.
///
/// A cons cell holds a `head` element and a `tail`, which is the list of the
/// remaining elements. Since the tail is typed as [`List`], a cons cell's tail
/// is always either another cons cell or the empty list.
pub struct Cons {
    inner: Box<Cell>,
}

struct Cell {
    head: Form,
    tail: List,
    meta: Option<Box<Map>>,
}

impl Cons {
    /// Constructs a new cons cell from a head element and a tail list.
    pub fn new(head: impl Into<Form>, tail: List) -> Self {
        Cons {
            inner: Box::new(Cell {
                head: head.into(),
                tail,
                meta: None,
            }),
        }
    }

    /// Returns a reference to the first element.
    pub fn head(&self) -> &Form {
        &self.inner.head
    }

    /// Returns a mutable reference to the first element.
    pub fn head_mut(&mut self) -> &mut Form {
        &mut self.inner.head
    }

    /// Sets the first element.
    pub fn set_head(&mut self, head: impl Into<Form>) {
        self.inner.head = head.into()
    }

    /// Returns a reference to the remaining elements.
    pub fn tail(&self) -> &List {
        &self.inner.tail
    }

    /// Returns a mutable reference to the remaining elements.
    pub fn tail_mut(&mut self) -> &mut List {
        &mut self.inner.tail
    }

    /// Sets the remaining elements.
    pub fn set_tail(&mut self, tail: List) {
        self.inner.tail = tail
    }

    /// Converts `self` into its head and tail without cloning.
    ///
    /// ```
    /// # use rouge_reader::{Cons, Form, List};
    /// let cell = Cons::new("a", List::from(vec![42]));
    /// let (head, tail) = cell.into_pair();
    /// assert_eq!(head, Form::from("a"));
    /// assert_eq!(tail.len(), 1);
    /// ```
    pub fn into_pair(mut self) -> (Form, List) {
        let head = mem::replace(&mut self.inner.head, Form::Nil);
        let tail = mem::take(&mut self.inner.tail);
        (head, tail)
    }

    /// Returns an iterator over the elements of the list starting at this
    /// cell.
    pub fn iter(&self) -> Iter<'_> {
        Iter { cursor: Some(self) }
    }

    /// Returns the number of elements in the list starting at this cell.
    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

impl Metadata for Cons {
    fn meta(&self) -> Option<&Map> {
        self.inner.meta.as_deref()
    }

    fn set_meta(&mut self, meta: Option<Map>) {
        self.inner.meta = meta.map(Box::new);
    }
}

// Dropping a long list must not recurse once per element.
impl Drop for Cons {
    fn drop(&mut self) {
        let mut tail = mem::take(&mut self.inner.tail);
        while let List::Cons(mut cell) = tail {
            tail = mem::take(&mut cell.inner.tail);
        }
    }
}

impl Clone for Cons {
    fn clone(&self) -> Self {
        let cells: Vec<_> = self.cells().collect();
        let mut list = List::Empty;
        for cell in cells.into_iter().rev() {
            list = List::Cons(Cons {
                inner: Box::new(Cell {
                    head: cell.head.clone(),
                    tail: list,
                    meta: cell.meta.clone(),
                }),
            });
        }
        match list {
            List::Cons(cell) => cell,
            List::Empty => unreachable!("a cons cell yields at least one cell"),
        }
    }
}

impl Cons {
    fn cells(&self) -> impl Iterator<Item = &Cell> {
        let mut cursor = Some(&*self.inner);
        std::iter::from_fn(move || {
            let cell = cursor?;
            cursor = match &cell.tail {
                List::Cons(next) => Some(&*next.inner),
                List::Empty => None,
            };
            Some(cell)
        })
    }
}

impl List {
    /// Returns the empty list.
    pub fn new() -> Self {
        List::Empty
    }

    /// Prepends `head` to `tail`.
    pub fn cons(head: impl Into<Form>, tail: List) -> Self {
        List::Cons(Cons::new(head, tail))
    }

    /// Returns true for the empty list.
    pub fn is_empty(&self) -> bool {
        matches!(self, List::Empty)
    }

    /// Returns the number of elements; this walks the whole list.
    pub fn len(&self) -> usize {
        match self {
            List::Empty => 0,
            List::Cons(cell) => cell.len(),
        }
    }

    /// Returns the first element, if any.
    pub fn first(&self) -> Option<&Form> {
        self.as_cons().map(Cons::head)
    }

    /// Returns the list without its first element. The rest of the empty list
    /// is the empty list.
    pub fn rest(&self) -> &List {
        static EMPTY: List = List::Empty;
        match self {
            List::Empty => &EMPTY,
            List::Cons(cell) => cell.tail(),
        }
    }

    /// Returns the element at `index`, walking the list.
    pub fn get(&self, index: usize) -> Option<&Form> {
        self.iter().nth(index)
    }

    /// Returns the first cons cell, unless the list is empty.
    pub fn as_cons(&self) -> Option<&Cons> {
        match self {
            List::Empty => None,
            List::Cons(cell) => Some(cell),
        }
    }

    /// Returns the first cons cell mutably, unless the list is empty.
    pub fn as_cons_mut(&mut self) -> Option<&mut Cons> {
        match self {
            List::Empty => None,
            List::Cons(cell) => Some(cell),
        }
    }

    /// Returns an iterator yielding references to the elements.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cursor: self.as_cons(),
        }
    }

    /// Returns an iterator yielding mutable references to the elements.
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            cursor: self.as_cons_mut(),
        }
    }
}

impl Clone for List {
    fn clone(&self) -> Self {
        match self {
            List::Empty => List::Empty,
            List::Cons(cell) => List::Cons(cell.clone()),
        }
    }
}

impl PartialEq for List {
    fn eq(&self, other: &List) -> bool {
        let mut lhs = self.iter();
        let mut rhs = other.iter();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a == b => {}
                _ => return false,
            }
        }
    }
}

impl PartialEq for Cons {
    fn eq(&self, other: &Cons) -> bool {
        self.iter().eq(other.iter())
    }
}

impl fmt::Debug for List {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str("List")?;
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Debug for Cons {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str("Cons")?;
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Into<Form>> From<Vec<T>> for List {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().map(Into::into).collect()
    }
}

impl From<Cons> for List {
    fn from(cell: Cons) -> Self {
        List::Cons(cell)
    }
}

impl FromIterator<Form> for List {
    fn from_iter<I: IntoIterator<Item = Form>>(iter: I) -> Self {
        let elements: Vec<Form> = iter.into_iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(List::Empty, |tail, head| List::cons(head, tail))
    }
}

impl IntoIterator for List {
    type Item = Form;
    type IntoIter = IntoIter;

    /// Obtains an iterator yielding the elements of this list, transferring
    /// ownership to the consumer of the iterator.
    fn into_iter(self) -> IntoIter {
        IntoIter { cursor: self }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Form;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a Cons {
    type Item = &'a Form;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// An iterator over the elements of a list.
///
/// This is returned by the [`List::iter`] and [`Cons::iter`] methods.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    cursor: Option<&'a Cons>,
}

impl<'a> Iter<'a> {
    /// Returns the current cons cell, without advancing the iterator.
    pub fn peek(&self) -> Option<&'a Cons> {
        self.cursor
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Form;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cursor?;
        self.cursor = cell.tail().as_cons();
        Some(cell.head())
    }
}

/// An iterator over mutable references to the elements of a list.
///
/// This is returned by the [`List::iter_mut`] method.
pub struct IterMut<'a> {
    cursor: Option<&'a mut Cons>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut Form;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cursor.take()?;
        let Cell { head, tail, .. } = &mut *cell.inner;
        self.cursor = tail.as_cons_mut();
        Some(head)
    }
}

/// An iterator consuming a list.
///
/// This is returned by the [`List::into_iter`] method.
///
/// [`List::into_iter`]: enum.List.html#method.into_iter
pub struct IntoIter {
    cursor: List,
}

impl Iterator for IntoIter {
    type Item = Form;

    fn next(&mut self) -> Option<Self::Item> {
        match mem::take(&mut self.cursor) {
            List::Empty => None,
            List::Cons(cell) => {
                let (head, tail) = cell.into_pair();
                self.cursor = tail;
                Some(head)
            }
        }
    }
}
