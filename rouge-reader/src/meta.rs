//! Metadata attachment.

use crate::Map;

/// Capability of carrying a metadata map.
///
/// Implemented by the form types that may be annotated with `^`: symbols,
/// non-empty lists, vectors, maps and sets.
pub trait Metadata {
    /// Returns the attached metadata, if any.
    fn meta(&self) -> Option<&Map>;

    /// Replaces the attached metadata.
    fn set_meta(&mut self, meta: Option<Map>);

    /// Merges `meta` into the attached metadata. Keys of `meta` replace
    /// existing entries for equal keys.
    ///
    /// ```
    /// # use rouge_reader::{Form, Map, Metadata, Symbol};
    /// let mut sym = Symbol::new("x");
    /// sym.merge_meta(Map::from_iter(vec![(Form::keyword("a"), Form::from(1))]));
    /// sym.merge_meta(Map::from_iter(vec![(Form::keyword("a"), Form::from(2))]));
    /// assert_eq!(sym.meta().unwrap().get(&Form::keyword("a")), Some(&Form::from(2)));
    /// ```
    fn merge_meta(&mut self, meta: Map) {
        let merged = match self.meta() {
            Some(existing) => {
                let mut merged = existing.clone();
                merged.extend(meta);
                merged
            }
            None => meta,
        };
        self.set_meta(Some(merged));
    }
}
