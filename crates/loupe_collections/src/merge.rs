//! Shallow merging of mappings.

/// A source for [`extend`], which may be absent
pub trait Source<'s, S: ?Sized> {
    /// Returns the source, if present
    fn source(self) -> Option<&'s S>;
}

impl<'s, S: ?Sized> Source<'s, S> for &'s S {
    fn source(self) -> Option<&'s S> {
        Some(self)
    }
}

impl<'s, S: ?Sized> Source<'s, S> for Option<&'s S> {
    fn source(self) -> Option<&'s S> {
        self
    }
}

/// Copies the entries of each present source onto `target`, returning `target`.
///
/// Sources are applied in order, so the last source containing a key wins. The
/// copy is shallow; values are cloned as-is.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use loupe_collections::extend;
///
/// let mut target = BTreeMap::from([("a", 1)]);
/// let b = BTreeMap::from([("b", 2)]);
/// let a = BTreeMap::from([("a", 3)]);
/// extend(&mut target, [&b, &a]);
/// assert_eq!(target, BTreeMap::from([("a", 3), ("b", 2)]));
/// ```
pub fn extend<'t, 's, T, S, K, V, I>(target: &'t mut T, sources: I) -> &'t mut T
where
    T: Extend<(K, V)> + ?Sized,
    S: ?Sized + 's,
    &'s S: IntoIterator<Item = (&'s K, &'s V)>,
    K: Clone + 's,
    V: Clone + 's,
    I: IntoIterator,
    I::Item: Source<'s, S>,
{
    for source in sources.into_iter().filter_map(Source::source) {
        target.extend(
            source
                .into_iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }
    target
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use pretty_assertions::assert_eq;

    use super::extend;

    #[test]
    fn last_source_wins() {
        let mut target = BTreeMap::from([("a", 1)]);
        let b = BTreeMap::from([("b", 2)]);
        let a = BTreeMap::from([("a", 3)]);

        let result = extend(&mut target, [&b, &a]);
        assert_eq!(*result, BTreeMap::from([("a", 3), ("b", 2)]));
    }

    #[test]
    fn absent_sources_are_skipped() {
        let mut target: HashMap<String, u8> = HashMap::new();
        let source = HashMap::from([(String::from("key"), 1)]);

        extend(&mut target, [None, Some(&source), None]);
        assert_eq!(target, source);
    }

    #[test]
    fn sources_are_untouched() {
        let mut target = BTreeMap::from([("a", vec![1])]);
        let source = BTreeMap::from([("a", vec![2])]);

        extend(&mut target, [&source]);
        assert_eq!(target["a"], [2]);
        assert_eq!(source["a"], [2]);
    }
}
