//! Iteration utilities over any [`Collection`].
use std::ops::ControlFlow;

use crate::collection::Collection;

/// Calls `iterator` with each value, its key, and the collection itself.
///
/// Returning [`ControlFlow::Break`] from the callback stops the iteration, in which
/// case the break is also returned from this function.
///
/// # Example
///
/// ```
/// use std::ops::ControlFlow;
/// use loupe_collections::each;
///
/// let mut seen = vec![];
/// let flow = each(&[1, 2, 3], |value, _, _| {
///     seen.push(*value);
///     if *value == 2 {
///         ControlFlow::Break(())
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
/// assert!(flow.is_break());
/// assert_eq!(seen, [1, 2]);
/// ```
pub fn each<'c, C, F>(collection: &'c C, mut iterator: F) -> ControlFlow<()>
where
    C: Collection + ?Sized,
    F: FnMut(&'c C::Item, C::Key<'c>, &'c C) -> ControlFlow<()>,
{
    for (key, value) in collection.entries() {
        iterator(value, key, collection)?;
    }
    ControlFlow::Continue(())
}

/// Returns the values for which `predicate` is `true`, in iteration order.
pub fn filter<'c, C, P>(collection: &'c C, mut predicate: P) -> Vec<&'c C::Item>
where
    C: Collection + ?Sized,
    P: FnMut(&'c C::Item, C::Key<'c>, &'c C) -> bool,
{
    let mut results = Vec::with_capacity(collection.size());
    let _ = each(collection, |value, key, list| {
        if predicate(value, key, list) {
            results.push(value);
        }
        ControlFlow::Continue(())
    });
    results
}

/// Returns the values for which `predicate` is `false`, in iteration order.
pub fn reject<'c, C, P>(collection: &'c C, mut predicate: P) -> Vec<&'c C::Item>
where
    C: Collection + ?Sized,
    P: FnMut(&'c C::Item, C::Key<'c>, &'c C) -> bool,
{
    filter(collection, |value, key, list| !predicate(value, key, list))
}

/// Returns whether `predicate` is `true` for at least one value.
///
/// Stops at the first match.
pub fn any<'c, C, P>(collection: &'c C, mut predicate: P) -> bool
where
    C: Collection + ?Sized,
    P: FnMut(&'c C::Item, C::Key<'c>, &'c C) -> bool,
{
    each(collection, |value, key, list| {
        if predicate(value, key, list) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .is_break()
}

/// Returns whether `predicate` is `true` for every value. An empty collection
/// always passes.
///
/// Stops at the first mismatch.
pub fn all<'c, C, P>(collection: &'c C, mut predicate: P) -> bool
where
    C: Collection + ?Sized,
    P: FnMut(&'c C::Item, C::Key<'c>, &'c C) -> bool,
{
    !any(collection, |value, key, list| !predicate(value, key, list))
}

/// Returns whether `target` is equal to any value of the collection.
pub fn includes<C, T>(collection: &C, target: &T) -> bool
where
    C: Collection + ?Sized,
    C::Item: PartialEq<T>,
    T: ?Sized,
{
    any(collection, |value, _, _| value == target)
}

/// Returns the number of values in the collection; `0` when absent.
pub fn size<C: Collection + ?Sized>(collection: &C) -> usize {
    collection.size()
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::BTreeMap, ops::ControlFlow};

    use pretty_assertions::assert_eq;

    use super::*;

    fn is_even(value: &i32) -> bool {
        value % 2 == 0
    }

    #[test]
    fn each_visits_in_order() {
        let mut visited = vec![];
        let flow = each(&vec!['a', 'b', 'c'], |value, index, list| {
            assert_eq!(list.len(), 3);
            visited.push((index, *value));
            ControlFlow::Continue(())
        });
        assert!(flow.is_continue());
        assert_eq!(visited, [(0, 'a'), (1, 'b'), (2, 'c')]);

        let map = BTreeMap::from([("x", 1), ("y", 2)]);
        let mut keys = vec![];
        let _ = each(&map, |_, key, _| {
            keys.push(*key);
            ControlFlow::Continue(())
        });
        assert_eq!(keys, ["x", "y"]);
    }

    #[test]
    fn each_absent_is_noop() {
        let calls = Cell::new(0);
        let absent: Option<Vec<i32>> = None;
        let _ = each(&absent, |_, _, _| {
            calls.set(calls.get() + 1);
            ControlFlow::Continue(())
        });
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn each_stops_on_break() {
        let mut visited = 0;
        let flow = each(&[1, 2, 3, 4], |value, _, _| {
            visited += 1;
            if *value == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(flow.is_break());
        assert_eq!(visited, 2);
    }

    #[test]
    fn filter_and_reject() {
        let list = [1, 2, 3, 4];
        assert_eq!(filter(&list, |value, _, _| is_even(value)), [&2, &4]);
        assert_eq!(reject(&list, |value, _, _| is_even(value)), [&1, &3]);

        let absent: Option<Vec<i32>> = None;
        assert!(filter(&absent, |_, _, _| true).is_empty());
    }

    #[test]
    fn filter_over_mapping() {
        let map = BTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(filter(&map, |_, key, _| *key != "b"), [&1, &3]);
    }

    #[test]
    fn any_short_circuits() {
        let mut calls = 0;
        assert!(any(&[1, 2, 3, 4], |value, _, _| {
            calls += 1;
            is_even(value)
        }));
        assert_eq!(calls, 2);
        assert!(!any(&[1, 3], |value, _, _| is_even(value)));
        assert!(!any(&Vec::<i32>::new(), |_, _, _| true));
    }

    #[test]
    fn all_is_vacuous_on_empty() {
        assert!(all(&[2, 4], |value, _, _| is_even(value)));
        assert!(!all(&[2, 3], |value, _, _| is_even(value)));
        assert!(all(&Vec::<i32>::new(), |_, _, _| false));
    }

    #[test]
    fn includes_by_equality() {
        assert!(includes(&[1, 2, 3], &2));
        assert!(!includes(&[1, 2, 3], &9));
        assert!(includes(&vec![String::from("a")], "a"));

        let absent: Option<Vec<i32>> = None;
        assert!(!includes(&absent, &1));
    }

    #[test]
    fn size_of_collections() {
        let absent: Option<Vec<i32>> = None;
        assert_eq!(size(&absent), 0);
        assert_eq!(size(&[1, 2, 3]), 3);
        assert_eq!(size(&BTreeMap::from([("a", 1), ("b", 2)])), 2);
    }
}
