//! The [`Collection`] trait for ordered sequences and key-value mappings.
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    hash::BuildHasher,
};

use smallvec::{Array, SmallVec};

/// A read-only view over either an ordered sequence or a key-value mapping.
///
/// Sequences are keyed by the index of each item and mappings by a reference to
/// the key of each entry. An absent collection is represented with [`None`],
/// which behaves as an empty collection.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use loupe_collections::Collection;
///
/// let list = vec!["a", "b"];
/// assert_eq!(list.entries().collect::<Vec<_>>(), vec![(0, &"a"), (1, &"b")]);
///
/// let map = BTreeMap::from([("a", 1)]);
/// assert_eq!(map.entries().collect::<Vec<_>>(), vec![(&"a", &1)]);
/// ```
pub trait Collection {
    /// The position an item is found at; `usize` for sequences, `&K` for mappings
    type Key<'a>
    where
        Self: 'a;
    /// The type of each value held by the collection
    type Item;

    /// Returns each item alongside its key, in iteration order.
    fn entries(&self) -> impl Iterator<Item = (Self::Key<'_>, &Self::Item)>;

    /// Returns the number of items in the collection
    fn size(&self) -> usize;

    /// Returns whether the collection holds no items
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<T> Collection for [T] {
    type Key<'a>
        = usize
    where
        Self: 'a;
    type Item = T;

    fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.iter().enumerate()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Collection for [T; N] {
    type Key<'a>
        = usize
    where
        Self: 'a;
    type Item = T;

    fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.iter().enumerate()
    }

    fn size(&self) -> usize {
        N
    }
}

impl<T> Collection for Vec<T> {
    type Key<'a>
        = usize
    where
        Self: 'a;
    type Item = T;

    fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.iter().enumerate()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> Collection for VecDeque<T> {
    type Key<'a>
        = usize
    where
        Self: 'a;
    type Item = T;

    fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.iter().enumerate()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<A: Array> Collection for SmallVec<A> {
    type Key<'a>
        = usize
    where
        Self: 'a;
    type Item = A::Item;

    fn entries(&self) -> impl Iterator<Item = (usize, &A::Item)> {
        self.iter().enumerate()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K, V> Collection for BTreeMap<K, V> {
    type Key<'a>
        = &'a K
    where
        Self: 'a;
    type Item = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K, V, S: BuildHasher> Collection for HashMap<K, V, S> {
    type Key<'a>
        = &'a K
    where
        Self: 'a;
    type Item = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

#[cfg(feature = "serde")]
impl Collection for serde_json::Map<String, serde_json::Value> {
    type Key<'a>
        = &'a String
    where
        Self: 'a;
    type Item = serde_json::Value;

    fn entries(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<C: Collection> Collection for Option<C> {
    type Key<'a>
        = C::Key<'a>
    where
        Self: 'a;
    type Item = C::Item;

    fn entries(&self) -> impl Iterator<Item = (C::Key<'_>, &C::Item)> {
        self.iter().flat_map(Collection::entries)
    }

    fn size(&self) -> usize {
        self.as_ref().map_or(0, Collection::size)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap, VecDeque};

    use smallvec::{smallvec, SmallVec};

    use super::Collection;

    #[test]
    fn sequences_are_keyed_by_index() {
        let deque = VecDeque::from([3, 4]);
        assert_eq!(deque.entries().collect::<Vec<_>>(), vec![(0, &3), (1, &4)]);

        let small: SmallVec<[char; 2]> = smallvec!['x'];
        assert_eq!(small.entries().collect::<Vec<_>>(), vec![(0, &'x')]);
        assert_eq!([1, 2, 3].size(), 3);
    }

    #[test]
    fn mappings_are_keyed_by_key() {
        let map = BTreeMap::from([("b", 2), ("a", 1)]);
        assert_eq!(
            map.entries().collect::<Vec<_>>(),
            vec![(&"a", &1), (&"b", &2)],
            "btree maps iterate in key order"
        );

        let map: HashMap<_, _> = HashMap::from([("only", ())]);
        assert_eq!(map.size(), 1);
    }

    #[test]
    fn absent_is_empty() {
        let absent: Option<Vec<u8>> = None;
        assert_eq!(absent.size(), 0);
        assert!(absent.is_empty());
        assert_eq!(absent.entries().count(), 0);

        let present = Some(vec![1u8]);
        assert_eq!(present.entries().collect::<Vec<_>>(), vec![(0, &1)]);
    }
}
