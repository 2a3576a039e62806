//! A [disjoint-sets/union-find] forest over a fixed universe of indices.
//!
//! See [`DisjointSets`] for more information.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`DisjointSets`]: struct.DisjointSets.html

use {
    std::{
        cmp::Ordering,
        collections::HashMap,
        fmt,
    },
    crate::disjoint_sets::metadata::Metadata,
};
#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// A [disjoint-sets/union-find] forest over the indices `0 .. len`.
///
/// Each index starts out in its own set and sets can be joined with the `union` method.
/// You can check if two indices share a set with the `connected` method.
/// Both run in amortized `O(α(n))` time where `α` is the inverse Ackermann function,
/// because trees are joined by rank and flattened by path compression.
///
/// The forest never exposes the representative of a set.
/// This keeps the representative an implementation detail which gives us the freedom
/// to move it around while compressing paths, even behind a shared reference.
///
/// # Examples
///
/// ```
/// use percolation::DisjointSets;
///
/// let mut sets = DisjointSets::new(4);
/// sets.union(1, 2);
/// sets.union(2, 3);
///
/// assert!(sets.connected(1, 3));
/// assert!(!sets.connected(0, 3));
/// assert!(sets.amount_of_sets() == 2);
/// ```
///
/// [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
#[derive(Clone)]
pub struct DisjointSets {
    meta: Vec<Metadata>,
}

impl DisjointSets {
    /// Constructs a forest of `len` singleton sets.
    ///
    /// # Panics
    ///
    /// With the `compact` feature, panics if `len` exceeds the amount of elements the
    /// packed representation can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolation::DisjointSets;
    ///
    /// let sets = DisjointSets::new(3);
    ///
    /// assert!(sets.len() == 3);
    /// assert!(sets.amount_of_sets() == 3);
    /// ```
    pub fn new(len: usize) -> Self {
        Self {
            meta: (0 .. len).map(Metadata::new).collect(),
        }
    }

    /// Returns the amount of elements in the forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.meta.len()
    }

    /// Returns `true` if the forest contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    /// Joins the sets of the `first_index` and the `second_index`.
    ///
    /// This method will be executed in `O(α(n))` time where `α` is the inverse
    /// Ackermann function. The inverse Ackermann function has value below 5
    /// for any value of `n` that can be written in the physical universe.
    ///
    /// # Panics
    ///
    /// If `first_index` or `second_index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolation::DisjointSets;
    ///
    /// let mut sets = DisjointSets::new(4);
    ///
    /// sets.union(0, 1);
    /// assert!(sets.amount_of_sets() == 3);
    ///
    /// // Joining two members of one set changes nothing.
    /// sets.union(1, 0);
    /// assert!(sets.amount_of_sets() == 3);
    ///
    /// sets.union(3, 1);
    /// assert!(sets.connected(0, 3));
    /// assert!(sets.amount_of_sets() == 2);
    /// ```
    pub fn union(&mut self, first_index: usize, second_index: usize) {
        let i = self.find(first_index);
        let j = self.find(second_index);

        if i == j {
            return
        }

        // We add to the tree with the highest rank.
        match Ord::cmp(&self.meta[i].rank(), &self.meta[j].rank()) {
            Ordering::Less => {
                self.meta[i].set_parent(j);
            },
            Ordering::Equal => {
                // We add the first tree to the second tree.
                self.meta[i].set_parent(j);
                // The second tree becomes higher.
                self.meta[j].set_rank(self.meta[j].rank() + 1);
            },
            Ordering::Greater => {
                self.meta[j].set_parent(i);
            },
        }
    }

    /// Returns `true` if `first_index` and `second_index` are in the same set.
    ///
    /// This method will be executed in `O(α(n))` time where `α` is the inverse
    /// Ackermann function.
    ///
    /// # Panics
    ///
    /// If `first_index` or `second_index` are out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolation::DisjointSets;
    ///
    /// let mut sets = DisjointSets::new(4);
    ///
    /// sets.union(1, 3);
    /// sets.union(0, 1);
    ///
    /// assert!(sets.connected(0, 1));
    /// assert!(!sets.connected(0, 2));
    /// assert!(sets.connected(0, 3));
    /// assert!(!sets.connected(1, 2));
    /// assert!(sets.connected(1, 3));
    /// assert!(!sets.connected(2, 3));
    /// ```
    #[inline]
    pub fn connected(&self, first_index: usize, second_index: usize) -> bool {
        self.find(first_index) == self.find(second_index)
    }

    /// Returns the amount of sets in the forest.
    ///
    /// This method will be executed in `O(n α(n))` where `α` is the inverse Ackermann function.
    pub fn amount_of_sets(&self) -> usize {
        let mut done = bit_vec![false; self.len()];
        let mut count = 0;

        for i in 0 .. self.len() {
            let root = self.find(i);

            if !done[root] {
                done.set(root, true);
                count += 1;
            }
        }

        count
    }

    /// Gives the representative of the set that `index` belongs to.
    ///
    /// This method will be executed in `O(α(n))` time where `α` is the inverse
    /// Ackermann function. Each index of a set will give the same value.
    ///
    /// This method is private to keep the representative of the set an implementation
    /// detail, this gives greater freedom to change the representative of the set.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub(crate) fn find(&self, index: usize) -> usize {
        // If the node is its own parent we have found the root.
        if self.meta[index].parent() == index {
            index
        } else {
            // This method is recursive so each parent on the way to the root is updated.
            // Union by rank keeps the depth logarithmic in the amount of elements.
            let root = self.find(self.meta[index].parent());

            // We update the parent to the root for a lower tree.
            self.meta[index].set_parent(root);

            root
        }
    }
}

impl fmt::Debug for DisjointSets {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        // We map the roots to `usize` names.
        let mut map = HashMap::with_capacity(self.len());
        let mut builder = formatter.debug_list();
        let mut names = 0;

        for i in 0 .. self.len() {
            let root = self.find(i);

            let name = *map.entry(root).or_insert_with(|| {
                let new_name = names;
                names += 1;

                new_name
            });

            builder.entry(&name);
        }

        builder.finish()
    }
}

impl PartialEq for DisjointSets {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false
        }

        // We map the roots of self to the roots of other and back.
        let mut forward = HashMap::with_capacity(self.len());
        let mut backward = HashMap::with_capacity(self.len());

        for i in 0 .. self.len() {
            let self_root = self.find(i);
            let other_root = other.find(i);

            if *forward.entry(self_root).or_insert(other_root) != other_root {
                return false
            }
            if *backward.entry(other_root).or_insert(self_root) != self_root {
                return false
            }
        }

        true
    }
}

impl Eq for DisjointSets {}

#[cfg(feature = "proptest")]
impl Arbitrary for DisjointSets {
    type Parameters = proptest::collection::SizeRange;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(size_range: Self::Parameters) -> Self::Strategy {
        use std::collections::hash_map;

        proptest::collection::vec(any::<usize>(), size_range).prop_map(|set_numbers| {
            let mut sets = Self::new(set_numbers.len());

            // We map a `set_number` to an `index` of that set.
            let mut map = HashMap::with_capacity(set_numbers.len());

            for (index, set_number) in set_numbers.into_iter().enumerate() {
                // Few distinct set numbers so sets actually get joined.
                match map.entry(set_number.trailing_zeros()) {
                    hash_map::Entry::Occupied(occupied) => {
                        sets.union(index, *occupied.get());
                    },
                    hash_map::Entry::Vacant(vacant) => {
                        vacant.insert(index);
                    }
                }
            }

            sets
        }).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "proptest")]
    use proptest::prelude::*;

    #[test]
    fn empty_forest() {
        let sets = DisjointSets::new(0);

        assert!(sets.is_empty());
        assert_eq!(sets.amount_of_sets(), 0);
        assert_eq!(format!("{:?}", sets), "[]");
    }

    #[test]
    fn debug_names_sets_in_order_of_appearance() {
        let mut sets = DisjointSets::new(5);
        sets.union(4, 1);
        sets.union(3, 0);

        assert_eq!(format!("{:?}", sets), "[0, 1, 2, 0, 1]");
    }

    #[test]
    fn equality_ignores_representatives() {
        let mut first = DisjointSets::new(4);
        first.union(0, 1);
        first.union(1, 2);

        let mut second = DisjointSets::new(4);
        second.union(2, 1);
        second.union(0, 2);

        assert_eq!(first, second);

        second.union(3, 0);
        assert_ne!(first, second);
        assert_ne!(first, DisjointSets::new(3));
    }

    #[test]
    fn long_chains_stay_connected() {
        let len = 10_000;
        let mut sets = DisjointSets::new(len);

        for i in 1 .. len {
            sets.union(i - 1, i);
        }

        assert!(sets.connected(0, len - 1));
        assert_eq!(sets.amount_of_sets(), 1);
    }

    #[cfg(feature = "proptest")]
    proptest! {
        #[test]
        fn union_joins_exactly_two_sets(
            mut sets in any_with::<DisjointSets>((1 .. 64).into()),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let a = a.index(sets.len());
            let b = b.index(sets.len());
            let before = sets.amount_of_sets();
            let were_connected = sets.connected(a, b);

            sets.union(a, b);

            prop_assert!(sets.connected(a, b));
            prop_assert!(sets.connected(b, a));
            if were_connected {
                prop_assert_eq!(sets.amount_of_sets(), before);
            } else {
                prop_assert_eq!(sets.amount_of_sets(), before - 1);
            }
        }

        #[test]
        fn connected_is_transitive(
            sets in any_with::<DisjointSets>((1 .. 32).into()),
        ) {
            for a in 0 .. sets.len() {
                for b in 0 .. sets.len() {
                    for c in 0 .. sets.len() {
                        if sets.connected(a, b) && sets.connected(b, c) {
                            prop_assert!(sets.connected(a, c));
                        }
                    }
                }
            }
        }

        #[test]
        fn clones_are_equal(sets in any_with::<DisjointSets>((0 .. 64).into())) {
            prop_assert_eq!(sets.clone(), sets);
        }
    }
}
