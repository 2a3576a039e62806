use std::cell::Cell;

/// The parent and rank of a single element of a `DisjointSets`.
///
/// For each element in the `DisjointSets` we store a `Metadata`.
#[cfg(not(feature = "compact"))]
#[derive(Clone, Debug, Default)]
pub(crate) struct Metadata {
    /// The parent of the element in its sets tree.
    /// These form an upside down tree where each child has the index of its parent.
    parent: Cell<usize>,
    /// An upper bound for the height of the tree below this element.
    rank: Cell<usize>,
}

#[cfg(not(feature = "compact"))]
impl Metadata {
    /// Create a new `Metadata` for a root element with the given index.
    pub(crate) fn new(index: usize) -> Self {
        Self {
            parent: Cell::new(index),
            rank: Cell::new(0),
        }
    }

    /// Return the `parent` variable.
    pub(crate) fn parent(&self) -> usize {
        self.parent.get()
    }

    /// Set the `parent` variable.
    pub(crate) fn set_parent(&self, value: usize) {
        self.parent.set(value);
    }

    /// Return the `rank` variable.
    pub(crate) fn rank(&self) -> usize {
        self.rank.get()
    }

    /// Set the `rank` variable.
    pub(crate) fn set_rank(&self, value: usize) {
        self.rank.set(value);
    }
}

// A tree of rank r holds at least 2 ^ r elements, so the rank of any tree that fits in
// memory is below the amount of bits in a `usize`.
// Storing a number below 2 ^ k needs k bits, which for the pointer width 2 ^ k is
// exactly the amount of trailing zeros of `usize::BITS`.
#[cfg(feature = "compact")]
const RANK_BITS: u32 = usize::BITS.trailing_zeros();
#[cfg(feature = "compact")]
const MASK: usize = (1 << RANK_BITS) - 1;
/// The largest index a compact `Metadata` can store as its parent.
#[cfg(feature = "compact")]
pub(crate) const MAX: usize = usize::MAX >> RANK_BITS;

/// The parent and rank of a single element of a `DisjointSets`.
///
/// The rank is stored in the lowest `RANK_BITS` bits of the parent word.
#[cfg(feature = "compact")]
#[derive(Clone, Debug, Default)]
pub(crate) struct Metadata {
    packed: Cell<usize>,
}

#[cfg(feature = "compact")]
impl Metadata {
    /// Create a new `Metadata` for a root element with the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is above the maximum amount of elements a `DisjointSets` can
    /// store with the compact representation.
    pub(crate) fn new(index: usize) -> Self {
        if index > MAX {
            panic!("A compact DisjointSets can only hold {} elements.", MAX)
        }

        Self {
            packed: Cell::new(index << RANK_BITS),
        }
    }

    /// Return the `parent` variable.
    pub(crate) fn parent(&self) -> usize {
        self.packed.get() >> RANK_BITS
    }

    /// Set the `parent` variable.
    pub(crate) fn set_parent(&self, value: usize) {
        let old = self.packed.get();
        self.packed.set((old & MASK) | (value << RANK_BITS));
    }

    /// Return the `rank` variable.
    pub(crate) fn rank(&self) -> usize {
        self.packed.get() & MASK
    }

    /// Set the `rank` variable.
    pub(crate) fn set_rank(&self, value: usize) {
        debug_assert!(value <= MASK);

        let old = self.packed.get();
        self.packed.set((old & !MASK) | (value & MASK));
    }
}
