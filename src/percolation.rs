//! An `n`-by-`n` grid of sites that can be opened one by one.
//!
//! See [`Percolation`] for more information.
//!
//! [`Percolation`]: struct.Percolation.html

use {
    bit_vec::BitVec,
    crate::{
        disjoint_sets::forest::DisjointSets,
        error::{PercolationError, Result},
    },
};
#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// The virtual node every site of the top row is joined with.
const TOP: usize = 0;

/// An `n`-by-`n` grid of sites that are either open or blocked.
///
/// Sites are addressed by 1-based `(row, col)` coordinates in `[1, n]`.
/// All sites start out blocked and can be opened with the `open` method, they are never
/// blocked again.
/// An open site is *full* if a chain of open neighbouring sites connects it to the top row,
/// and the grid *percolates* if some full site lies in the bottom row.
///
/// The connectivity is kept in two [`DisjointSets`] over the sites.
/// Both contain a virtual top node joined with every site of the top row.
/// Only the first one also contains a virtual bottom node joined with every site of the
/// bottom row, so a single query tells whether the grid percolates.
/// Once the grid percolates that bottom node connects every bottom site to the top, so
/// fullness is asked of the second forest instead, which has no such shortcut.
///
/// # Examples
///
/// ```
/// use percolation::Percolation;
///
/// # fn main() -> percolation::Result<()> {
/// let mut grid = Percolation::new(3)?;
///
/// grid.open(1, 2)?;
/// grid.open(2, 2)?;
/// assert!(grid.is_full(2, 2)?);
/// assert!(!grid.percolates());
///
/// grid.open(3, 2)?;
/// assert!(grid.percolates());
/// assert!(grid.number_of_open_sites() == 3);
/// # Ok(())
/// # }
/// ```
///
/// [`DisjointSets`]: ../disjoint_sets/forest/struct.DisjointSets.html
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Percolation {
    /// The length of a side of the grid.
    size: usize,
    /// One bit per site, indexed by `offset`.
    open: BitVec,
    /// The amount of set bits in `open`.
    open_count: usize,
    /// Nodes `TOP`, the sites and a virtual bottom node.
    percolation_sets: DisjointSets,
    /// Nodes `TOP` and the sites.
    fullness_sets: DisjointSets,
}

impl Percolation {
    /// Constructs a `size`-by-`size` grid with every site blocked.
    ///
    /// # Errors
    ///
    /// Returns [`PercolationError::InvalidSize`] if `size` is zero or the grid has too
    /// many sites to index.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolation::{Percolation, PercolationError};
    ///
    /// let grid = Percolation::new(4).unwrap();
    /// assert!(grid.size() == 4);
    /// assert!(grid.number_of_open_sites() == 0);
    ///
    /// assert!(Percolation::new(0) == Err(PercolationError::InvalidSize { size: 0 }));
    /// ```
    ///
    /// [`PercolationError::InvalidSize`]: ../error/enum.PercolationError.html
    pub fn new(size: usize) -> Result<Self> {
        let sites = size.checked_mul(size)
            .filter(|&sites| sites > 0 && sites.checked_add(2).is_some())
            .ok_or(PercolationError::InvalidSize { size })?;

        Ok(Self::blocked(size, sites))
    }

    /// Builds the grid for a size that is already known to be valid.
    fn blocked(size: usize, sites: usize) -> Self {
        let mut grid = Self {
            size,
            open: bit_vec![false; sites],
            open_count: 0,
            percolation_sets: DisjointSets::new(sites + 2),
            fullness_sets: DisjointSets::new(sites + 1),
        };

        let bottom = grid.bottom();

        // These unions model touching the boundary, not being open.
        for col in 1 ..= size {
            let top_site = grid.offset(1, col) + 1;
            grid.percolation_sets.union(TOP, top_site);
            grid.fullness_sets.union(TOP, top_site);

            let bottom_site = grid.offset(size, col) + 1;
            grid.percolation_sets.union(bottom, bottom_site);
        }

        grid
    }

    /// Returns the length of a side of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Opens the site at `(row, col)` if it is not open already.
    ///
    /// The site is joined with each of its up to four neighbours that are open.
    ///
    /// # Errors
    ///
    /// Returns [`PercolationError::SiteOutOfBounds`] if `row` or `col` is outside
    /// `[1, size]`. The grid is not changed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolation::Percolation;
    ///
    /// let mut grid = Percolation::new(2).unwrap();
    ///
    /// grid.open(2, 1).unwrap();
    /// grid.open(2, 1).unwrap();
    /// assert!(grid.number_of_open_sites() == 1);
    ///
    /// assert!(grid.open(3, 1).is_err());
    /// assert!(grid.number_of_open_sites() == 1);
    /// ```
    ///
    /// [`PercolationError::SiteOutOfBounds`]: ../error/enum.PercolationError.html
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.site(row, col)?;

        if !self.open[site] {
            self.open_unchecked(row, col);
        }

        Ok(())
    }

    /// Returns `true` if the site at `(row, col)` has been opened.
    ///
    /// # Errors
    ///
    /// Returns [`PercolationError::SiteOutOfBounds`] if `row` or `col` is outside
    /// `[1, size]`.
    ///
    /// [`PercolationError::SiteOutOfBounds`]: ../error/enum.PercolationError.html
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.site(row, col)?;

        Ok(self.open[site])
    }

    /// Returns `true` if the site at `(row, col)` is open and connected to the top row
    /// through open sites.
    ///
    /// A blocked site is never full, even in the top row.
    ///
    /// # Errors
    ///
    /// Returns [`PercolationError::SiteOutOfBounds`] if `row` or `col` is outside
    /// `[1, size]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolation::Percolation;
    ///
    /// let mut grid = Percolation::new(2).unwrap();
    /// assert!(!grid.is_full(1, 1).unwrap());
    ///
    /// grid.open(1, 1).unwrap();
    /// grid.open(2, 2).unwrap();
    /// assert!(grid.is_full(1, 1).unwrap());
    /// assert!(!grid.is_full(2, 2).unwrap());
    /// ```
    ///
    /// [`PercolationError::SiteOutOfBounds`]: ../error/enum.PercolationError.html
    pub fn is_full(&self, row: usize, col: usize) -> Result<bool> {
        let site = self.site(row, col)?;

        Ok(self.open[site] && self.fullness_sets.connected(TOP, site + 1))
    }

    /// Returns the amount of open sites.
    ///
    /// This will be done in `O(1)` time.
    #[inline]
    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Returns the fraction of the sites that are open.
    ///
    /// Read at the moment the grid starts to percolate this is one sample of the
    /// percolation threshold.
    #[inline]
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.open.len() as f64
    }

    /// Returns `true` if an open path connects the top row with the bottom row.
    ///
    /// # Examples
    ///
    /// ```
    /// use percolation::Percolation;
    ///
    /// let mut grid = Percolation::new(1).unwrap();
    /// assert!(!grid.percolates());
    ///
    /// grid.open(1, 1).unwrap();
    /// assert!(grid.percolates());
    /// ```
    pub fn percolates(&self) -> bool {
        // The only site of a 1-by-1 grid is joined with both virtual nodes up front.
        if self.size == 1 && !self.open[0] {
            return false
        }

        self.percolation_sets.connected(TOP, self.bottom())
    }

    /// Opens a blocked site with valid coordinates.
    fn open_unchecked(&mut self, row: usize, col: usize) {
        let site = self.offset(row, col);
        debug_assert!(!self.open[site]);

        self.open.set(site, true);
        self.open_count += 1;

        // Rows and columns start at 1, so subtracting one can only leave the grid.
        let neighbours = [
            (row - 1, col),
            (row + 1, col),
            (row, col - 1),
            (row, col + 1),
        ];

        for &(neighbour_row, neighbour_col) in &neighbours {
            if !self.contains(neighbour_row, neighbour_col) {
                continue
            }

            let neighbour = self.offset(neighbour_row, neighbour_col);

            if self.open[neighbour] {
                self.percolation_sets.union(site + 1, neighbour + 1);
                self.fullness_sets.union(site + 1, neighbour + 1);
            }
        }
    }

    /// Returns the offset of `(row, col)` after checking it lies in the grid.
    fn site(&self, row: usize, col: usize) -> Result<usize> {
        if self.contains(row, col) {
            Ok(self.offset(row, col))
        } else {
            Err(PercolationError::SiteOutOfBounds { row, col, size: self.size })
        }
    }

    #[inline]
    fn contains(&self, row: usize, col: usize) -> bool {
        (1 ..= self.size).contains(&row) && (1 ..= self.size).contains(&col)
    }

    /// The zero-based position of a site in `open`.
    ///
    /// The node of the site in both forests is one higher, node `0` being `TOP`.
    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.size + (col - 1)
    }

    /// The virtual node every site of the bottom row is joined with.
    #[inline]
    fn bottom(&self) -> usize {
        self.open.len() + 1
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for Percolation {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    /// A grid with a side in `1 ..= 12` where each site is open with a probability
    /// slightly above the percolation threshold.
    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1usize ..= 12).prop_flat_map(|size| {
            proptest::collection::vec(prop::bool::weighted(0.6), size * size)
                .prop_map(move |open| {
                    let mut grid = Self::blocked(size, size * size);

                    for (site, _) in open.into_iter().enumerate().filter(|&(_, open)| open) {
                        grid.open_unchecked(site / size + 1, site % size + 1);
                    }

                    grid
                })
        }).boxed()
    }
}
