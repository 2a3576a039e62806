//! An `n`-by-`n` [percolation] model built on a [disjoint-sets/union-find] forest.
//!
//! The main struct of this crate is [`Percolation`], a square grid of sites that start out
//! blocked and can be opened one at a time.
//! An open site is full if it is connected to the top row through open neighbouring sites,
//! and the grid percolates if the top row is connected to the bottom row.
//! Opening a site and asking whether a site is full or the grid percolates all run in
//! `O(α(n))` amortized time where 'α' is the inverse Ackermann function.
//!
//! This is the primitive of a Monte-Carlo estimate of the percolation threshold:
//! open random sites until the grid percolates and record the fraction of open sites.
//! The [`stats`] module runs such trials for a caller-chosen order of sites and summarizes
//! the samples in a [`ThresholdEstimate`].
//! This crate draws no random numbers itself.
//!
//! ```
//! use percolation::Percolation;
//!
//! # fn main() -> percolation::Result<()> {
//! let mut grid = Percolation::new(2)?;
//! grid.open(1, 1)?;
//! grid.open(2, 1)?;
//!
//! assert!(grid.percolates());
//! assert!(grid.is_full(1, 1)?);
//! assert!(!grid.is_full(2, 2)?);
//! assert!(grid.number_of_open_sites() == 2);
//! # Ok(())
//! # }
//! ```
//!
//! The connectivity is kept by [`DisjointSets`], which stores two additional `usize` values
//! for each element.
//! A more compact representation is included that packs both into one `usize`.
//! This is a feature and can be enabled by adding the following to your `Cargo.toml` file:
//! ```toml
//! [dependencies.percolation]
//! version = "0.1"
//! features = ["compact"]
//! ```
//!
//! [percolation]: https://en.wikipedia.org/wiki/Percolation_theory
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`Percolation`]: percolation/struct.Percolation.html
//! [`stats`]: stats/index.html
//! [`ThresholdEstimate`]: stats/struct.ThresholdEstimate.html
//! [`DisjointSets`]: disjoint_sets/forest/struct.DisjointSets.html

extern crate bit_vec;
#[cfg(feature = "rayon")]
extern crate rayon;

/// A convenient macro to create a `BitVec` similar to `vec!`.
macro_rules! bit_vec {
    ($element: expr; $len: expr) => {
        ::bit_vec::BitVec::from_elem($len, $element)
    };
}

pub mod disjoint_sets;
pub mod error;
pub mod percolation;
pub mod stats;

pub use {
    disjoint_sets::forest::DisjointSets,
    error::{PercolationError, Result},
    percolation::Percolation,
    stats::ThresholdEstimate,
};
