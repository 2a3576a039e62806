//! The error returned by every fallible operation of this crate.

use thiserror::Error;

/// An invalid argument passed to a [`Percolation`] or a threshold estimate.
///
/// Every check happens before any state is touched, so a call that returns an error
/// leaves the model exactly as it was.
///
/// This enum is marked `#[non_exhaustive]` and may include additional variants
/// in future releases.
///
/// [`Percolation`]: ../percolation/struct.Percolation.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PercolationError {
    /// The grid size is zero, or `size * size + 2` does not fit in a `usize`.
    #[error("grid size {size} must be positive and small enough to index every site")]
    InvalidSize { size: usize },
    /// A row or column lies outside `[1, size]`.
    #[error("site ({row}, {col}) is outside the {size}x{size} grid")]
    SiteOutOfBounds { row: usize, col: usize, size: usize },
    /// A threshold estimate needs at least one trial.
    #[error("a threshold estimate needs at least one trial")]
    NoTrials,
}

/// A result type alias to use with [`PercolationError`].
pub type Result<T, E = PercolationError> = std::result::Result<T, E>;
