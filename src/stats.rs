//! Monte-Carlo estimation of the percolation threshold.
//!
//! A trial opens sites of a blocked grid one at a time until it percolates, the fraction
//! of open sites at that moment is one sample of the threshold.
//! The order in which sites are opened is up to the caller, usually it is drawn at random.
//! Many samples are then summarized by a [`ThresholdEstimate`].
//!
//! [`ThresholdEstimate`]: struct.ThresholdEstimate.html

use crate::{
    error::{PercolationError, Result},
    percolation::Percolation,
};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// The quantile of the standard normal distribution for a 95% confidence interval.
const CONFIDENCE_95: f64 = 1.96;

/// Runs one trial on a `size`-by-`size` grid, opening `sites` in order.
///
/// Returns the open fraction at the first moment the grid percolates,
/// or `None` if `sites` runs out before that.
/// Sites that are already open count once.
///
/// # Errors
///
/// Returns an error if `size` is invalid or one of the sites lies outside the grid.
///
/// # Examples
///
/// ```
/// use percolation::stats::trial;
///
/// // Row by row, the grid percolates when the first site of the last row opens.
/// let sites = (1 ..= 3).flat_map(|row| (1 ..= 3).map(move |col| (row, col)));
///
/// assert!(trial(3, sites).unwrap() == Some(7.0 / 9.0));
/// assert!(trial(3, vec![(1, 1), (2, 1)]).unwrap() == None);
/// ```
pub fn trial<I>(size: usize, sites: I) -> Result<Option<f64>>
    where I: IntoIterator<Item = (usize, usize)>
{
    let mut grid = Percolation::new(size)?;

    for (row, col) in sites {
        grid.open(row, col)?;

        if grid.percolates() {
            return Ok(Some(grid.open_fraction()))
        }
    }

    Ok(None)
}

/// A summary of threshold samples taken from independent trials.
///
/// Samples are accumulated as a running mean and a sum of squared deviations from it,
/// so estimates over disjoint samples can be merged without losing precision.
///
/// # Examples
///
/// ```
/// use percolation::ThresholdEstimate;
///
/// let estimate = ThresholdEstimate::from_thresholds(vec![0.5, 0.6, 0.7]).unwrap();
///
/// assert!(estimate.trials() == 3);
/// assert!((estimate.mean() - 0.6).abs() < 1e-12);
/// assert!((estimate.stddev() - 0.1).abs() < 1e-12);
/// assert!(estimate.confidence_lo() < estimate.mean());
/// assert!(estimate.confidence_hi() > estimate.mean());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdEstimate {
    trials: usize,
    mean: f64,
    /// The sum of the squared deviations from `mean`.
    m2: f64,
}

impl ThresholdEstimate {
    /// Summarizes the given threshold samples.
    ///
    /// # Errors
    ///
    /// Returns [`PercolationError::NoTrials`] if `thresholds` is empty.
    ///
    /// [`PercolationError::NoTrials`]: ../error/enum.PercolationError.html
    pub fn from_thresholds<I>(thresholds: I) -> Result<Self>
        where I: IntoIterator<Item = f64>
    {
        thresholds.into_iter()
            .fold(Self::empty(), Self::push)
            .non_empty()
    }

    /// Summarizes threshold samples that are produced in parallel.
    ///
    /// Each trial should own its grid, a `Percolation` is not meant to be shared.
    ///
    /// # Errors
    ///
    /// Returns [`PercolationError::NoTrials`] if `thresholds` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use {
    ///     percolation::{stats::trial, ThresholdEstimate},
    ///     rayon::prelude::*,
    /// };
    ///
    /// let estimate = ThresholdEstimate::from_par_thresholds((1 ..= 4usize).into_par_iter().map(|col| {
    ///     let column = (1 ..= 4).map(move |row| (row, col));
    ///     trial(4, column).unwrap().unwrap()
    /// })).unwrap();
    ///
    /// assert!(estimate.trials() == 4);
    /// assert!(estimate.mean() == 0.25);
    /// ```
    ///
    /// [`PercolationError::NoTrials`]: ../error/enum.PercolationError.html
    #[cfg(feature = "rayon")]
    pub fn from_par_thresholds<I>(thresholds: I) -> Result<Self>
        where I: IntoParallelIterator<Item = f64>
    {
        thresholds.into_par_iter()
            .fold(Self::empty, Self::push)
            .reduce(Self::empty, Self::merge)
            .non_empty()
    }

    /// Returns the amount of samples.
    #[inline]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Returns the sample mean of the thresholds.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the sample standard deviation of the thresholds.
    ///
    /// This is `NaN` for a single trial.
    pub fn stddev(&self) -> f64 {
        if self.trials < 2 {
            return f64::NAN
        }

        (self.m2 / (self.trials - 1) as f64).sqrt()
    }

    /// Returns the low endpoint of the 95% confidence interval of the mean.
    pub fn confidence_lo(&self) -> f64 {
        self.mean - self.half_width()
    }

    /// Returns the high endpoint of the 95% confidence interval of the mean.
    pub fn confidence_hi(&self) -> f64 {
        self.mean + self.half_width()
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev() / (self.trials as f64).sqrt()
    }

    fn empty() -> Self {
        Self {
            trials: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    fn push(mut self, threshold: f64) -> Self {
        self.trials += 1;

        let delta = threshold - self.mean;
        self.mean += delta / self.trials as f64;
        self.m2 += delta * (threshold - self.mean);

        self
    }

    /// Combines the estimates of two disjoint groups of samples.
    fn merge(self, other: Self) -> Self {
        if self.trials == 0 {
            return other
        }
        if other.trials == 0 {
            return self
        }

        let trials = self.trials + other.trials;
        let (left, right, total) = (self.trials as f64, other.trials as f64, trials as f64);
        let delta = other.mean - self.mean;

        Self {
            trials,
            mean: self.mean + delta * right / total,
            m2: self.m2 + other.m2 + delta * delta * left * right / total,
        }
    }

    fn non_empty(self) -> Result<Self> {
        if self.trials == 0 {
            Err(PercolationError::NoTrials)
        } else {
            Ok(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        approx::assert_relative_eq,
    };

    #[test]
    fn trial_stops_at_the_first_percolation() {
        let sites = vec![(1, 1), (2, 2), (2, 1), (1, 2)];

        assert_eq!(trial(2, sites), Ok(Some(0.75)));
    }

    #[test]
    fn trial_counts_repeated_sites_once() {
        let sites = vec![(1, 2), (1, 2), (1, 2), (2, 2)];

        assert_eq!(trial(2, sites), Ok(Some(0.5)));
    }

    #[test]
    fn trial_without_percolation() {
        assert_eq!(trial(1, Vec::new()), Ok(None));
        assert_eq!(trial(3, vec![(3, 1), (3, 2), (3, 3)]), Ok(None));
    }

    #[test]
    fn trial_propagates_errors() {
        assert_eq!(trial(0, vec![(1, 1)]), Err(PercolationError::InvalidSize { size: 0 }));
        assert_eq!(
            trial(2, vec![(1, 1), (0, 1), (2, 1)]),
            Err(PercolationError::SiteOutOfBounds { row: 0, col: 1, size: 2 }),
        );
    }

    #[test]
    fn empty_estimate_is_rejected() {
        assert_eq!(ThresholdEstimate::from_thresholds(Vec::new()), Err(PercolationError::NoTrials));
    }

    #[test]
    fn single_trial_has_no_spread() {
        let estimate = ThresholdEstimate::from_thresholds(vec![0.59]).unwrap();

        assert_eq!(estimate.trials(), 1);
        assert_relative_eq!(estimate.mean(), 0.59);
        assert!(estimate.stddev().is_nan());
        assert!(estimate.confidence_lo().is_nan());
    }

    #[test]
    fn two_trials() {
        let estimate = ThresholdEstimate::from_thresholds(vec![0.5, 0.7]).unwrap();
        let stddev = 0.02f64.sqrt();
        let half_width = 1.96 * stddev / 2f64.sqrt();

        assert_relative_eq!(estimate.mean(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(estimate.stddev(), stddev, epsilon = 1e-12);
        assert_relative_eq!(estimate.confidence_lo(), 0.6 - half_width, epsilon = 1e-12);
        assert_relative_eq!(estimate.confidence_hi(), 0.6 + half_width, epsilon = 1e-12);
    }

    #[test]
    fn merged_estimates_match_a_single_pass() {
        let samples = [0.55, 0.61, 0.58, 0.64, 0.59, 0.6, 0.57];
        let whole = ThresholdEstimate::from_thresholds(samples.iter().copied()).unwrap();

        for split in 0 ..= samples.len() {
            let (left, right) = samples.split_at(split);
            let left = left.iter().copied().fold(ThresholdEstimate::empty(), ThresholdEstimate::push);
            let right = right.iter().copied().fold(ThresholdEstimate::empty(), ThresholdEstimate::push);
            let merged = left.merge(right);

            assert_eq!(merged.trials(), whole.trials());
            assert_relative_eq!(merged.mean(), whole.mean(), epsilon = 1e-12);
            assert_relative_eq!(merged.stddev(), whole.stddev(), epsilon = 1e-12);
        }
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_estimate_matches_sequential() {
        let samples: Vec<f64> = (0 .. 1000).map(|i| 0.5 + (i % 17) as f64 / 100.0).collect();

        let sequential = ThresholdEstimate::from_thresholds(samples.iter().copied()).unwrap();
        let parallel = ThresholdEstimate::from_par_thresholds(samples).unwrap();

        assert_eq!(parallel.trials(), sequential.trials());
        assert_relative_eq!(parallel.mean(), sequential.mean(), epsilon = 1e-12);
        assert_relative_eq!(parallel.stddev(), sequential.stddev(), epsilon = 1e-12);
        assert_eq!(
            ThresholdEstimate::from_par_thresholds(Vec::<f64>::new()),
            Err(PercolationError::NoTrials),
        );
    }
}
