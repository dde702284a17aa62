//! Sampling parameters.

use crate::error::{TissotError, TissotResult};

/// Parameters for geodesic disc sampling.
///
/// # Example
///
/// ```
/// use cortex_tissot::TissotParams;
///
/// let params = TissotParams::default().with_spacing(30.0).with_seed(7);
/// assert_eq!(params.radius, 10.0);
/// assert_eq!(params.search_radius(), 35.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TissotParams {
    /// Disc radius in surface units.
    pub radius: f64,
    /// Minimum path length between accepted centres.
    pub spacing: f64,
    /// Consecutive rejections that end sampling.
    pub max_fails: usize,
    /// Total candidate draws before sampling gives up.
    pub max_attempts: usize,
    /// Seed for reproducible sampling; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TissotParams {
    fn default() -> Self {
        Self {
            radius: 10.0,
            spacing: 50.0,
            max_fails: 100,
            max_attempts: 100_000,
            seed: None,
        }
    }
}

impl TissotParams {
    /// Set the disc radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the minimum centre spacing.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the consecutive-rejection budget.
    #[must_use]
    pub const fn with_max_fails(mut self, max_fails: usize) -> Self {
        self.max_fails = max_fails;
        self
    }

    /// Set the total attempt cap.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Path-search cutoff used when checking a candidate against existing
    /// centres: `spacing / 2 + 20`, widened to at least `spacing`.
    #[must_use]
    pub fn search_radius(&self) -> f64 {
        (self.spacing / 2.0 + 20.0).max(self.spacing)
    }

    /// Path-search cutoff for disc weights.
    #[must_use]
    pub fn disc_radius(&self) -> f64 {
        self.radius * 2.0
    }

    /// Check that radius and spacing are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`TissotError::InvalidParams`] describing the first bad value.
    pub fn validate(&self) -> TissotResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(TissotError::InvalidParams(format!(
                "radius must be finite and positive, got {}",
                self.radius
            )));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(TissotError::InvalidParams(format!(
                "spacing must be finite and positive, got {}",
                self.spacing
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = TissotParams::default();
        assert_eq!(p.radius, 10.0);
        assert_eq!(p.spacing, 50.0);
        assert_eq!(p.max_fails, 100);
        assert_eq!(p.max_attempts, 100_000);
        assert!(p.seed.is_none());
        assert_eq!(p.search_radius(), 45.0);
        assert_eq!(p.disc_radius(), 20.0);
    }

    #[test]
    fn search_radius_covers_spacing() {
        let p = TissotParams::default().with_spacing(100.0);
        assert_eq!(p.search_radius(), 100.0);
        let p = TissotParams::default().with_spacing(4.0);
        assert_eq!(p.search_radius(), 22.0);
    }

    #[test]
    fn validation() {
        assert!(TissotParams::default().validate().is_ok());
        assert!(TissotParams::default().with_radius(0.0).validate().is_err());
        assert!(TissotParams::default().with_spacing(f64::NAN).validate().is_err());
        assert!(TissotParams::default().with_spacing(-1.0).validate().is_err());
    }
}
