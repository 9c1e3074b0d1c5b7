//! Parameter handling for delta generation.

use crate::error::DeltaError;

/// Degree-weighting parameters for preferential attachment and detachment.
///
/// A vertex with in-degree `d` receives weight
/// `max(0, exp(alpha + beta * ln(1 + d)) - lambda)`. `alpha` is a baseline
/// log-weight, `beta` controls how strongly degree is rewarded, and `lambda`
/// is a floor: vertices whose raw weight does not exceed it are never
/// selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreferentialParams {
    alpha: f64,
    beta: f64,
    lambda: f64,
}

impl PreferentialParams {
    /// Creates a validated parameter set.
    ///
    /// # Errors
    /// Returns [`DeltaError::InvalidParameters`] when any parameter is not
    /// finite or when `lambda` is negative.
    ///
    /// # Examples
    /// ```
    /// use graphdelta_core::PreferentialParams;
    ///
    /// let params = PreferentialParams::new(0.0, 1.0, 0.0).expect("parameters must be valid");
    /// assert!((params.weight(3) - 4.0).abs() < 1e-12);
    /// ```
    pub fn new(alpha: f64, beta: f64, lambda: f64) -> Result<Self, DeltaError> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("lambda", lambda)] {
            if !value.is_finite() {
                return Err(DeltaError::InvalidParameters {
                    reason: format!("{name} must be finite (got {value})"),
                });
            }
        }
        if lambda < 0.0 {
            return Err(DeltaError::InvalidParameters {
                reason: format!("lambda must be non-negative (got {lambda})"),
            });
        }
        Ok(Self {
            alpha,
            beta,
            lambda,
        })
    }

    /// Baseline log-weight.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Degree sensitivity.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Weight floor subtracted before clamping at zero.
    #[must_use]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Unnormalised selection weight for a vertex with the given in-degree.
    #[must_use]
    pub fn weight(&self, in_degree: usize) -> f64 {
        let degree = in_degree as f64;
        let raw = (self.alpha + self.beta * degree.ln_1p()).exp();
        (raw - self.lambda).max(0.0)
    }
}

impl Default for PreferentialParams {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            beta: 1.0,
            lambda: 0.0,
        }
    }
}

/// Configuration shared by every generation entry point of
/// [`crate::DeltaGenerator`].
///
/// # Examples
/// ```
/// use graphdelta_core::{DeltaConfig, PreferentialParams};
///
/// let config = DeltaConfig::new()
///     .with_strict_preferential(true)
///     .with_preferential(PreferentialParams::new(0.5, 1.0, 0.0).expect("valid"))
///     .with_rng_seed(7);
/// assert!(config.strict_delta());
/// assert!(config.strict_preferential());
/// assert_eq!(config.rng_seed(), Some(7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaConfig {
    preferential: PreferentialParams,
    strict_delta: bool,
    strict_preferential: bool,
    rng_seed: Option<u64>,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            preferential: PreferentialParams::default(),
            strict_delta: true,
            strict_preferential: false,
            rng_seed: None,
        }
    }
}

impl DeltaConfig {
    /// Creates a configuration with strict deltas, a uniform source
    /// endpoint, default weighting and an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every sampled change is distinct and mutates the graph.
    #[must_use]
    pub fn with_strict_delta(mut self, strict: bool) -> Self {
        self.strict_delta = strict;
        self
    }

    /// When set, both endpoints of a preferential change are degree-weighted;
    /// otherwise only the target is and the source is drawn uniformly.
    #[must_use]
    pub fn with_strict_preferential(mut self, strict: bool) -> Self {
        self.strict_preferential = strict;
        self
    }

    /// Overrides the degree-weighting parameters.
    #[must_use]
    pub fn with_preferential(mut self, params: PreferentialParams) -> Self {
        self.preferential = params;
        self
    }

    /// Seeds the generator RNG to make sampling reproducible.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Returns the degree-weighting parameters.
    #[must_use]
    pub fn preferential(&self) -> &PreferentialParams {
        &self.preferential
    }

    /// Returns whether strict deltas are requested.
    #[must_use]
    pub fn strict_delta(&self) -> bool {
        self.strict_delta
    }

    /// Returns whether both preferential endpoints are weighted.
    #[must_use]
    pub fn strict_preferential(&self) -> bool {
        self.strict_preferential
    }

    /// Returns the configured RNG seed, if any.
    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

/// Splits `count` into `(insertions, deletions)` using `ratio` as the
/// insertion fraction, rounding insertions down.
pub(crate) fn split_count(ratio: f64, count: usize, name: &str) -> Result<(usize, usize), DeltaError> {
    if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
        return Err(DeltaError::InvalidParameters {
            reason: format!("{name} must lie in [0, 1] (got {ratio})"),
        });
    }
    let insertions = ((ratio * count as f64).floor() as usize).min(count);
    Ok((insertions, count - insertions))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(f64::NAN, 1.0, 0.0)]
    #[case(0.0, f64::INFINITY, 0.0)]
    #[case(0.0, 1.0, -0.5)]
    fn rejects_invalid_weighting(#[case] alpha: f64, #[case] beta: f64, #[case] lambda: f64) {
        let err = PreferentialParams::new(alpha, beta, lambda).expect_err("must reject");
        assert!(matches!(err, DeltaError::InvalidParameters { .. }));
    }

    #[rstest]
    #[case(0, 1.0)]
    #[case(1, 2.0)]
    #[case(4, 5.0)]
    fn default_weight_is_one_plus_degree(#[case] degree: usize, #[case] expected: f64) {
        let weight = PreferentialParams::default().weight(degree);
        assert!((weight - expected).abs() < 1e-12, "weight {weight}");
    }

    #[test]
    fn lambda_floors_weights_at_zero() {
        let params = PreferentialParams::new(0.0, 1.0, 1.5).expect("valid");
        assert_eq!(params.weight(0), 0.0);
        assert!((params.weight(1) - 0.5).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.5, 4, (2, 2))]
    #[case(0.0, 3, (0, 3))]
    #[case(1.0, 3, (3, 0))]
    #[case(0.7, 3, (2, 1))]
    fn split_rounds_insertions_down(
        #[case] ratio: f64,
        #[case] count: usize,
        #[case] expected: (usize, usize),
    ) {
        assert_eq!(split_count(ratio, count, "ratio").expect("valid"), expected);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn split_rejects_out_of_range_ratio(#[case] ratio: f64) {
        let err = split_count(ratio, 4, "epsilon").expect_err("must reject");
        assert!(err.to_string().contains("epsilon"));
    }
}
