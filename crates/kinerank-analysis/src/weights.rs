//! Regularized dynamic weighting.
//!
//! Parameter weights are derived from responsiveness, then shrunk toward a
//! uniform weighting to keep a single noisy parameter from dominating the
//! composite score.
//!
//! # Operations
//!
//! - **Normalization**: [`normalize_l1`] scales a weight vector to sum to 1.0
//! - **Uniform weights**: [`uniform`] gives every parameter `1/k`
//! - **Blending**: [`blend_weights`] mixes the two under a [`Shrinkage`]
//!
//! # Shrinkage
//!
//! For λ ∈ [0, 1] the final weight of parameter `p` is
//!
//! ```text
//! w(p) = (1 − λ) · r(p) / Σr + λ / k
//! ```
//!
//! where `r` is responsiveness and `k` the number of responsive parameters.
//! Both terms sum to 1, so their convex combination does too.
//!
//! - λ = 0: pure responsiveness-proportional weights (may overfit noisy parameters)
//! - λ = 1: uniform weights (ignores genuine differences in discriminative power)
//! - λ = 0.1 (default): light regularization

use crate::{abort::AbortReason, config::Shrinkage, series::NamedSeries};

/// Normalizes a weight vector to sum to 1.0 (L1 normalization).
///
/// If the sum is zero or negative, weights are left unchanged (to avoid
/// division by zero).
///
/// # Examples
///
/// ```
/// use kinerank_analysis::weights::normalize_l1;
///
/// let mut weights = [1.0, 3.0];
/// normalize_l1(&mut weights);
/// assert_eq!(weights, [0.25, 0.75]);
/// ```
pub fn normalize_l1(weights: &mut [f64]) {
    let sum: f64 = weights.iter().copied().sum();
    if sum > 0.0 {
        for w in weights {
            *w /= sum;
        }
    }
}

/// Equal weight `1/len` for each of `len` parameters.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn uniform(len: usize) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    vec![1.0 / len as f64; len]
}

/// Blends responsiveness-proportional weights with uniform weights.
///
/// # Errors
///
/// - [`AbortReason::NoResponsiveParameters`] if `responsiveness` is empty
/// - [`AbortReason::ZeroTotalResponsiveness`] if the scores do not sum to a
///   positive, finite total
///
/// # Examples
///
/// ```
/// use kinerank_analysis::{config::Shrinkage, series::NamedSeries, weights::blend_weights};
///
/// let responsiveness = [("StdSpeed", 3.0), ("MeanSpeed", 1.0)]
///     .into_iter()
///     .collect::<NamedSeries>();
///
/// let weights = blend_weights(&responsiveness, Shrinkage::new(0.0).unwrap()).unwrap();
/// assert_eq!(weights.get("StdSpeed"), Some(0.75));
///
/// let weights = blend_weights(&responsiveness, Shrinkage::new(1.0).unwrap()).unwrap();
/// assert_eq!(weights.get("StdSpeed"), Some(0.5));
/// ```
pub fn blend_weights(
    responsiveness: &NamedSeries,
    shrinkage: Shrinkage,
) -> Result<NamedSeries, AbortReason> {
    if responsiveness.is_empty() {
        return Err(AbortReason::NoResponsiveParameters);
    }
    let total = responsiveness.sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(AbortReason::ZeroTotalResponsiveness);
    }

    let mut data_driven = responsiveness.values().collect::<Vec<_>>();
    normalize_l1(&mut data_driven);
    let uniform_weights = uniform(data_driven.len());

    let lambda = shrinkage.get();
    let weights = responsiveness
        .names()
        .zip(data_driven.into_iter().zip(uniform_weights))
        .map(|(name, (d, u))| (name, (1.0 - lambda) * d + lambda * u))
        .collect::<NamedSeries>();

    tracing::debug!(parameters = weights.len(), lambda, "blended weights");
    Ok(weights)
}
