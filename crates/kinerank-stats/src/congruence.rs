//! Similarity between two profiles.
//!
//! Tucker's congruence coefficient (φ) is the cosine of the angle between two
//! vectors measured from the origin rather than from their means. It is used
//! to compare the weight profiles of the left and right hands.

use std::iter;

/// Computes Tucker's congruence coefficient between two equally sized vectors.
///
/// Returns `0.0` when either vector has zero norm.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
///
/// # Examples
///
/// ```
/// use kinerank_stats::congruence::tuckers_congruence;
///
/// assert_eq!(tuckers_congruence(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// assert_eq!(tuckers_congruence(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
/// ```
#[must_use]
pub fn tuckers_congruence(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "vectors must have the same length");
    let dot = iter::zip(a, b).map(|(x, y)| x * y).sum::<f64>();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();
    let norm = norm_a * norm_b;
    if norm == 0.0 { 0.0 } else { dot / norm }
}
