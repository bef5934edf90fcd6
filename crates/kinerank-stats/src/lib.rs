//! Statistical utilities for the kinerank project.
//!
//! This crate provides the small set of statistical tools the analysis
//! pipeline relies on:
//!
//! - **Descriptive statistics**: mean, median, sample variance, sample standard
//!   deviation and standard error of the mean
//! - **Congruence**: Tucker's congruence coefficient between two profiles
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`congruence`]: Similarity between two weight or effect profiles
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use kinerank_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.sample_variance, Some(2.5));
//! ```
//!
//! ## Comparing two profiles
//!
//! ```
//! use kinerank_stats::congruence::tuckers_congruence;
//!
//! let phi = tuckers_congruence(&[1.0, 2.0], &[2.0, 4.0]);
//! assert!((phi - 1.0).abs() < 1e-12);
//! ```

pub mod congruence;
pub mod descriptive;
