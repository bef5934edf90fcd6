/// Summary of a sample of `f64` observations.
///
/// Spread is measured with the Bessel-corrected (`n - 1`) estimator, so the
/// dispersion fields are `None` for a single observation.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub sample_variance: Option<f64>,
    pub sample_std_dev: Option<f64>,
    /// Standard error of the mean, `sample_std_dev / sqrt(count)`.
    pub std_error: Option<f64>,
}

impl DescriptiveStats {
    /// Summarizes `values` in any order; `None` for an empty input.
    ///
    /// Values are sorted first, so the mean is bit-for-bit the same for any
    /// permutation of the input.
    ///
    /// ```
    /// # use kinerank_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([4.0, 1.0, 2.0]).unwrap();
    /// assert_eq!((stats.min, stats.max, stats.median), (1.0, 4.0, 2.0));
    /// assert_eq!(stats.count, 3);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values: Vec<f64> = values.into_iter().collect();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Like [`DescriptiveStats::new`] for input already in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is out of order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (&min, &max) = (sorted_values.first()?, sorted_values.last()?);
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            f64::midpoint(sorted_values[mid - 1], sorted_values[mid])
        } else {
            sorted_values[mid]
        };

        let sample_variance = (count > 1).then(|| {
            sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0)
        });
        let sample_std_dev = sample_variance.map(f64::sqrt);
        let std_error = sample_std_dev.map(|sd| sd / n.sqrt());

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            sample_variance,
            sample_std_dev,
            std_error,
        })
    }
}
