//! Ordered `name → value` vectors.
//!
//! Responsiveness scores, weights, composite scores and exported effect
//! vectors are all [`NamedSeries`]. Insertion order is preserved and the
//! series serializes as a JSON object in that order.

use serde::{Serialize, ser::SerializeMap as _};

/// An ordered mapping from a name (parameter or condition) to a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedSeries {
    entries: Vec<(String, f64)>,
}

impl NamedSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, replacing the value if `name` is already present.
    pub fn insert<N>(&mut self, name: N, value: f64)
    where
        N: Into<String>,
    {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find_map(|(n, v)| (n == name).then_some(*v))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> {
        self.entries.iter().map(|(_, v)| *v)
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values().sum()
    }

    /// Values of both series aligned on the union of their names, in first-seen
    /// order; a name missing from one side contributes `0.0` there.
    #[must_use]
    pub fn aligned_union(&self, other: &Self) -> (Vec<f64>, Vec<f64>) {
        let names = self
            .names()
            .chain(other.names().filter(|n| !self.contains(n)))
            .collect::<Vec<_>>();
        names
            .into_iter()
            .map(|n| (self.get(n).unwrap_or(0.0), other.get(n).unwrap_or(0.0)))
            .unzip()
    }
}

impl<N> FromIterator<(N, f64)> for NamedSeries
where
    N: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, f64)>,
    {
        let mut series = Self::new();
        for (name, value) in iter {
            series.insert(name, value);
        }
        series
    }
}

impl Serialize for NamedSeries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
