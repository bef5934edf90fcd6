//! Condition × parameter tables.
//!
//! Both the per-condition summary and the improvement matrix are
//! [`ConditionTable`]s: rows are conditions in presentation order, columns are
//! parameters, and each cell is either a number or undefined (`None`).

use serde::Serialize;

use crate::series::NamedSeries;

/// One row of a [`ConditionTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionRow {
    pub condition: String,
    /// One cell per table parameter, in the table's parameter order.
    pub values: Vec<Option<f64>>,
}

impl ConditionRow {
    #[must_use]
    pub fn is_all_undefined(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// A table keyed by condition (rows) and parameter (columns).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConditionTable {
    parameters: Vec<String>,
    rows: Vec<ConditionRow>,
}

impl ConditionTable {
    /// Creates a table with the given columns and no rows.
    #[must_use]
    pub fn new(parameters: Vec<String>) -> Self {
        Self {
            parameters,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one cell per parameter.
    pub fn push_row<C>(&mut self, condition: C, values: Vec<Option<f64>>)
    where
        C: Into<String>,
    {
        assert_eq!(
            values.len(),
            self.parameters.len(),
            "row must have one cell per parameter"
        );
        self.rows.push(ConditionRow {
            condition: condition.into(),
            values,
        });
    }

    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    #[must_use]
    pub fn rows(&self) -> &[ConditionRow] {
        &self.rows
    }

    /// Table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.condition.as_str())
    }

    #[must_use]
    pub fn row(&self, condition: &str) -> Option<&ConditionRow> {
        self.rows.iter().find(|row| row.condition == condition)
    }

    #[must_use]
    pub fn parameter_index(&self, parameter: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p == parameter)
    }

    #[must_use]
    pub fn get(&self, condition: &str, parameter: &str) -> Option<f64> {
        let index = self.parameter_index(parameter)?;
        self.row(condition)?.values[index]
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(move |row| row.values[index])
    }

    /// Defined cells of `condition` as a series in parameter order.
    #[must_use]
    pub fn row_series(&self, condition: &str) -> Option<NamedSeries> {
        let row = self.row(condition)?;
        Some(
            self.parameters
                .iter()
                .zip(&row.values)
                .filter_map(|(p, v)| v.map(|v| (p.as_str(), v)))
                .collect(),
        )
    }
}
