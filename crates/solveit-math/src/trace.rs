//! Iteration traces.
//!
//! A [`Trace`] is the ordered, append-only history of a driver run. Record
//! indices always equal their position in the trace.

use std::collections::BTreeMap;

use serde::Serialize;

/// Key for the derivative value stored by Newton-type drivers.
pub const EXTRA_DERIVATIVE: &str = "df";

/// Key for the second derivative stored by the Schröder variant.
pub const EXTRA_SECOND_DERIVATIVE: &str = "d2f";

/// Key for the lower bracket endpoint.
pub const EXTRA_LOWER: &str = "xi";

/// Key for the upper bracket endpoint.
pub const EXTRA_UPPER: &str = "xs";

/// Snapshot of a single iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationRecord {
    /// Iteration number, starting at 0 for the initial point.
    pub index: usize,
    /// Approximation produced by this iteration.
    pub x: f64,
    /// Function value at `x`.
    pub f_x: f64,
    /// Error against the previous approximation; `None` when there is none.
    pub error: Option<f64>,
    /// Method-specific auxiliary values.
    pub extra: BTreeMap<&'static str, f64>,
}

impl IterationRecord {
    /// Returns the auxiliary value stored under `key`.
    pub fn extra(&self, key: &str) -> Option<f64> {
        self.extra.get(key).copied()
    }
}

/// Ordered sequence of iteration records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    records: Vec<IterationRecord>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trace with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record and returns its index.
    pub fn push(&mut self, x: f64, f_x: f64, error: Option<f64>) -> usize {
        self.push_with(x, f_x, error, [])
    }

    /// Appends a record carrying auxiliary values and returns its index.
    pub fn push_with<const N: usize>(
        &mut self,
        x: f64,
        f_x: f64,
        error: Option<f64>,
        extra: [(&'static str, f64); N],
    ) -> usize {
        let index = self.records.len();
        self.records.push(IterationRecord {
            index,
            x,
            f_x,
            error,
            extra: extra.into_iter().collect(),
        });
        index
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `index`.
    pub fn get(&self, index: usize) -> Option<&IterationRecord> {
        self.records.get(index)
    }

    /// Returns the most recent record.
    pub fn last(&self) -> Option<&IterationRecord> {
        self.records.last()
    }

    /// Returns all records in iteration order.
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Iterates over the records in iteration order.
    pub fn iter(&self) -> std::slice::Iter<'_, IterationRecord> {
        self.records.iter()
    }

    /// Sorted, de-duplicated set of `extra` keys used by any record.
    pub fn extra_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self
            .records
            .iter()
            .flat_map(|r| r.extra.keys().copied())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Estimates the convergence order from the last two usable errors.
    ///
    /// Returns `ln(e_n) / ln(e_{n-1})` using the two most recent errors that
    /// lie strictly between 0 and 1. With fewer than two such errors the
    /// estimate is not applicable and `None` is returned.
    pub fn order_estimate(&self) -> Option<f64> {
        let mut usable = self
            .records
            .iter()
            .rev()
            .filter_map(|r| r.error)
            .filter(|e| e.is_finite() && *e > 0.0 && *e < 1.0);

        let latest = usable.next()?;
        let previous = usable.next()?;
        Some(latest.ln() / previous.ln())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a IterationRecord;
    type IntoIter = std::slice::Iter<'a, IterationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
