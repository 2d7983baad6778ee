//! Metric aggregators and the value/row types they produce.
//!
//! Each submodule computes one family of statistics from a
//! [`crate::view::PlayerContext`]; everything funnels into a [`MetricSet`],
//! an ordered list of named values that later becomes one table row.

pub mod contributions;
pub mod defending;
pub mod duels;
pub mod goalkeeper;
pub mod passing;
pub mod possession;
pub mod pressure;
pub mod set_pieces;
pub mod shooting;

use std::fmt;
use std::str::FromStr;

use tracing::trace;

/// Round to two decimal places, the precision every reported value uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One reported statistic.
///
/// `Missing` is a real value, not an error: a ratio with a zero denominator
/// or a mean over nothing is reported as an empty cell and must survive a
/// round trip through the table files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(i64),
    Float(f64),
    Missing,
}

impl MetricValue {
    /// Two-decimal ratio; `Missing` when the denominator is zero.
    pub fn ratio(part: i64, whole: i64) -> Self {
        if whole == 0 {
            MetricValue::Missing
        } else {
            MetricValue::Float(round2(part as f64 / whole as f64))
        }
    }

    /// Two-decimal mean; `Missing` for an empty sample.
    pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut sum = 0.0;
        let mut n = 0usize;
        for v in values {
            sum += v;
            n += 1;
        }
        if n == 0 {
            MetricValue::Missing
        } else {
            MetricValue::Float(round2(sum / n as f64))
        }
    }

    pub fn float(value: f64) -> Self {
        MetricValue::Float(round2(value))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Count(n) => Some(*n as f64),
            MetricValue::Float(v) => Some(*v),
            MetricValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, MetricValue::Missing)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Float(v) => write!(f, "{v:.2}"),
            MetricValue::Missing => Ok(()),
        }
    }
}

impl FromStr for MetricValue {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(MetricValue::Missing);
        }
        if !s.contains('.') {
            if let Ok(n) = s.parse::<i64>() {
                return Ok(MetricValue::Count(n));
            }
        }
        Ok(MetricValue::Float(s.parse()?))
    }
}

/// Ordered, named metric values.
///
/// Insertion order is the column order of the final table, so aggregators
/// must always emit the same keys in the same order. Setting an existing key
/// overwrites it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet {
    entries: Vec<(String, MetricValue)>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: MetricValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            trace!(key, "overwriting metric");
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    pub fn count(&mut self, key: &str, n: i64) {
        self.set(key, MetricValue::Count(n));
    }

    pub fn float(&mut self, key: &str, value: f64) {
        self.set(key, MetricValue::float(value));
    }

    pub fn ratio(&mut self, key: &str, part: i64, whole: i64) {
        self.set(key, MetricValue::ratio(part, whole));
    }

    pub fn missing(&mut self, key: &str) {
        self.set(key, MetricValue::Missing);
    }

    pub fn get(&self, key: &str) -> Option<MetricValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn extend(&mut self, other: MetricSet) {
        for (key, value) in other.entries {
            self.set(&key, value);
        }
    }

    /// Same keys with a prefix, in the same order.
    pub fn prefixed(self, prefix: &str) -> MetricSet {
        MetricSet {
            entries: self
                .entries
                .into_iter()
                .map(|(k, v)| (format!("{prefix}{k}"), v))
                .collect(),
        }
    }

    /// Same keys, every value zero. Used for empty sub-views that still need
    /// their full column set.
    pub fn zeroed(&self) -> MetricSet {
        MetricSet {
            entries: self
                .entries
                .iter()
                .map(|(k, _)| (k.clone(), MetricValue::Count(0)))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MetricValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
