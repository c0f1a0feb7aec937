//! Per-column value extraction (§4.4 per-row rules).
//!
//! A `RowContext` binds one CSV record to its header's column index so a
//! field can be looked up by name rather than position — columns vary
//! between format versions and extra ones are simply ignored.

use std::collections::HashMap;
use std::str::FromStr;

pub struct RowContext<'a> {
    index: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl<'a> RowContext<'a> {
    pub fn new(index: &'a HashMap<String, usize>, record: &'a csv::StringRecord) -> Self {
        RowContext { index, record }
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.index.get(name).and_then(|&i| self.record.get(i)).filter(|s| !s.is_empty())
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.raw(name).and_then(|s| s.trim().parse().ok())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

/// Sensor sentinel values: 255 and 999 both mean "no echo" (§3 invariant).
pub fn is_sentinel_missing(value: f64) -> bool {
    value == 255.0 || value == 999.0
}

pub fn distance_or_missing(raw: Option<f64>) -> Option<f64> {
    raw.filter(|&v| !is_sentinel_missing(v) && v >= 0.0)
}

pub fn header_index(header: &csv::StringRecord) -> HashMap<String, usize> {
    header.iter().enumerate().map(|(i, name)| (name.trim().to_string(), i)).collect()
}
