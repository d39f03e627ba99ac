//! In-memory datasets bound to a chart.
//!
//! Callers load and numeric-coerce their data before calling `init`; nothing
//! here parses files.

use std::fmt;

use crate::error::{Error, Result};
use crate::format::format_number;

/// A single field value in a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl Value {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice, or None if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Null => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// One row of a record-array dataset. Field order is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing an existing field of the same name in place.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Check if a field exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Numeric value of a field.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`] when absent, [`Error::NotNumeric`] when the
    /// field holds text or null.
    pub fn number(&self, name: &str) -> Result<f64> {
        self.get(name)
            .ok_or_else(|| Error::UnknownField { field: name.to_string() })?
            .as_f64()
            .ok_or_else(|| Error::NotNumeric { field: name.to_string() })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Data bound to a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Category name to a single numeric value, in insertion order.
    Keyed(Vec<(String, f64)>),
    /// Ordered records sharing the same fields.
    Records(Vec<Record>),
    /// A plain numeric array.
    Values(Vec<f64>),
    /// Named numeric arrays, one of which a chart selects by variable name.
    Columns(Vec<(String, Vec<f64>)>),
}

impl Dataset {
    /// Build a keyed dataset from `(category, value)` pairs.
    pub fn keyed<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Dataset::Keyed(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a record-array dataset.
    #[must_use]
    pub fn records(records: Vec<Record>) -> Self {
        Dataset::Records(records)
    }

    /// Build a plain numeric dataset.
    #[must_use]
    pub fn values(values: Vec<f64>) -> Self {
        Dataset::Values(values)
    }

    /// Build a dataset of named numeric arrays.
    pub fn columns<K: Into<String>>(columns: impl IntoIterator<Item = (K, Vec<f64>)>) -> Self {
        Dataset::Columns(columns.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Number of top-level entries (categories, records, values or columns).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Dataset::Keyed(pairs) => pairs.len(),
            Dataset::Records(records) => records.len(),
            Dataset::Values(values) => values.len(),
            Dataset::Columns(columns) => columns.len(),
        }
    }

    /// Whether the dataset has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the keyed pairs.
    ///
    /// # Errors
    ///
    /// [`Error::DataShape`] for any other shape.
    pub fn as_keyed(&self) -> Result<&[(String, f64)]> {
        match self {
            Dataset::Keyed(pairs) => Ok(pairs),
            _ => Err(Error::DataShape { expected: "an object of category values" }),
        }
    }

    /// Borrow the records.
    ///
    /// # Errors
    ///
    /// [`Error::DataShape`] for any other shape.
    pub fn as_records(&self) -> Result<&[Record]> {
        match self {
            Dataset::Records(records) => Ok(records),
            _ => Err(Error::DataShape { expected: "an array of objects" }),
        }
    }

    /// Resolve the numeric series a histogram or heatmap plots.
    ///
    /// Plain arrays are used as-is. Named arrays and records need `variable`
    /// to pick a column or field.
    ///
    /// # Errors
    ///
    /// [`Error::MissingOption`] when `variable` is needed but unset,
    /// [`Error::UnknownField`] when it names nothing, and
    /// [`Error::DataShape`] for keyed data.
    pub fn numeric_series(&self, variable: Option<&str>) -> Result<Vec<f64>> {
        match self {
            Dataset::Values(values) => Ok(values.clone()),
            Dataset::Columns(columns) => {
                let name = variable.ok_or(Error::MissingOption { option: "variable" })?;
                columns
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| Error::UnknownField { field: name.to_string() })
            }
            Dataset::Records(records) => {
                let name = variable.ok_or(Error::MissingOption { option: "variable" })?;
                records.iter().map(|r| r.number(name)).collect()
            }
            Dataset::Keyed(_) => {
                Err(Error::DataShape { expected: "a numeric array or an object of numeric arrays" })
            }
        }
    }
}

impl From<Vec<f64>> for Dataset {
    fn from(values: Vec<f64>) -> Self {
        Dataset::Values(values)
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::Records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(10.0).to_string(), "10");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from("ab").to_string(), "ab");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_record_preserves_order() {
        let r = Record::new().with("G", "g1").with("A", 10.0).with("B", 15.0);
        let names: Vec<&str> = r.field_names().collect();
        assert_eq!(names, vec!["G", "A", "B"]);
    }

    #[test]
    fn test_record_insert_replaces() {
        let r = Record::new().with("A", 1.0).with("B", 2.0).with("A", 3.0);
        assert_eq!(r.field_names().count(), 2);
        assert_eq!(r.number("A").unwrap(), 3.0);
    }

    #[test]
    fn test_record_number_errors() {
        let r: Record = [("name", Value::from("x")), ("n", Value::from(1.0))].into_iter().collect();
        assert!(matches!(r.number("missing"), Err(Error::UnknownField { .. })));
        assert!(matches!(r.number("name"), Err(Error::NotNumeric { .. })));
        assert_eq!(r.number("n").unwrap(), 1.0);
    }

    #[test]
    fn test_dataset_shapes() {
        let keyed = Dataset::keyed([("a", 1.0), ("b", 2.0)]);
        assert_eq!(keyed.len(), 2);
        assert!(keyed.as_keyed().is_ok());
        assert!(matches!(keyed.as_records(), Err(Error::DataShape { .. })));
        assert!(Dataset::values(vec![]).is_empty());
    }

    #[test]
    fn test_numeric_series_plain() {
        let ds = Dataset::values(vec![3.0, 1.0]);
        assert_eq!(ds.numeric_series(None).unwrap(), vec![3.0, 1.0]);
    }

    #[test]
    fn test_numeric_series_columns() {
        let ds = Dataset::columns([("age", vec![30.0, 40.0]), ("weight", vec![70.0])]);
        assert_eq!(ds.numeric_series(Some("weight")).unwrap(), vec![70.0]);
        assert!(matches!(ds.numeric_series(None), Err(Error::MissingOption { option: "variable" })));
        assert!(matches!(ds.numeric_series(Some("height")), Err(Error::UnknownField { .. })));
    }

    #[test]
    fn test_numeric_series_records() {
        let ds = Dataset::records(vec![
            Record::new().with("v", 1.0),
            Record::new().with("v", 2.0),
        ]);
        assert_eq!(ds.numeric_series(Some("v")).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_numeric_series_rejects_keyed() {
        let ds = Dataset::keyed([("a", 1.0)]);
        assert!(matches!(ds.numeric_series(Some("a")), Err(Error::DataShape { .. })));
    }
}
