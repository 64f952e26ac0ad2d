//! Database value types and conversions.

use crate::DbError;
use base64::Engine;
use serde::de::DeserializeOwned;

/// A database value that can be used as a parameter or result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Integer value.
    Integer(i64),
    /// Real/float value.
    Real(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl Value {
    /// Try to get the value as an i64.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Real(f) => Some(*f as i64),
            _ => None,
        }
    }

    /// Try to get the value as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Integer(i) => serde_json::Value::Number((*i).into()),
            Value::Real(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Blob(b) => String::from_utf8(b.clone())
                .map(serde_json::Value::String)
                .unwrap_or_else(|_| {
                    serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(b))
                }),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(if v { 1 } else { 0 })
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// A row from a query result.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Create a new row from columns and values.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Get a value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Deserialize the row into a type, mapping columns to fields by name.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, DbError> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .columns
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();

        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| DbError::DeserializeError(e.to_string()))
    }
}

/// Query result containing rows.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// The column names.
    pub columns: Vec<String>,
    /// The rows.
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Create a new query result.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Deserialize all rows into a vector of a type.
    pub fn deserialize_all<T: DeserializeOwned>(&self) -> Result<Vec<T>, DbError> {
        self.rows.iter().map(|row| row.deserialize()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct ProductRow {
        id: i64,
        title: String,
        total_sales: Option<i64>,
    }

    fn columns() -> Vec<String> {
        vec!["id".into(), "title".into(), "total_sales".into()]
    }

    #[test]
    fn test_row_get() {
        let row = Row::new(columns(), vec![Value::Integer(7), "Mug".into(), Value::Null]);
        assert_eq!(row.get("id").and_then(Value::as_integer), Some(7));
        assert_eq!(row.get("title").and_then(Value::as_text), Some("Mug"));
        assert!(row.get("total_sales").map(Value::is_null).unwrap_or(false));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_row_deserialize_with_nulls() {
        let row = Row::new(columns(), vec![Value::Integer(7), "Mug".into(), Value::Null]);
        let product: ProductRow = row.deserialize().unwrap();
        assert_eq!(
            product,
            ProductRow {
                id: 7,
                title: "Mug".to_string(),
                total_sales: None
            }
        );
    }

    #[test]
    fn test_deserialize_all() {
        let rows = vec![
            Row::new(columns(), vec![Value::Integer(1), "A".into(), Value::Integer(5)]),
            Row::new(columns(), vec![Value::Integer(2), "B".into(), Value::Null]),
        ];
        let result = QueryResult::new(columns(), rows);
        let products: Vec<ProductRow> = result.deserialize_all().unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(products[0].total_sales, Some(5));
        assert_eq!(products[1].title, "B");
    }

    #[test]
    fn test_deserialize_type_mismatch() {
        let row = Row::new(columns(), vec!["seven".into(), "Mug".into(), Value::Null]);
        assert!(matches!(
            row.deserialize::<ProductRow>(),
            Err(DbError::DeserializeError(_))
        ));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(true), Value::Integer(1));
        assert_eq!(Value::from(10usize), Value::Integer(10));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn test_blob_to_json() {
        assert_eq!(Value::Blob(b"abc".to_vec()).to_json(), serde_json::json!("abc"));
        assert_eq!(Value::Blob(vec![0xff, 0xfe]).to_json(), serde_json::json!("//4="));
    }
}
