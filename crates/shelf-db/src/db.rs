//! Database connection and query execution.

use crate::{DbError, QueryResult, Value};
#[cfg(target_arch = "wasm32")]
use crate::Row;
use serde::de::DeserializeOwned;

/// SQLite database connection.
pub struct Db {
    name: String,
    #[cfg(target_arch = "wasm32")]
    conn: spin_sdk::sqlite::Connection,
}

impl Db {
    /// Open the default SQLite database.
    pub fn open_default() -> Result<Self, DbError> {
        Self::open("default")
    }

    /// Open a named SQLite database.
    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, DbError> {
        let conn = spin_sdk::sqlite::Connection::open(name)
            .map_err(|e| DbError::OpenError(e.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            conn,
        })
    }

    /// Open a named SQLite database.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(name: &str) -> Result<Self, DbError> {
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Name of the database label this connection was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute a SQL query and return raw results.
    #[cfg(target_arch = "wasm32")]
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError> {
        use spin_sdk::sqlite::Value as SpinValue;

        let spin_params: Vec<SpinValue> = params
            .iter()
            .map(|v| match v {
                Value::Null => SpinValue::Null,
                Value::Integer(i) => SpinValue::Integer(*i),
                Value::Real(f) => SpinValue::Real(*f),
                Value::Text(s) => SpinValue::Text(s.clone()),
                Value::Blob(b) => SpinValue::Blob(b.clone()),
            })
            .collect();

        let result = self
            .conn
            .execute(sql, spin_params.as_slice())
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        let columns: Vec<String> = result.columns.iter().map(|c| c.to_string()).collect();

        let rows: Vec<Row> = result
            .rows
            .iter()
            .map(|row| {
                let values: Vec<Value> = row
                    .values
                    .iter()
                    .map(|v| match v {
                        SpinValue::Null => Value::Null,
                        SpinValue::Integer(i) => Value::Integer(*i),
                        SpinValue::Real(f) => Value::Real(*f),
                        SpinValue::Text(s) => Value::Text(s.clone()),
                        SpinValue::Blob(b) => Value::Blob(b.clone()),
                    })
                    .collect();
                Row::new(columns.clone(), values)
            })
            .collect();

        Ok(QueryResult::new(columns, rows))
    }

    /// Execute a SQL query and return raw results.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn query(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult, DbError> {
        Err(DbError::Unavailable)
    }

    /// Execute a SQL query and deserialize results into a vector.
    pub fn query_as<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, DbError> {
        self.query(sql, params)?.deserialize_all()
    }
}
