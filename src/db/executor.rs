//! Thin statement runner over the SQLite pool.
//!
//! Every statement goes through positional `?` binding; callers pass values
//! as [`Param`]s and never splice them into the SQL text.

use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Arguments, FromRow, Pool, Sqlite};

use crate::error::StoreError;

pub type SqlitePool = Pool<Sqlite>;

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Integer(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Param::Null)
    }
}

#[derive(Clone)]
pub struct QueryExecutor {
    pool: SqlitePool,
}

impl QueryExecutor {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run a statement that returns no rows (DDL or DML). Returns rows affected.
    pub async fn execute(&self, sql: &str, params: &[Param]) -> Result<u64, StoreError> {
        let args = bind(params)?;
        let done = sqlx::query_with(sql, args).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }

    /// Run an INSERT and return the id of the new row.
    pub async fn insert(&self, sql: &str, params: &[Param]) -> Result<i64, StoreError> {
        let args = bind(params)?;
        let done = sqlx::query_with(sql, args).execute(&self.pool).await?;
        Ok(done.last_insert_rowid())
    }

    /// Fetch the first column of the first row, or `None` when no row matches.
    pub async fn retrieve_value<T>(&self, sql: &str, params: &[Param]) -> Result<Option<T>, StoreError>
    where
        (T,): for<'r> FromRow<'r, SqliteRow>,
        T: Send + Unpin,
    {
        let args = bind(params)?;
        let value = sqlx::query_scalar_with::<_, T, _>(sql, args)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    pub async fn fetch_optional<T>(&self, sql: &str, params: &[Param]) -> Result<Option<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let args = bind(params)?;
        let row = sqlx::query_as_with::<_, T, _>(sql, args)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn fetch_all<T>(&self, sql: &str, params: &[Param]) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let args = bind(params)?;
        let rows = sqlx::query_as_with::<_, T, _>(sql, args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

fn bind<'q>(params: &[Param]) -> Result<SqliteArguments<'q>, StoreError> {
    let mut args = SqliteArguments::default();
    for param in params {
        let added = match param {
            Param::Integer(v) => args.add(*v),
            Param::Text(s) => args.add(s.clone()),
            Param::Null => args.add(None::<String>),
        };
        added.map_err(|e| StoreError::engine(format!("failed to bind parameter: {e}")))?;
    }
    Ok(args)
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    let opts = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    // One connection: every in-memory connection is its own database.
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .unwrap()
}
