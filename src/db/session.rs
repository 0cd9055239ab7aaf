use std::str::FromStr;

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::{DbLayerError, DbResult};
use super::metadata::{Entity, SqlValue};
use crate::config::DatabaseConfig;

/// One connection and its current transaction, shared by every repository
/// in a unit of work. Access is serialized through an async mutex: a
/// session runs one logical operation at a time. Dropping the session
/// closes the connection.
pub struct DbSession {
    inner: Mutex<SessionInner>,
}

struct SessionInner {
    conn: SqliteConnection,
    tx_active: bool,
}

impl DbSession {
    pub async fn connect(cfg: &DatabaseConfig) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(&cfg.url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&options).await?;
        info!(url = %cfg.url, "database session opened");
        Ok(Self {
            inner: Mutex::new(SessionInner {
                conn,
                tx_active: false,
            }),
        })
    }

    pub(crate) async fn execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<u64> {
        let mut inner = self.inner.lock().await;
        debug!(%sql, "execute");
        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_value(query, value);
        }
        let result = query.execute(&mut inner.conn).await?;
        Ok(result.rows_affected())
    }

    pub(crate) async fn fetch_rows(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<SqliteRow>> {
        let mut inner = self.inner.lock().await;
        debug!(%sql, "query");
        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_value(query, value);
        }
        Ok(query.fetch_all(&mut inner.conn).await?)
    }

    pub(crate) async fn fetch_all<E: Entity>(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> DbResult<Vec<E>> {
        let rows = self.fetch_rows(sql, params).await?;
        let mut entities = Vec::with_capacity(rows.len());
        for row in &rows {
            entities.push(E::from_row(row)?);
        }
        Ok(entities)
    }

    /// First row of the result set, decoded, or `None`.
    pub(crate) async fn fetch_first<E: Entity>(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> DbResult<Option<E>> {
        let rows = self.fetch_rows(sql, params).await?;
        match rows.first() {
            Some(row) => Ok(Some(E::from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Single-column single-row integer projection (counts).
    pub(crate) async fn fetch_scalar(&self, sql: &str, params: &[SqlValue]) -> DbResult<i64> {
        let rows = self.fetch_rows(sql, params).await?;
        let row = rows.first().ok_or(sqlx::Error::RowNotFound)?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    /// Starts a transaction on the shared connection. A session holds at
    /// most one transaction: beginning while one is active is rejected
    /// rather than silently reused.
    pub async fn begin_transaction(&self) -> DbResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.tx_active {
            return Err(DbLayerError::TransactionActive);
        }
        sqlx::query("BEGIN").execute(&mut inner.conn).await?;
        inner.tx_active = true;
        debug!("transaction started");
        Ok(())
    }

    pub async fn commit(&self) -> DbResult<()> {
        let mut inner = self.inner.lock().await;
        if !inner.tx_active {
            return Err(DbLayerError::NoTransaction);
        }
        sqlx::query("COMMIT").execute(&mut inner.conn).await?;
        inner.tx_active = false;
        debug!("transaction committed");
        Ok(())
    }

    pub async fn rollback(&self) -> DbResult<()> {
        let mut inner = self.inner.lock().await;
        if !inner.tx_active {
            return Err(DbLayerError::NoTransaction);
        }
        sqlx::query("ROLLBACK").execute(&mut inner.conn).await?;
        inner.tx_active = false;
        debug!("transaction rolled back");
        Ok(())
    }

    pub async fn in_transaction(&self) -> bool {
        self.inner.lock().await.tx_active
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Bool(value) => query.bind(*value),
        SqlValue::Int(value) => query.bind(*value),
        SqlValue::Text(value) => query.bind(value.as_str()),
        SqlValue::Timestamp(value) => query.bind(*value),
    }
}
