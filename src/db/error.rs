use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbLayerError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{entity} with id [{id}] could not be found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("a transaction is already active on this session")]
    TransactionActive,
    #[error("no transaction is active on this session")]
    NoTransaction,
    #[error("entity mapped to table {table} declares no key field")]
    MissingKey { table: &'static str },
    #[error("entity mapped to table {table} declares no field named {field}")]
    UnknownField {
        table: &'static str,
        field: &'static str,
    },
}

pub type DbResult<T> = Result<T, DbLayerError>;
