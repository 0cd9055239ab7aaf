use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::db::{DbSession, UnitOfWork, schema};

/// Fresh in-memory database with the schema synced, for tests.
pub async fn memory_session() -> Arc<DbSession> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
    };
    let session = DbSession::connect(&cfg).await.expect("open in-memory database");
    schema::sync(&session).await.expect("sync schema");
    Arc::new(session)
}

pub async fn memory_unit_of_work() -> UnitOfWork {
    UnitOfWork::new(memory_session().await).expect("build unit of work")
}
