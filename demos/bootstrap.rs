//! Opens the configured database, syncs the schema and seeds the basic
//! role. Run with `cargo run --example bootstrap`.

use std::sync::Arc;

use cadastro::config::AppConfig;
use cadastro::db::entities::prelude::Role;
use cadastro::db::{DbSession, Predicate, RepositoryBase, UnitOfWork, schema};
use cadastro::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env()?;
    logging::init_tracing(&cfg.log_level);

    let session = Arc::new(DbSession::connect(&cfg.database).await?);
    schema::sync(&session).await?;
    let uow = UnitOfWork::new(session)?;

    if uow.role().get_basic_profile("Basic").await?.is_none() {
        let _ = uow.role().add(Role::new("Basic")).await?;
        tracing::info!("seeded the basic role");
    }

    let total = uow.role().get_total(&Predicate::all(vec![])).await?;
    tracing::info!(total, "roles registered");
    Ok(())
}
