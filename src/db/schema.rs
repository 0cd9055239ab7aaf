//! Create-if-missing schema bootstrap synthesized from the same entity
//! metadata the query layer uses. Not a migration system: existing tables
//! are left alone.

use tracing::{debug, info};

use super::entities::prelude::*;
use super::error::DbResult;
use super::metadata::{Entity, EntityMeta};
use super::session::DbSession;

pub fn create_table(meta: &EntityMeta) -> String {
    let mut columns = Vec::new();
    for field in meta.projected_fields() {
        if field.key {
            columns.push(format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", field.column));
        } else {
            let constraint = if field.nullable { "" } else { " NOT NULL" };
            columns.push(format!("{} {}{}", field.column, field.sql_type, constraint));
        }
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        meta.table,
        columns.join(", ")
    )
}

/// Ensures one table per entity kind exists on the session's database.
pub async fn sync(session: &DbSession) -> DbResult<()> {
    let metas = [
        Role::meta(),
        User::meta(),
        Address::meta(),
        RefreshToken::meta(),
        RegistrationToken::meta(),
        ValidationCode::meta(),
    ];
    for meta in metas {
        debug!(table = meta.table, "syncing table");
        session.execute(&create_table(meta), &[]).await?;
    }
    info!("database schema synced from entity metadata");
    Ok(())
}
