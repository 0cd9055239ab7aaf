use std::sync::Arc;

use super::base::{EntityQueries, RepositoryBase};
use crate::db::entities::prelude::Role;
use crate::db::error::DbResult;
use crate::db::predicate::Predicate;
use crate::db::session::DbSession;

pub struct RoleRepository {
    session: Arc<DbSession>,
    queries: EntityQueries,
}

impl RepositoryBase for RoleRepository {
    type Entity = Role;

    fn from_parts(session: Arc<DbSession>, queries: EntityQueries) -> Self {
        Self { session, queries }
    }

    fn session(&self) -> &DbSession {
        &self.session
    }

    fn queries(&self) -> &EntityQueries {
        &self.queries
    }
}

impl RoleRepository {
    /// The role newly registered users are assigned to, looked up by its
    /// configured name.
    pub async fn get_basic_profile(&self, basic_role_name: &str) -> DbResult<Option<Role>> {
        self.get_first_or_default(&Predicate::eq("name", basic_role_name))
            .await
    }
}
