use std::sync::Arc;

use super::base::{EntityQueries, RepositoryBase};
use crate::db::entities::prelude::ValidationCode;
use crate::db::error::DbResult;
use crate::db::predicate::Predicate;
use crate::db::session::DbSession;

pub struct ValidationCodeRepository {
    session: Arc<DbSession>,
    queries: EntityQueries,
}

impl RepositoryBase for ValidationCodeRepository {
    type Entity = ValidationCode;

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

impl ValidationCodeRepository {
    pub async fn find_by_user(&self, user_id: i64) -> DbResult<Option<ValidationCode>> {
        self.get_first_or_default(&Predicate::eq("user_id", user_id))
            .await
    }
}
