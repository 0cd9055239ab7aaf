use std::sync::Arc;

use super::base::{EntityQueries, RepositoryBase};
use crate::db::entities::prelude::RegistrationToken;
use crate::db::error::DbResult;
use crate::db::predicate::Predicate;
use crate::db::session::DbSession;

pub struct RegistrationTokenRepository {
    session: Arc<DbSession>,
    queries: EntityQueries,
}

impl RepositoryBase for RegistrationTokenRepository {
    type Entity = RegistrationToken;

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

impl RegistrationTokenRepository {
    pub async fn find_by_user(&self, user_id: i64) -> DbResult<Option<RegistrationToken>> {
        self.get_first_or_default(&Predicate::eq("user_id", user_id))
            .await
    }

    pub async fn find_by_token(&self, token: &str) -> DbResult<Option<RegistrationToken>> {
        self.get_first_or_default(&Predicate::eq("token", token))
            .await
    }
}
