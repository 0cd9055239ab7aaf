use std::sync::Arc;

use super::base::{EntityQueries, RepositoryBase};
use crate::db::entities::prelude::RefreshToken;
use crate::db::error::DbResult;
use crate::db::predicate::Predicate;
use crate::db::session::DbSession;

pub struct RefreshTokenRepository {
    session: Arc<DbSession>,
    queries: EntityQueries,
}

impl RepositoryBase for RefreshTokenRepository {
    type Entity = RefreshToken;

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

impl RefreshTokenRepository {
    pub async fn find_by_token(&self, token: &str) -> DbResult<Option<RefreshToken>> {
        self.get_first_or_default(&Predicate::eq("token", token))
            .await
    }

    /// Token lookup narrowed to tokens that have not been revoked. Expiry
    /// is the caller's check: it depends on the current instant.
    pub async fn find_active_by_token(&self, token: &str) -> DbResult<Option<RefreshToken>> {
        self.get_first_or_default(
            &Predicate::eq("token", token).and(Predicate::is_null("revoked")),
        )
        .await
    }
}
