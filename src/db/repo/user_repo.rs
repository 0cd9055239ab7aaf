use std::sync::Arc;

use serde::Deserialize;

use super::base::{EntityQueries, RepositoryBase};
use crate::db::entities::prelude::{Role, User};
use crate::db::error::DbResult;
use crate::db::metadata::Entity;
use crate::db::predicate::Predicate;
use crate::db::row;
use crate::db::session::DbSession;
use crate::db::query;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub search: Option<String>,
}

pub struct UserRepository {
    session: Arc<DbSession>,
    queries: EntityQueries,
}

impl RepositoryBase for UserRepository {
    type Entity = User;

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

impl UserRepository {
    fn join_select() -> DbResult<String> {
        query::join_select(User::meta(), "U", "role_id", Role::meta(), "R")
    }

    /// Optional clauses ANDed in fixed order onto the base predicate;
    /// empty filter fields contribute nothing.
    fn apply_filter(mut predicate: Predicate, filter: &UserFilter) -> Predicate {
        if let Some(name) = filter.name.as_deref().filter(|value| !value.is_empty()) {
            predicate = predicate.and(Predicate::contains("U.name", name));
        }
        if let Some(email) = filter.email.as_deref().filter(|value| !value.is_empty()) {
            predicate = predicate.and(Predicate::eq("U.email", email));
        }
        if let Some(search) = filter.search.as_deref().filter(|value| !value.is_empty()) {
            predicate = predicate.and(Predicate::any(vec![
                Predicate::eq("U.name", search),
                Predicate::eq("U.email", search),
            ]));
        }
        predicate
    }

    /// Active users with their role populated, narrowed by the filter.
    pub async fn get_by_filter(&self, filter: &UserFilter) -> DbResult<Vec<User>> {
        let predicate = Self::apply_filter(Predicate::eq("U.active", true), filter);
        let (clause, params) = predicate.compile();
        let sql = format!("{} WHERE {}", Self::join_select()?, clause);
        let rows = self.session.fetch_rows(&sql, &params).await?;
        Ok(row::map_joined_rows::<User, Role, _>(&rows, |mut user, role| {
            user.role = Some(role);
            user
        })?)
    }

    pub async fn get_total_by_filter(&self, filter: &UserFilter) -> DbResult<i64> {
        let predicate = Self::apply_filter(Predicate::eq("U.active", true), filter);
        let (clause, params) = predicate.compile();
        let sql = format!(
            "SELECT COUNT(U.id) FROM {} U INNER JOIN {} R ON U.role_id = R.id WHERE {}",
            User::meta().table,
            Role::meta().table,
            clause
        );
        self.session.fetch_scalar(&sql, &params).await
    }

    /// Single user with role populated; optional, unlike `get_by_id`.
    pub async fn get_user_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let (clause, params) = Predicate::eq("U.id", id).compile();
        let sql = format!("{} WHERE {}", Self::join_select()?, clause);
        let rows = self.session.fetch_rows(&sql, &params).await?;
        match rows.first() {
            Some(first) => Ok(Some(row::map_joined::<User, Role, _>(
                first,
                |mut user, role| {
                    user.role = Some(role);
                    user
                },
            )?)),
            None => Ok(None),
        }
    }
}
