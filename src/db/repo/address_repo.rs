use std::sync::Arc;

use serde::Deserialize;

use super::base::{EntityQueries, RepositoryBase};
use crate::db::entities::prelude::{Address, User};
use crate::db::error::DbResult;
use crate::db::metadata::Entity;
use crate::db::predicate::Predicate;
use crate::db::query;
use crate::db::row;
use crate::db::session::DbSession;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressFilter {
    pub district: Option<String>,
    pub locality: Option<String>,
    pub uf: Option<String>,
    pub search: Option<String>,
}

pub struct AddressRepository {
    session: Arc<DbSession>,
    queries: EntityQueries,
}

impl RepositoryBase for AddressRepository {
    type Entity = Address;

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

impl AddressRepository {
    fn join_select() -> DbResult<String> {
        query::join_select(Address::meta(), "A", "user_id", User::meta(), "U")
    }

    fn apply_filter(mut predicate: Predicate, filter: &AddressFilter) -> Predicate {
        if let Some(district) = filter.district.as_deref().filter(|value| !value.is_empty()) {
            predicate = predicate.and(Predicate::contains("A.district", district));
        }
        if let Some(locality) = filter.locality.as_deref().filter(|value| !value.is_empty()) {
            predicate = predicate.and(Predicate::contains("A.locality", locality));
        }
        if let Some(uf) = filter.uf.as_deref().filter(|value| !value.is_empty()) {
            predicate = predicate.and(Predicate::eq("A.uf", uf));
        }
        if let Some(search) = filter.search.as_deref().filter(|value| !value.is_empty()) {
            predicate = predicate.and(Predicate::any(vec![
                Predicate::eq("A.district", search),
                Predicate::eq("A.locality", search),
            ]));
        }
        predicate
    }

    async fn fetch_joined(&self, predicate: Predicate) -> DbResult<Vec<Address>> {
        let (clause, params) = predicate.compile();
        let sql = format!("{} WHERE {}", Self::join_select()?, clause);
        let rows = self.session.fetch_rows(&sql, &params).await?;
        Ok(row::map_joined_rows::<Address, User, _>(
            &rows,
            |mut address, user| {
                address.user = Some(user);
                address
            },
        )?)
    }

    async fn count_joined(&self, predicate: Predicate) -> DbResult<i64> {
        let (clause, params) = predicate.compile();
        let sql = format!(
            "SELECT COUNT(A.id) FROM {} A INNER JOIN {} U ON A.user_id = U.id WHERE {}",
            Address::meta().table,
            User::meta().table,
            clause
        );
        self.session.fetch_scalar(&sql, &params).await
    }

    /// Active addresses with their owner populated, narrowed by the filter.
    pub async fn get_by_filter(&self, filter: &AddressFilter) -> DbResult<Vec<Address>> {
        self.fetch_joined(Self::apply_filter(Predicate::eq("A.active", true), filter))
            .await
    }

    pub async fn get_total_by_filter(&self, filter: &AddressFilter) -> DbResult<i64> {
        self.count_joined(Self::apply_filter(Predicate::eq("A.active", true), filter))
            .await
    }

    /// One user's addresses regardless of the active flag.
    pub async fn get_user_addresses(
        &self,
        user_id: i64,
        filter: &AddressFilter,
    ) -> DbResult<Vec<Address>> {
        self.fetch_joined(Self::apply_filter(
            Predicate::eq("A.user_id", user_id),
            filter,
        ))
        .await
    }

    pub async fn get_total_user_addresses(
        &self,
        user_id: i64,
        filter: &AddressFilter,
    ) -> DbResult<i64> {
        self.count_joined(Self::apply_filter(
            Predicate::eq("A.user_id", user_id),
            filter,
        ))
        .await
    }
}
