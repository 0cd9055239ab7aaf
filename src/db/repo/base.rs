use std::sync::Arc;

use async_trait::async_trait;

use crate::db::error::{DbLayerError, DbResult};
use crate::db::metadata::{Entity, SqlValue};
use crate::db::predicate::Predicate;
use crate::db::query;
use crate::db::session::DbSession;

/// Statements synthesized once per entity kind, at repository
/// construction. Missing key metadata fails here, before any statement
/// runs.
#[derive(Debug, Clone)]
pub struct EntityQueries {
    pub insert: String,
    pub update: String,
    pub delete: String,
    pub select_all: String,
}

impl EntityQueries {
    pub fn build<E: Entity>() -> DbResult<Self> {
        let meta = E::meta();
        Ok(Self {
            insert: query::insert(meta),
            update: query::update(meta)?,
            delete: query::delete(meta)?,
            select_all: query::select_all(meta),
        })
    }
}

/// CRUD primitives shared by every repository, bound to one entity kind
/// and one session. Write primitives report zero affected rows through
/// their return value, not an error; store errors propagate unmodified.
#[async_trait]
pub trait RepositoryBase: Send + Sync + Sized {
    type Entity: Entity + 'static;

    fn from_parts(session: Arc<DbSession>, queries: EntityQueries) -> Self;

    fn session(&self) -> &DbSession;

    fn queries(&self) -> &EntityQueries;

    fn new(session: &Arc<DbSession>) -> DbResult<Self> {
        Ok(Self::from_parts(
            Arc::clone(session),
            EntityQueries::build::<Self::Entity>()?,
        ))
    }

    /// Returns the entity back on success. The generated key is not
    /// written onto it; callers needing the new id re-fetch.
    async fn add(&self, entity: Self::Entity) -> DbResult<Option<Self::Entity>> {
        let affected = self
            .session()
            .execute(&self.queries().insert, &insert_params(&entity))
            .await?;
        Ok((affected > 0).then_some(entity))
    }

    /// The insert statement executed once per element. Succeeds only when
    /// the summed affected count equals the batch size; the batch is not
    /// internally transactional.
    async fn add_range(&self, entities: Vec<Self::Entity>) -> DbResult<Option<Vec<Self::Entity>>> {
        let mut affected = 0u64;
        for entity in &entities {
            affected += self
                .session()
                .execute(&self.queries().insert, &insert_params(entity))
                .await?;
        }
        Ok((affected as usize == entities.len()).then_some(entities))
    }

    /// Full-row update keyed on the entity's id; true iff a row changed.
    async fn update(&self, entity: &Self::Entity) -> DbResult<bool> {
        let affected = self
            .session()
            .execute(&self.queries().update, &update_params(entity)?)
            .await?;
        Ok(affected > 0)
    }

    /// Physical delete by id; true iff a row was removed.
    async fn delete(&self, id: i64) -> DbResult<bool> {
        let affected = self
            .session()
            .execute(&self.queries().delete, &[SqlValue::Int(id)])
            .await?;
        Ok(affected > 0)
    }

    /// Unconditional full-table scan; no paging at this layer.
    async fn get_all(&self) -> DbResult<Vec<Self::Entity>> {
        self.session().fetch_all(&self.queries().select_all, &[]).await
    }

    async fn get(&self, filter: &Predicate) -> DbResult<Vec<Self::Entity>> {
        let (clause, params) = filter.compile();
        let sql = query::select_where(Self::Entity::meta(), &clause);
        self.session().fetch_all(&sql, &params).await
    }

    async fn get_first_or_default(&self, filter: &Predicate) -> DbResult<Option<Self::Entity>> {
        let (clause, params) = filter.compile();
        let sql = query::select_where(Self::Entity::meta(), &clause);
        self.session().fetch_first(&sql, &params).await
    }

    async fn get_total(&self, filter: &Predicate) -> DbResult<i64> {
        let (clause, params) = filter.compile();
        let sql = query::count(Self::Entity::meta(), &clause);
        self.session().fetch_scalar(&sql, &params).await
    }

    /// The one strict lookup: absence is an error, not an empty result.
    async fn get_by_id(&self, id: i64) -> DbResult<Self::Entity> {
        let meta = Self::Entity::meta();
        let key = meta
            .key_field()
            .ok_or(DbLayerError::MissingKey { table: meta.table })?;
        let found = self
            .get_first_or_default(&Predicate::eq(key.column, id))
            .await?;
        found.ok_or(DbLayerError::NotFound {
            entity: meta.table,
            id,
        })
    }
}

fn insert_params<E: Entity>(entity: &E) -> Vec<SqlValue> {
    E::meta()
        .insert_fields()
        .map(|field| entity.value_of(field.name))
        .collect()
}

fn update_params<E: Entity>(entity: &E) -> DbResult<Vec<SqlValue>> {
    let meta = E::meta();
    let key = meta
        .key_field()
        .ok_or(DbLayerError::MissingKey { table: meta.table })?;
    let mut params = insert_params(entity);
    params.push(entity.value_of(key.name));
    Ok(params)
}
