//! SQL synthesis from entity metadata. Statements use `@field` named
//! parameters; callers bind values in the same order the fields are
//! emitted here. Filter clauses compiled from predicates use anonymous
//! placeholders and must not be mixed with named ones in one statement.

use super::error::{DbLayerError, DbResult};
use super::metadata::EntityMeta;

pub fn insert(meta: &EntityMeta) -> String {
    let columns: Vec<&str> = meta.insert_fields().map(|field| field.column).collect();
    let params: Vec<String> = meta
        .insert_fields()
        .map(|field| format!("@{}", field.name))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        meta.table,
        columns.join(", "),
        params.join(", ")
    )
}

/// Full-row update: every non-key, non-ignored column is rewritten.
/// Partial updates are not supported at this layer.
pub fn update(meta: &EntityMeta) -> DbResult<String> {
    let key = meta
        .key_field()
        .ok_or(DbLayerError::MissingKey { table: meta.table })?;
    let assignments: Vec<String> = meta
        .insert_fields()
        .map(|field| format!("{} = @{}", field.column, field.name))
        .collect();
    Ok(format!(
        "UPDATE {} SET {} WHERE {} = @{}",
        meta.table,
        assignments.join(", "),
        key.column,
        key.name
    ))
}

pub fn delete(meta: &EntityMeta) -> DbResult<String> {
    let key = meta
        .key_field()
        .ok_or(DbLayerError::MissingKey { table: meta.table })?;
    Ok(format!(
        "DELETE FROM {} WHERE {} = @{}",
        meta.table, key.column, key.name
    ))
}

pub fn select_all(meta: &EntityMeta) -> String {
    format!("SELECT * FROM {}", meta.table)
}

pub fn select_where(meta: &EntityMeta, clause: &str) -> String {
    format!("SELECT * FROM {} WHERE {}", meta.table, clause)
}

pub fn count(meta: &EntityMeta, clause: &str) -> String {
    format!("SELECT COUNT(*) FROM {} WHERE {}", meta.table, clause)
}

/// Alias-qualified column list of the projected fields, in declaration
/// order. Join queries select this instead of `*` so result rows can be
/// split back into entities by ordinal.
pub fn projection(meta: &EntityMeta, alias: &str) -> String {
    let columns: Vec<String> = meta
        .projected_fields()
        .map(|field| format!("{alias}.{}", field.column))
        .collect();
    columns.join(", ")
}

/// INNER JOIN select of primary plus secondary, joined on the primary's
/// foreign-key field against the secondary's key column.
pub fn join_select(
    primary: &EntityMeta,
    primary_alias: &str,
    foreign_key_field: &'static str,
    secondary: &EntityMeta,
    secondary_alias: &str,
) -> DbResult<String> {
    let foreign_key = primary
        .field(foreign_key_field)
        .ok_or(DbLayerError::UnknownField {
            table: primary.table,
            field: foreign_key_field,
        })?;
    let secondary_key = secondary.key_field().ok_or(DbLayerError::MissingKey {
        table: secondary.table,
    })?;
    Ok(format!(
        "SELECT {}, {} FROM {} {} INNER JOIN {} {} ON {}.{} = {}.{}",
        projection(primary, primary_alias),
        projection(secondary, secondary_alias),
        primary.table,
        primary_alias,
        secondary.table,
        secondary_alias,
        primary_alias,
        foreign_key.column,
        secondary_alias,
        secondary_key.column,
    ))
}
