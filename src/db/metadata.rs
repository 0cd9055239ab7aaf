use chrono::{DateTime, FixedOffset};

pub use sqlx::Row;
pub use sqlx::sqlite::SqliteRow;

/// Re-exported so derived code only needs a path to this module.
pub type SqlxError = sqlx::Error;

/// Static description of one persisted field.
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta {
    pub name: &'static str,
    pub column: &'static str,
    pub key: bool,
    /// Excluded from generated column lists and projections; navigation
    /// fields populated by bespoke joins are declared this way.
    pub ignored: bool,
    pub sql_type: &'static str,
    pub nullable: bool,
}

/// Static description of one entity kind. Built once per kind by the
/// `Entity` derive and held in process-wide read-only state.
#[derive(Debug, Clone, Copy)]
pub struct EntityMeta {
    pub table: &'static str,
    pub fields: &'static [FieldMeta],
}

impl EntityMeta {
    /// First field flagged as the primary key, if any.
    pub fn key_field(&self) -> Option<&'static FieldMeta> {
        self.fields.iter().find(|field| field.key)
    }

    /// Fields that participate in generated INSERT/UPDATE column lists.
    pub fn insert_fields(&self) -> impl Iterator<Item = &'static FieldMeta> {
        self.fields
            .iter()
            .filter(|field| !field.key && !field.ignored)
    }

    /// Fields that appear in projections, key included.
    pub fn projected_fields(&self) -> impl Iterator<Item = &'static FieldMeta> {
        self.fields.iter().filter(|field| !field.ignored)
    }

    pub fn projected_len(&self) -> usize {
        self.projected_fields().count()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldMeta> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A parameter value on its way into a statement. Every value reaches the
/// store through a bind, never through the SQL text itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Timestamp(DateTime<FixedOffset>),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<FixedOffset>> for SqlValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<&i64> for SqlValue {
    fn from(value: &i64) -> Self {
        Self::Int(*value)
    }
}

impl From<&bool> for SqlValue {
    fn from(value: &bool) -> Self {
        Self::Bool(*value)
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<&DateTime<FixedOffset>> for SqlValue {
    fn from(value: &DateTime<FixedOffset>) -> Self {
        Self::Timestamp(*value)
    }
}

impl From<&Option<i64>> for SqlValue {
    fn from(value: &Option<i64>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

impl From<&Option<bool>> for SqlValue {
    fn from(value: &Option<bool>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

impl From<&Option<String>> for SqlValue {
    fn from(value: &Option<String>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

impl From<&Option<DateTime<FixedOffset>>> for SqlValue {
    fn from(value: &Option<DateTime<FixedOffset>>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

/// One persisted entity kind. Implemented by `#[derive(Entity)]`; the
/// metadata is fixed at compile time and never varies at runtime.
pub trait Entity: Sized + Send + Sync {
    fn meta() -> &'static EntityMeta;

    /// Parameter source keyed by field name. Fields the entity does not
    /// declare bind as NULL.
    fn value_of(&self, field: &str) -> SqlValue;

    /// Decode a row by column name (generic single-table reads).
    fn from_row(row: &SqliteRow) -> Result<Self, SqlxError>;

    /// Decode a row by ordinal starting at `offset`, following the
    /// declaration order of the projected fields (joined reads).
    fn from_row_at(row: &SqliteRow, offset: usize) -> Result<Self, SqlxError>;
}
