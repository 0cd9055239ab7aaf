use super::metadata::SqlValue;

#[derive(Debug, Clone, Copy)]
pub enum CompareOp {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    fn sql(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// A filter expression compiled to SQL text plus an ordered parameter
/// list. Column references are emitted verbatim (callers may qualify them
/// with a join alias); values are always bound, never interpolated.
#[derive(Debug, Clone)]
pub enum Predicate {
    Eq(String, SqlValue),
    Ne(String, SqlValue),
    Compare {
        column: String,
        op: CompareOp,
        value: SqlValue,
    },
    Like(String, String),
    IsNull(String),
    NotNull(String),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::Eq(column.into(), value.into())
    }

    pub fn ne(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::Ne(column.into(), value.into())
    }

    pub fn compare(column: impl Into<String>, op: CompareOp, value: impl Into<SqlValue>) -> Self {
        Self::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Like(column.into(), pattern.into())
    }

    /// LIKE with the value wrapped in wildcards on both sides.
    pub fn contains(column: impl Into<String>, value: &str) -> Self {
        Self::Like(column.into(), format!("%{value}%"))
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull(column.into())
    }

    pub fn not_null(column: impl Into<String>) -> Self {
        Self::NotNull(column.into())
    }

    pub fn all(predicates: Vec<Predicate>) -> Self {
        Self::All(predicates)
    }

    pub fn any(predicates: Vec<Predicate>) -> Self {
        Self::Any(predicates)
    }

    pub fn and(self, other: Predicate) -> Self {
        match self {
            Self::All(mut predicates) => {
                predicates.push(other);
                Self::All(predicates)
            }
            first => Self::All(vec![first, other]),
        }
    }

    pub fn or(self, other: Predicate) -> Self {
        match self {
            Self::Any(mut predicates) => {
                predicates.push(other);
                Self::Any(predicates)
            }
            first => Self::Any(vec![first, other]),
        }
    }

    /// Compile to a WHERE-clause fragment and its bind values, in
    /// placeholder order.
    pub fn compile(&self) -> (String, Vec<SqlValue>) {
        let mut sql = String::new();
        let mut params = Vec::new();
        self.write(&mut sql, &mut params);
        (sql, params)
    }

    fn write(&self, sql: &mut String, params: &mut Vec<SqlValue>) {
        match self {
            Self::Eq(column, value) => {
                sql.push_str(column);
                sql.push_str(" = ?");
                params.push(value.clone());
            }
            Self::Ne(column, value) => {
                sql.push_str(column);
                sql.push_str(" <> ?");
                params.push(value.clone());
            }
            Self::Compare { column, op, value } => {
                sql.push_str(column);
                sql.push(' ');
                sql.push_str(op.sql());
                sql.push_str(" ?");
                params.push(value.clone());
            }
            Self::Like(column, pattern) => {
                sql.push_str(column);
                sql.push_str(" LIKE ?");
                params.push(SqlValue::Text(pattern.clone()));
            }
            Self::IsNull(column) => {
                sql.push_str(column);
                sql.push_str(" IS NULL");
            }
            Self::NotNull(column) => {
                sql.push_str(column);
                sql.push_str(" IS NOT NULL");
            }
            Self::All(predicates) => {
                Self::write_group(predicates, " AND ", "1 = 1", sql, params);
            }
            Self::Any(predicates) => {
                Self::write_group(predicates, " OR ", "1 = 0", sql, params);
            }
        }
    }

    fn write_group(
        predicates: &[Predicate],
        separator: &str,
        empty: &str,
        sql: &mut String,
        params: &mut Vec<SqlValue>,
    ) {
        if predicates.is_empty() {
            sql.push_str(empty);
            return;
        }
        sql.push('(');
        for (index, predicate) in predicates.iter().enumerate() {
            if index > 0 {
                sql.push_str(separator);
            }
            predicate.write(sql, params);
        }
        sql.push(')');
    }
}
