use super::{FieldValue, Rule, RuleError};
use crate::{LazyLock, error::Error};
use regex::Regex;
use std::borrow::Cow;

/// A row excluded from the uniqueness check, e.g. the record being updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    /// Column compared with the value.
    pub column: String,
    /// Value of the excluded row.
    pub value: String,
}

impl Exclusion {
    /// Creates a new instance.
    #[inline]
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if both the column and the value are non-empty.
    #[inline]
    pub fn is_effective(&self) -> bool {
        !self.column.is_empty() && !self.value.is_empty()
    }
}

/// A lookup which counts the rows whose `column` equals `value` in `table`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueQuery<'a> {
    table: &'a str,
    column: &'a str,
    value: Cow<'a, str>,
    exclusion: Option<&'a Exclusion>,
}

impl<'a> UniqueQuery<'a> {
    /// Creates a new instance.
    /// Table and column names must be SQL identifiers.
    /// An exclusion with an empty column or value is ignored.
    pub fn new(
        table: &'a str,
        column: &'a str,
        value: &'a FieldValue<'_>,
        exclusion: Option<&'a Exclusion>,
    ) -> Result<Self, RuleError> {
        check_identifier(table)?;
        check_identifier(column)?;
        let exclusion = exclusion.filter(|exclusion| exclusion.is_effective());
        if let Some(exclusion) = exclusion {
            check_identifier(&exclusion.column)?;
        }
        Ok(Self {
            table,
            column,
            value: value.as_text(),
            exclusion,
        })
    }

    /// Returns the table name.
    #[inline]
    pub fn table(&self) -> &str {
        self.table
    }

    /// Returns the column name.
    #[inline]
    pub fn column(&self) -> &str {
        self.column
    }

    /// Returns the value to look up.
    #[inline]
    pub fn value(&self) -> &str {
        self.value.as_ref()
    }

    /// Returns the effective exclusion.
    #[inline]
    pub fn exclusion(&self) -> Option<&Exclusion> {
        self.exclusion
    }

    /// Renders the counting statement together with its bound values.
    /// The placeholder is `?` for most SQL flavors and `$N` if `placeholder` is `'$'`.
    pub fn to_sql(&self, placeholder: char) -> (String, Vec<&str>) {
        let mut values = Vec::with_capacity(2);
        let mut bind = |value| {
            values.push(value);
            if placeholder == '$' {
                format!("${}", values.len())
            } else {
                "?".to_owned()
            }
        };

        let table = self.table;
        let column = self.column;
        let mut sql = format!(
            "SELECT COUNT(*) FROM {table} WHERE {column} = {}",
            bind(self.value())
        );
        if let Some(exclusion) = self.exclusion {
            let column = &exclusion.column;
            sql += &format!(" AND {column} <> {}", bind(exclusion.value.as_str()));
        }
        (sql, values)
    }
}

/// A capability to count rows in a database, used by the `unique` rule.
pub trait RowCounter: Send + Sync {
    /// Counts the rows matching the query.
    fn count_rows(&self, query: &UniqueQuery<'_>) -> Result<u64, Error>;
}

impl<F> RowCounter for F
where
    F: Fn(&UniqueQuery<'_>) -> Result<u64, Error> + Send + Sync,
{
    #[inline]
    fn count_rows(&self, query: &UniqueQuery<'_>) -> Result<u64, Error> {
        self(query)
    }
}

/// Checks that the name is a plain or schema-qualified SQL identifier.
fn check_identifier(name: &str) -> Result<(), RuleError> {
    if IDENTIFIER_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(RuleError::malformed(
            Rule::Unique,
            format!("`{name}` is not a valid SQL identifier"),
        ))
    }
}

/// Regex for the SQL identifier.
static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("fail to create a regex for the SQL identifier")
});

#[cfg(test)]
mod tests {
    use super::{Exclusion, UniqueQuery};
    use crate::validation::FieldValue;

    #[test]
    fn it_renders_counting_statements() {
        let value = FieldValue::from("alice@example.com");
        let query = UniqueQuery::new("users", "email", &value, None).unwrap();
        let (sql, values) = query.to_sql('?');
        assert_eq!(sql, "SELECT COUNT(*) FROM users WHERE email = ?");
        assert_eq!(values, vec!["alice@example.com"]);

        let exclusion = Exclusion::new("id", "5");
        let query = UniqueQuery::new("public.users", "email", &value, Some(&exclusion)).unwrap();
        let (sql, values) = query.to_sql('$');
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM public.users WHERE email = $1 AND id <> $2"
        );
        assert_eq!(values, vec!["alice@example.com", "5"]);
    }

    #[test]
    fn it_ignores_ineffective_exclusions() {
        let value = FieldValue::from(42);
        let exclusion = Exclusion::new("id", "");
        let query = UniqueQuery::new("orders", "code", &value, Some(&exclusion)).unwrap();
        assert!(query.exclusion().is_none());
        assert_eq!(query.value(), "42");
    }

    #[test]
    fn it_rejects_unsafe_identifiers() {
        let value = FieldValue::from("x");
        assert!(UniqueQuery::new("users; DROP TABLE users", "email", &value, None).is_err());
        assert!(UniqueQuery::new("users", "e-mail", &value, None).is_err());
        let exclusion = Exclusion::new("id OR 1=1", "5");
        assert!(UniqueQuery::new("users", "email", &value, Some(&exclusion)).is_err());
    }
}
