//! Database ID type definition.

use std::fmt;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

/// The ID of a transaction, assigned by the seed feed rather than by the database.
///
/// The feed may use integers or strings. Both are stored as-is, so `1` and
/// `"1"` are different IDs. When sorting, integer IDs come before string IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    /// A numeric ID, e.g. `1`.
    Integer(i64),
    /// A string ID, e.g. `"a1"`.
    Text(String),
}

impl From<i64> for TransactionId {
    fn from(id: i64) -> Self {
        Self::Integer(id)
    }
}

impl From<&str> for TransactionId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id:?}"),
        }
    }
}

impl ToSql for TransactionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Integer(id) => ToSqlOutput::from(*id),
            Self::Text(id) => ToSqlOutput::from(id.as_str()),
        })
    }
}

impl FromSql for TransactionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(id) => Ok(Self::Integer(id)),
            ValueRef::Text(_) => value.as_str().map(|id| Self::Text(id.to_owned())),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

#[cfg(test)]
impl TransactionId {
    /// The numeric ID, or `None` for a string ID.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(id) => Some(*id),
            Self::Text(_) => None,
        }
    }
}
