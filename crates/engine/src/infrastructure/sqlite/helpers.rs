//! SQLite encoding helpers for row conversion functions.
//!
//! Column conventions:
//! - ids are hyphenated UUID text
//! - timestamps are RFC 3339 UTC text with fixed microsecond precision, so
//!   lexical order is chronological
//! - times of day are `HH:MM:SS.ffffff`
//! - maps and lists are JSON text; enums are their snake_case label

use std::str::FromStr;

use chrono::{DateTime, NaiveTime, SecondsFormat, Utc};
use echoledger_domain::DomainError;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::error::ErrorKind;
use sqlx::sqlite::SqliteRow;
use sqlx::{Decode, Row, Sqlite, Type};
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S%.6f";

// =============================================================================
// Error Mapping
// =============================================================================

/// Map a sqlx error to `RepoError`, classifying constraint failures.
///
/// ```ignore
/// sqlx::query(sql).execute(&self.pool).await.map_err(map_sqlx("npc.update"))?;
/// ```
pub(crate) fn map_sqlx(operation: &'static str) -> impl FnOnce(sqlx::Error) -> RepoError {
    move |err| {
        if let sqlx::Error::Database(db) = &err {
            match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    tracing::debug!(operation, error = %db, "Storage rejected write");
                    return RepoError::constraint(db.message());
                }
                _ => {}
            }
        }
        RepoError::database(operation, err)
    }
}

// =============================================================================
// Encoding
// =============================================================================

pub(crate) fn encode_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn encode_opt_time(time: Option<DateTime<Utc>>) -> Option<String> {
    time.map(encode_time)
}

pub(crate) fn encode_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_OF_DAY_FORMAT).to_string()
}

pub(crate) fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RepoError> {
    serde_json::to_string(value).map_err(RepoError::serialization)
}

// =============================================================================
// Row Extension Trait (Decoding)
// =============================================================================

/// Extension trait for SqliteRow to simplify common deserialization patterns.
pub(crate) trait RowExt {
    /// Get a column, mapping decode failures to `RepoError::Serialization`.
    fn get_value<'r, T>(&'r self, name: &str) -> Result<T, RepoError>
    where
        T: Decode<'r, Sqlite> + Type<Sqlite>;

    /// Get a UUID text column as a typed id.
    fn get_id<I: From<Uuid>>(&self, name: &str) -> Result<I, RepoError>;

    /// Get a nullable UUID text column as a typed id.
    fn get_opt_id<I: From<Uuid>>(&self, name: &str) -> Result<Option<I>, RepoError>;

    fn get_time(&self, name: &str) -> Result<DateTime<Utc>, RepoError>;

    fn get_opt_time(&self, name: &str) -> Result<Option<DateTime<Utc>>, RepoError>;

    fn get_time_of_day(&self, name: &str) -> Result<NaiveTime, RepoError>;

    /// Get and deserialize a JSON text column.
    fn get_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, RepoError>;

    /// Parse an enum label column.
    fn get_label<T: FromStr<Err = DomainError>>(&self, name: &str) -> Result<T, RepoError>;

    fn get_opt_label<T: FromStr<Err = DomainError>>(
        &self,
        name: &str,
    ) -> Result<Option<T>, RepoError>;
}

impl RowExt for SqliteRow {
    fn get_value<'r, T>(&'r self, name: &str) -> Result<T, RepoError>
    where
        T: Decode<'r, Sqlite> + Type<Sqlite>,
    {
        self.try_get::<T, _>(name)
            .map_err(|e| RepoError::serialization(format!("column {name}: {e}")))
    }

    fn get_id<I: From<Uuid>>(&self, name: &str) -> Result<I, RepoError> {
        let raw: String = self.get_value(name)?;
        parse_uuid(name, &raw).map(I::from)
    }

    fn get_opt_id<I: From<Uuid>>(&self, name: &str) -> Result<Option<I>, RepoError> {
        let raw: Option<String> = self.get_value(name)?;
        raw.map(|raw| parse_uuid(name, &raw).map(I::from))
            .transpose()
    }

    fn get_time(&self, name: &str) -> Result<DateTime<Utc>, RepoError> {
        let raw: String = self.get_value(name)?;
        parse_time(name, &raw)
    }

    fn get_opt_time(&self, name: &str) -> Result<Option<DateTime<Utc>>, RepoError> {
        let raw: Option<String> = self.get_value(name)?;
        raw.map(|raw| parse_time(name, &raw)).transpose()
    }

    fn get_time_of_day(&self, name: &str) -> Result<NaiveTime, RepoError> {
        let raw: String = self.get_value(name)?;
        NaiveTime::parse_from_str(&raw, "%H:%M:%S%.f")
            .map_err(|e| RepoError::serialization(format!("column {name}: {e}")))
    }

    fn get_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, RepoError> {
        let raw: String = self.get_value(name)?;
        serde_json::from_str(&raw)
            .map_err(|e| RepoError::serialization(format!("column {name}: {e}")))
    }

    fn get_label<T: FromStr<Err = DomainError>>(&self, name: &str) -> Result<T, RepoError> {
        let raw: String = self.get_value(name)?;
        raw.parse()
            .map_err(|e: DomainError| RepoError::serialization(format!("column {name}: {e}")))
    }

    fn get_opt_label<T: FromStr<Err = DomainError>>(
        &self,
        name: &str,
    ) -> Result<Option<T>, RepoError> {
        let raw: Option<String> = self.get_value(name)?;
        raw.map(|raw| {
            raw.parse()
                .map_err(|e: DomainError| RepoError::serialization(format!("column {name}: {e}")))
        })
        .transpose()
    }
}

fn parse_uuid(name: &str, raw: &str) -> Result<Uuid, RepoError> {
    Uuid::parse_str(raw).map_err(|e| RepoError::serialization(format!("column {name}: {e}")))
}

fn parse_time(name: &str, raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("column {name}: {e}")))
}
