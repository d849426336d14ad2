//! Checks applied to a write before it reaches the repositories.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_database::{CategoryStore, ModelStore};

/// Naive layouts accepted in addition to RFC 3339; read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp supplied for `field`.
///
/// Accepts RFC 3339 with an offset, a naive date-time (taken as UTC) or a
/// bare `YYYY-MM-DD` (midnight UTC). The error names the field and echoes
/// the value received.
pub fn parse_timestamp(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.and_utc());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(AppError::validation(format!(
        "Invalid {field}: '{value}' is not an ISO-8601 date"
    )))
}

/// Parse an optional timestamp; `None` stays `None`.
pub fn parse_optional_timestamp(
    field: &str,
    value: Option<&str>,
) -> AppResult<Option<DateTime<Utc>>> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}

/// Parse a supplied-or-cleared timestamp from a partial update.
pub fn parse_timestamp_change(
    field: &str,
    value: Option<Option<&str>>,
) -> AppResult<Option<Option<DateTime<Utc>>>> {
    match value {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(v)) => parse_timestamp(field, v).map(|ts| Some(Some(ts))),
    }
}

/// Fail unless a category with `id` exists.
pub async fn ensure_category_exists(
    categories: &dyn CategoryStore,
    field: &str,
    id: i32,
) -> AppResult<()> {
    if categories.exists(id).await? {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{field} {id} does not reference an existing product category"
        )))
    }
}

/// Fail unless a product model with `id` exists.
pub async fn ensure_model_exists(models: &dyn ModelStore, field: &str, id: i32) -> AppResult<()> {
    if models.exists(id).await? {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{field} {id} does not reference an existing product model"
        )))
    }
}

/// Reject blank required strings.
pub fn require_non_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
