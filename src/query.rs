//! Resolution of raw listing parameters into an executable query.
//!
//! The output is a plain accumulator of optional filter clauses plus a fully
//! resolved ordering and page window. Both stores interpret the same
//! `TodoQuery`, so every rule here is decided exactly once and without side
//! effects.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::ApiError;
use crate::models::{ListParams, OrderBy, OrderDirection};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Owner-scoped query: which records to match, in what order, which page.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoQuery {
    pub owner_id: String,
    pub completed: Option<bool>,
    pub priority: Option<i32>,
    /// Case-insensitive substring match against the description.
    pub search: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// Primary key first, then tie-breakers. Never empty.
    pub order: Vec<(OrderBy, OrderDirection)>,
    pub skip: i64,
    pub take: i64,
}

pub fn resolve(owner_id: &str, params: &ListParams) -> Result<TodoQuery, ApiError> {
    // Tri-state: only the literal strings filter, anything else means no filter.
    let completed = match params.completed.as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    };

    let priority = params
        .priority
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i32>().ok());

    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string);

    let date_from = match params.start_date.as_deref() {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };
    let date_to = match params.end_date.as_deref() {
        Some(raw) => Some(parse_end_date(raw)?),
        None => None,
    };

    let take = positive_int(params.page_size.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE);
    let page = positive_int(params.page.as_deref()).unwrap_or(1);
    // Saturate: an absurd page number must not overflow into a negative skip.
    let skip = page.saturating_sub(1).saturating_mul(take);

    Ok(TodoQuery {
        owner_id: owner_id.to_string(),
        completed,
        priority,
        search,
        date_from,
        date_to,
        order: resolve_order(params.order_by, params.order_direction),
        skip,
        take,
    })
}

/// Primary key defaults to `date`. Direction defaults to `desc` for
/// `priority` and `asc` otherwise. Tie-breakers keep the result
/// deterministic: `date asc` unless date is primary, `priority desc` unless
/// priority is primary.
fn resolve_order(
    order_by: Option<OrderBy>,
    order_direction: Option<OrderDirection>,
) -> Vec<(OrderBy, OrderDirection)> {
    let primary = order_by.unwrap_or(OrderBy::Date);
    let direction = order_direction.unwrap_or(match primary {
        OrderBy::Priority => OrderDirection::Desc,
        _ => OrderDirection::Asc,
    });

    let mut order = vec![(primary, direction)];
    if primary != OrderBy::Date {
        order.push((OrderBy::Date, OrderDirection::Asc));
    }
    if primary != OrderBy::Priority {
        order.push((OrderBy::Priority, OrderDirection::Desc));
    }
    order
}

fn positive_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
}

/// Parses an ISO 8601 instant. A bare `YYYY-MM-DD` means midnight UTC.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, ApiError> {
    parse_instant(input, false)
}

/// Like [`parse_date`], but a bare `YYYY-MM-DD` expands to 23:59:59.999 so a
/// range ending on that day includes the whole day.
pub fn parse_end_date(input: &str) -> Result<DateTime<Utc>, ApiError> {
    parse_instant(input, true)
}

fn parse_instant(input: &str, end_of_day: bool) -> Result<DateTime<Utc>, ApiError> {
    let raw = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    // Naive date-time without offset: treat as UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let naive = if end_of_day {
            day.and_hms_milli_opt(23, 59, 59, 999)
        } else {
            day.and_hms_opt(0, 0, 0)
        };
        if let Some(naive) = naive {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(ApiError::BadRequest(format!("Invalid date: {input}")))
}
