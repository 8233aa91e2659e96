use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo record as stored and as returned on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub description: String,
    pub priority: i32,
    pub date: DateTime<Utc>,
    pub completed: bool,
    /// Set at creation, never transferred.
    pub owner_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub description: String,
    pub priority: i32,
    /// ISO 8601 date or date-time string, parsed before persisting.
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub date: Option<String>,
    pub completed: Option<bool>,
}

/// Query parameters accepted by the listing routes.
///
/// `completed`, `priority`, `page` and `pageSize` stay raw strings here:
/// unparseable values degrade to "no filter" / defaults instead of
/// rejecting the request. `orderBy` and `orderDirection` are closed enums,
/// so an unrecognized value is a deserialization failure (400).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub search: Option<String>,
    pub completed: Option<String>,
    pub priority: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub order_by: Option<OrderBy>,
    pub order_direction: Option<OrderDirection>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    Date,
    Priority,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}
