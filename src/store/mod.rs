//! Persistence seam for todo records.
//!
//! `find_by_id` deliberately takes no owner argument: the domain layer reads
//! the record first and compares owners itself, so it can decide forbidden
//! versus allowed instead of silently filtering at the query level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::Todo;
use crate::query::TodoQuery;

mod memory;
mod postgres;

pub use memory::MemoryTodoStore;
pub use postgres::PgTodoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The record disappeared between the ownership read and the write.
    #[error("record no longer exists: {0}")]
    Missing(String),
}

/// Column-level partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.priority.is_none()
            && self.date.is_none()
            && self.completed.is_none()
    }
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError>;

    async fn find_many(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, StoreError>;

    async fn update(&self, id: &str, patch: &TodoPatch) -> Result<Todo, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
