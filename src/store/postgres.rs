use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{OrderBy, OrderDirection, Todo};
use crate::query::TodoQuery;
use crate::store::{StoreError, TodoPatch, TodoStore};

const COLUMNS: &str = "id, description, priority, date, completed, owner_id";

/// PostgreSQL-backed store. Schema is managed outside this service:
///
/// ```sql
/// CREATE TABLE todos (
///     id          TEXT PRIMARY KEY,
///     description TEXT NOT NULL,
///     priority    INTEGER NOT NULL,
///     date        TIMESTAMPTZ NOT NULL,
///     completed   BOOLEAN NOT NULL DEFAULT FALSE,
///     owner_id    TEXT NOT NULL
/// );
/// CREATE INDEX todos_owner_idx ON todos (owner_id);
/// ```
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO todos (id, description, priority, date, completed, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&todo.id)
        .bind(&todo.description)
        .bind(todo.priority)
        .bind(todo.date)
        .bind(todo.completed)
        .bind(&todo.owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_many(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM todos WHERE owner_id = "));
        qb.push_bind(&query.owner_id);

        if let Some(completed) = query.completed {
            qb.push(" AND completed = ").push_bind(completed);
        }
        if let Some(priority) = query.priority {
            qb.push(" AND priority = ").push_bind(priority);
        }
        if let Some(search) = &query.search {
            qb.push(" AND description ILIKE ")
                .push_bind(like_pattern(search));
        }
        if let Some(from) = query.date_from {
            qb.push(" AND date >= ").push_bind(from);
        }
        if let Some(to) = query.date_to {
            qb.push(" AND date <= ").push_bind(to);
        }

        qb.push(" ORDER BY ");
        for (i, (key, dir)) in query.order.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(column(*key)).push(" ").push(direction(*dir));
        }

        qb.push(" LIMIT ").push_bind(query.take);
        qb.push(" OFFSET ").push_bind(query.skip);

        let todos = qb.build_query_as::<Todo>().fetch_all(&self.pool).await?;
        Ok(todos)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, description, priority, date, completed, owner_id \
             FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn update(&self, id: &str, patch: &TodoPatch) -> Result<Todo, StoreError> {
        if patch.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| StoreError::Missing(id.to_string()));
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE todos SET ");
        {
            let mut fields = qb.separated(", ");
            if let Some(description) = &patch.description {
                fields
                    .push("description = ")
                    .push_bind_unseparated(description);
            }
            if let Some(priority) = patch.priority {
                fields.push("priority = ").push_bind_unseparated(priority);
            }
            if let Some(date) = patch.date {
                fields.push("date = ").push_bind_unseparated(date);
            }
            if let Some(completed) = patch.completed {
                fields
                    .push("completed = ")
                    .push_bind_unseparated(completed);
            }
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {COLUMNS}"));

        let todo = qb
            .build_query_as::<Todo>()
            .fetch_optional(&self.pool)
            .await?;
        todo.ok_or_else(|| StoreError::Missing(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(id.to_string()));
        }
        Ok(())
    }
}

fn column(key: OrderBy) -> &'static str {
    match key {
        OrderBy::Date => "date",
        OrderBy::Priority => "priority",
        OrderBy::Completed => "completed",
    }
}

fn direction(dir: OrderDirection) -> &'static str {
    match dir {
        OrderDirection::Asc => "ASC",
        OrderDirection::Desc => "DESC",
    }
}

/// Wraps the term in wildcards, escaping LIKE metacharacters so user input
/// only ever matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
