use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{OrderBy, OrderDirection, Todo};
use crate::query::TodoQuery;
use crate::store::{StoreError, TodoPatch, TodoStore};

/// In-memory store for tests and DATABASE_URL-less local runs. Evaluates
/// the same `TodoQuery` the Postgres store renders to SQL.
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: Mutex<HashMap<String, Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError> {
        self.todos
            .lock()
            .unwrap()
            .insert(todo.id.clone(), todo.clone());
        Ok(())
    }

    async fn find_many(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError> {
        let todos = self.todos.lock().unwrap();
        let mut matched: Vec<Todo> = todos
            .values()
            .filter(|todo| matches(todo, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| compare(a, b, &query.order));

        let skip = query.skip.max(0) as usize;
        let take = query.take.max(0) as usize;
        Ok(matched.into_iter().skip(skip).take(take).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        Ok(self.todos.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, id: &str, patch: &TodoPatch) -> Result<Todo, StoreError> {
        let mut todos = self.todos.lock().unwrap();
        let todo = todos
            .get_mut(id)
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;

        if let Some(description) = &patch.description {
            todo.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            todo.priority = priority;
        }
        if let Some(date) = patch.date {
            todo.date = date;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.todos
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::Missing(id.to_string()))
    }
}

fn matches(todo: &Todo, query: &TodoQuery) -> bool {
    if todo.owner_id != query.owner_id {
        return false;
    }
    if let Some(completed) = query.completed {
        if todo.completed != completed {
            return false;
        }
    }
    if let Some(priority) = query.priority {
        if todo.priority != priority {
            return false;
        }
    }
    if let Some(search) = &query.search {
        if !todo
            .description
            .to_lowercase()
            .contains(&search.to_lowercase())
        {
            return false;
        }
    }
    if let Some(from) = query.date_from {
        if todo.date < from {
            return false;
        }
    }
    if let Some(to) = query.date_to {
        if todo.date > to {
            return false;
        }
    }
    true
}

fn compare(a: &Todo, b: &Todo, order: &[(OrderBy, OrderDirection)]) -> Ordering {
    for (key, dir) in order {
        let ord = match key {
            OrderBy::Date => a.date.cmp(&b.date),
            OrderBy::Priority => a.priority.cmp(&b.priority),
            OrderBy::Completed => a.completed.cmp(&b.completed),
        };
        let ord = match dir {
            OrderDirection::Asc => ord,
            OrderDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    // Stable fallback so paging never straddles an arbitrary order.
    a.id.cmp(&b.id)
}
