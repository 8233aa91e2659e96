//! The four todo operations and the ownership gate on mutation.

use crate::error::ApiError;
use crate::models::{CreateTodoRequest, ListParams, Todo, UpdateTodoRequest};
use crate::query;
use crate::store::{TodoPatch, TodoStore};

pub async fn create(
    store: &dyn TodoStore,
    owner_id: &str,
    input: CreateTodoRequest,
) -> Result<Todo, ApiError> {
    let todo = Todo {
        id: ulid::Ulid::new().to_string(),
        description: input.description,
        priority: input.priority,
        date: query::parse_date(&input.date)?,
        completed: false,
        owner_id: owner_id.to_string(),
    };
    store.insert(&todo).await?;
    Ok(todo)
}

pub async fn list(
    store: &dyn TodoStore,
    owner_id: &str,
    params: &ListParams,
) -> Result<Vec<Todo>, ApiError> {
    let q = query::resolve(owner_id, params)?;
    Ok(store.find_many(&q).await?)
}

pub async fn update(
    store: &dyn TodoStore,
    owner_id: &str,
    id: &str,
    input: UpdateTodoRequest,
) -> Result<Todo, ApiError> {
    authorize(store, owner_id, id).await?;
    let patch = TodoPatch {
        description: input.description,
        priority: input.priority,
        date: input.date.as_deref().map(query::parse_date).transpose()?,
        completed: input.completed,
    };
    Ok(store.update(id, &patch).await?)
}

pub async fn delete(store: &dyn TodoStore, owner_id: &str, id: &str) -> Result<Todo, ApiError> {
    let existing = authorize(store, owner_id, id).await?;
    store.delete(id).await?;
    Ok(existing)
}

/// Reads the record and checks ownership. A missing record and a foreign
/// record fail identically, so mutation calls never reveal whether an id
/// exists.
async fn authorize(store: &dyn TodoStore, owner_id: &str, id: &str) -> Result<Todo, ApiError> {
    match store.find_by_id(id).await? {
        Some(todo) if todo.owner_id == owner_id => Ok(todo),
        _ => Err(ApiError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTodoStore;

    fn create_req(description: &str, priority: i32, date: &str) -> CreateTodoRequest {
        CreateTodoRequest {
            description: description.to_string(),
            priority,
            date: date.to_string(),
        }
    }

    #[tokio::test]
    async fn create_sets_owner_and_defaults_completed_to_false() {
        let store = MemoryTodoStore::new();
        let todo = create(&store, "alice", create_req("buy milk", 2, "2024-05-01"))
            .await
            .unwrap();

        assert_eq!(todo.owner_id, "alice");
        assert!(!todo.completed);
        assert_eq!(todo.date, query::parse_date("2024-05-01").unwrap());

        let stored = store.find_by_id(&todo.id).await.unwrap().unwrap();
        assert_eq!(stored, todo);
    }

    #[tokio::test]
    async fn create_rejects_an_invalid_date() {
        let store = MemoryTodoStore::new();
        let err = create(&store, "alice", create_req("x", 1, "soon"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn list_only_returns_the_callers_records() {
        let store = MemoryTodoStore::new();
        let created = create(&store, "alice", create_req("buy milk", 2, "2024-05-01"))
            .await
            .unwrap();

        let mut params = ListParams::default();
        params.completed = Some("false".to_string());

        let mine = list(&store, "alice", &params).await.unwrap();
        assert_eq!(mine, vec![created]);

        let theirs = list(&store, "bob", &params).await.unwrap();
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden_and_leaves_record_intact() {
        let store = MemoryTodoStore::new();
        let created = create(&store, "alice", create_req("buy milk", 2, "2024-05-01"))
            .await
            .unwrap();

        let input = UpdateTodoRequest {
            completed: Some(true),
            ..Default::default()
        };
        let err = update(&store, "bob", &created.id, input).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));

        let unchanged = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(unchanged, created);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_forbidden_not_not_found() {
        let store = MemoryTodoStore::new();
        let err = update(&store, "alice", "no-such-id", UpdateTodoRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[tokio::test]
    async fn update_applies_a_partial_payload() {
        let store = MemoryTodoStore::new();
        let created = create(&store, "alice", create_req("buy milk", 2, "2024-05-01"))
            .await
            .unwrap();

        let input = UpdateTodoRequest {
            completed: Some(true),
            date: Some("2024-06-01T08:00:00".to_string()),
            ..Default::default()
        };
        let updated = update(&store, "alice", &created.id, input).await.unwrap();

        assert!(updated.completed);
        assert_eq!(updated.date, query::parse_date("2024-06-01T08:00:00").unwrap());
        assert_eq!(updated.description, "buy milk");
        assert_eq!(updated.priority, 2);
    }

    #[tokio::test]
    async fn update_rejects_an_invalid_date_string() {
        let store = MemoryTodoStore::new();
        let created = create(&store, "alice", create_req("x", 1, "2024-05-01"))
            .await
            .unwrap();

        let input = UpdateTodoRequest {
            date: Some("garbage".to_string()),
            ..Default::default()
        };
        let err = update(&store, "alice", &created.id, input).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn delete_returns_the_record_and_removes_it() {
        let store = MemoryTodoStore::new();
        let created = create(&store, "alice", create_req("buy milk", 2, "2024-05-01"))
            .await
            .unwrap();

        let deleted = delete(&store, "alice", &created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_forbidden() {
        let store = MemoryTodoStore::new();
        let created = create(&store, "alice", create_req("buy milk", 2, "2024-05-01"))
            .await
            .unwrap();

        let err = delete(&store, "bob", &created.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
        assert!(store.find_by_id(&created.id).await.unwrap().is_some());
    }
}
