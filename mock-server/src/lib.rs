use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Pending,
    Completed,
}

impl TodoStatus {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TodoStatus::Pending),
            "completed" => Some(TodoStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub body: String,
    pub status: TodoStatus,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub body: String,
}

#[derive(Deserialize)]
pub struct UpdateTodoStatus {
    pub status: TodoStatus,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub statuses: Option<String>,
}

/// Todos keyed by id, so listing yields creation order.
#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    todos: BTreeMap<i64, Todo>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", delete(delete_todo))
        .route("/todos/{id}/status", put(update_todo_status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Parse a comma-separated `statuses` value. `None` means no filtering.
fn parse_statuses(raw: Option<&str>) -> Result<Option<Vec<TodoStatus>>, StatusCode> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.split(',')
        .map(|s| TodoStatus::parse(s.trim()).ok_or(StatusCode::BAD_REQUEST))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

async fn list_todos(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Todo>>, StatusCode> {
    let filter = parse_statuses(params.statuses.as_deref()).inspect_err(|_| {
        tracing::debug!(statuses = ?params.statuses, "rejecting unknown status filter");
    })?;
    let store = db.read().await;
    let todos: Vec<Todo> = store
        .todos
        .values()
        .filter(|t| filter.as_ref().is_none_or(|f| f.contains(&t.status)))
        .cloned()
        .collect();
    tracing::debug!(count = todos.len(), "listing todos");
    Ok(Json(todos))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let todo = Todo {
        id: store.next_id,
        body: input.body,
        status: TodoStatus::Pending,
    };
    store.todos.insert(todo.id, todo.clone());
    tracing::info!(todo_id = todo.id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

async fn update_todo_status(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodoStatus>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.status = input.status;
    tracing::info!(todo_id = id, status = ?input.status, "updated todo status");
    Ok(Json(todo.clone()))
}

/// Idempotent: deleting a missing id still answers 204.
async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let removed = db.write().await.todos.remove(&id).is_some();
    tracing::info!(todo_id = id, removed, "deleted todo");
    StatusCode::NO_CONTENT
}
