use crate::todo::store::TodoStore;
use crate::todo::{Task, TodoService, TodoServiceError};
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for the todo endpoints.
pub struct TodoState {
    pub store: TodoStore,
}

/// Request body for creating a todo.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// The task text; required and non-empty.
    #[serde(default)]
    text: Option<String>,
}

/// Request body for a partial update; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    text: Option<String>,
    completed: Option<bool>,
}

/// Confirmation body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteTodoResponse {
    message: String,
}

/// Error body returned on any failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Handler for GET /api/todos - Returns the full collection.
#[tracing::instrument(skip(state))]
pub async fn get_todos_handler(
    State(state): State<Arc<TodoState>>,
) -> Result<Json<Vec<Task>>, (StatusCode, Json<ErrorResponse>)> {
    let service = TodoService::new(&state.store);

    match service.list_all() {
        Ok(todos) => Ok(Json(todos)),
        Err(err) => {
            tracing::error!("Failed to read todos: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to read todos")),
            ))
        }
    }
}

/// Handler for POST /api/todos - Creates a todo from the request text.
#[tracing::instrument(skip(state))]
pub async fn create_todo_handler(
    State(state): State<Arc<TodoState>>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, Json<ErrorResponse>)> {
    let service = TodoService::new(&state.store);

    match service.create(request.text.unwrap_or_default()) {
        Ok(todo) => Ok((StatusCode::CREATED, Json(todo))),
        Err(TodoServiceError::MissingText) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Text is required")),
        )),
        Err(err) => {
            tracing::error!("Failed to create todo: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to create todo")),
            ))
        }
    }
}

/// Handler for PUT /api/todos/{id} - Edits text and/or toggles completion.
#[tracing::instrument(skip(state))]
pub async fn update_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTodoRequest>,
) -> Result<Json<Task>, (StatusCode, Json<ErrorResponse>)> {
    let Some(id) = parse_id(&id) else {
        return Err(todo_not_found());
    };
    let service = TodoService::new(&state.store);

    match service.update(id, request.text, request.completed) {
        Ok(todo) => Ok(Json(todo)),
        Err(TodoServiceError::TodoNotFound(_)) => Err(todo_not_found()),
        Err(err) => {
            tracing::error!("Failed to update todo {}: {}", id, err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to update todo")),
            ))
        }
    }
}

/// Handler for DELETE /api/todos/{id} - Removes a todo permanently.
#[tracing::instrument(skip(state))]
pub async fn delete_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTodoResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Some(id) = parse_id(&id) else {
        return Err(todo_not_found());
    };
    let service = TodoService::new(&state.store);

    match service.delete(id) {
        Ok(()) => Ok(Json(DeleteTodoResponse {
            message: "Todo deleted successfully".to_string(),
        })),
        Err(TodoServiceError::TodoNotFound(_)) => Err(todo_not_found()),
        Err(err) => {
            tracing::error!("Failed to delete todo {}: {}", id, err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to delete todo")),
            ))
        }
    }
}

// A non-numeric id can never match a task, so it reports as not found
// rather than as a malformed request.
fn parse_id(raw: &str) -> Option<u64> {
    raw.parse().ok()
}

fn todo_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Todo not found")),
    )
}

/// Creates and returns the todos API router.
pub fn create_todo_router(state: Arc<TodoState>) -> Router {
    Router::new()
        .route(
            "/todos",
            get(get_todos_handler).post(create_todo_handler),
        )
        .route(
            "/todos/{id}",
            put(update_todo_handler).delete(delete_todo_handler),
        )
        .with_state(state)
}
