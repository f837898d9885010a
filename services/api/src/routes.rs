//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;
use stats::{NewCheckIn, NewTask, Stats, compute_progress, compute_stats, list_task_progress};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::{AuthUser, auth_middleware},
    models::{
        CheckInRequest, CheckInResponse, CreateTaskRequest, CreatedResponse, MessageResponse,
        TaskResponse,
    },
    validation::{validate_check_in, validate_task},
};

/// Create the router for the API service
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let protected_routes = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", delete(delete_task))
        .route("/checkin", post(check_in))
        .route("/stats", get(get_stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", protected_routes)
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// List the caller's tasks, newest first, with today's progress
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let today = state.store.calendar().today();

    let tasks = list_task_progress(state.store.as_ref(), user.id, today)
        .await
        .inspect_err(|e| error!("Failed to list tasks: {}", e))?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Create a task
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let request = json_body(payload)?;
    validate_task(&request).map_err(ApiError::BadRequest)?;

    let new_task = NewTask {
        user_id: user.id,
        title: request.title.trim().to_string(),
        description: request.description.filter(|d| !d.is_empty()),
        target_type: request.target_type,
        target_value: request.target_value,
    };
    new_task.validate()?;

    let task = state
        .store
        .insert_task(new_task)
        .await
        .inspect_err(|e| error!("Failed to create task: {}", e))?;

    info!("User {} created task {}", user.username, task.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Task created successfully".to_string(),
            id: task.id,
        }),
    ))
}

/// Delete one of the caller's tasks
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = state
        .store
        .delete_task(user.id, id)
        .await
        .inspect_err(|e| error!("Failed to delete task: {}", e))?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Log a task check-in or a focus session
pub async fn check_in(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CheckInResponse>)> {
    let request = json_body(payload)?;
    validate_check_in(&request).map_err(ApiError::BadRequest)?;

    let task = match request.task_id {
        Some(task_id) => Some(
            state
                .store
                .find_task(user.id, task_id)
                .await
                .inspect_err(|e| error!("Failed to look up task: {}", e))?
                .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?,
        ),
        None => None,
    };

    let calendar = state.store.calendar();
    let check_in = state
        .store
        .insert_check_in(NewCheckIn {
            user_id: user.id,
            task_id: request.task_id,
            kind: request.kind,
            duration: request.duration,
            timestamp: calendar.now(),
        })
        .await
        .inspect_err(|e| error!("Failed to record check-in: {}", e))?;

    let progress = match &task {
        Some(task) => Some(
            compute_progress(
                state.store.as_ref(),
                task,
                calendar.date_of(check_in.timestamp),
            )
            .await
            .inspect_err(|e| error!("Failed to refresh progress: {}", e))?,
        ),
        None => None,
    };

    Ok((
        StatusCode::CREATED,
        Json(CheckInResponse {
            message: "Check-in recorded".to_string(),
            id: check_in.id,
            progress,
        }),
    ))
}

/// Statistics for the caller as of today
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Stats>> {
    let today = state.store.calendar().today();

    let stats = compute_stats(state.store.as_ref(), user.id, today)
        .await
        .inspect_err(|e| error!("Failed to compute stats: {}", e))?;

    Ok(Json(stats))
}
