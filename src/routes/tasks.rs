use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    state::AppState,
    tasks::{service, CreateTaskRequest, ListTasksParams, UpdateTaskRequest},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

/// Retrieves a page of the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `status` (optional): one of `pending`, `in-progress`, `completed`.
/// - `sortBy` (optional): one of `createdAt`, `updatedAt`, `priority`.
/// - `order` (optional): `desc` for descending; anything else is ascending.
/// - `page` (optional, default 1) and `limit` (optional, default 10, at most 100).
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...], "pagination": {currentPage, totalPages, totalTasks}}`.
/// - `400 Bad Request`: an invalid parameter, e.g. `{"error": "Invalid sortBy field"}`.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query_params: web::Query<ListTasksParams>,
) -> Result<impl Responder, AppError> {
    let page = service::list_tasks(state.tasks.as_ref(), user.id(), query_params.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `400 Bad Request`: `{"errors": [{field, message}, ...]}`.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let task = service::create_task(state.tasks.as_ref(), user.id(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves one of the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task = service::get_task(state.tasks.as_ref(), user.id(), &task_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Applies a partial update to one of the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: invalid fields.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
    task_data: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let task = service::update_task(
        state.tasks.as_ref(),
        user.id(),
        &task_id,
        task_data.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes one of the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task deleted"}`.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    service::delete_task(state.tasks.as_ref(), user.id(), &task_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted" })))
}
