//! Task operations on behalf of an authenticated caller.
//!
//! Ownership policy, "conceal foreign tasks": a task owned by someone else is reported
//! exactly like a task that does not exist (`404 Task not found`), so callers can never
//! learn whether another user's task id is valid.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Task;
use crate::store::TaskStore;
use crate::tasks::query::{ListTasksParams, Pagination};
use crate::tasks::{CreateTaskRequest, UpdateTaskRequest};

/// One page of the caller's tasks plus pagination metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub pagination: Pagination,
}

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

/// Path ids that are not UUIDs cannot name any task.
pub fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| task_not_found())
}

fn visible_to(task: Option<Task>, caller: Uuid) -> Result<Task, AppError> {
    match task {
        Some(task) if task.owner == caller => Ok(task),
        _ => Err(task_not_found()),
    }
}

pub async fn list_tasks(
    store: &dyn TaskStore,
    caller: Uuid,
    params: ListTasksParams,
) -> Result<TaskPage, AppError> {
    let query = params.into_query(caller)?;
    let tasks = store.list_tasks(&query).await?;
    let total = store.count_tasks(&query.filter).await?;
    Ok(TaskPage {
        tasks,
        pagination: Pagination::new(query.page, total),
    })
}

pub async fn create_task(
    store: &dyn TaskStore,
    caller: Uuid,
    request: CreateTaskRequest,
) -> Result<Task, AppError> {
    let new_task = request.into_new_task(caller)?;
    let task = store.insert_task(new_task).await?;
    log::debug!("User {} created task {}", caller, task.id);
    Ok(task)
}

pub async fn get_task(store: &dyn TaskStore, caller: Uuid, id: &str) -> Result<Task, AppError> {
    let id = parse_task_id(id)?;
    visible_to(store.find_task(id).await?, caller)
}

/// Validates the request, then applies it to the caller's task. Input errors are
/// reported before ownership is checked.
pub async fn update_task(
    store: &dyn TaskStore,
    caller: Uuid,
    id: &str,
    request: UpdateTaskRequest,
) -> Result<Task, AppError> {
    let changes = request.into_changes()?;
    let id = parse_task_id(id)?;
    store
        .update_task(id, caller, &changes)
        .await?
        .ok_or_else(task_not_found)
}

pub async fn delete_task(store: &dyn TaskStore, caller: Uuid, id: &str) -> Result<(), AppError> {
    let id = parse_task_id(id)?;
    if store.delete_task(id, caller).await? {
        log::debug!("User {} deleted task {}", caller, id);
        Ok(())
    } else {
        Err(task_not_found())
    }
}
