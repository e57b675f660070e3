//! Task listing and commands for the authenticated caller.

pub mod query;
pub mod service;

use std::borrow::Cow;

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, FieldError};
use crate::models::{parse_due_date, NewTask, TaskChanges, TaskPriority, TaskStatus};

pub use query::{ListTasksParams, Pagination, TaskFilter, TaskQuery};
pub use service::TaskPage;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const INVALID_STATUS: &str = "Status must be one of: pending, in-progress, completed";
pub const INVALID_PRIORITY: &str = "Priority must be one of: low, medium, high";
pub const INVALID_DATE: &str = "Invalid date format";

fn rejected(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TaskStatus>()
        .map(|_| ())
        .map_err(|_| rejected("status", INVALID_STATUS))
}

fn validate_priority(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TaskPriority>()
        .map(|_| ())
        .map_err(|_| rejected("priority", INVALID_PRIORITY))
}

fn validate_due_date(value: &str) -> Result<(), ValidationError> {
    parse_due_date(value)
        .map(|_| ())
        .ok_or_else(|| rejected("due_date", INVALID_DATE))
}

/// Parses an already-validated optional field, reporting `message` if it still fails.
fn parse_field<T>(
    value: Option<String>,
    field: &str,
    message: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, AppError> {
    value
        .map(|raw| {
            parse(&raw).ok_or_else(|| AppError::Validation(vec![FieldError::new(field, message)]))
        })
        .transpose()
}

/// Body of `POST /tasks`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom = "validate_status")]
    pub status: Option<String>,
    #[validate(custom = "validate_priority")]
    pub priority: Option<String>,
    #[validate(custom = "validate_due_date")]
    pub due_date: Option<String>,
}

impl CreateTaskRequest {
    /// Validates every field and builds the task to insert for `owner`.
    pub fn into_new_task(self, owner: Uuid) -> Result<NewTask, AppError> {
        self.validate()?;
        let title = self
            .title
            .ok_or_else(|| AppError::Validation(vec![FieldError::new("title", TITLE_REQUIRED)]))?;

        Ok(NewTask {
            owner,
            title,
            description: self.description.unwrap_or_default(),
            status: parse_field(self.status, "status", INVALID_STATUS, |s| s.parse().ok())?
                .unwrap_or_default(),
            priority: parse_field(self.priority, "priority", INVALID_PRIORITY, |s| {
                s.parse().ok()
            })?,
            due_date: parse_field(self.due_date, "dueDate", INVALID_DATE, parse_due_date)?,
        })
    }
}

/// Body of `PUT /tasks/{id}`. Every field is optional; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(custom = "validate_status")]
    pub status: Option<String>,
    #[validate(custom = "validate_priority")]
    pub priority: Option<String>,
    #[validate(custom = "validate_due_date")]
    pub due_date: Option<String>,
}

impl UpdateTaskRequest {
    pub fn into_changes(self) -> Result<TaskChanges, AppError> {
        self.validate()?;
        Ok(TaskChanges {
            title: self.title,
            description: self.description,
            status: parse_field(self.status, "status", INVALID_STATUS, |s| s.parse().ok())?,
            priority: parse_field(self.priority, "priority", INVALID_PRIORITY, |s| {
                s.parse().ok()
            })?,
            due_date: parse_field(self.due_date, "dueDate", INVALID_DATE, parse_due_date)?,
        })
    }
}
