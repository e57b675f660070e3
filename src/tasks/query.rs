//! Translation of `GET /tasks` query parameters into a typed store query.
//!
//! Everything a client sends is checked here, before any query reaches the store:
//! the status filter must name a real status, the sort key must be on the allow-list,
//! and `page`/`limit` must be positive integers within bounds. The owner filter is not
//! a client parameter at all; it always comes from the authenticated caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::TaskStatus;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Fields a client may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Priority,
}

impl SortField {
    /// Resolves a `sortBy` value against the allow-list.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "createdAt" => Some(SortField::CreatedAt),
            "updatedAt" => Some(SortField::UpdatedAt),
            "priority" => Some(SortField::Priority),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Priority => "priority",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` sorts descending; anything else, including no value, sorts ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    pub field: SortField,
    pub order: SortOrder,
}

/// Creation order, used when the caller asks for no particular sort.
impl Default for TaskSort {
    fn default() -> Self {
        TaskSort {
            field: SortField::CreatedAt,
            order: SortOrder::Asc,
        }
    }
}

/// Which tasks match. Shared by the page query and the count query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub owner: Uuid,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn owned_by(owner: Uuid) -> Self {
        Self {
            owner,
            status: None,
        }
    }
}

/// A window of `limit` results starting at page `page` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    pub fn take(&self) -> u64 {
        u64::from(self.limit)
    }
}

/// A fully validated listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    /// `None` keeps creation order.
    pub sort: Option<TaskSort>,
    pub page: PageRequest,
}

/// Raw query string of `GET /tasks`. Every field is kept as text so that bad input is
/// reported with a specific message instead of a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksParams {
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListTasksParams {
    /// Validates the parameters and scopes the resulting query to `owner`.
    pub fn into_query(self, owner: Uuid) -> Result<TaskQuery, AppError> {
        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(value) => Some(
                value
                    .parse::<TaskStatus>()
                    .map_err(|_| AppError::BadRequest("Invalid status filter".into()))?,
            ),
        };

        let sort = match self.sort_by.as_deref() {
            None | Some("") => None,
            Some(value) => {
                let field = SortField::from_param(value)
                    .ok_or_else(|| AppError::BadRequest("Invalid sortBy field".into()))?;
                Some(TaskSort {
                    field,
                    order: SortOrder::from_param(self.order.as_deref()),
                })
            }
        };

        let page = parse_bounded(self.page.as_deref(), DEFAULT_PAGE, u32::MAX)
            .ok_or_else(|| AppError::BadRequest("Invalid page parameter".into()))?;
        let limit = parse_bounded(self.limit.as_deref(), DEFAULT_LIMIT, MAX_LIMIT)
            .ok_or_else(|| AppError::BadRequest("Invalid limit parameter".into()))?;

        Ok(TaskQuery {
            filter: TaskFilter { owner, status },
            sort,
            page: PageRequest { page, limit },
        })
    }
}

fn parse_bounded(value: Option<&str>, default: u32, max: u32) -> Option<u32> {
    match value {
        None => Some(default),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| (1..=max).contains(n)),
    }
}

/// Pagination metadata returned alongside a page of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_tasks: u64,
}

impl Pagination {
    pub fn new(page: PageRequest, total_tasks: u64) -> Self {
        Self {
            current_page: page.page,
            total_pages: total_tasks.div_ceil(u64::from(page.limit)),
            total_tasks,
        }
    }
}
