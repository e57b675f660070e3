//! Persistence seam.
//!
//! Handlers only see the [`UserStore`] and [`TaskStore`] traits. Two backends implement
//! them: [`PgStore`] over a sqlx PostgreSQL pool, and [`MemoryStore`] which keeps
//! everything in process memory (selected with `DATABASE_URL=memory://`, and used by the
//! test suite).
//!
//! Task mutations are keyed on `(id, owner)`, so a store call can never touch a task
//! that belongs to someone else and never rewrites the owner.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, TaskChanges, User, UserCredentials};
use crate::tasks::query::{TaskFilter, TaskQuery};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persisted user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user. Fails with `AppError::Conflict` when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    /// Loads a user without its password hash.
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;
}

/// Persisted tasks, always scoped to their owner.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: NewTask) -> Result<Task, AppError>;

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// One page of tasks matching `query.filter`, ordered by `query.sort`
    /// (creation order when absent).
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, AppError>;

    /// Number of tasks matching `filter`, ignoring sort and pagination.
    async fn count_tasks(&self, filter: &TaskFilter) -> Result<u64, AppError>;

    /// Applies `changes` to the task `id` owned by `owner` and bumps `updated_at`.
    /// Returns `None` if no such task exists for that owner.
    async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError>;

    /// Removes the task `id` owned by `owner`. Returns whether a task was removed.
    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<bool, AppError>;
}

/// The process-wide store handles, created once at startup.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pool: Option<PgPool>,
}

impl Stores {
    /// Opens the backend named by `database_url`. `memory://` selects the in-memory
    /// store; anything else is treated as a PostgreSQL connection string, and pending
    /// migrations are applied.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        if database_url.starts_with("memory:") {
            log::warn!("Using the in-memory store; data will not survive a restart");
            return Ok(Self::in_memory());
        }

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {}", e)))?;
        log::info!("Connected to PostgreSQL and applied migrations");

        let store = Arc::new(PgStore::new(pool.clone()));
        Ok(Self {
            users: store.clone(),
            tasks: store,
            pool: Some(pool),
        })
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            users: store.clone(),
            tasks: store,
            pool: None,
        }
    }

    /// Closes the connection pool, if any. Called once the server has stopped.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            log::info!("Database pool closed");
        }
    }
}
