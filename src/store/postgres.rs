use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, TaskChanges, User, UserCredentials};
use crate::store::{TaskStore, UserStore};
use crate::tasks::query::{SortField, SortOrder, TaskFilter, TaskQuery};

const TASK_COLUMNS: &str =
    "id, owner, title, description, status, priority, due_date, created_at, updated_at";

/// Store backend over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends `WHERE ...` for `filter`. The owner condition is always present.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TaskFilter) {
    builder.push(" WHERE owner = ").push_bind(filter.owner);
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }
}

/// `ORDER BY` clause for a sort. NULL priorities sort before any value, matching
/// `Option` ordering. `id` breaks ties so pages never overlap.
fn order_clause(field: SortField, order: SortOrder) -> String {
    let direction = match order {
        SortOrder::Asc => "ASC NULLS FIRST",
        SortOrder::Desc => "DESC NULLS LAST",
    };
    format!(" ORDER BY {} {}, id", field.column(), direction)
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("User already exists".into());
                }
            }
            AppError::from(e)
        })
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, created_at, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credentials)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn insert_task(&self, task: NewTask) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks (id, owner, title, description, status, priority, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(Uuid::new_v4())
            .bind(task.owner)
            .bind(task.title)
            .bind(task.description)
            .bind(task.status)
            .bind(task.priority)
            .bind(task.due_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM tasks", TASK_COLUMNS));
        push_filter(&mut builder, &query.filter);

        let sort = query.sort.unwrap_or_default();
        builder.push(order_clause(sort.field, sort.order));

        builder
            .push(" LIMIT ")
            .push_bind(query.page.take() as i64)
            .push(" OFFSET ")
            .push_bind(query.page.skip() as i64);

        let tasks = builder
            .build_query_as::<Task>()
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn count_tasks(&self, filter: &TaskFilter) -> Result<u64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_filter(&mut builder, filter);
        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count as u64)
    }

    async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE tasks
             SET title = COALESCE($1, title),
                 description = COALESCE($2, description),
                 status = COALESCE($3, status),
                 priority = COALESCE($4, priority),
                 due_date = COALESCE($5, due_date),
                 updated_at = GREATEST(NOW(), updated_at)
             WHERE id = $6 AND owner = $7
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.status)
            .bind(changes.priority)
            .bind(changes.due_date)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause() {
        assert_eq!(
            order_clause(SortField::CreatedAt, SortOrder::Desc),
            " ORDER BY created_at DESC NULLS LAST, id"
        );
        assert_eq!(
            order_clause(SortField::Priority, SortOrder::Asc),
            " ORDER BY priority ASC NULLS FIRST, id"
        );
    }

    #[test]
    fn test_filter_sql_always_scopes_owner() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_filter(&mut builder, &TaskFilter::owned_by(Uuid::new_v4()));
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM tasks WHERE owner = $1");

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_filter(
            &mut builder,
            &TaskFilter {
                owner: Uuid::new_v4(),
                status: Some(crate::models::TaskStatus::Completed),
            },
        );
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM tasks WHERE owner = $1 AND status = $2"
        );
    }
}
