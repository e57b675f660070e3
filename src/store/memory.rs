use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, TaskChanges, User, UserCredentials};
use crate::store::{TaskStore, UserStore};
use crate::tasks::query::{SortField, SortOrder, TaskFilter, TaskQuery, TaskSort};

/// Store backend that keeps users and tasks in process memory.
///
/// Listing orders tasks exactly like `PgStore`: by the requested field (creation time
/// when none is given), missing priorities first when ascending, then by id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserCredentials>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(task: &Task, filter: &TaskFilter) -> bool {
    task.owner == filter.owner && filter.status.map_or(true, |s| task.status == s)
}

/// Mirrors `ORDER BY <field> ASC NULLS FIRST | DESC NULLS LAST, id`.
fn compare(a: &Task, b: &Task, sort: TaskSort) -> Ordering {
    let ordering = match sort.field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Priority => a.priority.cmp(&b.priority),
    };
    let ordering = match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    };
    ordering.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.user.email == user.email) {
            return Err(AppError::Conflict("User already exists".into()));
        }
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            created_at: Utc::now(),
        };
        users.push(UserCredentials {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|record| record.user.id == id)
            .map(|record| record.user.clone()))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|record| record.user.email == email).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: NewTask) -> Result<Task, AppError> {
        let task = Task::new(task, Utc::now());
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        let mut selected: Vec<Task> = tasks
            .iter()
            .filter(|task| matches(task, &query.filter))
            .cloned()
            .collect();

        let sort = query.sort.unwrap_or_default();
        selected.sort_by(|a, b| compare(a, b, sort));

        Ok(selected
            .into_iter()
            .skip(query.page.skip() as usize)
            .take(query.page.take() as usize)
            .collect())
    }

    async fn count_tasks(&self, filter: &TaskFilter) -> Result<u64, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|task| matches(task, filter)).count() as u64)
    }

    async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks
            .iter_mut()
            .find(|task| task.id == id && task.owner == owner)
            .map(|task| {
                task.apply(changes, Utc::now());
                task.clone()
            }))
    }

    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<bool, AppError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| !(task.id == id && task.owner == owner));
        Ok(tasks.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus};
    use crate::tasks::query::PageRequest;

    fn new_task(owner: Uuid, title: &str, priority: Option<TaskPriority>) -> NewTask {
        NewTask {
            owner,
            title: title.to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority,
            due_date: None,
        }
    }

    fn query(owner: Uuid, sort: Option<TaskSort>, page: u32, limit: u32) -> TaskQuery {
        TaskQuery {
            filter: TaskFilter::owned_by(owner),
            sort,
            page: PageRequest { page, limit },
        }
    }

    #[actix_rt::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let user = NewUser {
            name: "Bappy".into(),
            email: "bappy@example.com".into(),
            password_hash: "hash".into(),
        };
        store.insert_user(user.clone()).await.unwrap();
        assert!(matches!(
            store.insert_user(user).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[actix_rt::test]
    async fn test_list_is_scoped_sorted_and_paged() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert_task(new_task(alice, "a1", Some(TaskPriority::High))).await.unwrap();
        store.insert_task(new_task(bob, "b1", None)).await.unwrap();
        store.insert_task(new_task(alice, "a2", None)).await.unwrap();
        store.insert_task(new_task(alice, "a3", Some(TaskPriority::Low))).await.unwrap();

        let all = store.list_tasks(&query(alice, None, 1, 10)).await.unwrap();
        let titles: Vec<_> = all.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a1", "a2", "a3"]);

        let by_priority = store
            .list_tasks(&query(
                alice,
                Some(TaskSort {
                    field: SortField::Priority,
                    order: SortOrder::Desc,
                }),
                1,
                10,
            ))
            .await
            .unwrap();
        let titles: Vec<_> = by_priority.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a1", "a3", "a2"]);

        let second_page = store.list_tasks(&query(alice, None, 2, 2)).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].title, "a3");

        assert_eq!(store.count_tasks(&TaskFilter::owned_by(alice)).await.unwrap(), 3);
    }

    #[actix_rt::test]
    async fn test_mutations_require_owner() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let task = store.insert_task(new_task(owner, "mine", None)).await.unwrap();

        let changes = TaskChanges {
            title: Some("stolen".into()),
            ..TaskChanges::default()
        };
        assert_eq!(store.update_task(task.id, intruder, &changes).await.unwrap(), None);
        assert!(!store.delete_task(task.id, intruder).await.unwrap());

        let updated = store
            .update_task(task.id, owner, &changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "stolen");
        assert_eq!(updated.owner, owner);

        assert!(store.delete_task(task.id, owner).await.unwrap());
        assert!(!store.delete_task(task.id, owner).await.unwrap());
    }

    #[actix_rt::test]
    async fn test_ties_break_on_id_in_both_directions() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for title in ["x", "y", "z"] {
            store
                .insert_task(new_task(owner, title, Some(TaskPriority::Medium)))
                .await
                .unwrap();
        }
        let stamp = Utc::now();
        for task in store.tasks.write().await.iter_mut() {
            task.created_at = stamp;
        }

        let mut ids: Vec<Uuid> = store.tasks.read().await.iter().map(|t| t.id).collect();
        ids.sort();

        for sort in [
            None,
            Some(TaskSort {
                field: SortField::Priority,
                order: SortOrder::Desc,
            }),
            Some(TaskSort {
                field: SortField::CreatedAt,
                order: SortOrder::Asc,
            }),
        ] {
            let listed = store.list_tasks(&query(owner, sort, 1, 10)).await.unwrap();
            let listed_ids: Vec<Uuid> = listed.iter().map(|t| t.id).collect();
            assert_eq!(listed_ids, ids, "sort {:?}", sort);
        }
    }
}
