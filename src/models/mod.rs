pub mod task;
pub mod user;

pub use task::{parse_due_date, NewTask, Task, TaskChanges, TaskPriority, TaskStatus};
pub use user::{NewUser, User, UserCredentials};
