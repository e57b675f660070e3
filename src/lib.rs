#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "This crate contains the core of the TaskDesk API: domain models, token"]
#![doc = "authentication, the task query builder and command handlers, the store"]
#![doc = "abstraction with its PostgreSQL and in-memory backends, routing configuration"]
#![doc = "and error handling. It is used by the main binary (`main.rs`) to run the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod tasks;

pub use crate::error::AppError;
pub use crate::state::AppState;
