use std::sync::Arc;

use crate::auth::TokenService;
use crate::store::{Stores, TaskStore, UserStore};

/// Shared application state handed to every handler through `web::Data`.
///
/// Built once at startup; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(stores: &Stores, tokens: TokenService) -> Self {
        Self {
            users: stores.users.clone(),
            tasks: stores.tasks.clone(),
            tokens,
        }
    }
}
