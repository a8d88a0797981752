use crate::database::Store;
use crate::services::password::PasswordHasher;
use std::sync::Arc;

/// Dependencies shared by every handler, built once in `main`
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub passwords: Arc<dyn PasswordHasher>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, passwords: Arc<dyn PasswordHasher>) -> Self {
        Self { store, passwords }
    }
}
