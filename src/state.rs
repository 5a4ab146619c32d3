use std::sync::Arc;

use crate::upstream::SchoolBackend;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn SchoolBackend>,
}
