use std::sync::Arc;

use crate::service::MatchService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MatchService>,
}

impl AppState {
    pub fn new(service: MatchService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
