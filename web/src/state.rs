use std::sync::Arc;

use shared::TradeService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TradeService>,
}

impl AppState {
    pub fn new(service: TradeService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
