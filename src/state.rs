//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ResolutionService, ServiceSettings};
use crate::domain::repositories::{CounterStore, LinkRepository};

#[derive(Clone)]
pub struct AppState {
    pub resolution_service: Arc<ResolutionService>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub counter_store: Arc<dyn CounterStore>,
}

impl AppState {
    /// Wires the services on top of the two stores.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        counter_store: Arc<dyn CounterStore>,
        settings: ServiceSettings,
    ) -> Self {
        let resolution_service = Arc::new(ResolutionService::new(
            Arc::clone(&link_repository),
            Arc::clone(&counter_store),
            settings,
        ));

        Self {
            resolution_service,
            link_repository,
            counter_store,
        }
    }
}
