//! Application state.

use std::sync::Arc;

use ledgerbook_contract::Contract;
use ledgerbook_store::WorldState;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The contract every request is delivered to.
    pub contract: Contract,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state over `world_state`.
    #[must_use]
    pub fn new(world_state: Arc<dyn WorldState>, config: ServiceConfig) -> Self {
        Self {
            contract: Contract::new(world_state),
            config,
        }
    }
}
