//! Application state for the web layer.

use std::sync::Arc;

use crate::handler::TurnHandler;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The turn handler holding every collaborator.
    pub handler: Arc<TurnHandler>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(handler: TurnHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}
