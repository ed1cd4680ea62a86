use std::sync::Arc;

use basalt::ports::Backend;

/// Server state shared across handlers. The backend is chosen once at
/// startup; handlers only ever see the contract.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}
