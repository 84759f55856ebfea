//! Shared server state.

use cropcast_core::ModelWrapper;

/// One model wrapper serves every request.
///
/// Constructed once in `main` before the listener binds; inference is
/// read-only so no locking is needed around it.
pub struct ServerState {
    pub wrapper: ModelWrapper,
}

impl ServerState {
    pub fn new(wrapper: ModelWrapper) -> Self {
        Self { wrapper }
    }
}
