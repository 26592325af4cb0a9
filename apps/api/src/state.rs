use std::sync::Arc;

use crate::config::Config;
use crate::resume::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// File-backed by default; `RESUME_STORE=memory` swaps in the in-process store.
    pub store: Arc<dyn ResumeStore>,
}
