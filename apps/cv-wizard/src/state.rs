use std::sync::Arc;

use crate::export::DocumentExporter;
use crate::gateway::TextEnhancer;
use crate::prefill::PrefillSource;
use crate::wizard::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Generative text backend. Default: Gemini.
    pub enhancer: Arc<dyn TextEnhancer>,
    pub prefill: Arc<dyn PrefillSource>,
    /// HTML export unless an external converter is configured.
    pub exporter: Arc<dyn DocumentExporter>,
}
