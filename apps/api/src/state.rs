use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::PdfCompiler;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; every collaborator sits behind a trait so tests can
/// swap in the in-memory store and stub generators.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub tokens: TokenIssuer,
    pub generator: Arc<dyn TextGenerator>,
    pub pdf: Arc<dyn PdfCompiler>,
    pub config: Config,
}
