use std::sync::Arc;

use crate::config::Config;
use crate::insights::cache::InsightCache;
use crate::llm_client::TextGenerator;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; every handler borrows the same store and generator.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub llm: Arc<dyn TextGenerator>,
    /// Per-industry insight cache policy, shared so in-flight refreshes collapse.
    pub insights: Arc<InsightCache>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn Store>, llm: Arc<dyn TextGenerator>) -> Self {
        let insights = Arc::new(InsightCache::new(store.clone(), llm.clone()));
        Self {
            store,
            llm,
            insights,
            config,
        }
    }
}
