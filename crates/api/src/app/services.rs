use std::sync::Arc;

use lineforge_infra::{AppConfig, CatalogFixture, FixtureError, InMemoryCatalog};
use lineforge_sales::{EngineConfig, PropagationEngine};

pub type Engine = PropagationEngine<Arc<InMemoryCatalog>>;

/// Shared services handed to every handler.
#[derive(Debug)]
pub struct AppServices {
    engine: Engine,
}

impl AppServices {
    pub fn new(catalog: Arc<InMemoryCatalog>, config: EngineConfig) -> Self {
        Self {
            engine: PropagationEngine::with_config(catalog, config),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn catalog(&self) -> &InMemoryCatalog {
        self.engine.lookup()
    }
}

/// Empty catalog, engine configured from `config`.
pub fn build_in_memory_services(config: EngineConfig) -> Arc<AppServices> {
    Arc::new(AppServices::new(Arc::new(InMemoryCatalog::new()), config))
}

/// Services for the binary: seed the catalog from the configured fixture file, if any.
pub fn build_services(config: &AppConfig) -> Result<Arc<AppServices>, FixtureError> {
    let services = AppServices::new(Arc::new(InMemoryCatalog::new()), config.engine);
    match &config.fixtures {
        Some(path) => CatalogFixture::load(path)?.seed(services.catalog()),
        None => tracing::warn!("no catalog fixtures configured; every lookup will miss"),
    }
    tracing::info!(
        scan_policy = %services.engine().config().scan_policy,
        lines = services.catalog().line_count(),
        "services ready"
    );
    Ok(Arc::new(services))
}
