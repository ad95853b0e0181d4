use metrics_exporter_prometheus::PrometheusHandle;
use repair_judge::config::CatalogConfig;
use repair_judge::error::AppError;
use repair_judge::judgement::PriceCatalog;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The configured CSV catalog, or the built-in table when none is set.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<PriceCatalog, AppError> {
    match &config.path {
        Some(path) => {
            let catalog = PriceCatalog::from_path(path)?;
            info!(path = %path.display(), entries = catalog.len(), "price catalog loaded");
            Ok(catalog)
        }
        None => Ok(PriceCatalog::standard()),
    }
}
