use chrono::NaiveDate;
use impact_badges::badges::BadgeRunner;
use impact_badges::config::AppConfig;
use impact_badges::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured country table and wraps it in a shareable runner.
pub(crate) fn build_runner(config: &AppConfig) -> Result<Arc<BadgeRunner>, AppError> {
    let runner = BadgeRunner::standard(Arc::new(config.reference.load()?));
    info!(
        countries = runner.reference().countries().len(),
        source = config
            .reference
            .country_table
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "country reference table loaded"
    );
    Ok(Arc::new(runner))
}

pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
