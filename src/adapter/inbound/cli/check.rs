//! `clientdb check`.

use std::path::Path;

use super::output;
use crate::application::client::StoreStatus;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration and ping both stores.
///
/// Returns `Ok(false)` when the configuration is valid but a store is
/// unreachable.
pub async fn execute(config_path: &Path) -> Result<bool> {
    let config = Config::load(config_path)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Configuration");
    output::field("Config", config_path.display());
    output::field("Bind", &config.server.bind);
    output::field("Relational", format!("{:?}", config.relational.backend).to_lowercase());
    output::field("Document", format!("{:?}", config.document.backend).to_lowercase());
    output::field("Timeout", format!("{} ms", config.router.store_timeout_ms));
    output::success("Configuration file is valid");

    output::section("Stores");
    let service = bootstrap::build_service(&config).await?;
    let report = service.health().await;
    service.close().await;

    report_store(&report.relational);
    report_store(&report.document);

    if report.is_healthy() {
        output::success("All stores reachable");
    } else {
        output::note("Start the unreachable store or fix its url, then re-run the check");
    }
    Ok(report.is_healthy())
}

fn report_store(status: &StoreStatus) {
    match &status.error {
        None => output::success(&format!("{} store reachable", status.store)),
        Some(error) => output::error(&format!("{} store unreachable: {error}", status.store)),
    }
}
