//! `clientdb init`.

use std::path::Path;

use super::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Create the relational `clients` table and the document store's unique
/// `client_email` index. Safe to run repeatedly.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Initialize stores");
    output::field("Config", config_path.display());

    let service = bootstrap::build_service(&config).await?;
    let result = service.init().await;
    service.close().await;
    result?;

    output::success("Relational table ready");
    output::success("Document index ready");
    Ok(())
}
