//! MongoDB client construction.

use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::domain::StoreKind;
use crate::error::StoreError;

const APP_NAME: &str = "clientdb";

/// Build a driver client for `url`.
///
/// The driver connects lazily, so an unreachable server only surfaces on the
/// first operation. `server_selection_timeout` bounds how long that first
/// operation waits before reporting the server as unavailable.
///
/// # Errors
/// Returns [`StoreError::Unavailable`] if the URI cannot be parsed or
/// resolved.
pub async fn open_client(url: &str, server_selection_timeout: Duration) -> Result<Client, StoreError> {
    let mut options = ClientOptions::parse(url)
        .await
        .map_err(|e| StoreError::unavailable(StoreKind::Document, e))?;
    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(server_selection_timeout);

    Client::with_options(options).map_err(|e| StoreError::unavailable(StoreKind::Document, e))
}
