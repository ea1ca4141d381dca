//! Subcommand implementations.

pub mod calendar;
pub mod config;
pub mod events;
pub mod toggle;

use std::sync::Arc;

use caterfind_api::{CatererBackend, HttpBackend, InMemoryBackend};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Builds the backend the commands talk to.
pub fn backend(config: &ClientConfig, offline: bool) -> ClientResult<Arc<dyn CatererBackend>> {
    if offline {
        debug!("Using in-memory backend");
        return Ok(Arc::new(InMemoryBackend::new()));
    }

    let api = config.api_config().map_err(ClientError::Config)?;
    debug!(base_url = %api.base_url, timeout = ?api.timeout, "Using REST backend");
    Ok(Arc::new(HttpBackend::new(api)?))
}
