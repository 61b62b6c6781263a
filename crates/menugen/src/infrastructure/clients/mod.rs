mod http;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

pub use http::*;

use crate::configuration::{Config, ConfigKey};
use crate::domain::models::MenuClient;

pub struct MenuClientManager {}

impl MenuClientManager {
    /// Builds the backend client from the loaded configuration.
    pub fn get() -> Result<Arc<dyn MenuClient>> {
        let url = Config::get(ConfigKey::BackendUrl);
        if url.is_empty() {
            bail!("backend-url is not defined");
        }

        let mut client = HttpMenuClient::new(url);
        if let Some(timeout) = Config::request_timeout()? {
            client = client.with_timeout(timeout);
        }

        Ok(Arc::new(client))
    }
}
