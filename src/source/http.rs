//! Remote taxonomy endpoint

use super::error::LoadFailure;
use super::ingest::parse_taxonomy;
use super::TaxonomySource;
use crate::taxonomy::Taxonomy;
use std::time::Duration;
use tracing::{debug, info};

/// Fetches the taxonomy with a blocking `GET`
#[derive(Debug, Clone)]
pub struct HttpSource {
    endpoint: String,
    timeout: Duration,
}

impl HttpSource {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TaxonomySource for HttpSource {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    fn load(&self) -> Result<Taxonomy, LoadFailure> {
        info!(endpoint = %self.endpoint, "fetching taxonomy");
        let response = ureq::get(&self.endpoint)
            .timeout(self.timeout)
            .set("Accept", "application/json")
            .call()?;

        debug!(status = response.status(), "taxonomy response received");
        let body = response.into_string()?;
        parse_taxonomy(&body)
    }
}
