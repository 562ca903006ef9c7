//! Extractor: one GET per entity, returning the records array from the JSON body.

use crate::config::EtlConfig;
use crate::error::{EtlError, ExtractError, Result};
use crate::metrics;
use crate::ports::HttpClientPort;
use crate::types::{Entity, RawRecord};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct Extractor {
    http: Arc<dyn HttpClientPort>,
    config: EtlConfig,
}

impl Extractor {
    pub fn new(http: Arc<dyn HttpClientPort>, config: EtlConfig) -> Self {
        Self { http, config }
    }

    /// Fetch every record of `entity` from its configured endpoint.
    #[instrument(skip(self))]
    pub async fn fetch(&self, entity: Entity) -> Result<Vec<RawRecord>> {
        let url = self.config.endpoint_url(entity);
        let records_key = &self.config.source(entity).records_key;

        let records = self
            .fetch_from(&url, records_key)
            .await
            .map_err(|e| EtlError::extraction(entity, e))?;

        info!("Fetched {} {} from {}", records.len(), entity, url);
        metrics::records_extracted(entity, records.len());
        Ok(records)
    }

    async fn fetch_from(
        &self,
        url: &str,
        records_key: &str,
    ) -> std::result::Result<Vec<RawRecord>, ExtractError> {
        debug!("GET {}", url);
        let resp = self.http.get(url).await.map_err(|message| ExtractError::Request {
            url: url.to_string(),
            message,
        })?;

        if !resp.is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: resp.status,
            });
        }

        let body: Value = serde_json::from_slice(&resp.bytes)?;
        extract_records(body, records_key)
    }
}

/// Take the array under `records_key` out of a response body.
pub fn extract_records(
    mut body: Value,
    records_key: &str,
) -> std::result::Result<Vec<RawRecord>, ExtractError> {
    match body.get_mut(records_key).map(Value::take) {
        Some(Value::Array(records)) => Ok(records),
        Some(_) => Err(ExtractError::NotAnArray(records_key.to_string())),
        None => Err(ExtractError::MissingKey(records_key.to_string())),
    }
}
