//! Client for the unit-of-measure service
//!
//! Only an explicit 404 means "this unit does not exist". Timeouts, refused
//! connections, 5xx and unreadable bodies are outages and never count as a
//! successful verification.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::{InventoryError, InventoryResult};

pub const DEFAULT_UOM_SERVICE_URL: &str = "http://unit-of-measure-service/api/v1/uom";

/// Unit of measure as returned by the remote service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UomResponse {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub conversion_factor_to_base: Option<Decimal>,
    pub uom_status_id: Option<i64>,
}

/// Remote existence check for unit-of-measure ids
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UomClient: Send + Sync {
    /// `Ok(())` if the unit exists, `NotFound` if the service says it does
    /// not, `ServiceUnavailable` for anything else.
    async fn verify_exists(&self, unit_id: i64) -> InventoryResult<()>;
}

#[derive(Debug, Clone)]
pub struct UomClientConfig {
    /// Resource base URL; the unit id is appended as the last path segment
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for UomClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UOM_SERVICE_URL.to_string(),
            timeout: Duration::from_millis(5000),
            connect_timeout: Duration::from_millis(2000),
        }
    }
}

/// Reads:
/// - `UOM_SERVICE_URL` (default: http://unit-of-measure-service/api/v1/uom)
/// - `UOM_SERVICE_TIMEOUT_MS` (default: 5000)
/// - `UOM_SERVICE_CONNECT_TIMEOUT_MS` (default: 2000)
impl FromEnv for UomClientConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_or_default("UOM_SERVICE_URL", DEFAULT_UOM_SERVICE_URL),
            timeout: Duration::from_millis(env_parse("UOM_SERVICE_TIMEOUT_MS", 5000u64)?),
            connect_timeout: Duration::from_millis(env_parse(
                "UOM_SERVICE_CONNECT_TIMEOUT_MS",
                2000u64,
            )?),
        })
    }
}

/// reqwest-backed `UomClient`
#[derive(Clone)]
pub struct HttpUomClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUomClient {
    pub fn new(config: UomClientConfig) -> InventoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| InventoryError::Unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn unit_url(&self, unit_id: i64) -> String {
        format!("{}/{}", self.base_url, unit_id)
    }
}

#[async_trait]
impl UomClient for HttpUomClient {
    #[instrument(skip(self), fields(uom_id = unit_id))]
    async fn verify_exists(&self, unit_id: i64) -> InventoryResult<()> {
        let url = self.unit_url(unit_id);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "Unit of measure lookup failed");
            InventoryError::uom_unavailable()
        })?;

        match response.status() {
            status if status.is_success() => {
                let uom: UomResponse = response.json().await.map_err(|e| {
                    warn!(error = %e, "Unreadable unit of measure response");
                    InventoryError::uom_unavailable()
                })?;
                if uom.id != unit_id {
                    warn!(returned_id = uom.id, "Unit of measure service answered for another id");
                    return Err(InventoryError::uom_unavailable());
                }
                debug!(name = ?uom.name, "Unit of measure verified");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(InventoryError::uom_not_found(unit_id)),
            status => {
                warn!(status = %status, "Unit of measure service returned an error");
                Err(InventoryError::uom_unavailable())
            }
        }
    }
}
