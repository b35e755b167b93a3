// ==========================================
// Quarry Ops Import - Backend Gateway
// ==========================================
// The pipeline's only remote dependency: existence checks, batch
// submission and the post-commit refresh, one REST call each.
// The backend remains the authority on the one-batch-per-period
// rule; client-side existence checks are advisory.
// ==========================================

use crate::backend::error::{BackendError, BackendResult};
use crate::config::BackendConfig;
use crate::domain::{ImportDomain, Period};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

// ==========================================
// BackendGateway Trait
// ==========================================
// Implementors: HttpBackendGateway (production), MockGateway (tests).
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Does committed data already exist for (domain, period)?
    async fn period_exists(&self, domain: ImportDomain, period: &Period) -> BackendResult<bool>;

    /// Submit one batch of period-tagged records for the domain.
    async fn submit_batch(
        &self,
        domain: ImportDomain,
        batch: Vec<serde_json::Value>,
    ) -> BackendResult<()>;

    /// Fetch the domain's persisted records (post-commit refresh).
    async fn fetch_committed(&self, domain: ImportDomain)
        -> BackendResult<Vec<serde_json::Value>>;
}

// ==========================================
// HTTP implementation
// ==========================================
pub struct HttpBackendGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackendGateway {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Non-2xx responses surface the body's `message` field verbatim
    // when present.
    async fn check_status(response: reqwest::Response) -> BackendResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "request failed".to_string());

        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
    async fn period_exists(&self, domain: ImportDomain, period: &Period) -> BackendResult<bool> {
        let url = self.url(&format!("/input/check-{}-exists", domain.slug()));
        debug!(%domain, %period, url = %url, "existence check");

        let response = self
            .client
            .get(&url)
            .query(&[("month", period.month_str()), ("year", period.year_str())])
            .send()
            .await?;

        let exists = Self::check_status(response).await?.json::<bool>().await?;
        Ok(exists)
    }

    async fn submit_batch(
        &self,
        domain: ImportDomain,
        batch: Vec<serde_json::Value>,
    ) -> BackendResult<()> {
        let url = self.url(&format!("/input/import-{}", domain.slug()));
        debug!(%domain, rows = batch.len(), url = %url, "submitting batch");

        let response = self.client.post(&url).json(&batch).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn fetch_committed(
        &self,
        domain: ImportDomain,
    ) -> BackendResult<Vec<serde_json::Value>> {
        let url = self.url(&format!("/input/{}", domain.slug()));
        debug!(%domain, url = %url, "fetching committed records");

        let response = self.client.get(&url).send().await?;
        let records = Self::check_status(response)
            .await?
            .json::<Vec<serde_json::Value>>()
            .await?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let config = BackendConfig {
            base_url: "http://backend:9000/".to_string(),
            timeout_secs: 5,
        };
        let gateway = HttpBackendGateway::new(&config).unwrap();
        assert_eq!(
            gateway.url("/input/sales"),
            "http://backend:9000/input/sales"
        );
    }
}
