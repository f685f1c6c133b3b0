use crate::api::{build_health_request, build_history_request, build_toggle_request};
use crate::parse::{HealthStatus, parse_envelope, parse_latest_entry};
use crate::runtime::HttpRuntime;
use dictate_core::error::ServiceError;
use dictate_core::types::ResultEntry;
use std::time::Duration;

/// Typed client for the local speech-to-text service.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    runtime: HttpRuntime,
}

impl ServiceClient {
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            runtime: HttpRuntime::new(connect_timeout, request_timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe. Every failure mode is reported as [`ServiceError::Unreachable`].
    pub async fn check_health(&self) -> Result<HealthStatus, ServiceError> {
        let probe = async {
            let resp = self
                .runtime
                .execute(&build_health_request(&self.base_url))
                .await?;
            let status: Option<HealthStatus> = parse_envelope(&resp)?;
            Ok::<_, ServiceError>(status.unwrap_or_else(|| HealthStatus {
                status: "ok".into(),
            }))
        };
        probe.await.map_err(ServiceError::into_unreachable)
    }

    pub async fn latest_entry(&self) -> Result<Option<ResultEntry>, ServiceError> {
        let resp = self
            .runtime
            .execute(&build_history_request(&self.base_url))
            .await?;
        parse_latest_entry(&resp)
    }

    pub async fn toggle(&self, context: Option<&str>) -> Result<(), ServiceError> {
        let resp = self
            .runtime
            .execute(&build_toggle_request(&self.base_url, context))
            .await?;
        parse_envelope::<serde_json::Value>(&resp)?;
        Ok(())
    }
}
