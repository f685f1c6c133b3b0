use dictate_core::error::ServiceError;
use dictate_core::types::ResultEntry;
use dictate_engine::traits::DictationService;
use dictate_providers::ServiceClient;

/// [`DictationService`] backed by the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpDictationService {
    client: ServiceClient,
}

impl HttpDictationService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl DictationService for HttpDictationService {
    async fn check_health(&self) -> Result<(), ServiceError> {
        let status = self.client.check_health().await?;
        log::debug!("service health: {}", status.status);
        Ok(())
    }

    async fn latest_entry(&self) -> Result<Option<ResultEntry>, ServiceError> {
        self.client.latest_entry().await
    }

    async fn toggle(&self, context: Option<&str>) -> Result<(), ServiceError> {
        self.client.toggle(context).await
    }
}
