use crate::request::{Body, HttpRequest};
use anyhow::Context;
use dictate_core::error::ServiceError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Executes [`HttpRequest`] values over a shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpRuntime {
    client: reqwest::Client,
}

impl HttpRuntime {
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> anyhow::Result<Self> {
        // Without an explicit timeout a wedged service would stall the toggle indefinitely.
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }

    /// Sends the request; only transport-level failures are errors here.
    pub async fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ServiceError> {
        let mut headers = HeaderMap::new();
        for (k, v) in &req.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|_| ServiceError::request_failed(format!("invalid header name: {k}")))?;
            let value = HeaderValue::from_str(v).map_err(|_| {
                ServiceError::request_failed(format!("invalid header value for {k}"))
            })?;
            headers.insert(name, value);
        }

        let builder = match req.method.as_str() {
            "GET" => self.client.get(&req.url),
            "POST" => self.client.post(&req.url),
            other => {
                return Err(ServiceError::request_failed(format!(
                    "unsupported method: {other}"
                )));
            }
        }
        .headers(headers);

        let builder = match &req.body {
            Body::Empty => builder,
            Body::Json(s) => builder.body(s.clone()),
        };

        let resp = builder.send().await.map_err(|e| {
            ServiceError::unreachable(format!("{} {}: {e}", req.method, req.url))
        })?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ServiceError::unreachable(format!("read response body: {e}")))?
            .to_vec();

        log::debug!("{} {} -> {}", req.method, req.url, status);
        Ok(HttpResponse { status, body })
    }
}
