use crate::runtime::HttpResponse;
use dictate_core::error::ServiceError;
use dictate_core::types::ResultEntry;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Uniform `{ ok, data?, error? }` wrapper used by every service endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Unwraps an envelope, turning `ok:false` and non-2xx statuses into errors.
///
/// `ok:false` wins over a 2xx status; the service's `error` text is preserved when present.
pub fn parse_envelope<T: DeserializeOwned>(
    resp: &HttpResponse,
) -> Result<Option<T>, ServiceError> {
    let decoded = serde_json::from_slice::<Envelope<T>>(&resp.body);

    if !resp.is_success() {
        let detail = match decoded {
            Ok(Envelope {
                error: Some(error), ..
            }) => format!("HTTP {}: {error}", resp.status),
            _ => format!("HTTP {}", resp.status),
        };
        return Err(ServiceError::request_failed(detail));
    }

    let env = decoded
        .map_err(|e| ServiceError::request_failed(format!("invalid response: {e}")))?;
    if !env.ok {
        return Err(ServiceError::request_failed(
            env.error.unwrap_or_else(|| "unknown error".into()),
        ));
    }
    Ok(env.data)
}

/// Newest history entry. The listing is newest-first, so only index 0 matters.
pub fn parse_latest_entry(resp: &HttpResponse) -> Result<Option<ResultEntry>, ServiceError> {
    let entries: Option<Vec<ResultEntry>> = parse_envelope(resp)?;
    Ok(entries.and_then(|e| e.into_iter().next()))
}
