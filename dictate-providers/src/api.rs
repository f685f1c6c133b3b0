use crate::request::HttpRequest;
use serde_json::json;

pub const HEALTH_PATH: &str = "/api/health";
pub const HISTORY_PATH: &str = "/api/history";

// One endpoint serves both directions; the caller tracks which phase it is in.
pub const TOGGLE_PATH: &str = "/api/transcription/toggle-post-process";

pub fn build_health_request(base_url: &str) -> HttpRequest {
    HttpRequest::get(join_url(base_url, HEALTH_PATH))
}

pub fn build_history_request(base_url: &str) -> HttpRequest {
    HttpRequest::get(join_url(base_url, HISTORY_PATH))
}

pub fn build_toggle_request(base_url: &str, context: Option<&str>) -> HttpRequest {
    let payload = match context {
        Some(context) => json!({ "context": context }),
        None => json!({}),
    };
    HttpRequest::post_json(join_url(base_url, TOGGLE_PATH), &payload)
}

pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
