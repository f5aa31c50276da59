use crate::error::{PipelineError, Result};
use std::time::Duration;

pub const USER_AGENT: &str = concat!("shadestop/", env!("CARGO_PKG_VERSION"));

pub fn build_client(source_name: &'static str, timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PipelineError::fetch(source_name, format!("failed to create HTTP client: {e}")))
}

/// Send a prepared request and return the body of a successful response.
///
/// Any transport error or non-2xx status is a fetch error; there is no retry.
pub fn send_for_text(
    source_name: &'static str,
    request: reqwest::blocking::RequestBuilder,
) -> Result<String> {
    let response = request
        .send()
        .map_err(|e| PipelineError::fetch(source_name, format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PipelineError::fetch(
            source_name,
            format!("API returned error status: {status}"),
        ));
    }

    response
        .text()
        .map_err(|e| PipelineError::fetch(source_name, format!("failed to read body: {e}")))
}
