use log::info;

use crate::form::record::GameRecord;

/// Static fixture standing in for a real backend.
pub const DEFAULT_ENDPOINT: &str = "https://mocki.io/v1/7c033695-a247-4c07-a5ff-484598745462";

// ================================================================================================
// ERROR TYPES
// ================================================================================================

#[derive(Debug)]
pub enum FormLoadError {
    RequestFailed(reqwest::Error),
    BadStatus(u16),
    JsonParseError(serde_json::Error),
}

impl std::fmt::Display for FormLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormLoadError::RequestFailed(err) => write!(f, "Request failed: {}", err),
            FormLoadError::BadStatus(code) => write!(f, "Unexpected response status: {}", code),
            FormLoadError::JsonParseError(err) => write!(f, "JSON parse error: {}", err),
        }
    }
}

impl std::error::Error for FormLoadError {}

// ================================================================================================
// FETCH
// ================================================================================================

/// Fetch the form record from the mock endpoint.
///
/// One GET, no retry: any transport error, non-2xx status or undecodable
/// body surfaces as a `FormLoadError` and the caller flips the single
/// failure flag.
pub async fn try_fetch_record(endpoint: &str) -> Result<GameRecord, FormLoadError> {
    info!("fetching form record from {}", endpoint);

    let response = reqwest::get(endpoint).await.map_err(FormLoadError::RequestFailed)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FormLoadError::BadStatus(status.as_u16()));
    }

    let body = response.text().await.map_err(FormLoadError::RequestFailed)?;
    serde_json::from_str(&body).map_err(FormLoadError::JsonParseError)
}
