//! API utilities for loading table rows from a remote endpoint.

use contracts::shared::table::{ApiDescriptor, Row, RowSourceError};
use gloo_net::http::Request;

/// Query string of the current page (`"?lang=es&token=..."`).
///
/// Returns an empty string if window is not available.
pub fn page_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Fetch rows described by `api`
///
/// Sends a single GET with an optional `Authorization: Bearer` header and
/// extracts the row array from the JSON response.
///
/// # Example
/// ```rust,ignore
/// let api = ApiDescriptor::new("/api/users").with_data_prop("items");
/// let rows = fetch_rows(&api).await?;
/// ```
pub async fn fetch_rows(api: &ApiDescriptor) -> Result<Vec<Row>, RowSourceError> {
    let mut request = Request::get(&api.url).header("Accept", "application/json");
    if let Some(auth_header) = api.authorization_header(&page_query()) {
        request = request.header("Authorization", &auth_header);
    }

    let response = request
        .send()
        .await
        .map_err(|e| RowSourceError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(RowSourceError::Http(response.status()));
    }

    let payload: serde_json::Value = response
        .json()
        .await
        .map_err(|e| RowSourceError::Decode(e.to_string()))?;

    api.extract_rows(payload)
}
