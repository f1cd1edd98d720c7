//! HTTP utilities for Cricbuzz API communication

use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

pub const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";
pub const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// Build the static RapidAPI header pair plus `Accept: application/json`.
///
/// The host header is the host part of `base_url`.
pub fn rapidapi_headers(api_key: &str, base_url: &str) -> Result<HeaderMap> {
    let host = reqwest::Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| base_url.to_string());

    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        HeaderName::from_static(RAPIDAPI_KEY_HEADER),
        HeaderValue::from_str(api_key)?,
    );
    h.insert(
        HeaderName::from_static(RAPIDAPI_HOST_HEADER),
        HeaderValue::from_str(&host)?,
    );
    Ok(h)
}
