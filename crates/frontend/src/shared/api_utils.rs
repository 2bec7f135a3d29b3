//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making
//! authenticated requests. Every request carries the bearer token of the
//! current session; errors come back as a typed [`HttpError`].

use contracts::api::API_ROOT;
use contracts::shared::error::ErrorBody;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path relative to the API root
///
/// # Example
/// ```ignore
/// let url = api_url(&contracts::api::instance_info_path(&uuid));
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}{}", api_base(), API_ROOT, path)
}

/// Append `?path=<encoded>` for the file endpoints
pub fn with_path_query(path: &str, relative: &str) -> String {
    format!("{}?path={}", path, urlencoding::encode(relative))
}

/// `?from=..&to=..` for `fs/move`
pub fn with_move_query(path: &str, from: &str, to: &str) -> String {
    format!(
        "{}?from={}&to={}",
        path,
        urlencoding::encode(from),
        urlencoding::encode(to)
    )
}

/// Failure of an API request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Request never got a response
    Network(String),
    /// Non-2xx response; `detail` is taken from the JSON error body when present
    Status { status: u16, detail: String },
    /// Body could not be decoded
    Decode(String),
}

impl HttpError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| body.trim().to_string());
        HttpError::Status { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Network(e) => write!(f, "Network error: {}", e),
            HttpError::Status { status, detail } if detail.is_empty() => {
                write!(f, "HTTP {}", status)
            }
            HttpError::Status { status, detail } => write!(f, "HTTP {}: {}", status, detail),
            HttpError::Decode(e) => write!(f, "Failed to parse response: {}", e),
        }
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

async fn check(response: Response) -> Result<Response, HttpError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(HttpError::from_status(status, &body))
}

/// GET returning the body as text, unmodified
pub async fn get_text(path: &str, token: &str) -> Result<String, HttpError> {
    let response = Request::get(&api_url(path))
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    check(response)
        .await?
        .text()
        .await
        .map_err(|e| HttpError::Decode(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str, token: &str) -> Result<T, HttpError> {
    let response = Request::get(&api_url(path))
        .header("Authorization", &bearer(token))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| HttpError::Decode(e.to_string()))
}

/// POST with a JSON body; `token` is `None` only for login
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    token: Option<&str>,
    body: &B,
) -> Result<T, HttpError> {
    let mut builder = Request::post(&api_url(path));
    if let Some(token) = token {
        builder = builder.header("Authorization", &bearer(token));
    }
    let response = builder
        .json(body)
        .map_err(|e| HttpError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| HttpError::Decode(e.to_string()))
}

/// PUT with a plain-text body
pub async fn put_text(path: &str, token: &str, body: String) -> Result<(), HttpError> {
    let response = Request::put(&api_url(path))
        .header("Authorization", &bearer(token))
        .header("Content-Type", "text/plain")
        .body(body)
        .map_err(|e| HttpError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

pub async fn delete(path: &str, token: &str) -> Result<(), HttpError> {
    let response = Request::delete(&api_url(path))
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(|e| HttpError::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_json_detail() {
        let err = HttpError::from_status(
            404,
            r#"{"kind":"NotFound","detail":"Setting motd not found for instance u1"}"#,
        );
        assert_eq!(
            err,
            HttpError::Status {
                status: 404,
                detail: "Setting motd not found for instance u1".into()
            }
        );
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "HTTP 404: Setting motd not found for instance u1"
        );
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        assert_eq!(HttpError::from_status(401, "").to_string(), "HTTP 401");
        assert_eq!(
            HttpError::from_status(502, "Bad Gateway\n").to_string(),
            "HTTP 502: Bad Gateway"
        );
        assert_eq!(HttpError::Network("offline".into()).status(), None);
    }

    #[test]
    fn test_with_path_query_encodes() {
        assert_eq!(
            with_path_query("/instance/u1/fs/ls", "world/region"),
            "/instance/u1/fs/ls?path=world%2Fregion"
        );
        assert_eq!(
            with_path_query("/instance/u1/fs/ls", ""),
            "/instance/u1/fs/ls?path="
        );
    }

    #[test]
    fn test_with_move_query_encodes_both() {
        assert_eq!(
            with_move_query("/instance/u1/fs/move", "world", "backups/world 1"),
            "/instance/u1/fs/move?from=world&to=backups%2Fworld%201"
        );
    }
}
