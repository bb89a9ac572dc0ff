//! Transport-neutral request and response shapes, and response classification.

use crate::error::ClientError;
use serde_json::Value;
use std::fmt;

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A request ready to hand to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    pub fn with_bearer(mut self, bearer: Option<String>) -> Self {
        self.bearer = bearer;
        self
    }

    /// Path plus URL-encoded query string. Empty parameter lists add nothing.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// A response as received, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    /// `None` when the body could not be read.
    pub body: Option<String>,
}

impl RawResponse {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            status_text: reason_phrase(status).to_string(),
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            body: Some(body.to_string()),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: reason_phrase(status).to_string(),
            content_type: Some("text/plain; charset=utf-8".to_string()),
            body: Some(body.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_json_content_type)
    }

    /// Classify the response.
    ///
    /// Non-2xx statuses become [`ClientError::Http`] with the body read
    /// best-effort. Successful bodies are JSON when the content type says so,
    /// raw text otherwise.
    pub fn classify(self) -> Result<ResponseBody, ClientError> {
        if !self.is_success() {
            return Err(ClientError::Http {
                status: self.status,
                status_text: self.status_text,
                body: self.body.unwrap_or_default(),
            });
        }

        let is_json = self.is_json();
        let body = self
            .body
            .ok_or_else(|| ClientError::Transport("failed to read response body".to_string()))?;

        if is_json {
            serde_json::from_str(&body)
                .map(ResponseBody::Json)
                .map_err(|e| ClientError::Decode(format!("invalid JSON body: {e}")))
        } else {
            Ok(ResponseBody::Text(body))
        }
    }
}

/// A classified successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// The JSON value, or a decode error for text bodies.
    pub fn into_json(self) -> Result<Value, ClientError> {
        match self {
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Text(text) => Err(ClientError::Decode(format!(
                "expected a JSON response, got text: {}",
                truncate(&text, 120)
            ))),
        }
    }
}

/// `application/json`, or any `+json` structured syntax suffix.
pub fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == JSON_CONTENT_TYPE || mime.ends_with("+json")
}

/// Reject `{success: false}` and `{ok: false}` payloads delivered with a
/// success status.
pub fn check_application(value: &Value) -> Result<(), ClientError> {
    let failed = |key: &str| value.get(key).and_then(Value::as_bool) == Some(false);
    if !(failed("success") || failed("ok")) {
        return Ok(());
    }

    let message = ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .unwrap_or("Request failed")
        .to_string();
    Err(ClientError::Application { message })
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_content_type_parses_to_object() {
        let resp = RawResponse::json(200, &json!({"a": 1}));
        assert_eq!(resp.classify().unwrap(), ResponseBody::Json(json!({"a": 1})));
    }

    #[test]
    fn test_text_content_type_is_raw_text() {
        let resp = RawResponse::text(200, "ok");
        assert_eq!(resp.classify().unwrap(), ResponseBody::Text("ok".to_string()));
    }

    #[test]
    fn test_missing_content_type_is_text() {
        let resp = RawResponse {
            status: 200,
            status_text: "OK".to_string(),
            content_type: None,
            body: Some("{\"a\":1}".to_string()),
        };
        assert!(matches!(resp.classify().unwrap(), ResponseBody::Text(_)));
    }

    #[test]
    fn test_json_content_type_variants() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/geo+json"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("application/jsonp"));
    }

    #[test]
    fn test_error_status_carries_status_and_body() {
        let resp = RawResponse::text(500, "boom");
        match resp.classify().unwrap_err() {
            ClientError::Http { status, status_text, body } => {
                assert_eq!(status, 500);
                assert_eq!(status_text, "Internal Server Error");
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_error_body_is_swallowed() {
        let resp = RawResponse {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            content_type: None,
            body: None,
        };
        match resp.classify().unwrap_err() {
            ClientError::Http { body, .. } => assert_eq!(body, ""),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let resp = RawResponse {
            status: 200,
            status_text: "OK".to_string(),
            content_type: Some("application/json".to_string()),
            body: Some("{not json".to_string()),
        };
        assert!(matches!(resp.classify().unwrap_err(), ClientError::Decode(_)));
    }

    #[test]
    fn test_check_application() {
        assert!(check_application(&json!({"success": true})).is_ok());
        assert!(check_application(&json!([1, 2])).is_ok());

        let err = check_application(&json!({"success": false, "message": "User exists"})).unwrap_err();
        assert_eq!(err.user_message(), "User exists");

        let err = check_application(&json!({"ok": false, "error": "No scenes"})).unwrap_err();
        assert_eq!(err.user_message(), "No scenes");

        let err = check_application(&json!({"success": false})).unwrap_err();
        assert_eq!(err.user_message(), "Request failed");
    }

    #[test]
    fn test_path_and_query() {
        let req = ApiRequest::new(Method::Get, "/api/reports");
        assert_eq!(req.path_and_query(), "/api/reports");

        let req = req.with_query(vec![
            ("ward".to_string(), "12 North".to_string()),
            ("date".to_string(), "2025-01-01".to_string()),
        ]);
        assert_eq!(req.path_and_query(), "/api/reports?ward=12%20North&date=2025-01-01");
    }
}
