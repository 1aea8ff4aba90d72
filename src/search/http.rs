//! Free-text parser backed by an AI proxy endpoint
//!
//! The endpoint receives `{ "query", "makes", "models", "features" }` and is
//! expected to build the prompt itself. This is not the body the web
//! client's `/api/gemini` function takes (it wants a prebuilt
//! `{ "payload": { "model", ... } }`), so point `ai_proxy_url` at a proxy
//! that accepts this request shape.
//!
//! The proxy answers `{ "result": "<json text>" }` on success and
//! `{ "error": "...", "details": "..." }` otherwise. The JSON text inside
//! `result` is the partial filter. Error bodies are read best-effort: a
//! non-2xx status is a rejection whatever the body holds.

use super::{FreeTextParser, ParseError};
use crate::core::domain::CatalogDomain;
use crate::core::merge::ParsedFilter;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    query: &'a str,
    makes: Vec<&'a str>,
    models: Vec<&'a str>,
    features: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    result: Option<String>,
    error: Option<String>,
    details: Option<String>,
}

pub struct HttpFreeTextParser {
    client: reqwest::Client,
    url: String,
}

impl HttpFreeTextParser {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

/// Decode the proxy's `result` text into a filter
///
/// Models sometimes wrap JSON in a markdown fence; that wrapper is stripped.
pub(crate) fn decode_result(text: &str) -> Result<ParsedFilter, ParseError> {
    let body = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(body).map_err(|e| ParseError::InvalidResponse(e.to_string()))
}

/// Build the rejection for a non-2xx answer
///
/// The proxy's error envelope supplies the message when the body is one;
/// HTML error pages and empty bodies fall back to the status reason.
pub(crate) fn rejection(status: reqwest::StatusCode, body: &str) -> ParseError {
    let envelope = serde_json::from_str::<ProxyEnvelope>(body).ok();
    let message = match envelope.map(|e| (e.error, e.details)) {
        Some((Some(error), Some(details))) => format!("{}: {}", error, details),
        Some((Some(error), None)) => error,
        _ => status.to_string(),
    };
    ParseError::Rejected {
        status: status.as_u16(),
        message,
    }
}

/// Decode a 2xx body into a filter
pub(crate) fn decode_success(body: &str) -> Result<ParsedFilter, ParseError> {
    let envelope: ProxyEnvelope =
        serde_json::from_str(body).map_err(|e| ParseError::InvalidResponse(e.to_string()))?;

    match envelope.result {
        Some(text) => decode_result(&text),
        None => Err(ParseError::InvalidResponse(
            "response has no result field".to_string(),
        )),
    }
}

#[async_trait]
impl FreeTextParser for HttpFreeTextParser {
    async fn parse(&self, query: &str, domain: &CatalogDomain) -> Result<ParsedFilter, ParseError> {
        let request = ParseRequest {
            query,
            makes: domain.makes().collect(),
            models: domain
                .models_by_make
                .values()
                .flat_map(|models| models.iter().map(String::as_str))
                .collect(),
            features: domain.features.iter().map(String::as_str).collect(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ParseError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ParseError::Transport(e.to_string()))?;
        decode_success(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_json() {
        let filter = decode_result(r#"{"make": "Tata", "minPrice": 500000}"#).unwrap();
        assert_eq!(filter.make.as_deref(), Some("Tata"));
        assert_eq!(filter.min_price, Some(500_000.0));
    }

    #[test]
    fn test_decode_fenced_json() {
        let filter = decode_result("```json\n{\"features\": [\"Sunroof\"]}\n```").unwrap();
        assert_eq!(filter.features, vec!["Sunroof".to_string()]);
    }

    #[test]
    fn test_error_status_with_html_body_is_rejected() {
        let err = rejection(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html><body>502 Bad Gateway</body></html>",
        );
        match err {
            ParseError::Rejected { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("Bad Gateway"));
            }
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_error_status_with_empty_body_is_rejected() {
        assert!(matches!(
            rejection(reqwest::StatusCode::SERVICE_UNAVAILABLE, ""),
            ParseError::Rejected { status: 503, .. }
        ));
    }

    #[test]
    fn test_error_envelope_supplies_message() {
        let body = r#"{"error": "AI Error", "details": "quota exceeded"}"#;
        match rejection(reqwest::StatusCode::INTERNAL_SERVER_ERROR, body) {
            ParseError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "AI Error: quota exceeded");
            }
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_success_without_result_is_invalid() {
        assert!(matches!(
            decode_success(r#"{"details": "nothing"}"#),
            Err(ParseError::InvalidResponse(_))
        ));
        let filter = decode_success(r#"{"result": "{\"make\": \"Kia\"}"}"#).unwrap();
        assert_eq!(filter.make.as_deref(), Some("Kia"));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_result("I could not parse that"),
            Err(ParseError::InvalidResponse(_))
        ));
    }
}
