//! Client for the external insight-generation service.
//!
//! This is the only call that crosses the process boundary to a third party.
//! The contract for callers is deliberately blunt: [`InsightClient::fetch`]
//! eventually resolves with a list of advisory strings and never fails.
//! Transport errors, bad statuses and malformed bodies all degrade to the
//! fixed fallback pair. No retries, no client-side timeout beyond what the
//! transport enforces.

use reqwest::Url;
use serde::Serialize;
use thiserror::Error;

/// Advisories substituted when the service cannot be reached or misbehaves.
pub const FALLBACK_INSIGHTS: [&str; 2] = [
    "AI module currently recalibrating.",
    "Always verify DLT hashes manually for high-value transfers.",
];

/// Payload sent to the insights endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    pub amount: String,
    pub currency: String,
    pub recipient_name: String,
    pub rail: String,
}

/// Construction-time failures; the fetch path itself never errors.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("invalid insight endpoint: {0}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned status {0}")]
    Status(u16),
}

#[derive(Clone, Debug)]
pub struct InsightClient {
    endpoint: Url,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl InsightClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, InsightError> {
        let base =
            Url::parse(base_url).map_err(|err| InsightError::InvalidEndpoint(err.to_string()))?;
        let endpoint = base
            .join("v1/insights")
            .map_err(|err| InsightError::InvalidEndpoint(err.to_string()))?;
        Ok(Self {
            endpoint,
            api_key,
            http: reqwest::Client::new(),
        })
    }

    /// The fixed two-string fallback.
    #[must_use]
    pub fn fallback() -> Vec<String> {
        FALLBACK_INSIGHTS.iter().map(|s| s.to_string()).collect()
    }

    /// Requests advisories for a transfer. Infallible by design: any failure
    /// is logged and replaced with [`FALLBACK_INSIGHTS`].
    pub async fn fetch(&self, request: &InsightRequest) -> Vec<String> {
        match self.try_fetch(request).await {
            Ok(insights) => insights,
            Err(err) => {
                tracing::warn!("insight fetch failed: {err}");
                Self::fallback()
            }
        }
    }

    async fn try_fetch(&self, request: &InsightRequest) -> Result<Vec<String>, FetchError> {
        let mut call = self.http.post(self.endpoint.clone()).json(request);
        if let Some(key) = &self.api_key {
            call = call.bearer_auth(key);
        }

        let res = call.send().await?;
        if !res.status().is_success() {
            return Err(FetchError::Status(res.status().as_u16()));
        }
        Ok(res.json::<Vec<String>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn request() -> InsightRequest {
        InsightRequest {
            amount: "500".to_string(),
            currency: "USD".to_string(),
            recipient_name: "Alice Qubits".to_string(),
            rail: "quantumpay".to_string(),
        }
    }

    /// Serves exactly one canned HTTP response and returns the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[test]
    fn payload_uses_camel_case_wire_names() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["recipientName"], "Alice Qubits");
        assert_eq!(json["rail"], "quantumpay");
    }

    #[tokio::test]
    async fn parses_a_string_array_response() {
        let base = serve_once("200 OK", r#"["Route nominal.","Fees optimal."]"#).await;
        let client = InsightClient::new(&base, None).unwrap();
        let insights = client.fetch(&request()).await;
        assert_eq!(insights, ["Route nominal.", "Fees optimal."]);
    }

    #[tokio::test]
    async fn transport_failure_yields_the_fallback_pair() {
        // Nothing listens on the discard port.
        let client = InsightClient::new("http://127.0.0.1:9/", None).unwrap();
        let insights = client.fetch(&request()).await;
        assert_eq!(insights, InsightClient::fallback());
        assert_eq!(insights.len(), 2);
    }

    #[tokio::test]
    async fn malformed_body_yields_the_fallback_pair() {
        let base = serve_once("200 OK", r#"{"oops": true}"#).await;
        let client = InsightClient::new(&base, None).unwrap();
        assert_eq!(client.fetch(&request()).await, InsightClient::fallback());
    }

    #[tokio::test]
    async fn service_error_yields_the_fallback_pair() {
        let base = serve_once("500 Internal Server Error", "{}").await;
        let client = InsightClient::new(&base, None).unwrap();
        assert_eq!(client.fetch(&request()).await, InsightClient::fallback());
    }

    #[test]
    fn rejects_unparseable_endpoints() {
        assert!(InsightClient::new("not a url", None).is_err());
    }
}
