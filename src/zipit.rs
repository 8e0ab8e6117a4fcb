use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;

use crate::error::PennsieveError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRequest {
    pub paths: Vec<String>,
    pub dataset_id: u64,
    pub version: u32,
}

#[derive(Serialize)]
struct ArchivePayload<'a> {
    data: &'a ArchiveRequest,
}

#[derive(Debug, Clone)]
pub struct ArchiveResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// The packaging service that bundles dataset files into one archive.
/// Reached directly over HTTP, not through the agent.
pub trait ZipitClient: Send + Sync {
    fn fetch_archive(&self, request: &ArchiveRequest) -> Result<ArchiveResponse, PennsieveError>;
}

#[derive(Clone)]
pub struct ZipitHttpClient {
    client: Client,
    url: String,
}

impl ZipitHttpClient {
    pub fn new() -> Result<Self, PennsieveError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("pennsieve-client/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| PennsieveError::Filesystem(err.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| PennsieveError::ZipitHttp(err.to_string()))?;
        Ok(Self {
            client,
            url: "https://api.pennsieve.io/zipit/discover".to_string(),
        })
    }
}

impl ZipitClient for ZipitHttpClient {
    fn fetch_archive(&self, request: &ArchiveRequest) -> Result<ArchiveResponse, PennsieveError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ArchivePayload { data: request })
            .send()
            .map_err(|err| PennsieveError::ZipitHttp(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "zipit request failed".to_string());
            return Err(PennsieveError::ZipitStatus {
                status: status.as_u16(),
                message,
            });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let body = response
            .bytes()
            .map_err(|err| PennsieveError::ZipitHttp(err.to_string()))?
            .to_vec();
        Ok(ArchiveResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_wraps_request_under_data() {
        let request = ArchiveRequest {
            paths: vec!["files/a.csv".to_string()],
            dataset_id: 123,
            version: 4,
        };
        let value = serde_json::to_value(ArchivePayload { data: &request }).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "data": {
                    "paths": ["files/a.csv"],
                    "datasetId": 123,
                    "version": 4,
                }
            })
        );
    }
}
