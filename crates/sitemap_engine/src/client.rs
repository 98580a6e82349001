use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use sitemap_core::routes::{GENERATE_ACTION, VALIDATE_ACTION};
use sitemap_core::{
    ArtifactKind, FormFields, GenerationResult, TransportError, TransportErrorKind,
    ValidationResult,
};
use sitemap_logging::{sitemap_debug, sitemap_warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// `None` leaves long crawls unbounded; only connection setup is timed.
    pub request_timeout: Option<Duration>,
    pub max_artifact_bytes: u64,
}

impl ServiceSettings {
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_artifact_bytes: 50 * 1024 * 1024,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, TransportError> {
        let url = Url::parse(base_url)
            .map_err(|err| TransportError::new(TransportErrorKind::InvalidUrl, err.to_string()))?;
        Ok(Self::new(url))
    }
}

/// Remote sitemap service as seen by the controller.
#[async_trait::async_trait]
pub trait SitemapService: Send + Sync {
    async fn generate(&self, form: &FormFields) -> Result<GenerationResult, TransportError>;

    async fn validate(&self) -> Result<ValidationResult, TransportError>;

    async fn download(
        &self,
        kind: ArtifactKind,
        filename: &str,
    ) -> Result<Vec<u8>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestService {
    pub fn new(settings: ServiceSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(TransportErrorKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.settings
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| TransportError::new(TransportErrorKind::InvalidUrl, err.to_string()))
    }

    fn artifact_url(&self, kind: ArtifactKind, filename: &str) -> Result<Url, TransportError> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TransportError::new(TransportErrorKind::InvalidUrl, "base url cannot be a base")
            })?
            .pop_if_empty()
            .extend([kind.route_segment(), filename]);
        Ok(url)
    }

    /// Action endpoints answer errors with JSON and a 4xx/5xx status, so the
    /// body is decoded whatever the status.
    async fn send_for_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TransportError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        sitemap_debug!("response status={} bytes={}", status, body.len());
        serde_json::from_slice(&body).map_err(|err| {
            sitemap_warn!("undecodable response (status {}): {}", status, err);
            TransportError::new(
                TransportErrorKind::Decode,
                format!("status {status}: {err}"),
            )
        })
    }
}

#[async_trait::async_trait]
impl SitemapService for ReqwestService {
    async fn generate(&self, form: &FormFields) -> Result<GenerationResult, TransportError> {
        let url = self.endpoint(GENERATE_ACTION)?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form.encode());
        self.send_for_json(request).await
    }

    async fn validate(&self) -> Result<ValidationResult, TransportError> {
        let url = self.endpoint(VALIDATE_ACTION)?;
        self.send_for_json(self.client.post(url)).await
    }

    async fn download(
        &self,
        kind: ArtifactKind,
        filename: &str,
    ) -> Result<Vec<u8>, TransportError> {
        let url = self.artifact_url(kind, filename)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                TransportErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_artifact_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> TransportError {
    TransportError::new(
        TransportErrorKind::TooLarge { max_bytes, actual },
        "artifact too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportErrorKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(TransportErrorKind::Decode, err.to_string());
    }
    TransportError::new(TransportErrorKind::Network, err.to_string())
}
