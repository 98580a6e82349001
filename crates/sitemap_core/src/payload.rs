//! JSON contract returned by the sitemap service.
//!
//! Every field carries a serde default: error payloads only contain `status`
//! and `error`, and the validation success payload omits `status` entirely.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
    /// Any status string the service may add later.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default)]
    pub total_urls: u64,
    #[serde(default)]
    pub time_taken: f64,
    #[serde(default)]
    pub saved_file: String,
    #[serde(default)]
    pub sample_urls: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerationResult {
    /// Generation only counts as successful when the service says so.
    pub fn is_success(&self) -> bool {
        self.status == Some(ResponseStatus::Success)
    }
}

/// One row of the validation sample. Rows without `url` are summary rows
/// such as "... and 5 more.".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SampleRow {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status_text: String,
}

impl SampleRow {
    pub fn link(url: impl Into<String>, status_text: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            status_text: status_text.into(),
        }
    }

    pub fn summary(status_text: impl Into<String>) -> Self {
        Self {
            url: None,
            status_text: status_text.into(),
        }
    }

    pub fn has_url(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Full per-URL validation record, sent alongside the sample.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatedUrl {
    pub url: String,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub accessible: bool,
    #[serde(default)]
    pub redirect: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default)]
    pub total_tested: u64,
    #[serde(default)]
    pub successful: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub redirects: u64,
    #[serde(default)]
    pub time_taken: f64,
    #[serde(default)]
    pub saved_file: String,
    #[serde(default)]
    pub sample_validated_urls: Vec<SampleRow>,
    #[serde(default)]
    pub full_validated_urls: Vec<ValidatedUrl>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ValidationResult {
    /// The service omits `status` on success, so only an explicit error fails.
    pub fn is_success(&self) -> bool {
        self.status != Some(ResponseStatus::Error)
    }
}
