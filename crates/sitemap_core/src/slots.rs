//! Named output slots each workflow writes to.
//!
//! Bound once at startup and injected into the controller; the defaults are
//! the element ids of the service's own page.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSlots {
    pub trigger: SlotId,
    pub loader: SlotId,
    pub results: SlotId,
    pub status: SlotId,
    pub error_message: SlotId,
    pub total_urls: SlotId,
    pub time_taken: SlotId,
    pub samples: SlotId,
    pub file_name: SlotId,
    pub download: SlotId,
    pub chart: SlotId,
}

impl Default for GenerationSlots {
    fn default() -> Self {
        Self {
            trigger: "generateSitemapBtn".into(),
            loader: "generateLoader".into(),
            results: "generateResults".into(),
            status: "generateStatus".into(),
            error_message: "generateErrorMessage".into(),
            total_urls: "totalUrls".into(),
            time_taken: "generateTimeTaken".into(),
            samples: "sampleGeneratedUrls".into(),
            file_name: "generatedFileName".into(),
            download: "downloadSitemapBtn".into(),
            chart: "generationChart".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSlots {
    pub trigger: SlotId,
    pub loader: SlotId,
    pub results: SlotId,
    pub total_tested: SlotId,
    pub successful: SlotId,
    pub errors: SlotId,
    pub redirects: SlotId,
    pub time_taken: SlotId,
    pub samples: SlotId,
    pub file_name: SlotId,
    pub show_all: SlotId,
    pub download: SlotId,
    pub chart: SlotId,
    pub full_results: SlotId,
}

impl Default for ValidationSlots {
    fn default() -> Self {
        Self {
            trigger: "validateSitemapBtn".into(),
            loader: "validateLoader".into(),
            results: "validateResults".into(),
            total_tested: "totalTestedUrls".into(),
            successful: "successfulUrls".into(),
            errors: "errorUrls".into(),
            redirects: "redirectUrls".into(),
            time_taken: "validateTimeTaken".into(),
            samples: "sampleValidatedUrls".into(),
            file_name: "validatedFileName".into(),
            show_all: "showAllValidationBtn".into(),
            download: "downloadValidationReportBtn".into(),
            chart: "validationChart".into(),
            full_results: "fullValidationResults".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSlots {
    pub generation: GenerationSlots,
    pub validation: ValidationSlots,
}
