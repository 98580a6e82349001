//! Paths exposed by the sitemap service.

pub const GENERATE_ACTION: &str = "/generate_sitemap_action";
pub const VALIDATE_ACTION: &str = "/validate_sitemap_action";
pub const FULL_VALIDATION_RESULTS: &str = "/full_validation_results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Sitemap,
    ValidationReport,
}

impl ArtifactKind {
    /// First path segment of the download route.
    pub fn route_segment(self) -> &'static str {
        match self {
            ArtifactKind::Sitemap => "download_sitemap",
            ArtifactKind::ValidationReport => "download_validation_report",
        }
    }
}

/// Download path for an artifact. The filename is used verbatim.
pub fn download_path(kind: ArtifactKind, filename: &str) -> String {
    format!("/{}/{}", kind.route_segment(), filename)
}
