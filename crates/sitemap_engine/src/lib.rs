//! Sitemap engine: service client and request execution.
mod client;
mod engine;
mod persist;
mod types;

pub use client::{ReqwestService, ServiceSettings, SitemapService, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use persist::{ensure_output_dir, ArtifactStore, PersistError};
pub use types::{EngineError, EngineEvent, ServiceResponse};
