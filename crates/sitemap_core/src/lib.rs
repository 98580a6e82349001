//! Sitemap core: workflow state machine, view renderer and chart adapter.
mod chart;
mod effect;
mod error;
mod form;
mod msg;
mod payload;
pub mod render;
pub mod routes;
mod slots;
mod state;
mod update;
mod view_model;

pub use chart::{ChartAdapter, ChartBackend, ChartData, ChartHandle, ChartKind, ChartSpec, Rgba};
pub use effect::{Effect, ServiceRequest};
pub use error::{TransportError, TransportErrorKind, WorkflowError};
pub use form::FormFields;
pub use msg::Msg;
pub use payload::{
    GenerationResult, ResponseStatus, SampleRow, ValidatedUrl, ValidationResult,
};
pub use render::{DisplayInstructions, DisplayOp, ListRow};
pub use routes::ArtifactKind;
pub use slots::{GenerationSlots, PageSlots, SlotId, ValidationSlots};
pub use state::{
    AppState, ControllerConfig, RequestId, Workflow, WorkflowSlot, WorkflowState,
    DEFAULT_SAMPLE_CAP,
};
pub use update::update;
pub use view_model::{AppViewModel, PageModel, SlotView, WorkflowView};
