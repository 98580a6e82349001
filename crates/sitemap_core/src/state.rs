use crate::view_model::{AppViewModel, WorkflowView};
use crate::{GenerationResult, PageSlots, ValidationResult, WorkflowError};

pub type RequestId = u64;

/// Samples longer than this are cut when rendered.
pub const DEFAULT_SAMPLE_CAP: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    Generation,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Controller-side configuration, bound once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub slots: PageSlots,
    pub sample_cap: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            slots: PageSlots::default(),
            sample_cap: DEFAULT_SAMPLE_CAP,
        }
    }
}

/// Lifecycle of one workflow plus its most recent outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSlot<R> {
    state: WorkflowState,
    in_flight: Option<RequestId>,
    last_result: Option<R>,
    last_error: Option<WorkflowError>,
}

impl<R> Default for WorkflowSlot<R> {
    fn default() -> Self {
        Self {
            state: WorkflowState::Idle,
            in_flight: None,
            last_result: None,
            last_error: None,
        }
    }
}

impl<R> WorkflowSlot<R> {
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn last_result(&self) -> Option<&R> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&WorkflowError> {
        self.last_error.as_ref()
    }

    /// Moves to Pending unless a request is already in flight.
    pub(crate) fn begin(&mut self, request_id: RequestId) -> bool {
        if self.state == WorkflowState::Pending {
            return false;
        }
        self.state = WorkflowState::Pending;
        self.in_flight = Some(request_id);
        self.last_result = None;
        self.last_error = None;
        true
    }

    /// Only the resolution of the in-flight request may settle the workflow.
    pub(crate) fn accepts(&self, request_id: RequestId) -> bool {
        self.state == WorkflowState::Pending && self.in_flight == Some(request_id)
    }

    pub(crate) fn succeed(&mut self, result: R) {
        self.state = WorkflowState::Succeeded;
        self.in_flight = None;
        self.last_result = Some(result);
    }

    pub(crate) fn fail(&mut self, error: WorkflowError) {
        self.state = WorkflowState::Failed;
        self.in_flight = None;
        self.last_error = Some(error);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub(crate) config: ControllerConfig,
    pub(crate) generation: WorkflowSlot<GenerationResult>,
    pub(crate) validation: WorkflowSlot<ValidationResult>,
    next_request_id: RequestId,
}

impl AppState {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn generation(&self) -> &WorkflowSlot<GenerationResult> {
        &self.generation
    }

    pub fn validation(&self) -> &WorkflowSlot<ValidationResult> {
        &self.validation
    }

    pub fn workflow_state(&self, workflow: Workflow) -> WorkflowState {
        match workflow {
            Workflow::Generation => self.generation.state(),
            Workflow::Validation => self.validation.state(),
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            generation: WorkflowView::from_slot(&self.generation, |result| {
                result.saved_file.clone()
            }),
            validation: WorkflowView::from_slot(&self.validation, |result| {
                result.saved_file.clone()
            }),
        }
    }

    /// Allocates a request id and enters Pending; `None` while one is in flight.
    pub(crate) fn begin(&mut self, workflow: Workflow) -> Option<RequestId> {
        let request_id = self.next_request_id + 1;
        let accepted = match workflow {
            Workflow::Generation => self.generation.begin(request_id),
            Workflow::Validation => self.validation.begin(request_id),
        };
        if !accepted {
            return None;
        }
        self.next_request_id = request_id;
        Some(request_id)
    }
}
