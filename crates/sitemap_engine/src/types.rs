use sitemap_core::{
    ArtifactKind, GenerationResult, Msg, RequestId, TransportError, ValidationResult, Workflow,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    Generation(Result<GenerationResult, TransportError>),
    Validation(Result<ValidationResult, TransportError>),
}

impl ServiceResponse {
    /// A transport failure for `workflow`'s request.
    pub fn failed(workflow: Workflow, error: TransportError) -> Self {
        match workflow {
            Workflow::Generation => ServiceResponse::Generation(Err(error)),
            Workflow::Validation => ServiceResponse::Validation(Err(error)),
        }
    }

    /// Message that feeds this response back into the controller.
    pub fn into_msg(self, request_id: RequestId) -> Msg {
        match self {
            ServiceResponse::Generation(outcome) => Msg::GenerationResolved {
                request_id,
                outcome,
            },
            ServiceResponse::Validation(outcome) => Msg::ValidationResolved {
                request_id,
                outcome,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Resolved {
        request_id: RequestId,
        response: ServiceResponse,
    },
    Downloaded {
        kind: ArtifactKind,
        filename: String,
        result: Result<Vec<u8>, TransportError>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build service client: {0}")]
    Client(#[from] TransportError),
    #[error("engine worker has stopped")]
    Disconnected,
}
