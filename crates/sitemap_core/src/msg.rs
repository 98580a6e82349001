use crate::{FormFields, GenerationResult, RequestId, TransportError, ValidationResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the generation form.
    GenerateSubmitted(FormFields),
    /// User clicked the validate trigger.
    ValidateSubmitted,
    /// Service answered (or failed to answer) a generation request.
    GenerationResolved {
        request_id: RequestId,
        outcome: Result<GenerationResult, TransportError>,
    },
    /// Service answered (or failed to answer) a validation request.
    ValidationResolved {
        request_id: RequestId,
        outcome: Result<ValidationResult, TransportError>,
    },
    /// User asked for every validated URL of the last run.
    ShowAllValidationRequested,
}
