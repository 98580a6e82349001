use crate::{ChartData, DisplayInstructions, FormFields, RequestId, Workflow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRequest {
    Generate { form: FormFields },
    Validate,
}

impl ServiceRequest {
    pub fn workflow(&self) -> Workflow {
        match self {
            ServiceRequest::Generate { .. } => Workflow::Generation,
            ServiceRequest::Validate => Workflow::Validation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Perform one request against the service.
    Send {
        request_id: RequestId,
        request: ServiceRequest,
    },
    /// Apply presentation mutations.
    Present(DisplayInstructions),
    /// Replace the chart of the data's kind.
    DrawChart(ChartData),
}
