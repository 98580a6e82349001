use std::time::Duration;

use sitemap_core::{
    ArtifactKind, Msg, RequestId, ServiceRequest, TransportError, TransportErrorKind, Workflow,
};
use sitemap_engine::{EngineError, EngineEvent, EngineHandle, ServiceResponse};
use sitemap_logging::{sitemap_info, sitemap_warn};

/// What the console has to act on after polling the engine.
#[derive(Debug)]
pub enum Inbound {
    Msg(Msg),
    Artifact {
        kind: ArtifactKind,
        filename: String,
        result: Result<Vec<u8>, TransportError>,
    },
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Hands a request to the engine. If the engine is gone the request is
    /// resolved right away as a transport failure so the workflow still settles.
    pub fn send(&self, request_id: RequestId, request: ServiceRequest) -> Option<Msg> {
        let workflow = request.workflow();
        sitemap_info!("Send request_id={} workflow={:?}", request_id, workflow);
        match self.engine.submit(request_id, request) {
            Ok(()) => None,
            Err(err) => {
                sitemap_warn!("Engine rejected request_id={}: {}", request_id, err);
                Some(disconnected(workflow, request_id, &err))
            }
        }
    }

    pub fn download(&self, kind: ArtifactKind, filename: &str) -> Result<(), TransportError> {
        self.engine.download(kind, filename).map_err(|err| {
            TransportError::new(TransportErrorKind::Disconnected, err.to_string())
        })
    }

    /// Next engine event, if one arrives within `wait`. Fails once the engine
    /// is gone.
    pub fn poll(&self, wait: Duration) -> Result<Option<Inbound>, EngineError> {
        let event = self.engine.recv_timeout(wait)?;
        Ok(event.map(|event| match event {
            EngineEvent::Resolved {
                request_id,
                response,
            } => Inbound::Msg(response.into_msg(request_id)),
            EngineEvent::Downloaded {
                kind,
                filename,
                result,
            } => Inbound::Artifact {
                kind,
                filename,
                result,
            },
        }))
    }
}

/// Resolution for a request that can no longer be answered.
pub fn disconnected(workflow: Workflow, request_id: RequestId, err: &EngineError) -> Msg {
    let failure = TransportError::new(TransportErrorKind::Disconnected, err.to_string());
    ServiceResponse::failed(workflow, failure).into_msg(request_id)
}
