use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sitemap_core::{
    ArtifactKind, RequestId, ServiceRequest, TransportError, TransportErrorKind, Workflow,
};
use sitemap_logging::{sitemap_error, sitemap_info, sitemap_warn};
use tokio::task::JoinError;

use crate::client::{ReqwestService, ServiceSettings, SitemapService};
use crate::{EngineError, EngineEvent, ServiceResponse};

enum EngineCommand {
    Send {
        request_id: RequestId,
        request: ServiceRequest,
    },
    Download {
        kind: ArtifactKind,
        filename: String,
    },
}

/// Who is waiting for a command's event.
enum Origin {
    Request {
        request_id: RequestId,
        workflow: Workflow,
    },
    Download {
        kind: ArtifactKind,
        filename: String,
    },
}

impl EngineCommand {
    fn origin(&self) -> Origin {
        match self {
            EngineCommand::Send {
                request_id,
                request,
            } => Origin::Request {
                request_id: *request_id,
                workflow: request.workflow(),
            },
            EngineCommand::Download { kind, filename } => Origin::Download {
                kind: *kind,
                filename: filename.clone(),
            },
        }
    }
}

impl Origin {
    /// Event reported when the task serving this command died.
    fn lost(self, err: JoinError) -> EngineEvent {
        let error = TransportError::new(
            TransportErrorKind::Disconnected,
            format!("engine task failed: {err}"),
        );
        match self {
            Origin::Request {
                request_id,
                workflow,
            } => EngineEvent::Resolved {
                request_id,
                response: ServiceResponse::failed(workflow, error),
            },
            Origin::Download { kind, filename } => EngineEvent::Downloaded {
                kind,
                filename,
                result: Err(error),
            },
        }
    }
}

/// Runs service requests on a background tokio runtime.
///
/// Every command is spawned as its own task, so one workflow's request never
/// waits behind the other's. Each command yields exactly one [`EngineEvent`],
/// also when its task panics.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        let service = ReqwestService::new(settings)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn SitemapService>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("sitemap-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let origin = command.origin();
                        let event = match tokio::spawn(handle_command(service, command)).await {
                            Ok(event) => event,
                            Err(err) => {
                                sitemap_error!("engine task failed: {}", err);
                                origin.lost(err)
                            }
                        };
                        let _ = event_tx.send(event);
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(
        &self,
        request_id: RequestId,
        request: ServiceRequest,
    ) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Send {
                request_id,
                request,
            })
            .map_err(|_| EngineError::Disconnected)
    }

    pub fn download(
        &self,
        kind: ArtifactKind,
        filename: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Download {
                kind,
                filename: filename.into(),
            })
            .map_err(|_| EngineError::Disconnected)
    }

    pub fn try_recv(&self) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EngineError::Disconnected),
        }
    }

    /// Waits up to `timeout` for the next event. `Ok(None)` means nothing
    /// arrived in time; `Err` means the worker is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Disconnected),
        }
    }
}

async fn handle_command(service: Arc<dyn SitemapService>, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Send {
            request_id,
            request,
        } => {
            sitemap_info!(
                "request_id={} workflow={:?} dispatched",
                request_id,
                request.workflow()
            );
            let response = match request {
                ServiceRequest::Generate { form } => {
                    ServiceResponse::Generation(service.generate(&form).await)
                }
                ServiceRequest::Validate => ServiceResponse::Validation(service.validate().await),
            };
            if let ServiceResponse::Generation(Err(err)) | ServiceResponse::Validation(Err(err)) =
                &response
            {
                sitemap_warn!("request_id={} transport failure: {}", request_id, err);
            }
            EngineEvent::Resolved {
                request_id,
                response,
            }
        }
        EngineCommand::Download { kind, filename } => {
            sitemap_info!("download {:?} {}", kind, filename);
            let result = service.download(kind, &filename).await;
            if let Err(err) = &result {
                sitemap_warn!("download of {} failed: {}", filename, err);
            }
            EngineEvent::Downloaded {
                kind,
                filename,
                result,
            }
        }
    }
}
