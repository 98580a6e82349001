use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use sitemap_core::{
    update, AppState, ArtifactKind, ChartAdapter, ChartKind, Effect, Msg, PageModel, Workflow,
    WorkflowState,
};
use sitemap_engine::{ArtifactStore, EngineHandle};
use sitemap_logging::{sitemap_debug, sitemap_info, sitemap_warn};

use super::config::AppConfig;
use super::effects::{self, EffectRunner, Inbound};
use super::ui;
use super::ui::chart::TextChartBackend;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Drives the controller from the terminal: feeds messages through `update`,
/// carries out the effects and keeps the page model current.
pub struct Console {
    state: AppState,
    page: PageModel,
    charts: ChartAdapter<TextChartBackend>,
    runner: EffectRunner,
    store: ArtifactStore,
    base_url: String,
    alerts: Vec<String>,
}

impl Console {
    pub fn new(config: &AppConfig, engine: EngineHandle) -> Self {
        let controller = config.controller_config();
        let page = PageModel::new(&controller.slots);
        let charts = ChartAdapter::new(
            TextChartBackend::default(),
            controller.slots.generation.chart.clone(),
            controller.slots.validation.chart.clone(),
        );
        Self {
            state: AppState::new(controller),
            page,
            charts,
            runner: EffectRunner::new(engine),
            store: ArtifactStore::new(config.download_dir.clone()),
            base_url: config.base_url.clone(),
            alerts: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let label = format!("{msg:?}");
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            if effects.is_empty() {
                sitemap_debug!("No effects for {}", label);
            }

            for effect in effects {
                match effect {
                    Effect::Present(instructions) => {
                        self.page.apply(&instructions);
                        self.alerts.extend(self.page.take_alerts());
                    }
                    Effect::DrawChart(data) => self.charts.draw(&data),
                    Effect::Send {
                        request_id,
                        request,
                    } => {
                        if let Some(resolution) = self.runner.send(request_id, request) {
                            inbox.push_back(resolution);
                        }
                    }
                }
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        [Workflow::Generation, Workflow::Validation]
            .into_iter()
            .any(|workflow| self.state.workflow_state(workflow) == WorkflowState::Pending)
    }

    /// Blocks until no workflow has a request in flight. If the engine stops,
    /// the outstanding requests are resolved as transport failures.
    pub fn wait_until_settled(&mut self) {
        while self.is_pending() {
            match self.runner.poll(POLL_INTERVAL) {
                Ok(Some(Inbound::Msg(msg))) => self.dispatch(msg),
                Ok(Some(Inbound::Artifact { filename, .. })) => {
                    sitemap_warn!("Unexpected artifact {} while waiting", filename);
                }
                Ok(None) => {}
                Err(err) => {
                    sitemap_warn!("Engine stopped with requests in flight: {}", err);
                    for workflow in [Workflow::Generation, Workflow::Validation] {
                        let in_flight = match workflow {
                            Workflow::Generation => self.state.generation().in_flight(),
                            Workflow::Validation => self.state.validation().in_flight(),
                        };
                        if let Some(request_id) = in_flight {
                            self.dispatch(effects::disconnected(workflow, request_id, &err));
                        }
                    }
                }
            }
        }
    }

    /// Fetches an artifact and stores it in the download directory.
    pub fn download(&mut self, kind: ArtifactKind, filename: &str) -> anyhow::Result<PathBuf> {
        self.runner.download(kind, filename)?;
        loop {
            let inbound = self
                .runner
                .poll(POLL_INTERVAL)
                .with_context(|| format!("waiting for {filename}"))?;
            match inbound {
                Some(Inbound::Artifact {
                    kind: got_kind,
                    filename: got_name,
                    result,
                }) if got_kind == kind && got_name == filename => {
                    let bytes = result.with_context(|| format!("downloading {filename}"))?;
                    let path = self
                        .store
                        .save(filename, &bytes)
                        .with_context(|| format!("saving {filename}"))?;
                    sitemap_info!("Saved {} bytes to {:?}", bytes.len(), path);
                    return Ok(path);
                }
                Some(Inbound::Artifact { filename, .. }) => {
                    sitemap_warn!("Ignoring unrequested artifact {}", filename);
                }
                Some(Inbound::Msg(msg)) => self.dispatch(msg),
                None => {}
            }
        }
    }

    /// Name of the artifact produced by the last successful run of `workflow`.
    pub fn artifact(&self, workflow: Workflow) -> Option<String> {
        let view = self.state.view();
        match workflow {
            Workflow::Generation => view.generation.artifact,
            Workflow::Validation => view.validation.artifact,
        }
    }

    pub fn any_failed(&self) -> bool {
        [Workflow::Generation, Workflow::Validation]
            .into_iter()
            .any(|workflow| self.state.workflow_state(workflow) == WorkflowState::Failed)
    }

    pub fn render(&self) -> Vec<String> {
        let slots = &self.state.config().slots;
        let mut lines = ui::render::render_alerts(&self.alerts);
        lines.extend(ui::render::render_generation(
            &self.page,
            &slots.generation,
            self.state.generation().state(),
            self.charts.handle(ChartKind::GenerationBar).instance(),
            &self.base_url,
        ));
        lines.extend(ui::render::render_validation(
            &self.page,
            &slots.validation,
            self.state.validation().state(),
            self.charts.handle(ChartKind::ValidationPie).instance(),
            &self.base_url,
        ));
        lines
    }
}
