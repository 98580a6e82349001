//! Chart adapter: one live drawing instance per canvas.
//!
//! The drawing library is reached only through [`ChartBackend`]. A new draw
//! always destroys the previous instance of the same canvas first.

use crate::SlotId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    GenerationBar,
    ValidationPie,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartData {
    GenerationBar { total_urls: u64, time_taken: f64 },
    ValidationPie {
        successful: u64,
        errors: u64,
        redirects: u64,
    },
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::GenerationBar { .. } => ChartKind::GenerationBar,
            ChartData::ValidationPie { .. } => ChartKind::ValidationPie,
        }
    }
}

/// Color with alpha in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub fn css(self) -> String {
        let Rgba(r, g, b, alpha) = self;
        format!("rgba({r}, {g}, {b}, {})", f64::from(alpha) / 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub dataset_label: &'static str,
    pub labels: Vec<&'static str>,
    pub values: Vec<f64>,
    pub fill: Vec<Rgba>,
    pub border: Vec<Rgba>,
}

impl ChartSpec {
    pub fn from_data(data: &ChartData) -> Self {
        match *data {
            ChartData::GenerationBar {
                total_urls,
                time_taken,
            } => Self {
                kind: ChartKind::GenerationBar,
                title: "Sitemap Generation Overview",
                dataset_label: "Sitemap Generation Metrics",
                labels: vec!["Total URLs", "Time Taken (s)"],
                values: vec![total_urls as f64, time_taken],
                fill: vec![Rgba(75, 192, 192, 60), Rgba(153, 102, 255, 60)],
                border: vec![Rgba(75, 192, 192, 100), Rgba(153, 102, 255, 100)],
            },
            ChartData::ValidationPie {
                successful,
                errors,
                redirects,
            } => Self {
                kind: ChartKind::ValidationPie,
                title: "Sitemap Validation Breakdown",
                dataset_label: "Validation Status",
                labels: vec!["Successful", "Errors", "Redirects"],
                values: vec![successful as f64, errors as f64, redirects as f64],
                fill: vec![
                    Rgba(40, 167, 69, 60),
                    Rgba(220, 53, 69, 60),
                    Rgba(255, 193, 7, 60),
                ],
                border: vec![
                    Rgba(40, 167, 69, 100),
                    Rgba(220, 53, 69, 100),
                    Rgba(255, 193, 7, 100),
                ],
            },
        }
    }
}

/// Draw contract of the charting library.
pub trait ChartBackend {
    type Instance;

    fn create(&mut self, canvas: &SlotId, spec: &ChartSpec) -> Self::Instance;
    fn destroy(&mut self, instance: Self::Instance);
}

/// Arena of one: the canvas binding plus its live instance, if any.
#[derive(Debug)]
pub struct ChartHandle<I> {
    canvas: SlotId,
    live: Option<I>,
}

impl<I> ChartHandle<I> {
    pub fn new(canvas: SlotId) -> Self {
        Self { canvas, live: None }
    }

    pub fn canvas(&self) -> &SlotId {
        &self.canvas
    }

    pub fn instance(&self) -> Option<&I> {
        self.live.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    fn replace<B>(&mut self, backend: &mut B, spec: &ChartSpec)
    where
        B: ChartBackend<Instance = I>,
    {
        self.dispose(backend);
        self.live = Some(backend.create(&self.canvas, spec));
    }

    fn dispose<B>(&mut self, backend: &mut B)
    where
        B: ChartBackend<Instance = I>,
    {
        if let Some(previous) = self.live.take() {
            backend.destroy(previous);
        }
    }
}

pub struct ChartAdapter<B: ChartBackend> {
    backend: B,
    generation: ChartHandle<B::Instance>,
    validation: ChartHandle<B::Instance>,
}

impl<B: ChartBackend> ChartAdapter<B> {
    pub fn new(backend: B, generation_canvas: SlotId, validation_canvas: SlotId) -> Self {
        Self {
            backend,
            generation: ChartHandle::new(generation_canvas),
            validation: ChartHandle::new(validation_canvas),
        }
    }

    /// Replaces the chart of `data`'s kind. The other chart is untouched.
    pub fn draw(&mut self, data: &ChartData) {
        let spec = ChartSpec::from_data(data);
        let Self {
            backend,
            generation,
            validation,
        } = self;
        match data.kind() {
            ChartKind::GenerationBar => generation.replace(backend, &spec),
            ChartKind::ValidationPie => validation.replace(backend, &spec),
        }
    }

    pub fn reset(&mut self, kind: ChartKind) {
        let Self {
            backend,
            generation,
            validation,
        } = self;
        match kind {
            ChartKind::GenerationBar => generation.dispose(backend),
            ChartKind::ValidationPie => validation.dispose(backend),
        }
    }

    pub fn handle(&self, kind: ChartKind) -> &ChartHandle<B::Instance> {
        match kind {
            ChartKind::GenerationBar => &self.generation,
            ChartKind::ValidationPie => &self.validation,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend> Drop for ChartAdapter<B> {
    fn drop(&mut self) {
        self.reset(ChartKind::GenerationBar);
        self.reset(ChartKind::ValidationPie);
    }
}
