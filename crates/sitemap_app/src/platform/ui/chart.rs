use sitemap_core::{ChartBackend, ChartKind, ChartSpec, SlotId};
use sitemap_logging::sitemap_debug;

const BAR_WIDTH: usize = 30;

/// A chart drawn as terminal lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChart {
    pub canvas: SlotId,
    pub lines: Vec<String>,
}

#[derive(Debug, Default)]
pub struct TextChartBackend {
    live: usize,
}

impl TextChartBackend {
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.live
    }
}

impl ChartBackend for TextChartBackend {
    type Instance = TextChart;

    fn create(&mut self, canvas: &SlotId, spec: &ChartSpec) -> TextChart {
        self.live += 1;
        sitemap_debug!("Drawing {:?} on {}", spec.kind, canvas);
        TextChart {
            canvas: canvas.clone(),
            lines: draw(spec),
        }
    }

    fn destroy(&mut self, instance: TextChart) {
        self.live = self.live.saturating_sub(1);
        sitemap_debug!("Disposed chart on {}", instance.canvas);
    }
}

fn draw(spec: &ChartSpec) -> Vec<String> {
    let mut lines = vec![format!("[{}] {}", spec.dataset_label, spec.title)];
    let rows = spec.labels.iter().zip(&spec.values).zip(&spec.fill);
    match spec.kind {
        ChartKind::GenerationBar => {
            let max = spec.values.iter().copied().fold(0.0, f64::max);
            for ((label, value), color) in rows {
                let fraction = if max > 0.0 { value / max } else { 0.0 };
                lines.push(format!(
                    "  {label:<16} {bar:<width$} {value} ({})",
                    color.css(),
                    bar = bar(fraction),
                    width = BAR_WIDTH
                ));
            }
        }
        ChartKind::ValidationPie => {
            let total: f64 = spec.values.iter().sum();
            for ((label, value), color) in rows {
                let share = if total > 0.0 { value / total } else { 0.0 };
                lines.push(format!(
                    "  {label:<16} {bar:<width$} {pct:>5.1}% ({})",
                    color.css(),
                    bar = bar(share),
                    pct = share * 100.0,
                    width = BAR_WIDTH
                ));
            }
        }
    }
    lines
}

fn bar(fraction: f64) -> String {
    let width = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(width)
}
