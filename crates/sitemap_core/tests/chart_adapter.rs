use sitemap_core::{ChartAdapter, ChartBackend, ChartData, ChartKind, ChartSpec, SlotId};

#[derive(Default)]
struct RecordingBackend {
    next_id: u32,
    live: Vec<(u32, SlotId)>,
    destroyed: Vec<u32>,
    specs: Vec<ChartSpec>,
}

impl ChartBackend for RecordingBackend {
    type Instance = u32;

    fn create(&mut self, canvas: &SlotId, spec: &ChartSpec) -> u32 {
        self.next_id += 1;
        self.live.push((self.next_id, canvas.clone()));
        self.specs.push(spec.clone());
        self.next_id
    }

    fn destroy(&mut self, instance: u32) {
        self.live.retain(|(id, _)| *id != instance);
        self.destroyed.push(instance);
    }
}

fn adapter() -> ChartAdapter<RecordingBackend> {
    ChartAdapter::new(
        RecordingBackend::default(),
        SlotId::new("generationChart"),
        SlotId::new("validationChart"),
    )
}

fn bar(total_urls: u64) -> ChartData {
    ChartData::GenerationBar {
        total_urls,
        time_taken: 1.5,
    }
}

#[test]
fn redraw_disposes_previous_instance() {
    let mut charts = adapter();
    charts.draw(&bar(10));
    charts.draw(&bar(20));

    let backend = charts.backend();
    assert_eq!(backend.destroyed, vec![1]);
    assert_eq!(backend.live, vec![(2, SlotId::new("generationChart"))]);
    assert_eq!(charts.handle(ChartKind::GenerationBar).instance(), Some(&2));
}

#[test]
fn charts_are_independent() {
    let mut charts = adapter();
    charts.draw(&bar(10));
    charts.draw(&ChartData::ValidationPie {
        successful: 7,
        errors: 2,
        redirects: 1,
    });
    charts.draw(&bar(11));

    let backend = charts.backend();
    assert_eq!(backend.destroyed, vec![1]);
    assert_eq!(backend.live.len(), 2);
    assert!(charts.handle(ChartKind::ValidationPie).is_live());
    assert_eq!(
        charts.handle(ChartKind::ValidationPie).canvas(),
        &SlotId::new("validationChart")
    );
}

#[test]
fn reset_disposes_without_redraw() {
    let mut charts = adapter();
    charts.draw(&bar(3));
    charts.reset(ChartKind::GenerationBar);
    charts.reset(ChartKind::GenerationBar);

    assert!(!charts.handle(ChartKind::GenerationBar).is_live());
    assert_eq!(charts.backend().destroyed, vec![1]);
    assert!(charts.backend().live.is_empty());
}

#[test]
fn specs_carry_series_and_labels() {
    let mut charts = adapter();
    charts.draw(&bar(42));
    charts.draw(&ChartData::ValidationPie {
        successful: 7,
        errors: 2,
        redirects: 1,
    });

    let specs = &charts.backend().specs;
    assert_eq!(specs[0].labels, vec!["Total URLs", "Time Taken (s)"]);
    assert_eq!(specs[0].values, vec![42.0, 1.5]);
    assert_eq!(specs[1].kind, ChartKind::ValidationPie);
    assert_eq!(specs[1].values, vec![7.0, 2.0, 1.0]);
    assert_eq!(specs[1].fill.len(), 3);
}
