use sitemap_core::{GenerationSlots, ListRow, PageModel, SlotId, ValidationSlots, WorkflowState};

use super::chart::TextChart;

pub fn render_generation(
    page: &PageModel,
    slots: &GenerationSlots,
    state: WorkflowState,
    chart: Option<&TextChart>,
    base_url: &str,
) -> Vec<String> {
    let mut lines = vec![header("Generate sitemap", state, page.is_visible(&slots.loader))];
    if !page.is_visible(&slots.results) {
        return lines;
    }

    lines.push(format!("Status: {}", page.text(&slots.status)));
    if page.is_visible(&slots.error_message) {
        lines.push(format!("Error: {}", page.text(&slots.error_message)));
    }
    push_field(&mut lines, page, "Total URLs", &slots.total_urls);
    push_field(&mut lines, page, "Time taken (s)", &slots.time_taken);
    push_field(&mut lines, page, "Saved file", &slots.file_name);
    push_rows(&mut lines, "Sample URLs", page.rows(&slots.samples));
    push_link(&mut lines, page, "Download sitemap", &slots.download, base_url);
    push_chart(&mut lines, chart);
    lines
}

pub fn render_validation(
    page: &PageModel,
    slots: &ValidationSlots,
    state: WorkflowState,
    chart: Option<&TextChart>,
    base_url: &str,
) -> Vec<String> {
    let mut lines = vec![header("Validate sitemap", state, page.is_visible(&slots.loader))];
    if page.is_visible(&slots.results) {
        push_field(&mut lines, page, "Total tested", &slots.total_tested);
        push_field(&mut lines, page, "Successful", &slots.successful);
        push_field(&mut lines, page, "Errors", &slots.errors);
        push_field(&mut lines, page, "Redirects", &slots.redirects);
        push_field(&mut lines, page, "Time taken (s)", &slots.time_taken);
        push_field(&mut lines, page, "Saved file", &slots.file_name);
        push_rows(&mut lines, "Sample results", page.rows(&slots.samples));
        push_link(&mut lines, page, "All results", &slots.show_all, base_url);
        push_link(&mut lines, page, "Download report", &slots.download, base_url);
        push_chart(&mut lines, chart);
    }
    // Shown on request, independent of the summary panel.
    push_rows(&mut lines, "All validated URLs", page.rows(&slots.full_results));
    lines
}

pub fn render_alerts(alerts: &[String]) -> Vec<String> {
    alerts.iter().map(|alert| format!("!! {alert}")).collect()
}

fn header(title: &str, state: WorkflowState, loading: bool) -> String {
    let state_label = match state {
        WorkflowState::Idle => "Idle",
        WorkflowState::Pending => "Pending",
        WorkflowState::Succeeded => "Succeeded",
        WorkflowState::Failed => "Failed",
    };
    if loading {
        format!("== {title} [{state_label}] (working...)")
    } else {
        format!("== {title} [{state_label}]")
    }
}

fn push_field(lines: &mut Vec<String>, page: &PageModel, label: &str, slot: &SlotId) {
    lines.push(format!("{label}: {}", page.text(slot)));
}

fn push_rows(lines: &mut Vec<String>, label: &str, rows: &[ListRow]) {
    if rows.is_empty() {
        return;
    }
    lines.push(format!("{label}:"));
    for row in rows {
        match row {
            ListRow::Link { text, .. } => lines.push(format!("  > {text}")),
            ListRow::Text(text) => lines.push(format!("    {text}")),
        }
    }
}

fn push_link(
    lines: &mut Vec<String>,
    page: &PageModel,
    label: &str,
    slot: &SlotId,
    base_url: &str,
) {
    if !page.is_visible(slot) {
        return;
    }
    if let Some(href) = page.slot(slot).and_then(|view| view.href.as_deref()) {
        lines.push(format!("{label}: {}{href}", base_url.trim_end_matches('/')));
    }
}

fn push_chart(lines: &mut Vec<String>, chart: Option<&TextChart>) {
    if let Some(chart) = chart {
        lines.extend(chart.lines.iter().cloned());
    }
}
