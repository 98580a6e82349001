//! View renderer: maps result payloads to presentation mutations.
//!
//! Everything here is pure. The same payload always yields the same
//! instructions, so callers may re-render freely.

use crate::routes::{download_path, ArtifactKind, FULL_VALIDATION_RESULTS};
use crate::{
    GenerationResult, GenerationSlots, SampleRow, SlotId, ValidatedUrl, ValidationResult,
    ValidationSlots,
};

pub const GENERATION_DEFAULT_ERROR: &str =
    "An unknown error occurred during sitemap generation.";
pub const GENERATION_TRANSPORT_ERROR: &str = "Network error or server issue. Please try again.";
pub const VALIDATION_DEFAULT_ERROR: &str =
    "An unknown error occurred during sitemap validation.";
pub const VALIDATION_TRANSPORT_ALERT: &str =
    "Failed to validate sitemap. Please check the log for details.";
pub const FULL_RESULTS_UNAVAILABLE: &str =
    "Full validation results are not available for the last run.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    Text(String),
    Link { href: String, text: String },
}

impl ListRow {
    pub fn is_link(&self) -> bool {
        matches!(self, ListRow::Link { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            ListRow::Text(text) | ListRow::Link { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    SetText { slot: SlotId, text: String },
    SetClass { slot: SlotId, class: String },
    SetVisible { slot: SlotId, visible: bool },
    SetEnabled { slot: SlotId, enabled: bool },
    SetHref { slot: SlotId, href: String },
    ReplaceList { slot: SlotId, rows: Vec<ListRow> },
    /// Blocking notice shown on top of the page.
    Alert(String),
}

/// Ordered list of presentation mutations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayInstructions {
    ops: Vec<DisplayOp>,
}

impl DisplayInstructions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, slot: &SlotId, text: impl Into<String>) -> &mut Self {
        self.push(DisplayOp::SetText {
            slot: slot.clone(),
            text: text.into(),
        })
    }

    pub fn class(&mut self, slot: &SlotId, class: impl Into<String>) -> &mut Self {
        self.push(DisplayOp::SetClass {
            slot: slot.clone(),
            class: class.into(),
        })
    }

    pub fn visible(&mut self, slot: &SlotId, visible: bool) -> &mut Self {
        self.push(DisplayOp::SetVisible {
            slot: slot.clone(),
            visible,
        })
    }

    pub fn enabled(&mut self, slot: &SlotId, enabled: bool) -> &mut Self {
        self.push(DisplayOp::SetEnabled {
            slot: slot.clone(),
            enabled,
        })
    }

    pub fn href(&mut self, slot: &SlotId, href: impl Into<String>) -> &mut Self {
        self.push(DisplayOp::SetHref {
            slot: slot.clone(),
            href: href.into(),
        })
    }

    pub fn list(&mut self, slot: &SlotId, rows: Vec<ListRow>) -> &mut Self {
        self.push(DisplayOp::ReplaceList {
            slot: slot.clone(),
            rows,
        })
    }

    pub fn alert(&mut self, message: impl Into<String>) -> &mut Self {
        self.push(DisplayOp::Alert(message.into()))
    }

    pub fn extend(&mut self, other: DisplayInstructions) -> &mut Self {
        self.ops.extend(other.ops);
        self
    }

    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Rows of the last list written to `slot`, if any.
    pub fn rows_for(&self, slot: &SlotId) -> Option<&[ListRow]> {
        self.ops.iter().rev().find_map(|op| match op {
            DisplayOp::ReplaceList { slot: target, rows } if target == slot => {
                Some(rows.as_slice())
            }
            _ => None,
        })
    }

    fn push(&mut self, op: DisplayOp) -> &mut Self {
        self.ops.push(op);
        self
    }
}

impl IntoIterator for DisplayInstructions {
    type Item = DisplayOp;
    type IntoIter = std::vec::IntoIter<DisplayOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Success,
    Error,
}

impl Badge {
    pub fn text(self) -> &'static str {
        match self {
            Badge::Success => "Success",
            Badge::Error => "Error",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Badge::Success => "badge badge-success badge-pill",
            Badge::Error => "badge badge-danger badge-pill",
        }
    }
}

/// Instructions run on `submit`: lock the trigger and wipe the previous run.
pub fn pending_generation(slots: &GenerationSlots) -> DisplayInstructions {
    let mut out = DisplayInstructions::new();
    out.enabled(&slots.trigger, false)
        .visible(&slots.loader, true)
        .visible(&slots.results, false)
        .text(&slots.status, "")
        .visible(&slots.error_message, false)
        .text(&slots.error_message, "")
        .visible(&slots.download, false)
        .href(&slots.download, "");
    clear_generation_fields(&mut out, slots);
    out
}

pub fn pending_validation(slots: &ValidationSlots) -> DisplayInstructions {
    let mut out = DisplayInstructions::new();
    out.enabled(&slots.trigger, false)
        .visible(&slots.loader, true)
        .visible(&slots.results, false)
        .visible(&slots.show_all, false)
        .visible(&slots.download, false)
        .href(&slots.download, "")
        .list(&slots.full_results, Vec::new());
    clear_validation_fields(&mut out, slots);
    out
}

/// Runs on every resolution path once the request has been accepted.
pub fn settle(trigger: &SlotId, loader: &SlotId) -> DisplayInstructions {
    let mut out = DisplayInstructions::new();
    out.enabled(trigger, true).visible(loader, false);
    out
}

/// Renders a generation payload, success or service error.
pub fn render_generation(
    result: &GenerationResult,
    slots: &GenerationSlots,
    sample_cap: usize,
) -> DisplayInstructions {
    if !result.is_success() {
        let message = result
            .error
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or(GENERATION_DEFAULT_ERROR);
        return generation_failure(slots, message);
    }

    let mut out = DisplayInstructions::new();
    out.text(&slots.status, Badge::Success.text())
        .class(&slots.status, Badge::Success.class())
        .text(&slots.total_urls, result.total_urls.to_string())
        .text(&slots.time_taken, result.time_taken.to_string())
        .text(&slots.file_name, result.saved_file.as_str())
        .list(
            &slots.samples,
            generation_rows(&result.sample_urls, sample_cap),
        )
        .href(
            &slots.download,
            download_path(ArtifactKind::Sitemap, &result.saved_file),
        )
        .visible(&slots.download, true)
        .visible(&slots.results, true);
    out
}

/// Inline connectivity failure for generation.
pub fn render_generation_transport_failure(slots: &GenerationSlots) -> DisplayInstructions {
    generation_failure(slots, GENERATION_TRANSPORT_ERROR)
}

/// Renders a validation payload. Service errors become a blocking alert and
/// keep the results panel hidden.
pub fn render_validation(
    result: &ValidationResult,
    slots: &ValidationSlots,
    sample_cap: usize,
) -> DisplayInstructions {
    let mut out = DisplayInstructions::new();
    if !result.is_success() {
        let message = result
            .error
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or(VALIDATION_DEFAULT_ERROR);
        out.alert(format!("Validation Error: {message}"))
            .visible(&slots.results, false);
        clear_validation_fields(&mut out, slots);
        return out;
    }

    out.text(&slots.total_tested, result.total_tested.to_string())
        .text(&slots.successful, result.successful.to_string())
        .text(&slots.errors, result.errors.to_string())
        .text(&slots.redirects, result.redirects.to_string())
        .text(&slots.time_taken, result.time_taken.to_string())
        .text(&slots.file_name, result.saved_file.as_str())
        .list(
            &slots.samples,
            validation_rows(&result.sample_validated_urls, sample_cap),
        )
        .href(&slots.show_all, FULL_VALIDATION_RESULTS)
        .visible(&slots.show_all, true)
        .href(
            &slots.download,
            download_path(ArtifactKind::ValidationReport, &result.saved_file),
        )
        .visible(&slots.download, true)
        .visible(&slots.results, true);
    out
}

pub fn render_validation_transport_failure(slots: &ValidationSlots) -> DisplayInstructions {
    let mut out = DisplayInstructions::new();
    out.alert(VALIDATION_TRANSPORT_ALERT)
        .visible(&slots.results, false);
    clear_validation_fields(&mut out, slots);
    out
}

/// Lists every validated URL of the last run into the full-results slot.
pub fn render_full_validation(
    rows: &[ValidatedUrl],
    slots: &ValidationSlots,
) -> DisplayInstructions {
    let mut out = DisplayInstructions::new();
    if rows.is_empty() {
        out.alert(FULL_RESULTS_UNAVAILABLE);
        return out;
    }
    let rows = rows
        .iter()
        .map(|row| ListRow::Link {
            href: row.url.clone(),
            text: format!("{} - {}", row.url, row.status_text),
        })
        .collect();
    out.list(&slots.full_results, rows);
    out
}

pub fn generation_rows(sample_urls: &[String], cap: usize) -> Vec<ListRow> {
    sample_urls
        .iter()
        .take(cap)
        .map(|url| ListRow::Text(url.clone()))
        .collect()
}

/// A row becomes a link exactly when it carries a url.
pub fn validation_rows(rows: &[SampleRow], cap: usize) -> Vec<ListRow> {
    rows.iter()
        .take(cap)
        .map(|row| match row.url.as_deref() {
            Some(url) if row.has_url() => ListRow::Link {
                href: url.to_string(),
                text: format!("{} - {}", url, row.status_text),
            },
            _ => ListRow::Text(row.status_text.clone()),
        })
        .collect()
}

fn generation_failure(slots: &GenerationSlots, message: &str) -> DisplayInstructions {
    let mut out = DisplayInstructions::new();
    out.text(&slots.status, Badge::Error.text())
        .class(&slots.status, Badge::Error.class())
        .text(&slots.error_message, message)
        .visible(&slots.error_message, true);
    clear_generation_fields(&mut out, slots);
    out.visible(&slots.results, true);
    out
}

fn clear_generation_fields(out: &mut DisplayInstructions, slots: &GenerationSlots) {
    out.text(&slots.total_urls, "")
        .text(&slots.time_taken, "")
        .text(&slots.file_name, "")
        .list(&slots.samples, Vec::new());
}

fn clear_validation_fields(out: &mut DisplayInstructions, slots: &ValidationSlots) {
    out.text(&slots.total_tested, "")
        .text(&slots.successful, "")
        .text(&slots.errors, "")
        .text(&slots.redirects, "")
        .text(&slots.time_taken, "")
        .text(&slots.file_name, "")
        .list(&slots.samples, Vec::new());
}
