use std::collections::BTreeMap;

use crate::render::{DisplayInstructions, DisplayOp, ListRow};
use crate::state::WorkflowSlot;
use crate::{PageSlots, RequestId, SlotId, WorkflowState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub generation: WorkflowView,
    pub validation: WorkflowView,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowView {
    pub state: WorkflowState,
    pub in_flight: Option<RequestId>,
    pub last_error: Option<String>,
    pub artifact: Option<String>,
}

impl WorkflowView {
    pub(crate) fn from_slot<R>(slot: &WorkflowSlot<R>, artifact: impl Fn(&R) -> String) -> Self {
        Self {
            state: slot.state(),
            in_flight: slot.in_flight(),
            last_error: slot.last_error().map(ToString::to_string),
            artifact: slot
                .last_result()
                .map(artifact)
                .filter(|name| !name.is_empty()),
        }
    }
}

/// Presentation state of one output slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub text: String,
    pub class: String,
    pub visible: bool,
    pub enabled: bool,
    pub href: Option<String>,
    pub rows: Vec<ListRow>,
}

impl Default for SlotView {
    fn default() -> Self {
        Self {
            text: String::new(),
            class: String::new(),
            visible: true,
            enabled: true,
            href: None,
            rows: Vec::new(),
        }
    }
}

/// In-memory page the display instructions are applied to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageModel {
    slots: BTreeMap<SlotId, SlotView>,
    alerts: Vec<String>,
}

impl PageModel {
    /// Page in its initial state: panels, loaders and affordances hidden.
    pub fn new(slots: &PageSlots) -> Self {
        let mut page = Self::default();
        let generation = &slots.generation;
        let validation = &slots.validation;
        for hidden in [
            &generation.loader,
            &generation.results,
            &generation.error_message,
            &generation.download,
            &validation.loader,
            &validation.results,
            &validation.show_all,
            &validation.download,
        ] {
            page.slot_mut(hidden).visible = false;
        }
        page
    }

    pub fn apply(&mut self, instructions: &DisplayInstructions) {
        for op in instructions.ops() {
            self.apply_op(op);
        }
    }

    pub fn slot(&self, id: &SlotId) -> Option<&SlotView> {
        self.slots.get(id)
    }

    /// Text of a slot; empty when it was never written.
    pub fn text(&self, id: &SlotId) -> &str {
        self.slots.get(id).map_or("", |slot| slot.text.as_str())
    }

    pub fn is_visible(&self, id: &SlotId) -> bool {
        self.slots.get(id).map_or(true, |slot| slot.visible)
    }

    pub fn is_enabled(&self, id: &SlotId) -> bool {
        self.slots.get(id).map_or(true, |slot| slot.enabled)
    }

    pub fn rows(&self, id: &SlotId) -> &[ListRow] {
        self.slots.get(id).map_or(&[], |slot| slot.rows.as_slice())
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn slot_mut(&mut self, id: &SlotId) -> &mut SlotView {
        self.slots.entry(id.clone()).or_default()
    }

    fn apply_op(&mut self, op: &DisplayOp) {
        match op {
            DisplayOp::SetText { slot, text } => self.slot_mut(slot).text = text.clone(),
            DisplayOp::SetClass { slot, class } => self.slot_mut(slot).class = class.clone(),
            DisplayOp::SetVisible { slot, visible } => self.slot_mut(slot).visible = *visible,
            DisplayOp::SetEnabled { slot, enabled } => self.slot_mut(slot).enabled = *enabled,
            DisplayOp::SetHref { slot, href } => {
                self.slot_mut(slot).href = Some(href.clone()).filter(|href| !href.is_empty());
            }
            DisplayOp::ReplaceList { slot, rows } => self.slot_mut(slot).rows = rows.clone(),
            DisplayOp::Alert(message) => self.alerts.push(message.clone()),
        }
    }
}
