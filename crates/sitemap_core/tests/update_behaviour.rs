use std::sync::Once;

use pretty_assertions::assert_eq;
use serde_json::json;
use sitemap_core::render::{
    FULL_RESULTS_UNAVAILABLE, GENERATION_DEFAULT_ERROR, GENERATION_TRANSPORT_ERROR,
    VALIDATION_TRANSPORT_ALERT,
};
use sitemap_core::{
    update, AppState, ChartData, Effect, FormFields, GenerationResult, ListRow, Msg, PageModel,
    PageSlots, RequestId, ServiceRequest, TransportError, TransportErrorKind, ValidationResult,
    WorkflowState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sitemap_logging::initialize_for_tests);
}

struct Harness {
    state: AppState,
    page: PageModel,
    slots: PageSlots,
}

impl Harness {
    fn new() -> Self {
        init_logging();
        let state = AppState::default();
        let slots = state.config().slots.clone();
        Self {
            page: PageModel::new(&slots),
            state,
            slots,
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in &effects {
            if let Effect::Present(instructions) = effect {
                self.page.apply(instructions);
            }
        }
        effects
    }

    fn submit_generation(&mut self) -> RequestId {
        let effects = self.dispatch(Msg::GenerateSubmitted(FormFields::with_website_url(
            "https://example.com",
        )));
        single_send(&effects)
    }

    fn submit_validation(&mut self) -> RequestId {
        let effects = self.dispatch(Msg::ValidateSubmitted);
        single_send(&effects)
    }
}

fn single_send(effects: &[Effect]) -> RequestId {
    let sends: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Send { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .collect();
    assert_eq!(sends.len(), 1, "expected exactly one request, got {effects:?}");
    sends[0]
}

fn charts(effects: &[Effect]) -> Vec<ChartData> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::DrawChart(data) => Some(*data),
            _ => None,
        })
        .collect()
}

fn generation(value: serde_json::Value) -> GenerationResult {
    serde_json::from_value(value).unwrap()
}

fn validation(value: serde_json::Value) -> ValidationResult {
    serde_json::from_value(value).unwrap()
}

fn generation_success() -> GenerationResult {
    generation(json!({
        "status": "success",
        "total_urls": 42,
        "time_taken": 1.23,
        "saved_file": "sitemap_1.xml",
        "sample_urls": ["https://a.com", "https://b.com"],
    }))
}

fn validation_success() -> ValidationResult {
    validation(json!({
        "status": "success",
        "total_tested": 10,
        "successful": 7,
        "errors": 2,
        "redirects": 1,
        "time_taken": 3.5,
        "saved_file": "validation_report_comprehensive_sitemap.json",
        "sample_validated_urls": [
            {"url": "https://x.com", "status_text": "200 OK"},
            {"status_text": "…and 5 more"},
        ],
    }))
}

#[test]
fn submit_locks_trigger_and_sends_form() {
    let mut h = Harness::new();
    let effects = h.dispatch(Msg::GenerateSubmitted(FormFields::with_website_url(
        "https://example.com",
    )));
    let g = &h.slots.generation;

    assert_eq!(h.state.workflow_state(sitemap_core::Workflow::Generation), WorkflowState::Pending);
    assert!(!h.page.is_enabled(&g.trigger));
    assert!(h.page.is_visible(&g.loader));
    assert!(!h.page.is_visible(&g.results));
    assert!(!h.page.is_visible(&g.download));
    assert!(effects.contains(&Effect::Send {
        request_id: 1,
        request: ServiceRequest::Generate {
            form: FormFields::with_website_url("https://example.com"),
        },
    }));
}

#[test]
fn generation_success_renders_summary_and_chart() {
    let mut h = Harness::new();
    let request_id = h.submit_generation();
    let effects = h.dispatch(Msg::GenerationResolved {
        request_id,
        outcome: Ok(generation_success()),
    });
    let g = &h.slots.generation;

    assert_eq!(h.state.generation().state(), WorkflowState::Succeeded);
    assert_eq!(h.page.text(&g.status), "Success");
    assert_eq!(h.page.slot(&g.status).unwrap().class, "badge badge-success badge-pill");
    assert_eq!(h.page.text(&g.total_urls), "42");
    assert_eq!(h.page.text(&g.time_taken), "1.23");
    assert_eq!(h.page.text(&g.file_name), "sitemap_1.xml");
    assert_eq!(
        h.page.rows(&g.samples),
        &[
            ListRow::Text("https://a.com".to_string()),
            ListRow::Text("https://b.com".to_string()),
        ]
    );
    assert!(h.page.is_visible(&g.download));
    assert_eq!(
        h.page.slot(&g.download).unwrap().href.as_deref(),
        Some("/download_sitemap/sitemap_1.xml")
    );
    assert!(h.page.is_enabled(&g.trigger));
    assert!(!h.page.is_visible(&g.loader));
    assert_eq!(
        charts(&effects),
        vec![ChartData::GenerationBar {
            total_urls: 42,
            time_taken: 1.23
        }]
    );
    assert_eq!(h.state.view().generation.artifact.as_deref(), Some("sitemap_1.xml"));
}

#[test]
fn generation_service_error_blanks_previous_run() {
    let mut h = Harness::new();
    let first = h.submit_generation();
    h.dispatch(Msg::GenerationResolved {
        request_id: first,
        outcome: Ok(generation_success()),
    });

    let second = h.submit_generation();
    assert_ne!(first, second);
    let effects = h.dispatch(Msg::GenerationResolved {
        request_id: second,
        outcome: Ok(generation(json!({"status": "error", "error": "Invalid domain"}))),
    });
    let g = &h.slots.generation;

    assert_eq!(h.state.generation().state(), WorkflowState::Failed);
    assert_eq!(h.page.text(&g.status), "Error");
    assert_eq!(h.page.slot(&g.status).unwrap().class, "badge badge-danger badge-pill");
    assert_eq!(h.page.text(&g.error_message), "Invalid domain");
    assert!(h.page.is_visible(&g.error_message));
    assert_eq!(h.page.text(&g.total_urls), "");
    assert_eq!(h.page.text(&g.time_taken), "");
    assert_eq!(h.page.text(&g.file_name), "");
    assert!(h.page.rows(&g.samples).is_empty());
    assert!(!h.page.is_visible(&g.download));
    assert!(charts(&effects).is_empty());
    assert!(h.page.is_enabled(&g.trigger));
    assert!(!h.page.is_visible(&g.loader));
}

#[test]
fn generation_error_without_detail_uses_default_message() {
    let mut h = Harness::new();
    let request_id = h.submit_generation();
    h.dispatch(Msg::GenerationResolved {
        request_id,
        outcome: Ok(generation(json!({"status": "error"}))),
    });

    assert_eq!(h.page.text(&h.slots.generation.error_message), GENERATION_DEFAULT_ERROR);
}

#[test]
fn generation_transport_error_is_shown_inline() {
    let mut h = Harness::new();
    let request_id = h.submit_generation();
    let effects = h.dispatch(Msg::GenerationResolved {
        request_id,
        outcome: Err(TransportError::new(TransportErrorKind::Network, "connection refused")),
    });
    let g = &h.slots.generation;

    assert_eq!(h.state.generation().state(), WorkflowState::Failed);
    assert_eq!(h.page.text(&g.error_message), GENERATION_TRANSPORT_ERROR);
    assert!(h.page.is_visible(&g.results));
    assert!(h.page.alerts().is_empty());
    assert!(charts(&effects).is_empty());
    assert!(h.page.is_enabled(&g.trigger));
    assert!(!h.page.is_visible(&g.loader));
    assert!(h
        .state
        .view()
        .generation
        .last_error
        .unwrap()
        .contains("connection refused"));
}

#[test]
fn resubmitting_while_pending_sends_nothing() {
    let mut h = Harness::new();
    let first = h.submit_generation();

    let effects = h.dispatch(Msg::GenerateSubmitted(FormFields::with_website_url(
        "https://other.example.com",
    )));
    assert!(effects.is_empty());
    assert_eq!(h.state.generation().in_flight(), Some(first));

    // The other workflow is independent.
    let validation_id = h.submit_validation();
    assert_ne!(validation_id, first);
    assert!(h.dispatch(Msg::ValidateSubmitted).is_empty());
}

#[test]
fn resolution_for_unknown_request_is_dropped() {
    let mut h = Harness::new();
    let request_id = h.submit_generation();

    let effects = h.dispatch(Msg::GenerationResolved {
        request_id: request_id + 100,
        outcome: Ok(generation_success()),
    });

    assert!(effects.is_empty());
    assert_eq!(h.state.generation().state(), WorkflowState::Pending);
    assert!(!h.page.is_enabled(&h.slots.generation.trigger));
}

#[test]
fn zero_count_success_is_not_an_error() {
    let mut h = Harness::new();
    let request_id = h.submit_generation();
    let effects = h.dispatch(Msg::GenerationResolved {
        request_id,
        outcome: Ok(generation(json!({
            "status": "success",
            "total_urls": 0,
            "time_taken": 0.1,
            "saved_file": "empty.xml",
            "sample_urls": [],
        }))),
    });

    assert_eq!(h.state.generation().state(), WorkflowState::Succeeded);
    assert_eq!(h.page.text(&h.slots.generation.total_urls), "0");
    assert_eq!(charts(&effects).len(), 1);
}

#[test]
fn validation_success_renders_links_and_summary_rows() {
    let mut h = Harness::new();
    let request_id = h.submit_validation();
    let effects = h.dispatch(Msg::ValidationResolved {
        request_id,
        outcome: Ok(validation_success()),
    });
    let v = &h.slots.validation;

    assert_eq!(h.state.validation().state(), WorkflowState::Succeeded);
    assert_eq!(h.page.text(&v.total_tested), "10");
    assert_eq!(h.page.text(&v.successful), "7");
    assert_eq!(h.page.text(&v.errors), "2");
    assert_eq!(h.page.text(&v.redirects), "1");
    assert_eq!(
        h.page.rows(&v.samples),
        &[
            ListRow::Link {
                href: "https://x.com".to_string(),
                text: "https://x.com - 200 OK".to_string(),
            },
            ListRow::Text("…and 5 more".to_string()),
        ]
    );
    assert!(h.page.is_visible(&v.show_all));
    assert_eq!(
        h.page.slot(&v.download).unwrap().href.as_deref(),
        Some("/download_validation_report/validation_report_comprehensive_sitemap.json")
    );
    assert!(h.page.is_visible(&v.results));
    assert!(h.page.is_enabled(&v.trigger));
    assert!(!h.page.is_visible(&v.loader));
    assert_eq!(
        charts(&effects),
        vec![ChartData::ValidationPie {
            successful: 7,
            errors: 2,
            redirects: 1
        }]
    );
}

#[test]
fn validation_payload_without_status_is_success() {
    let mut h = Harness::new();
    let request_id = h.submit_validation();
    h.dispatch(Msg::ValidationResolved {
        request_id,
        outcome: Ok(validation(json!({
            "total_tested": 3,
            "successful": 3,
            "errors": 0,
            "redirects": 0,
            "time_taken": 0.4,
            "saved_file": "comprehensive_sitemap.xml",
            "sample_validated_urls": [],
        }))),
    });

    assert_eq!(h.state.validation().state(), WorkflowState::Succeeded);
    assert_eq!(h.page.text(&h.slots.validation.total_tested), "3");
}

#[test]
fn validation_transport_error_alerts_without_stale_counts() {
    let mut h = Harness::new();
    let first = h.submit_validation();
    h.dispatch(Msg::ValidationResolved {
        request_id: first,
        outcome: Ok(validation_success()),
    });

    let second = h.submit_validation();
    let effects = h.dispatch(Msg::ValidationResolved {
        request_id: second,
        outcome: Err(TransportError::new(TransportErrorKind::Decode, "expected value")),
    });
    let v = &h.slots.validation;

    assert_eq!(h.state.validation().state(), WorkflowState::Failed);
    assert_eq!(h.page.alerts(), &[VALIDATION_TRANSPORT_ALERT.to_string()]);
    assert!(!h.page.is_visible(&v.results));
    assert_eq!(h.page.text(&v.total_tested), "");
    assert_eq!(h.page.text(&v.successful), "");
    assert!(h.page.rows(&v.samples).is_empty());
    assert!(!h.page.is_visible(&v.download));
    assert!(!h.page.is_visible(&v.show_all));
    assert!(charts(&effects).is_empty());
    assert!(h.page.is_enabled(&v.trigger));
}

#[test]
fn validation_service_error_is_an_alert() {
    let mut h = Harness::new();
    let request_id = h.submit_validation();
    let missing = "Sitemap file 'comprehensive_sitemap.xml' not found. Please generate it first.";
    h.dispatch(Msg::ValidationResolved {
        request_id,
        outcome: Ok(validation(json!({"status": "error", "error": missing}))),
    });

    assert_eq!(h.page.alerts(), &[format!("Validation Error: {missing}")]);
    assert!(!h.page.is_visible(&h.slots.validation.results));
    assert_eq!(h.state.validation().state(), WorkflowState::Failed);
}

#[test]
fn show_all_lists_every_validated_url() {
    let mut h = Harness::new();
    h.dispatch(Msg::ShowAllValidationRequested);
    assert_eq!(h.page.take_alerts(), vec![FULL_RESULTS_UNAVAILABLE.to_string()]);

    let mut result = validation_success();
    result.full_validated_urls = serde_json::from_value(json!([
        {
            "url": "https://x.com",
            "status_text": "200 OK",
            "status_code": 200,
            "accessible": true,
            "redirect": false,
        },
        {
            "url": "https://x.com/old",
            "status_text": "301 OK (Redirect)",
            "status_code": 301,
            "accessible": true,
            "redirect": true,
        },
    ]))
    .unwrap();
    let request_id = h.submit_validation();
    h.dispatch(Msg::ValidationResolved {
        request_id,
        outcome: Ok(result),
    });
    h.dispatch(Msg::ShowAllValidationRequested);

    let rows = h.page.rows(&h.slots.validation.full_results);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(ListRow::is_link));
    assert_eq!(rows[1].text(), "https://x.com/old - 301 OK (Redirect)");
}

#[test]
fn generation_with_unrecognized_status_shows_service_error() {
    let mut h = Harness::new();
    let request_id = h.submit_generation();
    let effects = h.dispatch(Msg::GenerationResolved {
        request_id,
        outcome: Ok(generation(json!({"status": "failed", "error": "Boom"}))),
    });
    let g = &h.slots.generation;

    assert_eq!(h.state.generation().state(), WorkflowState::Failed);
    assert_eq!(h.page.text(&g.status), "Error");
    assert_eq!(h.page.text(&g.error_message), "Boom");
    assert!(h.page.is_visible(&g.error_message));
    assert!(charts(&effects).is_empty());
}

#[test]
fn validation_with_unrecognized_status_renders_results() {
    let mut h = Harness::new();
    let request_id = h.submit_validation();
    let effects = h.dispatch(Msg::ValidationResolved {
        request_id,
        outcome: Ok(validation(json!({
            "status": "partial",
            "total_tested": 3,
            "successful": 2,
            "errors": 1,
            "redirects": 0,
            "saved_file": "validation_report.json",
        }))),
    });
    let v = &h.slots.validation;

    assert_eq!(h.state.validation().state(), WorkflowState::Succeeded);
    assert!(h.page.alerts().is_empty());
    assert!(h.page.is_visible(&v.results));
    assert_eq!(h.page.text(&v.total_tested), "3");
    assert_eq!(charts(&effects).len(), 1);
}
