use crate::render::{self, DisplayInstructions};
use crate::{
    AppState, ChartData, Effect, FormFields, GenerationResult, Msg, RequestId, ServiceRequest,
    TransportError, ValidationResult, Workflow, WorkflowError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::GenerateSubmitted(form) => submit_generation(&mut state, form),
        Msg::ValidateSubmitted => submit_validation(&mut state),
        Msg::GenerationResolved {
            request_id,
            outcome,
        } => resolve_generation(&mut state, request_id, outcome),
        Msg::ValidationResolved {
            request_id,
            outcome,
        } => resolve_validation(&mut state, request_id, outcome),
        Msg::ShowAllValidationRequested => show_all_validation(&state),
    };

    (state, effects)
}

fn submit_generation(state: &mut AppState, form: FormFields) -> Vec<Effect> {
    // Guard on the workflow state, not on the trigger's enabled flag.
    let Some(request_id) = state.begin(Workflow::Generation) else {
        return Vec::new();
    };
    vec![
        Effect::Present(render::pending_generation(&state.config.slots.generation)),
        Effect::Send {
            request_id,
            request: ServiceRequest::Generate { form },
        },
    ]
}

fn submit_validation(state: &mut AppState) -> Vec<Effect> {
    let Some(request_id) = state.begin(Workflow::Validation) else {
        return Vec::new();
    };
    vec![
        Effect::Present(render::pending_validation(&state.config.slots.validation)),
        Effect::Send {
            request_id,
            request: ServiceRequest::Validate,
        },
    ]
}

fn resolve_generation(
    state: &mut AppState,
    request_id: RequestId,
    outcome: Result<GenerationResult, TransportError>,
) -> Vec<Effect> {
    if !state.generation.accepts(request_id) {
        return Vec::new();
    }
    let slots = &state.config.slots.generation;
    let mut chart = None;

    let mut display = match outcome {
        Ok(result) if result.is_success() => {
            let display = render::render_generation(&result, slots, state.config.sample_cap);
            chart = Some(ChartData::GenerationBar {
                total_urls: result.total_urls,
                time_taken: result.time_taken,
            });
            state.generation.succeed(result);
            display
        }
        Ok(result) => {
            let display = render::render_generation(&result, slots, state.config.sample_cap);
            state
                .generation
                .fail(WorkflowError::Service { message: result.error });
            display
        }
        Err(err) => {
            state.generation.fail(WorkflowError::Transport(err));
            render::render_generation_transport_failure(slots)
        }
    };
    display.extend(render::settle(&slots.trigger, &slots.loader));

    present_then_draw(display, chart)
}

fn resolve_validation(
    state: &mut AppState,
    request_id: RequestId,
    outcome: Result<ValidationResult, TransportError>,
) -> Vec<Effect> {
    if !state.validation.accepts(request_id) {
        return Vec::new();
    }
    let slots = &state.config.slots.validation;
    let mut chart = None;

    let mut display = match outcome {
        Ok(result) if result.is_success() => {
            let display = render::render_validation(&result, slots, state.config.sample_cap);
            chart = Some(ChartData::ValidationPie {
                successful: result.successful,
                errors: result.errors,
                redirects: result.redirects,
            });
            state.validation.succeed(result);
            display
        }
        Ok(result) => {
            let display = render::render_validation(&result, slots, state.config.sample_cap);
            state
                .validation
                .fail(WorkflowError::Service { message: result.error });
            display
        }
        Err(err) => {
            state.validation.fail(WorkflowError::Transport(err));
            render::render_validation_transport_failure(slots)
        }
    };
    display.extend(render::settle(&slots.trigger, &slots.loader));

    present_then_draw(display, chart)
}

fn show_all_validation(state: &AppState) -> Vec<Effect> {
    let rows = state
        .validation
        .last_result()
        .map(|result| result.full_validated_urls.as_slice())
        .unwrap_or_default();
    vec![Effect::Present(render::render_full_validation(
        rows,
        &state.config.slots.validation,
    ))]
}

fn present_then_draw(display: DisplayInstructions, chart: Option<ChartData>) -> Vec<Effect> {
    let mut effects = vec![Effect::Present(display)];
    effects.extend(chart.map(Effect::DrawChart));
    effects
}
