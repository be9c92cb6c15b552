//! Axum route handlers for the Assist API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assist::modes::{InputKind, Mode, ALL_MODES};
use crate::assist::tabular::{lines_to_csv, parse_csv, CsvPreview};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    pub mode: Mode,
    pub input: String,
    #[serde(default)]
    pub input_kind: InputKind,
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub mode: Mode,
    /// Renderable output. Upstream failures arrive here as readable text,
    /// mirrored in `error`; the HTTP status stays 200.
    pub output: String,
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModeInfo {
    pub id: Mode,
    pub label: &'static str,
    pub description: &'static str,
    pub accepts: &'static [InputKind],
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelSummary>,
}

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/modes
///
/// Mode catalog for the UI selector: stable ids, display strings, and the
/// input kinds each mode takes.
pub async fn handle_list_modes() -> Json<Vec<ModeInfo>> {
    let catalog = ALL_MODES
        .iter()
        .map(|mode| ModeInfo {
            id: *mode,
            label: mode.label(),
            description: mode.description(),
            accepts: mode.accepted_input_kinds(),
        })
        .collect();
    Json(catalog)
}

/// POST /api/v1/assist
///
/// Runs one assistant invocation: shapes the input for the selected mode,
/// sends it through the Gemini client, and returns the display text.
pub async fn handle_assist(
    State(state): State<AppState>,
    Json(request): Json<AssistRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    if request.input.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter or upload some input first.".to_string(),
        ));
    }

    let payload = prepare_payload(request.mode, request.input_kind, &request.input)?;
    let profile = request.mode.profile();

    info!(
        "Running {} on {} input ({} payload chars)",
        request.mode,
        request.input_kind,
        payload.len()
    );

    let outcome = state
        .llm
        .invoke(
            profile.system_prompt,
            &payload,
            profile.temperature,
            profile.max_output_tokens,
        )
        .await;

    Ok(Json(AssistResponse {
        mode: request.mode,
        output: outcome.display_text,
        used_fallback: outcome.used_fallback,
        error: outcome.error,
    }))
}

/// POST /api/v1/assist/preview
///
/// Parses CSV content and returns a bounded preview for display before the
/// user commits to a batch run.
pub async fn handle_preview(
    Json(request): Json<PreviewRequest>,
) -> Result<Json<CsvPreview>, AppError> {
    let table = parse_csv(&request.content).ok_or_else(|| {
        AppError::Validation("CSV content has no header row".to_string())
    })?;
    Ok(Json(table.preview()))
}

/// GET /api/v1/models
///
/// Diagnostic: lists upstream models usable for generation with the
/// configured API key. Unlike /assist, upstream failures here surface as
/// HTTP errors.
pub async fn handle_list_models(
    State(state): State<AppState>,
) -> Result<Json<ModelsResponse>, AppError> {
    let models = state
        .llm
        .list_models()
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let models = models
        .into_iter()
        .filter(|model| model.supports_generate_content())
        .map(|model| ModelSummary {
            name: model.name,
            display_name: model.display_name,
        })
        .collect();

    Ok(Json(ModelsResponse { models }))
}

/// Shapes raw input into the flat text payload the prompt receives.
///
/// Free text passes through untouched. Line-per-entry input becomes a
/// single-column CSV. CSV input is checked for the header columns the mode's
/// template relies on, then forwarded verbatim.
fn prepare_payload(mode: Mode, kind: InputKind, input: &str) -> Result<String, AppError> {
    if !mode.accepts(kind) {
        return Err(AppError::Validation(format!(
            "Mode '{mode}' does not accept '{kind}' input"
        )));
    }

    match kind {
        InputKind::Text => Ok(input.to_string()),
        InputKind::Lines => lines_to_csv(input).ok_or_else(|| {
            AppError::Validation("No non-empty lines in input".to_string())
        }),
        InputKind::Csv => {
            let table = parse_csv(input).ok_or_else(|| {
                AppError::Validation("CSV input has no header row".to_string())
            })?;
            for column in mode.required_csv_columns() {
                if !table.has_column(column) {
                    return Err(AppError::UnprocessableEntity(format!(
                        "CSV input is missing the required '{column}' column"
                    )));
                }
            }
            if table.rows.is_empty() {
                return Err(AppError::UnprocessableEntity(
                    "CSV input has a header but no data rows".to_string(),
                ));
            }
            Ok(input.to_string())
        }
    }
}
