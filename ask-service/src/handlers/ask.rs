use crate::models::{AskRequest, AskResponse};
use crate::services::metrics::record_ask;
use crate::startup::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service_core::error::AppError;

/// Returned when the trimmed question is empty.
pub const NO_QUESTION_PROVIDED: &str = "No question provided";

/// Summary used for every provider failure; the detail goes in `message`.
pub const UPSTREAM_FAILED: &str = "Gemini API request failed";

/// Returned when the body is not a JSON object of the expected shape.
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// `POST /ask`: answer one question through the configured provider.
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let mode = state.provider.mode().as_str();

    let Json(request) = payload.map_err(|rejection| {
        record_ask(mode, "rejected");
        tracing::debug!(error = %rejection.body_text(), "Rejected malformed /ask body");
        AppError::MalformedBody {
            error: INVALID_JSON_BODY.to_string(),
            message: rejection.body_text(),
        }
    })?;

    let question = request.trimmed_question();
    if question.is_empty() {
        record_ask(mode, "rejected");
        tracing::debug!("Rejected /ask without a question");
        return Err(AppError::BadRequest(anyhow::anyhow!(NO_QUESTION_PROVIDED)));
    }

    match state.provider.answer(question).await {
        Ok(answer) => {
            record_ask(mode, "answered");
            Ok(Json(AskResponse { answer }))
        }
        Err(e) => {
            record_ask(mode, "upstream_error");
            tracing::warn!(mode, error = %e, "Answer provider failed");
            Err(AppError::bad_gateway(UPSTREAM_FAILED, e.to_string()))
        }
    }
}
