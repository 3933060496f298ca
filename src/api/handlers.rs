//! HTTP request handlers

use super::types::{
    ContinueRequest, ErrorResponse, FinishRequest, QuestionResponse, ReviewResponse,
};
use super::AppState;
use crate::extract::{self, ExtractError};
use crate::interview::{InterviewError, TransitionError};
use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/upload", post(upload))
        .route("/api/continue", post(continue_interview))
        .route("/api/finish", post(finish))
        .route("/version", get(get_version))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

// ============================================================
// Upload
// ============================================================

/// File taken from the `file` multipart field
struct UploadedFile {
    bytes: Vec<u8>,
    mime_type: String,
    file_name: String,
}

async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<QuestionResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "Upload is not a multipart request");
        AppError::BadRequest("No file uploaded.")
    })?;

    let file = read_file_field(&mut multipart)
        .await?
        .ok_or(AppError::BadRequest("No file uploaded."))?;

    let text = extract::extract(file.bytes, &file.mime_type, &file.file_name)
        .await
        .map_err(|e| match e {
            ExtractError::UnsupportedFormat(ref mime) => {
                tracing::warn!(mime = %mime, file_name = %file.file_name, "Rejected upload");
                AppError::BadRequest("Unsupported file type.")
            }
            ExtractError::Failed { .. } => {
                tracing::error!(error = %e, file_name = %file.file_name, "Error in /api/upload");
                AppError::Internal("Error processing file.")
            }
        })?;

    let reply = state
        .interviewer
        .begin(&text)
        .await
        .map_err(|e| interview_error("/api/upload", &e, "Error processing file."))?;

    Ok(Json(QuestionResponse {
        question: reply.text,
        session_id: reply.session_id,
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(&e))? {
        if field.name() != Some("file") {
            continue;
        }
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
        return Ok(Some(UploadedFile {
            bytes: bytes.to_vec(),
            mime_type,
            file_name,
        }));
    }
    Ok(None)
}

fn multipart_error(err: &MultipartError) -> AppError {
    tracing::warn!(error = %err, "Malformed upload");
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File too large.")
    } else {
        AppError::BadRequest("Malformed upload.")
    }
}

// ============================================================
// Continue / Finish
// ============================================================

async fn continue_interview(
    State(state): State<AppState>,
    payload: Result<Json<ContinueRequest>, JsonRejection>,
) -> Result<Json<QuestionResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable /api/continue body");
            return Err(AppError::BadRequest("No answer provided."));
        }
    };
    let Some(answer) = request.answer.filter(|a| !a.trim().is_empty()) else {
        return Err(AppError::BadRequest("No answer provided."));
    };

    let reply = state
        .interviewer
        .answer(request.session_id.as_ref(), &answer)
        .await
        .map_err(|e| interview_error("/api/continue", &e, "Error with AI response."))?;

    Ok(Json(QuestionResponse {
        question: reply.text,
        session_id: reply.session_id,
    }))
}

async fn finish(
    State(state): State<AppState>,
    payload: Result<Json<FinishRequest>, JsonRejection>,
) -> Result<Json<ReviewResponse>, AppError> {
    // The body is optional
    let session_id = payload.ok().and_then(|Json(request)| request.session_id);

    let reply = state
        .interviewer
        .finish(session_id.as_ref())
        .await
        .map_err(|e| interview_error("/api/finish", &e, "Error generating final review."))?;

    Ok(Json(ReviewResponse { review: reply.text }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("angel-interviewer ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

/// Log the detailed failure; clients only get a generic message.
fn interview_error(route: &str, err: &InterviewError, failure: &'static str) -> AppError {
    match err {
        InterviewError::Model(_) => {
            tracing::error!(route, error = %err, "Model request failed");
            AppError::Internal(failure)
        }
        InterviewError::NoActiveInterview
        | InterviewError::Transition(TransitionError::NotStarted) => {
            tracing::warn!(route, error = %err, "Rejected out-of-order request");
            AppError::Conflict("No interview in progress.")
        }
        InterviewError::Busy(_) => {
            tracing::warn!(route, error = %err, "Rejected overlapping request");
            AppError::Conflict("Interview is busy, try again.")
        }
        InterviewError::UnknownSession(_) => {
            tracing::warn!(route, error = %err, "Rejected request");
            AppError::NotFound("Unknown interview session.")
        }
    }
}

#[derive(Debug)]
enum AppError {
    BadRequest(&'static str),
    NotFound(&'static str),
    Conflict(&'static str),
    PayloadTooLarge(&'static str),
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
