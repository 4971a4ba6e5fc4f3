use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header::COOKIE, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use quiz_core::decode_progress;
use quiz_core::model::{
    AnswerResult, ProgressState, QuestionLookup, QuestionView, SubmitOutcome,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Body served while the quiz still has questions.
#[derive(Debug, Serialize)]
pub struct QuestionBody {
    #[serde(flatten)]
    pub question: QuestionView,
    pub progress: ProgressState,
}

/// Body served after grading a submission.
#[derive(Debug, Serialize)]
pub struct GradedBody {
    #[serde(flatten)]
    pub result: AnswerResult,
    pub progress: ProgressState,
}

/// Body served once no question remains.
#[derive(Debug, Serialize)]
pub struct CompletedBody {
    pub completed: bool,
    pub correct: u64,
    pub total: u64,
}

impl From<&ProgressState> for CompletedBody {
    fn from(state: &ProgressState) -> Self {
        Self {
            completed: true,
            correct: state.correct_count(),
            total: state.total_count(),
        }
    }
}

/// `GET /` and `HEAD /`: the current question, or the summary once finished.
pub async fn question_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let header = cookie_header(&headers);
    resolve_session(&state, &header).await;
    let progress = read_progress(&header)?;

    match state.services.sequencer().current_question(&progress).await? {
        QuestionLookup::Found(question) => with_progress_cookie(
            &state,
            &progress,
            Json(QuestionBody {
                question: question.view(),
                progress,
            }),
        ),
        QuestionLookup::Exhausted => Ok(completed(&progress)),
    }
}

/// `PUT /:answer`: grade the answer to the current question and advance.
pub async fn answer_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let answer: u64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidAnswer(raw.clone()))?;

    let header = cookie_header(&headers);
    resolve_session(&state, &header).await;
    let mut progress = read_progress(&header)?;

    match state
        .services
        .sequencer()
        .submit_answer(&mut progress, answer)
        .await?
    {
        SubmitOutcome::Graded(result) => {
            with_progress_cookie(&state, &progress, Json(GradedBody { result, progress }))
        }
        SubmitOutcome::Exhausted => Ok(completed(&progress)),
    }
}

/// `PUT /` without an answer segment.
pub async fn missing_answer_handler() -> AppError {
    AppError::MissingAnswer
}

/// `PUT /health`: the static route shadows `/:answer`, so reject it the
/// same way as any other non-numeric answer.
pub async fn reserved_answer_handler() -> AppError {
    AppError::InvalidAnswer("health".to_string())
}

/// `OPTIONS`: nothing to do beyond the CORS headers.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Joins every `Cookie` header; HTTP/2 clients may split cookies across several.
///
/// Non-ASCII bytes in unrelated cookies are decoded lossily so they never
/// hide the progress cookie sharing the same line.
fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(COOKIE)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect::<Vec<_>>()
        .join("; ")
}

fn read_progress(header: &str) -> Result<ProgressState, AppError> {
    let progress = decode_progress(header)?;
    if !progress.is_consistent() {
        warn!(?progress, "progress cookie carries an impossible score");
    }
    Ok(progress)
}

/// Session lookup only annotates logs; failures never block the quiz.
async fn resolve_session(state: &AppState, header: &str) {
    let Some(sessions) = state.services.sessions() else {
        return;
    };
    match sessions.lookup(header).await {
        Ok(Some(session)) => {
            debug!(session = %session.id, user = ?session.user(), "session resolved");
        }
        Ok(None) => debug!("no session"),
        Err(e) => warn!(error = %e, "session lookup failed"),
    }
}

fn with_progress_cookie(
    state: &AppState,
    progress: &ProgressState,
    body: impl IntoResponse,
) -> Result<Response, AppError> {
    let cookie = HeaderValue::from_str(&state.cookie.encode(progress))?;
    let mut response = body.into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

fn completed(progress: &ProgressState) -> Response {
    Json(CompletedBody::from(progress)).into_response()
}
