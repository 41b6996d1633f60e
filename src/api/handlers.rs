//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    controller::SessionError,
    services::StartAnswers,
    state::AppState,
};
use super::responses::{
    ApiResponse, FocusTimeResponse, HealthResponse, NotificationsResponse, StatusResponse,
    VisibilityRequest,
};

/// Handle POST /start - Start a pomodoro run
///
/// An empty body counts as cancelled prompts, so every value falls back to
/// its default. Any other body must be JSON and is rejected with 400 when it
/// cannot be read.
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    let answers = match parse_start_body(&headers, &body) {
        Ok(answers) => answers,
        Err(message) => {
            warn!("Rejecting start request: {}", message);
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(message, state.get_snapshot())),
            ));
        }
    };

    match state.start(answers).await {
        Ok(Ok(session)) => {
            info!("Start endpoint called - pomodoro started");
            Ok((
                StatusCode::OK,
                Json(ApiResponse::running("Pomodoro started".to_string(), session)),
            ))
        }
        Ok(Err(e @ SessionError::AlreadyRunning)) => {
            info!("Start endpoint called while running");
            Ok((
                StatusCode::CONFLICT,
                Json(ApiResponse::error(e.to_string(), state.get_snapshot())),
            ))
        }
        Ok(Err(e)) => {
            error!("Failed to start pomodoro: {}", e);
            Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e.to_string(), state.get_snapshot())),
            ))
        }
        Err(e) => {
            error!("Failed to reach session loop: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Read start answers from a request body, treating an empty body as "all defaults"
fn parse_start_body(headers: &HeaderMap, body: &[u8]) -> Result<StartAnswers, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StartAnswers::default());
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false);
    if !is_json {
        return Err("Expected request with `Content-Type: application/json`".to_string());
    }

    Json::<StartAnswers>::from_bytes(body)
        .map(|Json(answers)| answers)
        .map_err(|rejection| rejection.body_text())
}

/// Handle POST /visibility - Host window gained or lost focus
pub async fn visibility_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VisibilityRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_visibility(request.focused).await {
        Ok(session) => {
            let response = if !session.timer.is_running {
                ApiResponse::idle("No pomodoro running".to_string(), session)
            } else if session.ticking {
                ApiResponse::running("Timer running".to_string(), session)
            } else {
                ApiResponse::paused("Timer paused while unfocused".to_string(), session)
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to update visibility: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle GET /focus-time - Report cumulative focus time
pub async fn focus_time_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FocusTimeResponse>, StatusCode> {
    match state.report_focus_time().await {
        Ok(focus_time) => Ok(Json(focus_time.into())),
        Err(e) => {
            error!("Failed to report focus time: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        session: state.get_snapshot(),
        status_line: state.get_status_line(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /notifications - Return recent notifications, oldest first
pub async fn notifications_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotificationsResponse>, StatusCode> {
    match state.get_notifications() {
        Ok(notifications) => Ok(Json(NotificationsResponse { notifications })),
        Err(e) => {
            error!("Failed to read notifications: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
