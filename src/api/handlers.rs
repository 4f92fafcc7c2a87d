//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, Json},
};
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    state::{AppState, DurationMinutes, Mode},
    tasks::Action,
};
use super::responses::{ApiResponse, DurationRequest, ErrorResponse, HealthResponse, StatusResponse};

/// Bundled browser front end
const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: TimerError) -> ApiError {
    let status = match err {
        TimerError::UnknownMode(_)
        | TimerError::DurationOutOfRange { .. }
        | TimerError::FractionalDuration(_)
        | TimerError::InvalidRequest(_) => {
            warn!("Rejected request: {}", err);
            StatusCode::BAD_REQUEST
        }
        TimerError::ControllerUnavailable => {
            error!("Controller unavailable: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(err.to_string())))
}

async fn run_action(state: &AppState, action: Action, message: String) -> Result<Json<ApiResponse>, ApiError> {
    let status = state.dispatch(action).await.map_err(error_response)?;
    info!("{}", message);
    Ok(Json(ApiResponse::from_status(message, status, state.snapshot())))
}

/// Handle POST /start - Begin counting down
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    run_action(&state, Action::Start, "Timer started".to_string()).await
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    run_action(&state, Action::Stop, "Timer stopped".to_string()).await
}

/// Handle POST /reset - Rewind to the active mode's duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    run_action(&state, Action::Reset, "Timer reset".to_string()).await
}

/// Handle POST /mode/:mode - Switch mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mode: Mode = mode.parse().map_err(error_response)?;
    run_action(&state, Action::SetMode(mode), format!("Switched to {} mode", mode)).await
}

/// Handle PUT /durations/:mode - Change a mode's configured duration
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
    body: Result<Json<DurationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mode: Mode = mode.parse().map_err(error_response)?;
    let Json(request) = body
        .map_err(|rejection| error_response(TimerError::InvalidRequest(rejection.body_text())))?;
    let minutes = DurationMinutes::from_json_number(request.minutes).map_err(error_response)?;
    run_action(
        &state,
        Action::SetModeDuration(mode, minutes),
        format!("{} duration set to {} minutes", mode, minutes.get()),
    )
    .await
}

/// Handle POST /durations/restore - Put all durations back to 25/5/15
pub async fn restore_defaults_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    run_action(&state, Action::RestoreDefaults, "Durations restored to defaults".to_string()).await
}

/// Handle POST /alarm/dismiss - Silence the alarm
pub async fn dismiss_alarm_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    run_action(&state, Action::DismissAlarm, "Alarm dismissed".to_string()).await
}

/// Handle GET /status - Return the current timer and UI state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.status(),
        ui: state.snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handle GET / - Serve the timer page
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
