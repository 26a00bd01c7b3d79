//! Request handlers for the API endpoints.

use std::sync::{Arc, RwLockReadGuard, RwLockWriteGuard};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::types::{AppendResponse, ErrorResponse};
use super::{AppState, Session};
use crate::config::ScenarioConfig;
use crate::loads::LoadEntry;
use crate::sizing::{Evaluation, evaluate};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn read(state: &AppState) -> Result<RwLockReadGuard<'_, Session>, ApiError> {
    state
        .session
        .read()
        .map_err(|_| error(StatusCode::INTERNAL_SERVER_ERROR, "session lock poisoned"))
}

fn write(state: &AppState) -> Result<RwLockWriteGuard<'_, Session>, ApiError> {
    state
        .session
        .write()
        .map_err(|_| error(StatusCode::INTERNAL_SERVER_ERROR, "session lock poisoned"))
}

/// Resolves and evaluates a scenario against the given loads.
fn evaluate_scenario(
    scenario: &ScenarioConfig,
    loads: &crate::loads::LoadList,
) -> Result<Evaluation, ApiError> {
    let params = scenario.to_parameters().map_err(|errors| {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        error(StatusCode::UNPROCESSABLE_ENTITY, message)
    })?;
    evaluate(loads, &params).map_err(|e| error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
}

/// `GET /scenario` → 200 + session scenario with its current loads.
pub async fn get_scenario(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScenarioConfig>, ApiError> {
    let session = read(&state)?;
    let mut scenario = session.scenario.clone();
    scenario.loads = session.loads.as_slice().to_vec();
    Ok(Json(scenario))
}

/// `GET /loads` → 200 + loads in entry order.
pub async fn get_loads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LoadEntry>>, ApiError> {
    let session = read(&state)?;
    Ok(Json(session.loads.as_slice().to_vec()))
}

/// `POST /loads` → 200 + `AppendResponse`; invalid entries are dropped, not rejected.
pub async fn append_load(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<LoadEntry>,
) -> Result<Json<AppendResponse>, ApiError> {
    let mut session = write(&state)?;
    let accepted = session.loads.push(entry);
    Ok(Json(AppendResponse {
        accepted,
        count: session.loads.len(),
    }))
}

/// `DELETE /loads` → 204, the session load list is emptied.
pub async fn clear_loads(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    write(&state)?.loads.clear();
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /evaluation` → 200 + `Evaluation` of the session, 422 if the scenario is invalid.
pub async fn get_evaluation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Evaluation>, ApiError> {
    let session = read(&state)?;
    evaluate_scenario(&session.scenario, &session.loads).map(Json)
}

/// `POST /evaluate` → 200 + `Evaluation` of the posted scenario; the session is untouched.
pub async fn post_evaluate(Json(scenario): Json<ScenarioConfig>) -> Result<Json<Evaluation>, ApiError> {
    evaluate_scenario(&scenario, &scenario.load_list()).map(Json)
}
