//! Fitbit OAuth2 and data passthrough endpoints

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::fitbit::FitbitDashboard;

/// Create the Fitbit router
pub fn create_fitbit_router() -> Router<AppState> {
    Router::new()
        .route("/auth", get(authorize))
        .route("/callback", get(callback))
        .route("/profile", get(profile))
        .route("/activity", get(activity))
        .route("/heartrate", get(heartrate))
        .route("/sleep", get(sleep))
        .route("/dashboard", get(dashboard))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub status: String,
}

/// Query parameter selecting a day; defaults to today (UTC)
#[derive(Debug, Default, Deserialize)]
pub struct DayParams {
    pub day: Option<String>,
}

impl DayParams {
    fn resolve(&self) -> Result<NaiveDate, ApiError> {
        match self.day.as_deref().map(str::trim) {
            None | Some("") => Ok(Utc::now().date_naive()),
            Some(day) => NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| {
                ApiError::bad_request(format!("Invalid day '{}'. Expected format: YYYY-MM-DD.", day))
                    .with_param("day")
            }),
        }
    }
}

/// GET /fitbit/auth
///
/// Redirects the browser to Fitbit's consent page.
pub async fn authorize(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = state.fitbit.authorization_url()?;
    Ok(Redirect::temporary(&url))
}

/// GET /fitbit/callback?code=...
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<CallbackResponse>, ApiError> {
    let code = params
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing authorization code").with_param("code"))?;

    state.fitbit.exchange_code(&code).await?;

    Ok(Json(CallbackResponse {
        status: "authenticated".to_string(),
    }))
}

/// GET /fitbit/profile
pub async fn profile(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.fitbit.profile().await?))
}

/// GET /fitbit/activity?day=YYYY-MM-DD
pub async fn activity(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> Result<Json<Value>, ApiError> {
    let day = params.resolve()?;
    Ok(Json(state.fitbit.activity(day).await?))
}

/// GET /fitbit/heartrate?day=YYYY-MM-DD
pub async fn heartrate(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> Result<Json<Value>, ApiError> {
    let day = params.resolve()?;
    Ok(Json(state.fitbit.heartrate(day).await?))
}

/// GET /fitbit/sleep?day=YYYY-MM-DD
pub async fn sleep(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> Result<Json<Value>, ApiError> {
    let day = params.resolve()?;
    Ok(Json(state.fitbit.sleep(day).await?))
}

/// GET /fitbit/dashboard?day=YYYY-MM-DD
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DayParams>,
) -> Result<Json<FitbitDashboard>, ApiError> {
    let day = params.resolve()?;
    Ok(Json(state.fitbit.dashboard(day).await?))
}
