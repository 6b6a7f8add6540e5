//! Account registration and login endpoints

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::account::{AccountKind, AccountView, Credentials, NewAccount};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register/patient", post(register_patient))
        .route("/login/patient", post(login_patient))
        .route("/register/doctor", post(register_doctor))
        .route("/login/doctor", post(login_doctor))
}

/// Patient login request
#[derive(Debug, Deserialize)]
pub struct PatientLoginRequest {
    #[serde(alias = "cpf")]
    pub national_id: String,
    pub password: String,
}

/// Doctor login request
#[derive(Debug, Deserialize)]
pub struct DoctorLoginRequest {
    #[serde(alias = "crm")]
    pub license_number: String,
    pub password: String,
}

/// POST /auth/register/patient
pub async fn register_patient(
    State(state): State<AppState>,
    Json(request): Json<NewAccount>,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    register(&state, AccountKind::Patient, request).await
}

/// POST /auth/register/doctor
pub async fn register_doctor(
    State(state): State<AppState>,
    Json(request): Json<NewAccount>,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    register(&state, AccountKind::Doctor, request).await
}

/// POST /auth/login/patient
pub async fn login_patient(
    State(state): State<AppState>,
    Json(request): Json<PatientLoginRequest>,
) -> Result<Json<AccountView>, ApiError> {
    let credentials = Credentials::new(request.national_id, request.password);
    let view = state
        .account_service
        .login(AccountKind::Patient, credentials)
        .await?;

    Ok(Json(view))
}

/// POST /auth/login/doctor
pub async fn login_doctor(
    State(state): State<AppState>,
    Json(request): Json<DoctorLoginRequest>,
) -> Result<Json<AccountView>, ApiError> {
    let credentials = Credentials::new(request.license_number, request.password);
    let view = state
        .account_service
        .login(AccountKind::Doctor, credentials)
        .await?;

    Ok(Json(view))
}

async fn register(
    state: &AppState,
    kind: AccountKind,
    request: NewAccount,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    let view = state.account_service.register(kind, request).await?;
    Ok((StatusCode::CREATED, Json(view)))
}
