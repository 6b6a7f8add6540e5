//! Health check endpoints for Kubernetes probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::account::AccountKind;

use super::state::AppState;

/// Health response with optional component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Returns 200 while the process is serving requests
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check covering the account store and Fitbit configuration
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let checks = vec![check_account_store(&state).await, check_fitbit(&state)];

    let status = checks
        .iter()
        .map(|c| c.status)
        .fold(HealthStatus::Healthy, worst);

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    (status_code, Json(response))
}

/// Liveness probe
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn worst(a: HealthStatus, b: HealthStatus) -> HealthStatus {
    use HealthStatus::*;
    match (a, b) {
        (Unhealthy, _) | (_, Unhealthy) => Unhealthy,
        (Degraded, _) | (_, Degraded) => Degraded,
        _ => Healthy,
    }
}

async fn check_account_store(state: &AppState) -> HealthCheck {
    match state.account_service.count(AccountKind::Patient).await {
        Ok(_) => HealthCheck {
            name: "account_store".to_string(),
            status: HealthStatus::Healthy,
            message: None,
        },
        Err(e) => HealthCheck {
            name: "account_store".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
        },
    }
}

// Missing Fitbit credentials only disable the /fitbit routes.
fn check_fitbit(state: &AppState) -> HealthCheck {
    if state.fitbit.is_configured() {
        HealthCheck {
            name: "fitbit".to_string(),
            status: HealthStatus::Healthy,
            message: None,
        }
    } else {
        HealthCheck {
            name: "fitbit".to_string(),
            status: HealthStatus::Degraded,
            message: Some("Fitbit client credentials are not configured".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_worst_status() {
        use HealthStatus::*;
        assert_eq!(worst(Healthy, Healthy), Healthy);
        assert_eq!(worst(Healthy, Degraded), Degraded);
        assert_eq!(worst(Degraded, Unhealthy), Unhealthy);
    }

    #[test]
    fn test_health_response_omits_empty_checks() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0".to_string(),
            checks: None,
            latency_ms: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(!json.contains("checks"));
    }
}
