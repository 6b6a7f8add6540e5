//! Health tracker API
//!
//! Registration and login for patients and doctors, with:
//! - Validation of names, national IDs (CPF), license numbers (CRM) and passwords
//! - An in-memory account store with per-kind uniqueness rules
//! - Fitbit OAuth2 authorization and daily data passthroughs

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::{info, warn};

use api::state::AppState;
use domain::DomainError;
use infrastructure::account::{AccountService, Argon2Hasher, InMemoryAccountStore};
use infrastructure::fitbit::FitbitClient;

/// Create the application state from configuration
pub fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let account_service = AccountService::new(
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(Argon2Hasher::new()),
    );

    let fitbit = FitbitClient::new(config.fitbit.clone())?;
    if fitbit.is_configured() {
        info!("Fitbit integration configured");
    } else {
        warn!("Fitbit client credentials missing; /fitbit routes will fail");
    }

    Ok(AppState::new(Arc::new(account_service), Arc::new(fitbit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::account::AccountKind;

    #[tokio::test]
    async fn test_create_app_state_with_defaults() {
        let state = create_app_state(&AppConfig::default()).unwrap();

        assert_eq!(state.account_service.count(AccountKind::Patient).await.unwrap(), 0);
        assert_eq!(state.account_service.count(AccountKind::Doctor).await.unwrap(), 0);
        assert!(!state.fitbit.is_configured());
        assert!(!state.fitbit.is_authenticated().await);
    }
}
