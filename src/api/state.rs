//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::{AccountKind, AccountStore, AccountView, Credentials, NewAccount};
use crate::domain::DomainError;
use crate::infrastructure::account::{AccountService, PasswordHasher};
use crate::infrastructure::fitbit::FitbitClient;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub fitbit: Arc<FitbitClient>,
}

impl AppState {
    pub fn new(account_service: Arc<dyn AccountServiceTrait>, fitbit: Arc<FitbitClient>) -> Self {
        Self {
            account_service,
            fitbit,
        }
    }
}

/// Trait for account service operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(
        &self,
        kind: AccountKind,
        request: NewAccount,
    ) -> Result<AccountView, DomainError>;
    async fn login(
        &self,
        kind: AccountKind,
        credentials: Credentials,
    ) -> Result<AccountView, DomainError>;
    async fn count(&self, kind: AccountKind) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<S, H> AccountServiceTrait for AccountService<S, H>
where
    S: AccountStore + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(
        &self,
        kind: AccountKind,
        request: NewAccount,
    ) -> Result<AccountView, DomainError> {
        AccountService::register(self, kind, request).await
    }

    async fn login(
        &self,
        kind: AccountKind,
        credentials: Credentials,
    ) -> Result<AccountView, DomainError> {
        AccountService::login(self, kind, credentials).await
    }

    async fn count(&self, kind: AccountKind) -> Result<usize, DomainError> {
        AccountService::count(self, kind).await
    }
}
