//! Account service: registration and login for every account kind

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::account::{
    check_password_complexity, validate_license_number, validate_name, validate_national_id,
    AccountKind, AccountRecord, AccountStore, AccountView, Credentials, LookupField, NewAccount,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Message returned for every failed login, whatever the cause
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Registration fields after trimming and case normalization
#[derive(Debug)]
struct NormalizedAccount {
    national_id: String,
    name: String,
    license_number: Option<String>,
    password: String,
}

impl NormalizedAccount {
    fn new(kind: AccountKind, raw: NewAccount) -> Self {
        let license_number = if kind.requires_license_number() {
            Some(normalize_license_number(raw.license_number.as_deref().unwrap_or_default()))
        } else {
            None
        };

        Self {
            national_id: raw.national_id.trim().to_string(),
            name: raw.name.trim().to_uppercase(),
            license_number,
            password: raw.password.trim().to_string(),
        }
    }

    fn field(&self, field: LookupField) -> Option<&str> {
        match field {
            LookupField::NationalId => Some(&self.national_id),
            LookupField::LicenseNumber => self.license_number.as_deref(),
        }
    }
}

fn normalize_license_number(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Run the validator for a lookup field, classifying failures as invalid input
fn validate_lookup_field(field: LookupField, value: &str) -> Result<(), DomainError> {
    match field {
        LookupField::NationalId => {
            validate_national_id(value).map_err(|v| DomainError::invalid_input(field.name(), v))
        }
        LookupField::LicenseNumber => {
            validate_license_number(value).map_err(|v| DomainError::invalid_input(field.name(), v))
        }
    }
}

/// Registration and login workflows over an account store
#[derive(Debug)]
pub struct AccountService<S: AccountStore, H: PasswordHasher> {
    store: Arc<S>,
    hasher: Arc<H>,
    /// Held across the uniqueness checks and the append of a registration
    registration_lock: Mutex<()>,
}

impl<S: AccountStore, H: PasswordHasher> AccountService<S, H> {
    pub fn new(store: Arc<S>, hasher: Arc<H>) -> Self {
        Self {
            store,
            hasher,
            registration_lock: Mutex::new(()),
        }
    }

    /// Register a new account of `kind`
    ///
    /// Validation runs in a fixed order (name, national ID, license number for
    /// doctors, password) and stops at the first field that fails. Nothing is
    /// written unless every check passes.
    pub async fn register(
        &self,
        kind: AccountKind,
        request: NewAccount,
    ) -> Result<AccountView, DomainError> {
        let account = NormalizedAccount::new(kind, request);

        validate_name(&account.name).map_err(|v| DomainError::invalid_input("name", v))?;
        validate_lookup_field(LookupField::NationalId, &account.national_id)?;

        if let Some(license_number) = &account.license_number {
            validate_lookup_field(LookupField::LicenseNumber, license_number)?;
        }

        check_password_complexity(&account.password)
            .map_err(|v| DomainError::invalid_input("password", v))?;

        let password_hash = self.hasher.hash(&account.password)?;

        let _guard = self.registration_lock.lock().await;

        for field in kind.unique_fields() {
            let Some(value) = account.field(*field) else {
                continue;
            };

            if self.store.exists_by(kind, *field, value).await? {
                warn!(kind = %kind, field = field.name(), "Registration rejected: duplicate value");
                return Err(DomainError::conflict(field.conflict_message()));
            }
        }

        let record = AccountRecord::new(
            kind,
            account.national_id,
            account.name,
            account.license_number,
            password_hash,
        );
        let view = record.view();
        let created_at = record.created_at();

        self.store.append(kind, record).await?;

        info!(kind = %kind, created_at = %created_at, "Account registered");

        Ok(view)
    }

    /// Authenticate an account of `kind` by its login field and password
    ///
    /// An unknown identifier and a wrong password produce the same error.
    pub async fn login(
        &self,
        kind: AccountKind,
        credentials: Credentials,
    ) -> Result<AccountView, DomainError> {
        let field = kind.login_field();
        let identifier = match field {
            LookupField::NationalId => credentials.identifier.trim().to_string(),
            LookupField::LicenseNumber => normalize_license_number(&credentials.identifier),
        };
        let password = credentials.password.trim();

        validate_lookup_field(field, &identifier)?;

        let Some(record) = self.store.find_by(kind, field, &identifier).await? else {
            // Unknown identifiers still pay for a verification.
            self.hasher.verify_decoy(password);
            debug!(kind = %kind, "Login failed: unknown identifier");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(password, record.password_hash()) {
            debug!(kind = %kind, "Login failed: password mismatch");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(kind = %kind, "Account logged in");

        Ok(record.view())
    }

    pub async fn register_patient(&self, request: NewAccount) -> Result<AccountView, DomainError> {
        self.register(AccountKind::Patient, request).await
    }

    pub async fn register_doctor(&self, request: NewAccount) -> Result<AccountView, DomainError> {
        self.register(AccountKind::Doctor, request).await
    }

    /// Log in a patient by national ID
    pub async fn login_patient(&self, credentials: Credentials) -> Result<AccountView, DomainError> {
        self.login(AccountKind::Patient, credentials).await
    }

    /// Log in a doctor by license number
    pub async fn login_doctor(&self, credentials: Credentials) -> Result<AccountView, DomainError> {
        self.login(AccountKind::Doctor, credentials).await
    }

    /// Number of registered accounts of `kind`
    pub async fn count(&self, kind: AccountKind) -> Result<usize, DomainError> {
        self.store.count(kind).await
    }

    /// Drop every registered account
    pub async fn reset(&self) -> Result<(), DomainError> {
        self.store.clear().await
    }
}
