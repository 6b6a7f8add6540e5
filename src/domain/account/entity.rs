//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of account; each kind has its own collection and uniqueness scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Patient,
    Doctor,
}

impl AccountKind {
    /// Fields that must be unique within this kind, in the order they are checked
    pub fn unique_fields(&self) -> &'static [LookupField] {
        match self {
            Self::Patient => &[LookupField::NationalId],
            Self::Doctor => &[LookupField::NationalId, LookupField::LicenseNumber],
        }
    }

    /// Field that identifies the account at login
    pub fn login_field(&self) -> LookupField {
        match self {
            Self::Patient => LookupField::NationalId,
            Self::Doctor => LookupField::LicenseNumber,
        }
    }

    /// Whether accounts of this kind carry a license number
    pub fn requires_license_number(&self) -> bool {
        matches!(self, Self::Doctor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record field that can be used for lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    NationalId,
    LicenseNumber,
}

impl LookupField {
    /// Field name as seen by API callers
    pub fn name(&self) -> &'static str {
        match self {
            Self::NationalId => "national_id",
            Self::LicenseNumber => "license_number",
        }
    }

    /// Message used when a registration collides on this field
    pub fn conflict_message(&self) -> &'static str {
        match self {
            Self::NationalId => "National ID already registered.",
            Self::LicenseNumber => "License number already registered.",
        }
    }
}

/// Stored account; immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    kind: AccountKind,
    national_id: String,
    name: String,
    license_number: Option<String>,
    /// Argon2 PHC string, never the plaintext password
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRecord {
    /// Create a record from already normalized and validated fields
    pub fn new(
        kind: AccountKind,
        national_id: impl Into<String>,
        name: impl Into<String>,
        license_number: Option<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            national_id: national_id.into(),
            name: name.into(),
            license_number,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license_number(&self) -> Option<&str> {
        self.license_number.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Value of a lookup field, if the record has one
    pub fn field(&self, field: LookupField) -> Option<&str> {
        match field {
            LookupField::NationalId => Some(self.national_id()),
            LookupField::LicenseNumber => self.license_number(),
        }
    }

    /// The caller-safe subset of this record
    pub fn view(&self) -> AccountView {
        AccountView {
            national_id: self.national_id.clone(),
            name: self.name.clone(),
            license_number: self.license_number.clone(),
        }
    }
}

/// Sanitized account view; never includes the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub national_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub license_number: Option<String>,
}

/// Raw registration fields, before normalization
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    #[serde(alias = "cpf")]
    pub national_id: String,
    pub name: String,
    #[serde(alias = "crm", default)]
    pub license_number: Option<String>,
    pub password: String,
}

impl NewAccount {
    pub fn patient(
        national_id: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            national_id: national_id.into(),
            name: name.into(),
            license_number: None,
            password: password.into(),
        }
    }

    pub fn doctor(
        national_id: impl Into<String>,
        name: impl Into<String>,
        license_number: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            national_id: national_id.into(),
            name: name.into(),
            license_number: Some(license_number.into()),
            password: password.into(),
        }
    }
}

/// Raw login fields; the identifier is the kind's login field
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}
