//! Account domain
//!
//! Patient and doctor accounts: field validators, account kinds, stored
//! records, sanitized views, and the store trait.

mod entity;
mod repository;
mod validation;

pub use entity::{AccountKind, AccountRecord, AccountView, Credentials, LookupField, NewAccount};
pub use repository::AccountStore;
pub use validation::{
    check_password_complexity, validate_license_number, validate_name, validate_national_id,
    LicenseNumberViolation, NameViolation, NationalIdViolation, PasswordViolation,
    LICENSE_NUMBER_LENGTH, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
    NATIONAL_ID_LENGTH, PASSWORD_SPECIAL_CHARACTERS,
};

#[cfg(test)]
pub use repository::MockAccountStore;
