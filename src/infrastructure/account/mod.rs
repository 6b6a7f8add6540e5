//! Account infrastructure module
//!
//! In-memory account store, Argon2 password hashing, and the account service
//! implementing registration and login.

mod password;
mod service;
mod store;

pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{AccountService, INVALID_CREDENTIALS};
pub use store::InMemoryAccountStore;
