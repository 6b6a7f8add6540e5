//! Domain layer - account model, validation rules and errors

pub mod account;
pub mod error;

pub use error::{DomainError, ErrorKind};
