//! Infrastructure layer - storage, hashing, upstream clients and logging

pub mod account;
pub mod fitbit;
pub mod logging;
