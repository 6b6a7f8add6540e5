//! Fitbit Web API integration

mod client;

pub use client::{FitbitClient, FitbitDashboard, FitbitToken, FITBIT_SCOPES};
