//! API handlers for the Caserne EPI REST endpoints

pub mod alerts;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod personnel;
pub mod reports;
pub mod requests;
pub mod verifications;
