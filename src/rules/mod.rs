//! Pure presentation and derivation rules shared by every endpoint

pub mod alerts;
pub mod badge;
pub mod schedule;
pub mod search;
