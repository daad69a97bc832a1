//! # Web API Handlers

pub mod health;
pub mod history;
pub mod metrics;
pub mod runs;
pub mod stream;
pub mod trigger;
