//! Core domain types and logic.

pub mod config_validation;
pub mod engine;
pub mod error;
pub mod event;
pub mod indicator;
pub mod market;
pub mod position;
