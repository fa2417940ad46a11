//! Shared error classification and configuration for kurs.
//!
//! This crate provides the types every other crate agrees on:
//! - Application-wide error classification consumed by the HTTP boundary
//! - Configuration management

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
