//! # Portal Shared
//! 
//! Shared configuration, telemetry, constants, and text utilities for the portal backend.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
