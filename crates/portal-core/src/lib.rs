//! # Portal Core
//! 
//! Menu domain entities, repository ports, and the menu tree services.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
