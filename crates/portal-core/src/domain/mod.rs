//! # Portal Core - Domain Module
//! 
//! Domain entities for navigation menu management.

pub mod menu;
pub mod submission;

pub use menu::{MenuNode, NewMenu, Position};
pub use submission::{MenuKey, MenuSubmission};
