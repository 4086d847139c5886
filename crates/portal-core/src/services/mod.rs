//! Domain services (business logic)

pub mod hierarchy;
pub mod reconcile;
pub mod menu_service;

pub use hierarchy::build_hierarchy;
pub use menu_service::{MenuService, SavedMenus};
pub use reconcile::{IdMap, Reconciled};
