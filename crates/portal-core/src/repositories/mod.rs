//! Repository traits (ports)

pub mod menu_repository;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use menu_repository::{MenuRepository, MenuTransaction};
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryMenuRepository;
