//! Menu repository traits (ports)

use async_trait::async_trait;

use crate::domain::{MenuNode, NewMenu, Position};
use crate::error::DomainError;

/// Read access to the `menus` table plus transaction entry point
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<MenuNode>, DomainError>;

    /// Flat rows of one position, ordered by `menu_order` then `id`
    async fn find_by_position(&self, position: Position) -> Result<Vec<MenuNode>, DomainError>;

    async fn begin(&self) -> Result<Box<dyn MenuTransaction>, DomainError>;
}

/// Unit of work over the `menus` table.
///
/// Dropping a transaction without calling `commit` discards its writes.
#[async_trait]
pub trait MenuTransaction: Send {
    /// Serialize writers of one position forest until the transaction ends
    async fn lock_position(&mut self, position: Position) -> Result<(), DomainError>;

    /// Insert a row and return its store-assigned id
    async fn insert(&mut self, menu: &NewMenu) -> Result<i64, DomainError>;

    async fn find_by_id(&mut self, id: i64) -> Result<Option<MenuNode>, DomainError>;

    /// Direct children, ordered by `menu_order` then `id`
    async fn find_children(&mut self, parent_id: i64) -> Result<Vec<MenuNode>, DomainError>;

    async fn delete(&mut self, id: i64) -> Result<(), DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}
