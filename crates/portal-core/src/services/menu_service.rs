// ============================================================================
// Portal Core - Menu Service
// File: crates/portal-core/src/services/menu_service.rs
// ============================================================================
//! Menu read, save and delete flows over the repository port

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info, warn};

use crate::domain::{MenuNode, MenuSubmission, Position};
use crate::error::DomainError;
use crate::repositories::{MenuRepository, MenuTransaction};
use crate::services::hierarchy::build_hierarchy;
use crate::services::reconcile::{reconcile_forest, validate_submission, IdMap};

/// Outcome of a save: the position's forest as re-read after commit
#[derive(Debug, Clone)]
pub struct SavedMenus {
    pub menus: Vec<MenuNode>,
    pub inserted: usize,
    pub id_map: IdMap,
}

/// Menu service orchestrating the builder, reconciler and deleter
pub struct MenuService<R: MenuRepository + ?Sized = dyn MenuRepository> {
    menu_repo: Arc<R>,
}

impl<R: MenuRepository + ?Sized> Clone for MenuService<R> {
    fn clone(&self) -> Self {
        Self {
            menu_repo: self.menu_repo.clone(),
        }
    }
}

impl<R: MenuRepository + ?Sized> MenuService<R> {
    pub fn new(menu_repo: Arc<R>) -> Self {
        Self { menu_repo }
    }

    /// Nested forest of one position
    pub async fn get_menus(&self, position: &str) -> Result<Vec<MenuNode>, DomainError> {
        let position = Position::parse(position)?;
        let rows = self.menu_repo.find_by_position(position).await?;
        debug!("Loaded {} menu rows for {}", rows.len(), position);
        Ok(build_hierarchy(rows))
    }

    /// Single flat menu row
    pub async fn get_menu(&self, id: i64) -> Result<MenuNode, DomainError> {
        self.menu_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MenuNotFound(id))
    }

    /// Insert the new nodes of a submitted forest, all or nothing
    pub async fn save_menus(
        &self,
        position: &str,
        menus: &[MenuSubmission],
    ) -> Result<SavedMenus, DomainError> {
        let position = Position::parse(position)?;
        validate_submission(menus, position)?;

        info!(
            "Saving {} submitted menus for {}",
            menus.iter().map(MenuSubmission::count).sum::<usize>(),
            position
        );

        let mut tx = self.menu_repo.begin().await?;
        let result = reconcile_forest(tx.as_mut(), position, menus).await;
        let reconciled = match result {
            Ok(reconciled) => reconciled,
            Err(e) => {
                warn!("Menu save for {} failed, rolling back: {}", position, e);
                rollback_quietly(tx).await;
                return Err(e);
            }
        };
        tx.commit().await?;

        info!("Inserted {} menus for {}", reconciled.inserted, position);

        let rows = self.menu_repo.find_by_position(position).await?;
        Ok(SavedMenus {
            menus: build_hierarchy(rows),
            inserted: reconciled.inserted,
            id_map: reconciled.id_map,
        })
    }

    /// Delete a menu and its whole subtree. Returns the number of rows removed.
    pub async fn delete_menu(&self, id: i64) -> Result<usize, DomainError> {
        let menu = self.get_menu(id).await?;
        if menu.is_fixed {
            warn!("Refusing to delete fixed menu {}", id);
            return Err(DomainError::FixedMenuProtected(id));
        }

        let mut tx = self.menu_repo.begin().await?;
        let result = delete_subtree(tx.as_mut(), &menu).await;
        match result {
            Ok(deleted) => {
                tx.commit().await?;
                info!("Deleted menu {} with {} rows", id, deleted);
                Ok(deleted)
            }
            Err(e) => {
                warn!("Menu delete {} failed, rolling back: {}", id, e);
                rollback_quietly(tx).await;
                Err(e)
            }
        }
    }
}

async fn rollback_quietly(tx: Box<dyn MenuTransaction>) {
    if let Err(e) = tx.rollback().await {
        warn!("Rollback failed: {}", e);
    }
}

async fn delete_subtree(tx: &mut dyn MenuTransaction, target: &MenuNode) -> Result<usize, DomainError> {
    tx.lock_position(target.position).await?;

    // State may have moved between the pre-check and the lock
    let menu = tx
        .find_by_id(target.id)
        .await?
        .ok_or(DomainError::MenuNotFound(target.id))?;
    if menu.is_fixed {
        return Err(DomainError::FixedMenuProtected(menu.id));
    }

    let mut seen = HashSet::from([menu.id]);
    let mut descendants = Vec::new();
    collect_descendants(&mut *tx, menu.id, &mut seen, &mut descendants).await?;

    if let Some(fixed) = descendants.iter().find(|m| m.is_fixed) {
        return Err(DomainError::FixedDescendantProtected {
            id: menu.id,
            descendant_id: fixed.id,
        });
    }

    for descendant in &descendants {
        tx.delete(descendant.id).await?;
    }
    tx.delete(menu.id).await?;

    Ok(descendants.len() + 1)
}

/// Post-order: every node lands after its own descendants
fn collect_descendants<'a>(
    tx: &'a mut dyn MenuTransaction,
    parent_id: i64,
    seen: &'a mut HashSet<i64>,
    out: &'a mut Vec<MenuNode>,
) -> BoxFuture<'a, Result<(), DomainError>> {
    async move {
        let children = tx.find_children(parent_id).await?;
        for child in children {
            if !seen.insert(child.id) {
                warn!("Menu cycle detected at {}", child.id);
                continue;
            }
            collect_descendants(&mut *tx, child.id, &mut *seen, &mut *out).await?;
            out.push(child);
        }
        Ok(())
    }
    .boxed()
}
