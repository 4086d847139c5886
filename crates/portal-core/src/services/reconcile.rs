// ============================================================================
// Portal Core - Menu Tree Reconciliation
// File: crates/portal-core/src/services/reconcile.rs
// ============================================================================
//! Walks a submitted menu forest inside a transaction, inserting only new
//! nodes and resolving parent links through an identifier map.

use std::collections::HashMap;

use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use crate::domain::{MenuKey, MenuSubmission, Position};
use crate::error::DomainError;
use crate::repositories::MenuTransaction;

/// Submitted identifier to persisted id, built during one walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    entries: HashMap<MenuKey, i64>,
}

impl IdMap {
    pub fn record(&mut self, key: MenuKey, id: i64) {
        if !key.is_missing() {
            self.entries.insert(key, id);
        }
    }

    pub fn resolve(&self, key: &MenuKey) -> Option<i64> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one reconciliation walk
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub inserted: usize,
    pub id_map: IdMap,
}

/// Reject the submission before any write if a node that would be inserted
/// fails field validation.
pub fn validate_submission(menus: &[MenuSubmission], position: Position) -> Result<(), DomainError> {
    for menu in menus {
        if !menu.is_fixed && menu.id.existing().is_none() {
            menu.to_new_menu(position, None).map_err(|e| {
                DomainError::ValidationError(format!("menu {:?}: {}", menu.label, e))
            })?;
        }
        validate_submission(&menu.children, position)?;
    }
    Ok(())
}

/// Lock the position and reconcile `menus` as its forest.
///
/// Never commits or rolls back; the caller owns the transaction outcome.
pub async fn reconcile_forest(
    tx: &mut dyn MenuTransaction,
    position: Position,
    menus: &[MenuSubmission],
) -> Result<Reconciled, DomainError> {
    tx.lock_position(position).await?;

    let mut outcome = Reconciled::default();
    walk(tx, menus, None, position, &mut outcome).await?;
    Ok(outcome)
}

fn walk<'a>(
    tx: &'a mut dyn MenuTransaction,
    menus: &'a [MenuSubmission],
    parent_id: Option<i64>,
    position: Position,
    outcome: &'a mut Reconciled,
) -> BoxFuture<'a, Result<(), DomainError>> {
    async move {
        for menu in menus {
            let context = if menu.is_fixed {
                // Anchor only: children link to it when its id is known
                let id = menu.id.existing();
                if let Some(id) = id {
                    outcome.id_map.record(menu.id.clone(), id);
                }
                id
            } else if let Some(id) = menu.id.existing() {
                outcome.id_map.record(menu.id.clone(), id);
                Some(id)
            } else {
                let draft = menu.to_new_menu(position, parent_id)?;
                let id = tx.insert(&draft).await?;
                debug!("Inserted menu {} ({:?}) under {:?}", id, menu.id, parent_id);
                outcome.inserted += 1;
                outcome.id_map.record(menu.id.clone(), id);
                Some(id)
            };

            if !menu.children.is_empty() {
                walk(&mut *tx, &menu.children, context, position, &mut *outcome).await?;
            }
        }
        Ok(())
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryMenuRepository, MenuRepository};

    fn placeholder(token: &str, label: &str) -> MenuSubmission {
        MenuSubmission::new(MenuKey::Placeholder(token.to_string()), label)
    }

    #[tokio::test]
    async fn test_placeholders_map_to_assigned_ids() {
        let repo = InMemoryMenuRepository::new();
        let mut tx = repo.begin().await.unwrap();

        let forest = vec![placeholder("menu-a", "A")
            .with_children(vec![placeholder("menu-b", "B"), MenuSubmission::new(MenuKey::Missing, "C")])];

        let outcome = reconcile_forest(tx.as_mut(), Position::Header, &forest).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(outcome.inserted, 3);
        // Missing identifiers never enter the map
        assert_eq!(outcome.id_map.len(), 2);

        let a = outcome.id_map.resolve(&MenuKey::Placeholder("menu-a".into())).unwrap();
        let b = outcome.id_map.resolve(&MenuKey::Placeholder("menu-b".into())).unwrap();
        assert_eq!(repo.get(b).unwrap().parent_id, Some(a));
        assert_eq!(repo.stats().position_locks, 1);
    }

    #[tokio::test]
    async fn test_fixed_node_without_numeric_id_leaves_children_at_root() {
        let repo = InMemoryMenuRepository::new();
        let mut tx = repo.begin().await.unwrap();

        let forest = vec![placeholder("fixed-x", "Fixed")
            .fixed()
            .with_children(vec![placeholder("menu-c", "Child")])];

        let outcome = reconcile_forest(tx.as_mut(), Position::Footer, &forest).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(outcome.inserted, 1);
        assert!(outcome.id_map.resolve(&MenuKey::Placeholder("fixed-x".into())).is_none());

        let rows = repo.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Child");
        assert_eq!(rows[0].parent_id, None);
        assert_eq!(rows[0].position, Position::Footer);
    }

    #[test]
    fn test_validate_submission_skips_existing_and_fixed() {
        let forest = vec![
            MenuSubmission::new(MenuKey::Existing(3), ""),
            MenuSubmission::new(MenuKey::Existing(4), "").fixed(),
            placeholder("menu-ok", "Valid"),
        ];
        assert!(validate_submission(&forest, Position::Header).is_ok());
    }

    #[test]
    fn test_validate_submission_reaches_nested_new_nodes() {
        let forest = vec![MenuSubmission::new(MenuKey::Existing(3), "Root")
            .with_children(vec![placeholder("menu-bad", "   ")])];
        assert!(matches!(
            validate_submission(&forest, Position::Header),
            Err(DomainError::ValidationError(_))
        ));
    }
}
