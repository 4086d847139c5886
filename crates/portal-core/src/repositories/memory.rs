//! In-memory menu repository.
//!
//! Transactions work on a snapshot of the table and publish it on commit, so
//! uncommitted writes are never visible. Concurrent writers are last-commit-wins.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::{MenuRepository, MenuTransaction};
use crate::domain::{MenuNode, NewMenu, Position};
use crate::error::DomainError;

/// Write counters, useful for asserting what a call touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub inserts: usize,
    pub deletes: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub position_locks: usize,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i64, MenuNode>,
    next_id: i64,
    fail_insert_label: Option<String>,
    stats: MemoryStats,
}

#[derive(Clone, Default)]
pub struct InMemoryMenuRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row outside any transaction (seeding)
    pub fn seed(&self, menu: NewMenu) -> i64 {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.rows.insert(id, menu.into_node(id, Utc::now()));
        id
    }

    /// Place a row with a chosen id, bypassing validation
    pub fn seed_node(&self, node: MenuNode) {
        let mut state = self.state.lock();
        state.next_id = state.next_id.max(node.id);
        state.rows.insert(node.id, node);
    }

    /// Make every insert of a row with this label fail
    pub fn fail_inserts_labelled(&self, label: &str) {
        self.state.lock().fail_insert_label = Some(label.to_string());
    }

    pub fn rows(&self) -> Vec<MenuNode> {
        self.state.lock().rows.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<MenuNode> {
        self.state.lock().rows.get(&id).cloned()
    }

    pub fn stats(&self) -> MemoryStats {
        self.state.lock().stats
    }
}

fn sorted(mut rows: Vec<MenuNode>) -> Vec<MenuNode> {
    rows.sort_by_key(|m| (m.menu_order, m.id));
    rows
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<MenuNode>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_position(&self, position: Position) -> Result<Vec<MenuNode>, DomainError> {
        let state = self.state.lock();
        Ok(sorted(
            state
                .rows
                .values()
                .filter(|m| m.position == position)
                .cloned()
                .collect(),
        ))
    }

    async fn begin(&self) -> Result<Box<dyn MenuTransaction>, DomainError> {
        let state = self.state.lock();
        Ok(Box::new(InMemoryTransaction {
            shared: self.state.clone(),
            rows: state.rows.clone(),
            next_id: state.next_id,
            fail_insert_label: state.fail_insert_label.clone(),
            stats: MemoryStats::default(),
        }))
    }
}

struct InMemoryTransaction {
    shared: Arc<Mutex<MemoryState>>,
    rows: BTreeMap<i64, MenuNode>,
    next_id: i64,
    fail_insert_label: Option<String>,
    stats: MemoryStats,
}

#[async_trait]
impl MenuTransaction for InMemoryTransaction {
    async fn lock_position(&mut self, _position: Position) -> Result<(), DomainError> {
        self.stats.position_locks += 1;
        Ok(())
    }

    async fn insert(&mut self, menu: &NewMenu) -> Result<i64, DomainError> {
        if self.fail_insert_label.as_deref() == Some(menu.label.as_str()) {
            return Err(DomainError::DatabaseError(format!(
                "insert rejected for label {}",
                menu.label
            )));
        }
        self.next_id += 1;
        let id = self.next_id;
        self.rows.insert(id, menu.clone().into_node(id, Utc::now()));
        self.stats.inserts += 1;
        Ok(id)
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<MenuNode>, DomainError> {
        Ok(self.rows.get(&id).cloned())
    }

    async fn find_children(&mut self, parent_id: i64) -> Result<Vec<MenuNode>, DomainError> {
        Ok(sorted(
            self.rows
                .values()
                .filter(|m| m.parent_id == Some(parent_id))
                .cloned()
                .collect(),
        ))
    }

    async fn delete(&mut self, id: i64) -> Result<(), DomainError> {
        if self.rows.remove(&id).is_some() {
            self.stats.deletes += 1;
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let this = *self;
        let mut state = this.shared.lock();
        state.rows = this.rows;
        state.next_id = this.next_id;
        state.stats.inserts += this.stats.inserts;
        state.stats.deletes += this.stats.deletes;
        state.stats.position_locks += this.stats.position_locks;
        state.stats.commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        let mut state = self.shared.lock();
        state.stats.position_locks += self.stats.position_locks;
        state.stats.rollbacks += 1;
        Ok(())
    }
}
