// ============================================================================
// Portal Infrastructure - PostgreSQL Menu Repository
// File: crates/portal-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{debug, error};

use portal_core::domain::{MenuNode, NewMenu, Position};
use portal_core::error::DomainError;
use portal_core::repositories::{MenuRepository, MenuTransaction};

const MENU_COLUMNS: &str = r#"
    id, label, slug, "to", icon, parent_id, position, menu_order,
    is_active, is_fixed, roles, created_at, updated_at
"#;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: i64,
    pub label: String,
    pub slug: String,
    pub to: String,
    pub icon: String,
    pub parent_id: Option<i64>,
    pub position: String,
    pub menu_order: i32,
    pub is_active: bool,
    pub is_fixed: bool,
    pub roles: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuRow> for MenuNode {
    fn from(row: MenuRow) -> Self {
        MenuNode {
            id: row.id,
            label: row.label,
            slug: row.slug,
            to: row.to,
            icon: row.icon,
            parent_id: row.parent_id,
            position: Position::from_str(&row.position).unwrap_or_default(),
            menu_order: row.menu_order,
            is_active: row.is_active,
            is_fixed: row.is_fixed,
            roles: row.roles.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
            children: Vec::new(),
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<MenuNode>, DomainError> {
        let row: Option<MenuRow> =
            sqlx::query_as(&format!("SELECT {} FROM menus WHERE id = $1", MENU_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding menu by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_position(&self, position: Position) -> Result<Vec<MenuNode>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(&format!(
            "SELECT {} FROM menus WHERE position = $1 ORDER BY menu_order ASC, id ASC",
            MENU_COLUMNS
        ))
        .bind(position.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing menus by position", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn begin(&self) -> Result<Box<dyn MenuTransaction>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        Ok(Box::new(PgMenuTransaction { tx }))
    }
}

/// Open database transaction. Dropping it without commit rolls back.
pub struct PgMenuTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl MenuTransaction for PgMenuTransaction {
    async fn lock_position(&mut self, position: Position) -> Result<(), DomainError> {
        // Released automatically at commit or rollback
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("menus:{}", position.as_str()))
            .execute(&mut *self.tx)
            .await
            .map_err(|e| db_error("locking menu position", e))?;

        debug!("Acquired menu lock for {}", position);
        Ok(())
    }

    async fn insert(&mut self, menu: &NewMenu) -> Result<i64, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO menus (
                label, slug, "to", icon, parent_id, position, menu_order,
                is_active, is_fixed, roles, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(&menu.label)
        .bind(&menu.slug)
        .bind(&menu.to)
        .bind(&menu.icon)
        .bind(menu.parent_id)
        .bind(menu.position.as_str())
        .bind(menu.menu_order)
        .bind(menu.is_active)
        .bind(menu.is_fixed)
        .bind(Json(&menu.roles))
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| db_error("inserting menu", e))?;

        Ok(id)
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<MenuNode>, DomainError> {
        let row: Option<MenuRow> =
            sqlx::query_as(&format!("SELECT {} FROM menus WHERE id = $1", MENU_COLUMNS))
                .bind(id)
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(|e| db_error("finding menu by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_children(&mut self, parent_id: i64) -> Result<Vec<MenuNode>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(&format!(
            "SELECT {} FROM menus WHERE parent_id = $1 ORDER BY menu_order ASC, id ASC",
            MENU_COLUMNS
        ))
        .bind(parent_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| db_error("listing child menus", e))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn delete(&mut self, id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| db_error("deleting menu", e))?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| db_error("committing transaction", e))
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| db_error("rolling back transaction", e))
    }
}
