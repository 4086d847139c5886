//! Initial navigation menus

use sqlx::PgPool;
use tracing::info;

use portal_core::domain::{NewMenu, Position};
use portal_core::error::DomainError;
use portal_core::repositories::MenuRepository;
use portal_shared::constants::DEFAULT_MENU_ROLES;

use super::postgres::PgMenuRepository;

// label, to, icon, order
const FIXED_HEADER_MENUS: [(&str, &str, &str, i32); 4] = [
    ("Beranda", "/", "i-lucide-home", 1),
    ("Berita", "/berita", "i-lucide-newspaper", 3),
    ("Agenda", "/agenda", "i-lucide-calendar", 4),
    ("Direktori", "/direktori", "i-lucide-map-pin", 5),
];

/// Fixed header anchors every portal starts with
pub fn default_menus() -> Result<Vec<NewMenu>, DomainError> {
    let roles: Vec<String> = DEFAULT_MENU_ROLES.iter().map(|r| r.to_string()).collect();

    FIXED_HEADER_MENUS
        .iter()
        .map(|(label, to, icon, order)| {
            NewMenu::new(
                label.to_string(),
                None,
                to.to_string(),
                icon.to_string(),
                None,
                Position::Header,
                *order,
                true,
                true,
                roles.clone(),
            )
            .map_err(DomainError::from)
        })
        .collect()
}

/// Insert the default menus when the table is empty. Returns rows inserted.
pub async fn seed_menus(pool: &PgPool) -> Result<usize, DomainError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
        .fetch_one(pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

    if count > 0 {
        info!("Menus already exist ({}), skipping seed", count);
        return Ok(0);
    }

    let menus = default_menus()?;
    let repo = PgMenuRepository::new(pool.clone());
    let mut tx = repo.begin().await?;
    for menu in &menus {
        tx.insert(menu).await?;
    }
    tx.commit().await?;

    info!("Seeded {} menus", menus.len());
    Ok(menus.len())
}
