//! # Portal Infrastructure
//! 
//! PostgreSQL implementations of the menu ports (adapters).

pub mod database;

pub use database::{create_pool, run_migrations, seed_menus, PgMenuRepository};
