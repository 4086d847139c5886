//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod postgres;
pub mod seeder;

pub use connection::{create_pool, run_migrations};
pub use postgres::PgMenuRepository;
pub use seeder::seed_menus;
