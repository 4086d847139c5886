use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use portal_api::{build_router, AppState};
use portal_core::repositories::MenuRepository;
use portal_core::services::MenuService;
use portal_infrastructure::database::{connection, seeder, PgMenuRepository};
use portal_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    portal_shared::telemetry::init_telemetry();

    info!("Portal server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool = connection::create_pool(&config.database).await?;
    info!("Database connection established.");

    if config.database.run_migrations {
        connection::run_migrations(&pool).await?;
    }

    if config.database.seed {
        seeder::seed_menus(&pool).await?;
    }

    // Create App State
    let menu_repo: Arc<dyn MenuRepository> = Arc::new(PgMenuRepository::new(pool));
    let state = AppState {
        menu_service: Arc::new(MenuService::new(menu_repo)),
        config: config.clone(),
    };

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
