use std::sync::Arc;

use portal_core::services::MenuService;
use portal_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<MenuService>,
    pub config: AppConfig,
}
