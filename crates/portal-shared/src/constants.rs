//! Application-wide constants

pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_MENU_POSITION: &str = "header";

/// Roles granted to the seeded anchor menus.
pub const DEFAULT_MENU_ROLES: [&str; 5] = [
    "public",
    "member",
    "admin_cabang",
    "admin_wilayah",
    "admin_pusat",
];
