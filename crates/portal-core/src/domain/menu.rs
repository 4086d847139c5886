// ============================================================================
// Portal Core - Menu Entity
// File: crates/portal-core/src/domain/menu.rs
// Description: Navigation menu node, position partition, insert payload
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::error::DomainError;

/// Menu position enumeration. Each position is an independent forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Header,
    Sidebar,
    Footer,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Header, Position::Sidebar, Position::Footer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Header => "header",
            Position::Sidebar => "sidebar",
            Position::Footer => "footer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "header" => Some(Position::Header),
            "sidebar" => Some(Position::Sidebar),
            "footer" => Some(Position::Footer),
            _ => None,
        }
    }

    /// Strict parse used at the request boundary
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Self::from_str(s).ok_or_else(|| DomainError::InvalidPosition(s.to_string()))
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Header
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted menu node. `children` only exists in the nested read view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: i64,
    pub label: String,
    pub slug: String,
    pub to: String,
    pub icon: String,
    pub parent_id: Option<i64>,
    pub position: Position,
    #[serde(rename = "order")]
    pub menu_order: i32,
    pub is_active: bool,
    pub is_fixed: bool,
    pub roles: Vec<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Pre-order walk over this node and its nested children
    pub fn preorder(&self) -> Vec<&MenuNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.preorder());
        }
        out
    }
}

/// Validated payload for inserting a new menu row
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMenu {
    #[validate(length(min = 1, max = 100, message = "Menu label must be between 1 and 100 characters"))]
    pub label: String,

    #[validate(length(max = 150, message = "Menu slug too long"))]
    pub slug: String,

    #[validate(length(max = 255, message = "Menu target too long"))]
    pub to: String,

    #[validate(length(max = 100, message = "Menu icon too long"))]
    pub icon: String,

    pub parent_id: Option<i64>,
    pub position: Position,
    pub menu_order: i32,
    pub is_active: bool,
    pub is_fixed: bool,
    pub roles: Vec<String>,
}

impl NewMenu {
    pub fn new(
        label: String,
        slug: Option<String>,
        to: String,
        icon: String,
        parent_id: Option<i64>,
        position: Position,
        menu_order: i32,
        is_active: bool,
        is_fixed: bool,
        roles: Vec<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let label = label.trim().to_string();
        let slug = match slug.map(|s| s.trim().to_string()) {
            Some(s) if !s.is_empty() => s,
            _ => portal_shared::utils::normalize_slug(&label),
        };

        let menu = Self {
            label,
            slug,
            to: to.trim().to_string(),
            icon: icon.trim().to_string(),
            parent_id,
            position,
            menu_order,
            is_active,
            is_fixed,
            roles,
        };

        menu.validate()?;
        Ok(menu)
    }

    /// Materialize the row the store would hold after insert
    pub fn into_node(self, id: i64, at: DateTime<Utc>) -> MenuNode {
        MenuNode {
            id,
            label: self.label,
            slug: self.slug,
            to: self.to,
            icon: self.icon,
            parent_id: self.parent_id,
            position: self.position,
            menu_order: self.menu_order,
            is_active: self.is_active,
            is_fixed: self.is_fixed,
            roles: self.roles,
            created_at: at,
            updated_at: at,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(label: &str, slug: Option<&str>) -> Result<NewMenu, validator::ValidationErrors> {
        NewMenu::new(
            label.to_string(),
            slug.map(str::to_string),
            "/profil".to_string(),
            "i-lucide-info".to_string(),
            None,
            Position::Header,
            1,
            true,
            false,
            vec!["public".to_string()],
        )
    }

    #[test]
    fn test_position_parse() {
        assert_eq!(Position::parse("header").unwrap(), Position::Header);
        assert_eq!(Position::parse("sidebar").unwrap(), Position::Sidebar);
        assert_eq!(Position::parse("footer").unwrap(), Position::Footer);
        assert!(matches!(
            Position::parse("Header"),
            Err(DomainError::InvalidPosition(_))
        ));
        assert!(Position::parse("").is_err());
    }

    #[test]
    fn test_create_menu_derives_slug() {
        let menu = draft("  Profil Organisasi ", None).unwrap();
        assert_eq!(menu.label, "Profil Organisasi");
        assert_eq!(menu.slug, "profil-organisasi");

        let menu = draft("Profil", Some("tentang-kami")).unwrap();
        assert_eq!(menu.slug, "tentang-kami");

        let menu = draft("Profil", Some("   ")).unwrap();
        assert_eq!(menu.slug, "profil");
    }

    #[test]
    fn test_create_menu_rejects_blank_label() {
        assert!(draft("   ", None).is_err());
        assert!(draft(&"x".repeat(101), None).is_err());
    }

    #[test]
    fn test_node_serializes_order_and_omits_empty_children() {
        let node = draft("Profil", None).unwrap().into_node(7, Utc::now());
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["order"], 1);
        assert_eq!(json["position"], "header");
        assert!(json.get("children").is_none());
        assert!(json.get("menu_order").is_none());
    }
}
