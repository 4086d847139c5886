// ============================================================================
// Portal Core - Menu Submission
// File: crates/portal-core/src/domain/submission.rs
// Description: Client-submitted menu tree and its polymorphic identifier
// ============================================================================

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::menu::{NewMenu, Position};

/// Identifier carried by a submitted node.
///
/// Resolved once at deserialization: integers (JSON numbers, whole floats,
/// numeric strings) name an existing row; any other non-empty string is a
/// client-side placeholder for a new row. Any other JSON value marks a new
/// row with no placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MenuKey {
    Existing(i64),
    Placeholder(String),
    #[default]
    Missing,
}

impl MenuKey {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return MenuKey::Missing;
        }
        match raw.parse::<i64>() {
            Ok(id) => MenuKey::Existing(id),
            Err(_) => MenuKey::Placeholder(raw.to_string()),
        }
    }

    pub fn existing(&self) -> Option<i64> {
        match self {
            MenuKey::Existing(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, MenuKey::Missing)
    }

    fn from_number(n: &serde_json::Number) -> Self {
        if let Some(id) = n.as_i64() {
            return MenuKey::Existing(id);
        }
        match n.as_f64() {
            // i64::MAX as f64 rounds up to 2^63, which does not fit
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                MenuKey::Existing(f as i64)
            }
            _ => MenuKey::Placeholder(n.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for MenuKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(MenuKey::from_number(&n)),
            Value::String(s) => Ok(MenuKey::parse(&s)),
            _ => Ok(MenuKey::Missing),
        }
    }
}

/// Accepts `["a","b"]` or the JSON-encoded string `"[\"a\",\"b\"]"`
fn deserialize_roles<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => serde_json::from_str(&s).map_err(de::Error::custom),
        other => serde_json::from_value(other).map_err(de::Error::custom),
    }
}

/// One node of a submitted menu tree.
///
/// `parentId`, `position` and `isDynamic` sent by the client are ignored: the
/// walk's parent context and the request position are authoritative.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSubmission {
    #[serde(default)]
    pub id: MenuKey,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub children: Vec<MenuSubmission>,
}

impl MenuSubmission {
    pub fn new(id: MenuKey, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    pub fn with_children(mut self, children: Vec<MenuSubmission>) -> Self {
        self.children = children;
        self
    }

    /// Insert payload for this node under the walk's parent context
    pub fn to_new_menu(
        &self,
        position: Position,
        parent_id: Option<i64>,
    ) -> Result<NewMenu, validator::ValidationErrors> {
        NewMenu::new(
            self.label.clone(),
            Some(self.slug.clone()),
            self.to.clone(),
            self.icon.clone(),
            parent_id,
            position,
            self.order,
            self.is_active,
            false,
            self.roles.clone(),
        )
    }

    /// Total number of nodes in this subtree
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(MenuSubmission::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(v: Value) -> MenuKey {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_key_resolution() {
        assert_eq!(key(json!(5)), MenuKey::Existing(5));
        assert_eq!(key(json!(5.0)), MenuKey::Existing(5));
        assert_eq!(key(json!("12")), MenuKey::Existing(12));
        assert_eq!(
            key(json!("menu-1700000000")),
            MenuKey::Placeholder("menu-1700000000".to_string())
        );
        assert_eq!(key(json!(null)), MenuKey::Missing);
        assert_eq!(key(json!("")), MenuKey::Missing);
        assert_eq!(key(json!(1.5)), MenuKey::Placeholder("1.5".to_string()));
    }

    #[test]
    fn test_key_from_other_json_values_is_missing() {
        assert_eq!(key(json!(true)), MenuKey::Missing);
        assert_eq!(key(json!([1, 2])), MenuKey::Missing);
        assert_eq!(key(json!({"id": 1})), MenuKey::Missing);

        let sub: MenuSubmission =
            serde_json::from_value(json!({"id": true, "label": "X"})).unwrap();
        assert_eq!(sub.id, MenuKey::Missing);
        assert_eq!(sub.label, "X");
    }

    #[test]
    fn test_key_beyond_i64_is_placeholder() {
        // 2^63 arrives as u64 and must not saturate to i64::MAX
        let big: Value = serde_json::from_str("9223372036854775808").unwrap();
        assert_eq!(key(big), MenuKey::Placeholder("9223372036854775808".to_string()));

        assert!(matches!(key(json!(9.3e18)), MenuKey::Placeholder(_)));
        assert_eq!(key(json!(-9.223372036854775808e18)), MenuKey::Existing(i64::MIN));
        assert_eq!(key(json!(i64::MAX)), MenuKey::Existing(i64::MAX));
    }

    #[test]
    fn test_submission_defaults_and_ignored_fields() {
        let sub: MenuSubmission = serde_json::from_value(json!({
            "label": "Profil",
            "parentId": "menu-9",
            "position": "footer",
            "isDynamic": true
        }))
        .unwrap();

        assert_eq!(sub.id, MenuKey::Missing);
        assert!(!sub.is_active);
        assert!(!sub.is_fixed);
        assert!(sub.roles.is_empty());
        assert!(sub.children.is_empty());
    }

    #[test]
    fn test_roles_accept_array_or_encoded_string() {
        let from_array: MenuSubmission =
            serde_json::from_value(json!({"roles": ["member", "public"]})).unwrap();
        assert_eq!(from_array.roles, vec!["member", "public"]);

        let from_string: MenuSubmission =
            serde_json::from_value(json!({"roles": "[\"admin_pusat\",\"member\"]"})).unwrap();
        assert_eq!(from_string.roles, vec!["admin_pusat", "member"]);

        let broken: Result<MenuSubmission, _> =
            serde_json::from_value(json!({"roles": "admin_pusat"}));
        assert!(broken.is_err());
    }

    #[test]
    fn test_nested_children_and_count() {
        let sub: MenuSubmission = serde_json::from_value(json!({
            "id": "menu-a",
            "label": "Root",
            "children": [
                {"id": 3, "label": "Existing"},
                {"id": "menu-b", "label": "New", "children": [{"label": "Leaf"}]}
            ]
        }))
        .unwrap();

        assert_eq!(sub.count(), 4);
        assert_eq!(sub.children[0].id, MenuKey::Existing(3));
        assert_eq!(sub.children[1].children[0].id, MenuKey::Missing);
    }

    #[test]
    fn test_new_menu_is_never_fixed() {
        let sub = MenuSubmission::new(MenuKey::Placeholder("menu-x".into()), "Galeri").fixed();
        let draft = sub.to_new_menu(Position::Sidebar, Some(4)).unwrap();
        assert!(!draft.is_fixed);
        assert_eq!(draft.parent_id, Some(4));
        assert_eq!(draft.position, Position::Sidebar);
        assert_eq!(draft.slug, "galeri");
    }
}
