//! Flat menu rows to nested tree

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::MenuNode;

/// Nest flat rows of one position into their forest.
///
/// Sibling order follows input order. Rows whose parent is absent from the
/// input are dropped together with their descendants.
pub fn build_hierarchy(menus: Vec<MenuNode>) -> Vec<MenuNode> {
    if menus.is_empty() {
        return Vec::new();
    }

    let known: HashSet<i64> = menus.iter().map(|m| m.id).collect();
    let mut children_of: HashMap<i64, Vec<MenuNode>> = HashMap::new();
    let mut roots = Vec::new();

    for mut menu in menus {
        menu.children.clear();
        match menu.parent_id {
            None => roots.push(menu),
            Some(parent_id) if known.contains(&parent_id) => {
                children_of.entry(parent_id).or_default().push(menu);
            }
            Some(parent_id) => {
                debug!("Dropping orphan menu {} (parent {} not in set)", menu.id, parent_id);
            }
        }
    }

    roots
        .into_iter()
        .map(|root| attach_children(root, &mut children_of))
        .collect()
}

fn attach_children(mut menu: MenuNode, children_of: &mut HashMap<i64, Vec<MenuNode>>) -> MenuNode {
    if let Some(children) = children_of.remove(&menu.id) {
        menu.children = children
            .into_iter()
            .map(|child| attach_children(child, children_of))
            .collect();
    }
    menu
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Position;
    use chrono::Utc;

    fn node(id: i64, parent_id: Option<i64>, order: i32) -> MenuNode {
        MenuNode {
            id,
            label: format!("Menu {}", id),
            slug: format!("menu-{}", id),
            to: format!("/menu-{}", id),
            icon: String::new(),
            parent_id,
            position: Position::Header,
            menu_order: order,
            is_active: true,
            is_fixed: false,
            roles: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
            children: vec![],
        }
    }

    fn ids(menus: &[MenuNode]) -> Vec<i64> {
        menus.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(build_hierarchy(vec![]).is_empty());
    }

    #[test]
    fn test_roots_and_children_keep_input_order() {
        let tree = build_hierarchy(vec![
            node(1, None, 1),
            node(4, Some(1), 1),
            node(2, None, 2),
            node(3, Some(1), 2),
        ]);

        assert_eq!(ids(&tree), vec![1, 2]);
        assert_eq!(ids(&tree[0].children), vec![4, 3]);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_deep_nesting_when_child_listed_before_grandchild_parent() {
        // Grandchild appears before its own parent in the flat list
        let tree = build_hierarchy(vec![
            node(3, Some(2), 0),
            node(1, None, 1),
            node(2, Some(1), 2),
        ]);

        assert_eq!(ids(&tree), vec![1]);
        assert_eq!(ids(&tree[0].children), vec![2]);
        assert_eq!(ids(&tree[0].children[0].children), vec![3]);
    }

    #[test]
    fn test_orphans_are_dropped_with_descendants() {
        let tree = build_hierarchy(vec![
            node(1, None, 1),
            node(5, Some(99), 1),
            node(6, Some(5), 1),
            node(2, Some(1), 1),
        ]);

        let all: Vec<i64> = tree.iter().flat_map(|r| r.preorder()).map(|m| m.id).collect();
        assert_eq!(all, vec![1, 2]);
    }

    #[test]
    fn test_round_trip_preorder_is_permutation() {
        let input = vec![
            node(10, None, 1),
            node(11, Some(10), 1),
            node(12, Some(11), 1),
            node(13, Some(10), 2),
            node(20, None, 2),
            node(21, Some(20), 1),
        ];
        let tree = build_hierarchy(input.clone());

        let flat: Vec<&MenuNode> = tree.iter().flat_map(|r| r.preorder()).collect();
        assert_eq!(flat.len(), input.len());

        let mut seen = HashSet::new();
        for menu in &flat {
            if let Some(parent_id) = menu.parent_id {
                assert!(seen.contains(&parent_id), "parent {} after child {}", parent_id, menu.id);
            }
            seen.insert(menu.id);
        }

        let roots: HashSet<i64> = input.iter().filter(|m| m.is_root()).map(|m| m.id).collect();
        assert_eq!(ids(&tree).into_iter().collect::<HashSet<_>>(), roots);
    }

    #[test]
    fn test_self_parented_row_is_unreachable() {
        let tree = build_hierarchy(vec![node(1, None, 1), node(2, Some(2), 1)]);
        assert_eq!(ids(&tree), vec![1]);
        assert!(tree[0].children.is_empty());
    }
}
