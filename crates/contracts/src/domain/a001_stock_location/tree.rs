use super::aggregate::StockLocationId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Row of the `stock/location/tree/` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTreeEntry {
    pub pk: StockLocationId,
    pub name: String,
    #[serde(default)]
    pub parent: Option<StockLocationId>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub structural: bool,
    #[serde(default)]
    pub sublocations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTreeNode {
    pub entry: LocationTreeEntry,
    pub children: Vec<LocationTreeNode>,
}

/// Builds the location forest.
///
/// Children are grouped by parent first; an entry whose parent is missing
/// from the list becomes a root. Siblings are sorted by name, case-insensitive.
pub fn build_location_tree(entries: Vec<LocationTreeEntry>) -> Vec<LocationTreeNode> {
    if entries.is_empty() {
        return vec![];
    }

    let existing: HashSet<StockLocationId> = entries.iter().map(|e| e.pk).collect();

    let mut children_map: HashMap<Option<StockLocationId>, Vec<LocationTreeEntry>> =
        HashMap::new();
    for entry in entries {
        let parent = entry.parent.filter(|p| existing.contains(p) && *p != entry.pk);
        children_map.entry(parent).or_default().push(entry);
    }

    fn build_node(
        entry: LocationTreeEntry,
        children_map: &HashMap<Option<StockLocationId>, Vec<LocationTreeEntry>>,
        visiting: &mut HashSet<StockLocationId>,
    ) -> LocationTreeNode {
        // a parent cycle in bad data must not recurse forever
        visiting.insert(entry.pk);
        let mut children: Vec<LocationTreeNode> = children_map
            .get(&Some(entry.pk))
            .map(|kids| {
                kids.iter()
                    .filter(|kid| !visiting.contains(&kid.pk))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
            .into_iter()
            .map(|kid| build_node(kid, children_map, visiting))
            .collect();
        sort_nodes(&mut children);
        visiting.remove(&entry.pk);
        LocationTreeNode { entry, children }
    }

    let mut visiting = HashSet::new();
    let mut roots: Vec<LocationTreeNode> = children_map
        .get(&None)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|entry| build_node(entry, &children_map, &mut visiting))
        .collect();
    sort_nodes(&mut roots);
    roots
}

fn sort_nodes(nodes: &mut [LocationTreeNode]) {
    nodes.sort_by(|a, b| {
        a.entry
            .name
            .to_lowercase()
            .cmp(&b.entry.name.to_lowercase())
    });
}

/// Chain of pks from a root down to `target`, inclusive. Empty if not found.
pub fn path_to(nodes: &[LocationTreeNode], target: StockLocationId) -> Vec<StockLocationId> {
    for node in nodes {
        if node.entry.pk == target {
            return vec![target];
        }
        let sub = path_to(&node.children, target);
        if !sub.is_empty() {
            let mut path = vec![node.entry.pk];
            path.extend(sub);
            return path;
        }
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pk: i64, name: &str, parent: Option<i64>) -> LocationTreeEntry {
        LocationTreeEntry {
            pk: StockLocationId(pk),
            name: name.to_string(),
            parent: parent.map(StockLocationId),
            icon: None,
            structural: false,
            sublocations: 0,
        }
    }

    #[test]
    fn test_builds_nested_tree_sorted_by_name() {
        let tree = build_location_tree(vec![
            entry(3, "shelf b", Some(1)),
            entry(1, "Warehouse", None),
            entry(2, "Shelf A", Some(1)),
            entry(4, "Annex", None),
        ]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].entry.name, "Annex");
        assert_eq!(tree[1].entry.name, "Warehouse");
        let names: Vec<&str> = tree[1].children.iter().map(|n| n.entry.name.as_str()).collect();
        assert_eq!(names, vec!["Shelf A", "shelf b"]);
    }

    #[test]
    fn test_orphans_become_roots() {
        let tree = build_location_tree(vec![entry(5, "Orphan", Some(99)), entry(1, "Top", None)]);
        assert_eq!(tree.len(), 2);
        assert!(tree.iter().any(|n| n.entry.name == "Orphan"));
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let tree = build_location_tree(vec![
            entry(1, "Root", None),
            entry(2, "A", Some(3)),
            entry(3, "B", Some(2)),
        ]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_path_to_target() {
        let tree = build_location_tree(vec![
            entry(1, "Warehouse", None),
            entry(2, "Room", Some(1)),
            entry(3, "Bin", Some(2)),
        ]);
        assert_eq!(
            path_to(&tree, StockLocationId(3)),
            vec![StockLocationId(1), StockLocationId(2), StockLocationId(3)]
        );
        assert!(path_to(&tree, StockLocationId(42)).is_empty());
    }
}
