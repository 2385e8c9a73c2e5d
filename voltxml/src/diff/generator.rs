//! Diff generation.
//!
//! Children of the two trees are paired by identity. Identities present on
//! one side only become added or removed subtrees; identities present on
//! both sides are diffed recursively. The final position of every child of
//! the "after" tree is recorded so a patch can restore sibling order.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::node::{Element, Identity};

use super::ElementDiff;

/// Computes the diff that turns `before` into `after`.
///
/// Returns `None` when the two roots have different identities: they are not
/// versions of the same element, and the caller should replace `before`
/// wholesale. Identical trees produce an empty diff.
///
/// If siblings share an identity only the first of them is paired, and the
/// result is unspecified.
pub fn compute_diff(before: &Element, after: &Element) -> Option<ElementDiff> {
    let name = before.unique_name();
    let after_name = after.unique_name();
    if name != after_name {
        debug!(before = %name, after = %after_name, "root identities differ, no diff");
        return None;
    }

    let diff = diff_matched(name, before, after);
    debug!(
        identity = %diff.name,
        kinds = ?diff.change_kinds(),
        "computed element diff"
    );
    Some(diff)
}

/// Diffs two elements already known to share `name` as identity.
fn diff_matched(name: Identity, before: &Element, after: &Element) -> ElementDiff {
    let mut result = ElementDiff::new(name);
    if before.to_min_string() == after.to_min_string() {
        return result;
    }

    diff_attributes(before.attributes(), after.attributes(), &mut result);

    let before_ids: Vec<Identity> = before.children().iter().map(Element::unique_name).collect();
    let after_ids: Vec<Identity> = after.children().iter().map(Element::unique_name).collect();
    let before_index = first_positions(&before_ids);
    let after_index = first_positions(&after_ids);

    for (index, id) in after_ids.iter().enumerate() {
        result.element_order.insert(id.clone(), index);
    }

    let mut common: Vec<(&Identity, usize, usize)> = Vec::new();
    for (index, (child, id)) in before.children().iter().zip(&before_ids).enumerate() {
        match after_index.get(id) {
            None => result.removed_elements.push(child.clone()),
            Some(&after_pos) if before_index.get(id) == Some(&index) => {
                common.push((id, index, after_pos));
            }
            Some(_) => {}
        }
    }
    for (child, id) in after.children().iter().zip(&after_ids) {
        if !before_index.contains_key(id) {
            result.added_elements.push(child.clone());
        }
    }

    for (id, before_pos, after_pos) in common {
        let child_diff = diff_matched(
            id.clone(),
            &before.children()[before_pos],
            &after.children()[after_pos],
        );
        if !child_diff.is_empty() {
            result.changed_elements.insert(id.clone(), child_diff);
        }
    }

    trace!(
        identity = %result.name,
        added = result.added_elements.len(),
        removed = result.removed_elements.len(),
        changed = result.changed_elements.len(),
        "diffed element"
    );
    result
}

/// Classifies every attribute key as removed, changed or added.
fn diff_attributes(
    before: &BTreeMap<String, String>,
    after: &BTreeMap<String, String>,
    result: &mut ElementDiff,
) {
    for (key, old_value) in before {
        match after.get(key) {
            None => {
                result.removed_attributes.insert(key.clone());
            }
            Some(new_value) if new_value != old_value => {
                result
                    .changed_attributes
                    .insert(key.clone(), new_value.clone());
            }
            Some(_) => {}
        }
    }
    for (key, value) in after {
        if !before.contains_key(key) {
            result.added_attributes.insert(key.clone(), value.clone());
        }
    }
}

/// Maps each identity to the index of its first occurrence.
fn first_positions(ids: &[Identity]) -> FxHashMap<&Identity, usize> {
    let mut positions = FxHashMap::default();
    for (index, id) in ids.iter().enumerate() {
        positions.entry(id).or_insert(index);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, ty: &str) -> Element {
        Element::new("column")
            .with_attribute("name", name)
            .with_attribute("type", ty)
    }

    fn table(name: &str, columns: Vec<Element>) -> Element {
        columns
            .into_iter()
            .fold(Element::new("table").with_attribute("name", name), |t, c| {
                t.with_child(c)
            })
    }

    fn identities(elements: &[Element]) -> Vec<String> {
        elements
            .iter()
            .map(|e| e.unique_name().into_string())
            .collect()
    }

    #[test]
    fn test_different_roots_have_no_diff() {
        let t = table("T", vec![]);
        let u = table("U", vec![]);
        assert!(compute_diff(&t, &u).is_none());
    }

    #[test]
    fn test_identical_trees_give_empty_diff() {
        let t = table("T", vec![column("x", "int"), column("y", "int")]);
        let diff = compute_diff(&t, &t.duplicate()).unwrap();
        assert!(diff.is_empty());
        assert!(diff.element_order().is_empty());
        assert_eq!(diff.name(), "tableT");
    }

    #[test]
    fn test_attribute_delta() {
        let before = Element::new("e")
            .with_attribute("name", "n")
            .with_attribute("a", "1")
            .with_attribute("b", "2");
        let after = Element::new("e")
            .with_attribute("name", "n")
            .with_attribute("b", "3")
            .with_attribute("c", "4");
        let diff = compute_diff(&before, &after).unwrap();

        assert_eq!(
            diff.removed_attributes().iter().collect::<Vec<_>>(),
            vec!["a"]
        );
        assert_eq!(diff.changed_attributes().get("b").map(String::as_str), Some("3"));
        assert_eq!(diff.changed_attributes().len(), 1);
        assert_eq!(diff.added_attributes().get("c").map(String::as_str), Some("4"));
        assert_eq!(diff.added_attributes().len(), 1);
        assert!(diff.changed_elements().is_empty());
    }

    #[test]
    fn test_changed_and_added_column() {
        let before = table("T", vec![column("x", "int")]);
        let after = table("T", vec![column("x", "bigint"), column("y", "int")]);
        let diff = compute_diff(&before, &after).unwrap();

        assert!(diff.removed_elements().is_empty());
        assert_eq!(identities(diff.added_elements()), vec!["columny"]);
        assert_eq!(diff.changed_elements().len(), 1);

        let x = &diff.changed_elements()["columnx"];
        assert_eq!(x.name(), "columnx");
        assert_eq!(
            x.changed_attributes().get("type").map(String::as_str),
            Some("bigint")
        );
        assert!(x.added_attributes().is_empty());
        assert!(x.removed_attributes().is_empty());

        assert_eq!(diff.element_order().get("columnx"), Some(&0));
        assert_eq!(diff.element_order().get("columny"), Some(&1));
    }

    #[test]
    fn test_unchanged_child_is_not_recorded() {
        let before = table("T", vec![column("x", "int"), column("y", "int")]);
        let after = table("T", vec![column("x", "int"), column("y", "float")]);
        let diff = compute_diff(&before, &after).unwrap();
        let changed: Vec<&str> = diff.changed_elements().keys().map(|k| k.as_str()).collect();
        assert_eq!(changed, vec!["columny"]);
    }

    #[test]
    fn test_unnamed_child_change_is_remove_and_add() {
        let old = Element::new("constraint").with_attribute("type", "UNIQUE");
        let new = Element::new("constraint").with_attribute("type", "PRIMARY_KEY");
        let before = table("T", vec![old.clone()]);
        let after = table("T", vec![new.clone()]);
        let diff = compute_diff(&before, &after).unwrap();

        assert_eq!(diff.removed_elements(), &[old]);
        assert_eq!(diff.added_elements(), &[new]);
        assert!(diff.changed_elements().is_empty());
    }

    #[test]
    fn test_nested_reorder_is_recorded() {
        let before = Element::new("schema").with_attribute("name", "s").with_child(table(
            "T",
            vec![column("x", "int"), column("y", "int")],
        ));
        let after = Element::new("schema").with_attribute("name", "s").with_child(table(
            "T",
            vec![column("y", "int"), column("x", "int")],
        ));
        let diff = compute_diff(&before, &after).unwrap();
        let t = &diff.changed_elements()["tableT"];
        assert_eq!(t.change_kinds(), crate::diff::ChangeKind::NONE);
        assert_eq!(t.element_order().get("columny"), Some(&0));
        assert_eq!(t.element_order().get("columnx"), Some(&1));
    }

    #[test]
    fn test_add_remove_symmetry() {
        let a = table("T", vec![column("x", "int"), column("y", "int")]);
        let b = table("T", vec![column("y", "int"), column("z", "int")]);
        let forward = compute_diff(&a, &b).unwrap();
        let backward = compute_diff(&b, &a).unwrap();
        assert_eq!(
            identities(forward.added_elements()),
            identities(backward.removed_elements())
        );
        assert_eq!(
            identities(forward.removed_elements()),
            identities(backward.added_elements())
        );
    }

    #[test]
    fn test_diff_does_not_mutate_inputs() {
        let before = table("T", vec![column("x", "int")]);
        let after = table("T", vec![column("y", "int")]);
        let (b, a) = (before.clone(), after.clone());
        let _ = compute_diff(&before, &after);
        assert_eq!(before, b);
        assert_eq!(after, a);
    }
}
