//! Patch application.
//!
//! Replays an [`ElementDiff`] onto an element in place: attributes first,
//! then removals, additions and nested changes of children, and finally a
//! reordering of the children into the recorded order.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::node::{Element, Identity};

use super::ElementDiff;

/// Applies `diff` to `target`, turning it into the "after" tree the diff was
/// computed against.
///
/// `target` must have the identity the diff was computed for; otherwise
/// nothing is modified and [`Error::IdentityMismatch`] is returned. Added
/// subtrees are moved out of the diff into the target.
///
/// An error from a nested change or from the reorder step means the diff
/// does not describe this tree, and `target` may be partially patched.
pub fn apply_diff(target: &mut Element, diff: ElementDiff) -> Result<()> {
    let actual = target.unique_name();
    if actual != diff.name {
        return Err(Error::IdentityMismatch {
            expected: diff.name,
            actual,
        });
    }
    apply_matched(target, diff)
}

fn apply_matched(target: &mut Element, diff: ElementDiff) -> Result<()> {
    let ElementDiff {
        name,
        added_elements,
        removed_elements,
        changed_elements,
        added_attributes,
        removed_attributes,
        changed_attributes,
        element_order,
    } = diff;

    let attributes = target.attributes_mut();
    attributes.extend(added_attributes);
    for key in &removed_attributes {
        attributes.remove(key);
    }
    attributes.extend(changed_attributes);

    for removed in &removed_elements {
        let identity = removed.unique_name();
        match target.position_of(&identity) {
            Some(index) => {
                target.children_mut().remove(index);
            }
            None => warn!(parent = %name, child = %identity, "removed child already absent"),
        }
    }

    target.children_mut().extend(added_elements);

    for (identity, child_diff) in changed_elements {
        let child = target
            .find_child_mut(&identity)
            .ok_or_else(|| Error::MissingChild(identity.clone()))?;
        apply_matched(child, child_diff)?;
    }

    reorder(target.children_mut(), &element_order)?;
    debug!(identity = %name, children = target.children().len(), "applied element diff");
    Ok(())
}

/// Moves every child to its recorded index.
///
/// All indices are resolved before anything moves, so a corrupt order
/// leaves the children untouched. Children that collide on one index (only
/// possible with duplicate sibling identities) fill the remaining free
/// slots in their current order.
fn reorder(children: &mut Vec<Element>, order: &BTreeMap<Identity, usize>) -> Result<()> {
    // Identical trees record no order.
    if order.is_empty() {
        return Ok(());
    }
    if children.len() != order.len() {
        return Err(Error::ChildCountMismatch {
            expected: order.len(),
            actual: children.len(),
        });
    }

    let len = children.len();
    let positions = children
        .iter()
        .map(|child| {
            let identity = child.unique_name();
            match order.get(&identity) {
                Some(&pos) if pos < len => Ok(pos),
                _ => Err(Error::CorruptOrder(identity)),
            }
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut slots: Vec<Option<Element>> = std::iter::repeat_with(|| None).take(len).collect();
    let mut displaced = Vec::new();
    for (child, pos) in children.drain(..).zip(positions) {
        let slot = &mut slots[pos];
        if slot.is_none() {
            *slot = Some(child);
        } else {
            displaced.push(child);
        }
    }

    let mut displaced = displaced.into_iter();
    children.extend(
        slots
            .into_iter()
            .filter_map(|slot| slot.or_else(|| displaced.next())),
    );
    Ok(())
}

impl Element {
    /// Applies a diff to this element in place. See [`apply_diff`].
    pub fn apply_diff(&mut self, diff: ElementDiff) -> Result<()> {
        apply_diff(self, diff)
    }
}
