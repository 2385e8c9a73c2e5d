//! Structural diff and in-place patch of element trees.
//!
//! [`compute_diff`] compares two versions of the same element, pairing
//! children by [`Identity`], and returns an [`ElementDiff`]. [`apply_diff`]
//! replays that diff onto a copy of the "before" tree, restoring the
//! attributes, children and child order of the "after" tree.

mod generator;
mod patch;

pub use generator::compute_diff;
pub use patch::apply_diff;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use bitflags::bitflags;

use crate::node::{Element, Identity};

bitflags! {
    /// Categories of change carried by an [`ElementDiff`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChangeKind: u8 {
        /// No change.
        const NONE = 0;
        /// Children present only in the "after" tree.
        const ADDED_ELEMENTS = 1;
        /// Children present only in the "before" tree.
        const REMOVED_ELEMENTS = 1 << 1;
        /// Children present in both trees with differing subtrees.
        const CHANGED_ELEMENTS = 1 << 2;
        /// Attributes present only in the "after" tree.
        const ADDED_ATTRIBUTES = 1 << 3;
        /// Attributes present only in the "before" tree.
        const REMOVED_ATTRIBUTES = 1 << 4;
        /// Attributes whose value changed.
        const CHANGED_ATTRIBUTES = 1 << 5;
        /// Any change to the child list.
        const ELEMENTS = Self::ADDED_ELEMENTS.bits()
            | Self::REMOVED_ELEMENTS.bits()
            | Self::CHANGED_ELEMENTS.bits();
        /// Any change to the attribute map.
        const ATTRIBUTES = Self::ADDED_ATTRIBUTES.bits()
            | Self::REMOVED_ATTRIBUTES.bits()
            | Self::CHANGED_ATTRIBUTES.bits();
    }
}

/// The changes that turn one element into another element with the same
/// identity.
///
/// Produced by [`compute_diff`] and consumed by [`apply_diff`]. Added
/// subtrees are owned by the diff and move into the target when it is
/// applied; removed subtrees are kept only so their identities can be found
/// in the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDiff {
    /// Identity of the element this diff applies to.
    pub(crate) name: Identity,
    /// Children that exist only in the "after" tree.
    pub(crate) added_elements: Vec<Element>,
    /// Children that exist only in the "before" tree.
    pub(crate) removed_elements: Vec<Element>,
    /// Nested diffs for children present in both trees, keyed by identity.
    pub(crate) changed_elements: BTreeMap<Identity, ElementDiff>,
    /// Attributes that exist only in the "after" tree.
    pub(crate) added_attributes: BTreeMap<String, String>,
    /// Attribute keys that exist only in the "before" tree.
    pub(crate) removed_attributes: BTreeSet<String>,
    /// New values of attributes present in both trees.
    pub(crate) changed_attributes: BTreeMap<String, String>,
    /// Final index of every child of the "after" tree. Left empty when the
    /// trees were identical.
    pub(crate) element_order: BTreeMap<Identity, usize>,
}

impl ElementDiff {
    /// Creates an empty diff for the element with the given identity.
    pub fn new(name: Identity) -> Self {
        ElementDiff {
            name,
            ..Default::default()
        }
    }

    /// Returns the identity of the element this diff applies to.
    pub fn name(&self) -> &Identity {
        &self.name
    }

    /// Returns the children added by this diff.
    pub fn added_elements(&self) -> &[Element] {
        &self.added_elements
    }

    /// Returns the children removed by this diff.
    pub fn removed_elements(&self) -> &[Element] {
        &self.removed_elements
    }

    /// Returns the nested diffs of changed children.
    pub fn changed_elements(&self) -> &BTreeMap<Identity, ElementDiff> {
        &self.changed_elements
    }

    /// Returns the attributes added by this diff.
    pub fn added_attributes(&self) -> &BTreeMap<String, String> {
        &self.added_attributes
    }

    /// Returns the attribute keys removed by this diff.
    pub fn removed_attributes(&self) -> &BTreeSet<String> {
        &self.removed_attributes
    }

    /// Returns the new values of changed attributes.
    pub fn changed_attributes(&self) -> &BTreeMap<String, String> {
        &self.changed_attributes
    }

    /// Returns the recorded final position of each child.
    pub fn element_order(&self) -> &BTreeMap<Identity, usize> {
        &self.element_order
    }

    /// Returns which categories of change this diff carries at its own level.
    pub fn change_kinds(&self) -> ChangeKind {
        let mut kinds = ChangeKind::NONE;
        kinds.set(ChangeKind::ADDED_ELEMENTS, !self.added_elements.is_empty());
        kinds.set(ChangeKind::REMOVED_ELEMENTS, !self.removed_elements.is_empty());
        kinds.set(ChangeKind::CHANGED_ELEMENTS, !self.changed_elements.is_empty());
        kinds.set(ChangeKind::ADDED_ATTRIBUTES, !self.added_attributes.is_empty());
        kinds.set(
            ChangeKind::REMOVED_ATTRIBUTES,
            !self.removed_attributes.is_empty(),
        );
        kinds.set(
            ChangeKind::CHANGED_ATTRIBUTES,
            !self.changed_attributes.is_empty(),
        );
        kinds
    }

    /// Returns true if applying the diff would leave the target unchanged.
    ///
    /// A diff whose only content is a recorded child order is not empty:
    /// applying it still reorders the children.
    pub fn is_empty(&self) -> bool {
        self.change_kinds().is_empty() && self.element_order.is_empty()
    }
}

impl fmt::Display for ElementDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NAME: {}", self.name)?;
        writeln!(f, "ADDED: {:?}", self.added_attributes)?;
        writeln!(f, "REMOVED: {:?}", self.removed_attributes)?;
        writeln!(f, "CHANGED: {:?}", self.changed_attributes)?;
        writeln!(f, "NEW CHILDREN:")?;
        for added in &self.added_elements {
            write!(f, "{}", added)?;
        }
        writeln!(f, "DEAD CHILDREN:")?;
        for removed in &self.removed_elements {
            write!(f, "{}", removed)?;
        }
        writeln!(f, "CHANGED CHILDREN:")?;
        for changed in self.changed_elements.values() {
            write!(f, "{}", changed)?;
        }
        writeln!(f)
    }
}
