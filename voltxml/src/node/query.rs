//! Read-only searches over element trees.

use super::{Element, Identity};
use crate::constants::DEFAULT_NAME;

impl Element {
    /// Returns every descendant labeled `label`, in document order.
    ///
    /// The element itself is not considered.
    pub fn find_children_recursively(&self, label: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(label, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, label: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == label {
                found.push(child);
            }
            child.collect_descendants(label, found);
        }
    }

    /// Returns the direct children labeled `label`, in order.
    pub fn find_children(&self, label: &str) -> Vec<&Element> {
        self.children.iter().filter(|c| c.name == label).collect()
    }

    /// Finds the first direct child with the given identity.
    pub fn find_child(&self, identity: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.unique_name() == identity)
    }

    /// Finds the first direct child with the given identity, mutably.
    pub fn find_child_mut(&mut self, identity: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .find(|c| c.unique_name() == identity)
    }

    /// Returns the index of the first direct child with the given identity.
    pub fn position_of(&self, identity: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|c| c.unique_name() == identity)
    }

    /// Finds a direct child by label and `name` attribute value.
    ///
    /// With no name the lookup uses `"default"`, so callers can address
    /// children that were given that placeholder name without knowing it.
    pub fn find_child_by_name(&self, label: &str, name: Option<&str>) -> Option<&Element> {
        let identity = Identity::named(label, name.unwrap_or(DEFAULT_NAME));
        self.find_child(&identity)
    }

    /// Collects this element and all descendants whose label matches
    /// `label` ignoring ASCII case.
    ///
    /// With `attribute = Some((key, value))` a match must also carry that
    /// attribute with exactly that value. Children are searched whether or
    /// not their parent matched.
    pub fn extract_sub_elements(
        &self,
        label: &str,
        attribute: Option<(&str, &str)>,
    ) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_sub_elements(label, attribute, &mut found);
        found
    }

    fn collect_sub_elements<'a>(
        &'a self,
        label: &str,
        attribute: Option<(&str, &str)>,
        found: &mut Vec<&'a Element>,
    ) {
        if self.name.eq_ignore_ascii_case(label)
            && attribute.is_none_or(|(key, value)| self.has_attribute(key, value))
        {
            found.push(self);
        }
        for child in &self.children {
            child.collect_sub_elements(label, attribute, found);
        }
    }
}
