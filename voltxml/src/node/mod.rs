//! Element trees.
//!
//! An [`Element`] is a label, a sorted attribute map and an ordered list of
//! owned children. Trees are plain owned values: there are no parent links,
//! and duplicating a tree is a deep copy.
//!
//! Every element has a derived [`Identity`] that is used to pair children of
//! two versions of the same tree when diffing.

mod identity;
mod query;

pub use identity::Identity;

use std::collections::BTreeMap;

use crate::constants::NAME_ATTR;
use crate::error::{Error, Result};
use crate::xml;

/// A labeled element with attributes and ordered children.
///
/// Attributes iterate in key order. Children keep their insertion order,
/// which is significant: a diff records it and a patch restores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// The element label, e.g. `table`.
    name: String,
    /// Attributes, sorted by key.
    attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "element label must not be empty");
        Element {
            name,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute and returns the element, for chained construction.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Appends a child and returns the element, for chained construction.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the element label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the element label.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the attributes.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns a mutable reference to the attributes.
    pub fn attributes_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.attributes
    }

    /// Sets or overwrites an attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    /// Returns the raw value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns true if the attribute is present with exactly this value.
    pub fn has_attribute(&self, key: &str, value: &str) -> bool {
        self.attribute(key) == Some(value)
    }

    /// Returns the children as a slice.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns a mutable reference to the child list.
    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        &mut self.children
    }

    /// Appends a child.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Returns the identity of this element among its siblings.
    ///
    /// Named elements are identified by label and `name` attribute alone.
    /// Everything else falls back to the minimal string of the whole subtree,
    /// which costs a full traversal.
    pub fn unique_name(&self) -> Identity {
        match self.attributes.get(NAME_ATTR) {
            Some(name) => Identity::named(&self.name, name),
            None => Identity::from(self.to_min_string()),
        }
    }

    /// Returns an independent deep copy of this subtree.
    pub fn duplicate(&self) -> Element {
        self.clone()
    }

    /// Returns the compact structural encoding of this subtree.
    pub fn to_min_string(&self) -> String {
        xml::min_string(self)
    }

    /// Returns the indented XML rendering of this subtree, with header.
    pub fn to_xml(&self) -> String {
        xml::print_to_string(self)
    }

    /// Returns an attribute value, or `default` if it is absent.
    pub fn string_attribute<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.attribute(key).unwrap_or(default)
    }

    /// Reads an attribute as a boolean, or returns `default` if it is absent.
    ///
    /// `true` and `false` are accepted in any letter case; anything else is
    /// an [`Error::InvalidBool`].
    pub fn bool_attribute(&self, key: &str, default: bool) -> Result<bool> {
        let Some(value) = self.attribute(key) else {
            return Ok(default);
        };
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::InvalidBool {
                key: key.to_string(),
                value: value.to_string(),
            })
        }
    }

    /// Reads an attribute as an integer, or returns `default` if it is absent.
    pub fn int_attribute(&self, key: &str, default: i32) -> Result<i32> {
        let Some(value) = self.attribute(key) else {
            return Ok(default);
        };
        value.parse().map_err(|source| Error::InvalidInt {
            key: key.to_string(),
            value: value.to_string(),
            source,
        })
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_xml())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, ty: &str) -> Element {
        Element::new("column")
            .with_attribute("name", name)
            .with_attribute("type", ty)
    }

    #[test]
    fn test_with_attribute_overwrites() {
        let e = Element::new("table")
            .with_attribute("name", "T")
            .with_attribute("name", "U");
        assert_eq!(e.attribute("name"), Some("U"));
        assert_eq!(e.attributes().len(), 1);
    }

    #[test]
    fn test_attributes_iterate_sorted() {
        let e = Element::new("index")
            .with_attribute("unique", "true")
            .with_attribute("assumeunique", "false")
            .with_attribute("name", "IDX");
        let keys: Vec<&str> = e.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["assumeunique", "name", "unique"]);
    }

    #[test]
    fn test_has_attribute() {
        let e = column("x", "int");
        assert!(e.has_attribute("type", "int"));
        assert!(!e.has_attribute("type", "INT"));
        assert!(!e.has_attribute("nullable", "true"));
    }

    #[test]
    fn test_named_identity_ignores_content() {
        let a = column("x", "int");
        let b = column("x", "bigint").with_child(Element::new("default"));
        assert_eq!(a.unique_name(), "columnx");
        assert_eq!(a.unique_name(), b.unique_name());
    }

    #[test]
    fn test_unnamed_identity_is_min_string() {
        let e = Element::new("constraint").with_attribute("type", "PRIMARY_KEY");
        assert_eq!(e.unique_name().as_str(), e.to_min_string());

        let changed = Element::new("constraint").with_attribute("type", "UNIQUE");
        assert_ne!(e.unique_name(), changed.unique_name());
    }

    #[test]
    fn test_duplicate_is_independent() {
        let original = Element::new("table")
            .with_attribute("name", "T")
            .with_child(column("x", "int"));
        let mut copy = original.duplicate();
        copy.set_attribute("name", "U");
        copy.children_mut()[0].set_attribute("type", "bigint");
        copy.push_child(column("y", "int"));

        assert_eq!(original.attribute("name"), Some("T"));
        assert_eq!(original.children().len(), 1);
        assert_eq!(original.children()[0].attribute("type"), Some("int"));
    }

    #[test]
    fn test_string_attribute_default() {
        let e = column("x", "int");
        assert_eq!(e.string_attribute("type", "varchar"), "int");
        assert_eq!(e.string_attribute("size", "10"), "10");
    }

    #[test]
    fn test_bool_attribute() {
        let e = Element::new("column")
            .with_attribute("nullable", "TRUE")
            .with_attribute("unique", "false")
            .with_attribute("bogus", "yes");
        assert!(e.bool_attribute("nullable", false).unwrap());
        assert!(!e.bool_attribute("unique", true).unwrap());
        assert!(e.bool_attribute("missing", true).unwrap());
        assert!(matches!(
            e.bool_attribute("bogus", false),
            Err(Error::InvalidBool { .. })
        ));
    }

    #[test]
    fn test_int_attribute() {
        let e = Element::new("column")
            .with_attribute("size", "255")
            .with_attribute("index", "-3")
            .with_attribute("bad", "12x");
        assert_eq!(e.int_attribute("size", 0).unwrap(), 255);
        assert_eq!(e.int_attribute("index", 0).unwrap(), -3);
        assert_eq!(e.int_attribute("missing", 7).unwrap(), 7);
        match e.int_attribute("bad", 0) {
            Err(Error::InvalidInt { key, value, .. }) => {
                assert_eq!(key, "bad");
                assert_eq!(value, "12x");
            }
            other => panic!("expected InvalidInt, got {:?}", other),
        }
    }
}
