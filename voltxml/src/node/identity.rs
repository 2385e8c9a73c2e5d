//! Sibling identity of an element.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// The key that pairs an element in a "before" tree with its counterpart in
/// an "after" tree.
///
/// For an element carrying a `name` attribute this is the label followed by
/// the attribute value (`table` + `T` gives `tableT`). Any other element is
/// identified by its full minimal string, so editing it anywhere in its
/// subtree gives it a new identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identity(String);

impl Identity {
    /// Builds the identity of a named element.
    pub fn named(label: &str, name: &str) -> Self {
        let mut id = String::with_capacity(label.len() + name.len());
        id.push_str(label);
        id.push_str(name);
        Identity(id)
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identity, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Identity(value)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Identity(value.to_string())
    }
}

impl Deref for Identity {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identity {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identity {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Minimal strings are tab-delimited; keep log lines on one line.
        write!(f, "{}", self.0.escape_debug())
    }
}
