//! Minimal string encoding.
//!
//! Each element is written as
//!
//! ```text
//! \tE<label>\t{\t<key>\t<value>}\t[<children>\t]
//! ```
//!
//! with attributes in key order. The closing `\t]` keeps a child list from
//! running into the following sibling, so two subtrees encode equally
//! exactly when they are structurally equal. Labels, keys and values are
//! assumed to contain no tabs.

use crate::constants::{MIN_CLOSE, MIN_ELEMENT, MIN_OPEN, MIN_SEP};
use crate::node::Element;

/// Returns the minimal string of a subtree.
pub fn min_string(element: &Element) -> String {
    let mut out = String::new();
    write_min_string(element, &mut out);
    out
}

/// Appends the minimal string of a subtree to `out`.
pub fn write_min_string(element: &Element, out: &mut String) {
    out.push(MIN_SEP);
    out.push(MIN_ELEMENT);
    out.push_str(element.name());
    out.push(MIN_SEP);
    for (key, value) in element.attributes() {
        out.push(MIN_SEP);
        out.push_str(key);
        out.push(MIN_SEP);
        out.push_str(value);
    }
    out.push(MIN_SEP);
    out.push(MIN_OPEN);
    for child in element.children() {
        write_min_string(child, out);
    }
    out.push(MIN_SEP);
    out.push(MIN_CLOSE);
}
