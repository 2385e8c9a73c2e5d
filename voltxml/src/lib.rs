//! voltxml - identity-keyed diff and patch for attributed element trees
//!
//! This library models schema-like trees of labeled elements with sorted
//! attributes and ordered children, and provides a structural diff between
//! two versions of the same tree together with an in-place patch that
//! replays such a diff.
//!
//! # Overview
//!
//! Children of two versions of an element are paired by their
//! [`Identity`]: the label plus the `name` attribute for named elements
//! (`<table name="T">` is `tableT`), or the minimal string of the whole
//! subtree for everything else. Paired children are diffed recursively;
//! unpaired ones are recorded as added or removed subtrees. A diff also
//! records the final child order, so applying it reproduces the target
//! exactly, order included.
//!
//! # Example
//!
//! ```
//! use voltxml::{apply_diff, compute_diff, Element};
//!
//! let before = Element::new("table")
//!     .with_attribute("name", "T")
//!     .with_child(Element::new("column").with_attribute("name", "x").with_attribute("type", "int"));
//! let after = Element::new("table")
//!     .with_attribute("name", "T")
//!     .with_child(Element::new("column").with_attribute("name", "x").with_attribute("type", "bigint"))
//!     .with_child(Element::new("column").with_attribute("name", "y").with_attribute("type", "int"));
//!
//! let diff = compute_diff(&before, &after).expect("same table");
//! assert_eq!(diff.added_elements().len(), 1);
//! assert!(diff.changed_elements().contains_key("columnx"));
//!
//! let mut patched = before.duplicate();
//! apply_diff(&mut patched, diff).unwrap();
//! assert_eq!(patched.to_min_string(), after.to_min_string());
//! ```

pub mod constants;
pub mod diff;
pub mod error;
pub mod node;
pub mod xml;

// Re-export commonly used types
pub use constants::*;
pub use diff::{apply_diff, compute_diff, ChangeKind, ElementDiff};
pub use error::{Error, Result};
pub use node::{Element, Identity};
pub use xml::{
    min_string, parse_file, parse_str, print_to_string, XmlParser, XmlPrinter, XmlPrinterOptions,
};
