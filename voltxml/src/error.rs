//! Error types for voltxml.

use thiserror::Error;

use crate::node::Identity;

/// Result type alias for voltxml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying, patching or reading element trees.
#[derive(Error, Debug)]
pub enum Error {
    /// A diff was applied to an element it was not computed for.
    #[error("diff computed for `{expected}` cannot be applied to `{actual}`")]
    IdentityMismatch {
        /// Identity recorded in the diff.
        expected: Identity,
        /// Identity of the element the diff was applied to.
        actual: Identity,
    },

    /// A changed child named by the diff is not present in the target.
    #[error("changed child `{0}` not found in target")]
    MissingChild(Identity),

    /// After adds and removes the child count disagrees with the recorded order.
    #[error("recorded order covers {expected} children but target has {actual}")]
    ChildCountMismatch {
        /// Number of entries in the recorded order.
        expected: usize,
        /// Number of children present in the target.
        actual: usize,
    },

    /// A child has no usable position in the recorded order.
    #[error("no valid recorded position for child `{0}`; diff does not match this tree")]
    CorruptOrder(Identity),

    /// An attribute read as a boolean holds something else.
    #[error("attribute `{key}` is not a boolean: {value:?}")]
    InvalidBool {
        /// Attribute key.
        key: String,
        /// Stored value.
        value: String,
    },

    /// An attribute read as an integer holds something else.
    #[error("attribute `{key}` is not an integer: {value:?}")]
    InvalidInt {
        /// Attribute key.
        key: String,
        /// Stored value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: std::num::ParseIntError,
    },

    /// Document structure the reader does not accept.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error from quick-xml.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}
