//! Constants shared by the node, encoder and diff modules.

/// Attribute whose value makes an element's identity independent of its content.
pub const NAME_ATTR: &str = "name";

/// Name used by [`Element::find_child_by_name`](crate::Element::find_child_by_name)
/// when the caller has no name to look up.
pub const DEFAULT_NAME: &str = "default";

/// Declaration written at the top of every XML dump.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>";

/// Spaces added per nesting level in the XML dump.
pub const XML_INDENT: usize = 2;

/// Separator between the fields of the minimal string.
pub const MIN_SEP: char = '\t';

/// Marks the start of an element in the minimal string.
pub const MIN_ELEMENT: char = 'E';

/// Opens an element's child list in the minimal string.
pub const MIN_OPEN: char = '[';

/// Closes an element's child list in the minimal string.
pub const MIN_CLOSE: char = ']';
