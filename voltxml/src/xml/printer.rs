//! Indented XML dump of element trees.
//!
//! Output layout:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8" ?>
//! <table name="T">
//!   <column name="x"
//!           type="int"/>
//! </table>
//! ```
//!
//! Nesting adds two spaces. The first attribute shares the tag line and the
//! rest are aligned under it, in key order. Childless elements self-close.

use std::io::Write;

use crate::constants::{XML_HEADER, XML_INDENT};
use crate::node::Element;

/// Options for XML printing.
#[derive(Debug, Clone)]
pub struct XmlPrinterOptions {
    /// Whether to start the output with the XML declaration.
    pub header: bool,
}

impl Default for XmlPrinterOptions {
    fn default() -> Self {
        XmlPrinterOptions { header: true }
    }
}

/// XML printer that writes element trees to an output.
pub struct XmlPrinter<W: Write> {
    writer: W,
    options: XmlPrinterOptions,
}

impl<W: Write> XmlPrinter<W> {
    /// Creates a new XML printer.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, XmlPrinterOptions::default())
    }

    /// Creates a new XML printer with the given options.
    pub fn with_options(writer: W, options: XmlPrinterOptions) -> Self {
        XmlPrinter { writer, options }
    }

    /// Prints a tree to the output.
    pub fn print(&mut self, root: &Element) -> std::io::Result<()> {
        let mut out = String::new();
        render(root, &self.options, &mut out);
        self.writer.write_all(out.as_bytes())?;
        self.writer.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Renders a tree, with header, to a string.
pub fn print_to_string(root: &Element) -> String {
    let mut out = String::new();
    render(root, &XmlPrinterOptions::default(), &mut out);
    out
}

fn render(root: &Element, options: &XmlPrinterOptions, out: &mut String) {
    if options.header {
        out.push_str(XML_HEADER);
        out.push('\n');
    }
    render_element(root, 0, out);
}

fn render_element(element: &Element, indent: usize, out: &mut String) {
    let name = element.name();
    push_spaces(out, indent);
    out.push('<');
    out.push_str(name);

    // Continuation lines line up with the first attribute: indent, '<',
    // label, one space.
    let attr_indent = indent + name.len() + 2;
    for (i, (key, value)) in element.attributes().iter().enumerate() {
        if i == 0 {
            out.push(' ');
        } else {
            out.push('\n');
            push_spaces(out, attr_indent);
        }
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&to_entities(value));
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>\n");
        return;
    }

    out.push_str(">\n");
    for child in element.children() {
        render_element(child, indent + XML_INDENT, out);
    }
    push_spaces(out, indent);
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

/// Converts special characters to XML entities.
fn to_entities(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
