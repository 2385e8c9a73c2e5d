//! Text renderings of element trees, and a reader for the XML dump.
//!
//! The minimal string is the canonical structural encoding used for equality
//! checks and for the identity of unnamed elements. The XML printer produces
//! the indented, human-readable dump used in logs. The parser reads that dump
//! (element and attribute markup only) back into a tree.

mod min_string;
mod parser;
mod printer;

pub use min_string::{min_string, write_min_string};
pub use parser::{parse_file, parse_str, XmlParser};
pub use printer::{print_to_string, XmlPrinter, XmlPrinterOptions};
