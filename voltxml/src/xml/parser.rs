//! Reader for XML dumps of element trees.
//!
//! Uses quick-xml's streaming API. Only element and attribute markup is
//! accepted: element trees carry no text, so non-whitespace text, CDATA and
//! entity references outside attribute values are rejected. Comments, the
//! XML declaration, processing instructions and doctypes are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::node::Element;

/// XML parser that builds element trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlParser;

impl XmlParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        XmlParser
    }

    /// Parses XML from a string.
    pub fn parse_str(&self, xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        self.parse_reader(&mut reader)
    }

    /// Parses XML from a file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Element> {
        let file = File::open(path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        self.parse_reader(&mut reader)
    }

    fn parse_reader<R: BufRead>(&self, reader: &mut Reader<R>) -> Result<Element> {
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let element = self.parse_element(e, reader)?;
                    stack.push(element);
                }
                Event::Empty(ref e) => {
                    let element = self.parse_element(e, reader)?;
                    attach(element, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Parse("unexpected end tag".to_string()))?;
                    attach(element, &mut stack, &mut root)?;
                }
                Event::Text(ref e) => {
                    let raw: &[u8] = e.as_ref();
                    if !raw.iter().all(u8::is_ascii_whitespace) {
                        return Err(Error::Parse(format!(
                            "text content is not supported: {:?}",
                            String::from_utf8_lossy(raw).trim()
                        )));
                    }
                }
                Event::CData(_) => {
                    return Err(Error::Parse("CDATA is not supported".to_string()));
                }
                Event::GeneralRef(ref e) => {
                    return Err(Error::Parse(format!(
                        "entity reference outside attribute value: &{};",
                        String::from_utf8_lossy(e.as_ref())
                    )));
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(Error::Parse(format!("unclosed element <{}>", open.name())));
        }
        root.ok_or_else(|| Error::Parse("document has no root element".to_string()))
    }

    /// Parses an element's label and attributes.
    fn parse_element<R>(&self, e: &BytesStart, reader: &Reader<R>) -> Result<Element> {
        let name = reader
            .decoder()
            .decode(e.name().as_ref())
            .map_err(|e| Error::Parse(e.to_string()))?
            .to_string();
        if name.is_empty() {
            return Err(Error::Parse("empty element name".to_string()));
        }

        let mut element = Element::new(name);
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| Error::Parse(format!("Attribute error: {}", e)))?;
            let key = reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(|e| Error::Parse(e.to_string()))?
                .to_string();
            element.set_attribute(key, value);
        }
        Ok(element)
    }
}

/// Hands a finished element to its parent, or makes it the document root.
fn attach(element: Element, stack: &mut [Element], root: &mut Option<Element>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None if root.is_some() => {
            return Err(Error::Parse(format!(
                "multiple root elements; second is <{}>",
                element.name()
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Parses an element tree from a file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Element> {
    XmlParser::new().parse_file(path)
}

/// Parses an element tree from a string.
pub fn parse_str(xml: &str) -> Result<Element> {
    XmlParser::new().parse_str(xml)
}
