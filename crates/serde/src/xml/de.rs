//! Parsing of XML bytes into an [`Element`] tree with quick-xml.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{DfeError, Result};
use crate::xml::{Element, utils};

/// Parse a document from XML bytes.
pub fn from_xml_slice(xml: &[u8]) -> Result<Element> {
    let text = std::str::from_utf8(xml)?;
    from_xml_str(text)
}

/// Parse a document from an XML string.
///
/// ```rust
/// use dfe_serde::xml::from_xml_str;
///
/// let root = from_xml_str(r#"<?xml version="1.0"?><infoDoc><cUF>35</cUF></infoDoc>"#)?;
/// assert_eq!(root.name, "infoDoc");
/// assert_eq!(root.child("cUF").map(|c| c.text()), Some("35"));
/// # Ok::<(), dfe_serde::DfeError>(())
/// ```
pub fn from_xml_str(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => open.push(open_element(&start)?),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                close_element(element, &mut open, &mut root)?;
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| DfeError::Malformed("unexpected closing tag".to_string()))?;
                close_element(element, &mut open, &mut root)?;
            }
            Event::Text(text) => {
                if let Some(current) = open.last_mut() {
                    let decoded = text
                        .decode()
                        .map_err(|e| DfeError::Encoding(e.to_string()))?;
                    append_text(current, &decoded);
                }
            }
            Event::CData(data) => {
                if let Some(current) = open.last_mut() {
                    let raw = std::str::from_utf8(&data)?;
                    append_text(current, raw);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(current) = open.last_mut() {
                    let name = reference
                        .decode()
                        .map_err(|e| DfeError::Encoding(e.to_string()))?;
                    let resolved = utils::resolve_entity(&name)?;
                    append_text(current, &resolved);
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(DfeError::Malformed(format!(
            "element <{}> is not closed",
            unclosed.name
        )));
    }
    root.ok_or_else(|| DfeError::Malformed("document has no root element".to_string()))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute
            .unescape_value()
            .map_err(|e| DfeError::Malformed(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn append_text(element: &mut Element, text: &str) {
    element.text.get_or_insert_with(String::new).push_str(text);
}

fn close_element(
    mut element: Element,
    open: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> Result<()> {
    // Indentation between child elements is not content.
    if !element.children.is_empty() {
        element.text = None;
    } else if element.text.as_deref() == Some("") {
        element.text = None;
    }

    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(DfeError::Malformed(format!(
                "second root element <{}>",
                element.name
            )));
        }
    }
    Ok(())
}
