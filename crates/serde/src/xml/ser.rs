//! Rendering of an [`Element`] tree to XML bytes with quick-xml.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;
use crate::options::SerializationOptions;
use crate::xml::Element;

/// Render a tree to an XML string.
pub fn to_xml_string(root: &Element, options: &SerializationOptions) -> Result<String> {
    let buffer = to_xml_vec(root, options)?;
    Ok(String::from_utf8(buffer)?)
}

/// Render a tree to UTF-8 XML bytes.
pub fn to_xml_vec(root: &Element, options: &SerializationOptions) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(root, &mut buffer, options)?;
    Ok(buffer)
}

/// Render a tree to a writer.
///
/// Pretty output uses two-space indentation; compact output has no
/// whitespace between elements.
pub fn to_xml_writer<W: Write>(
    root: &Element,
    writer: W,
    options: &SerializationOptions,
) -> Result<()> {
    let mut writer = if options.indent_output {
        Writer::new_with_indent(writer, b' ', 2)
    } else {
        Writer::new(writer)
    };

    if options.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    write_element(&mut writer, root)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    let text = element.text.as_deref().filter(|text| !text.is_empty());
    if element.children.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

    Ok(())
}
