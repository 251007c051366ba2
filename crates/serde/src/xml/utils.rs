//! Helpers shared by the XML reader and the serializer facade.

use quick_xml::escape::resolve_xml_entity;

use crate::error::{DfeError, Result};
use crate::xml::Element;

/// Checks if an attribute declares a namespace (`xmlns` or `xmlns:prefix`).
pub fn is_namespace_attribute(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

/// Removes namespace declarations left empty by element construction,
/// recursively.
pub fn strip_empty_namespaces(element: &mut Element) {
    element
        .attributes
        .retain(|(name, value)| !(is_namespace_attribute(name) && value.is_empty()));
    for child in &mut element.children {
        strip_empty_namespaces(child);
    }
}

/// Resolves a general entity reference reported without its `&` and `;`.
pub fn resolve_entity(raw: &str) -> Result<String> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.to_string());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = match rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => rest.parse::<u32>(),
        }
        .map_err(|_| DfeError::Malformed(format!("invalid character reference &{};", raw)))?;

        return char::from_u32(code)
            .map(|ch| ch.to_string())
            .ok_or_else(|| DfeError::Malformed(format!("invalid code point {}", code)));
    }

    Err(DfeError::Malformed(format!("unknown entity &{};", raw)))
}
