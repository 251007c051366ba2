//! Generic XML element tree and its quick-xml reader and writer.
//!
//! The walker produces and consumes [`Element`] trees; this module turns
//! them into bytes and back.
//!
//! ## Tree Shape
//!
//! | Model field | XML |
//! |-------------|-----|
//! | scalar, element placement | `<cNF>12345678</cNF>` |
//! | scalar, attribute placement | `<infNFe versao="4.00">` |
//! | nested object | `<emit>...</emit>` |
//! | collection | `<det>...</det><det>...</det>` |
//!
//! Mixed content is not supported. Text between child elements is dropped
//! when parsing.

pub mod de;
pub mod ser;
pub(crate) mod utils;

pub use de::{from_xml_slice, from_xml_str};
pub use ser::{to_xml_string, to_xml_vec, to_xml_writer};

/// One node of a generic XML tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Leaf element holding `text`.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Text content, or `""` when the element has none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty() && self.text().is_empty()
    }
}
