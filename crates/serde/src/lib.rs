//! # DFe XML Serialization
//!
//! This crate marshals strongly typed fiscal-document models (NF-e, CT-e,
//! MDF-e and their events) to and from the XML layouts required by the tax
//! authorities, validating field-level structure along the way.
//!
//! ## Features
//!
//! - **Declarative metadata**: each model describes its fields once
//!   ([`FieldDescriptor`]); the table is cached per type.
//! - **Lenient validation**: required fields, cardinality, length bounds and
//!   conversion failures are collected as [`Alert`]s in one pass instead of
//!   aborting.
//! - **Call-scoped alerts**: every call returns its own [`AlertList`], so a
//!   serializer and its options can be shared between threads.
//! - **Schema hook**: an external XSD validator can be attached and its
//!   findings merged into the alert list.
//!
//! ## Architecture
//!
//! | Layer | Module |
//! |-------|--------|
//! | Facade | [`serializer`] |
//! | Model ↔ element tree | [`walker`], driven by [`metadata`] and [`model`] |
//! | Scalar ↔ text | [`codec`] |
//! | Element tree ↔ bytes | [`xml`] (quick-xml) |
//! | Bytes ↔ outside world | [`io`] |
//!
//! ## Example
//!
//! ```rust
//! use dfe_serde::metadata::{FieldDescriptor, FieldKind, RootDeclaration};
//! use dfe_serde::model::{DfeModel, FieldMut, FieldRef};
//! use dfe_serde::{DfeSerializer, SerializationOptions};
//!
//! #[derive(Debug, Default)]
//! struct InfoDoc {
//!     razao_social: String,
//! }
//!
//! impl DfeModel for InfoDoc {
//!     fn root() -> Option<RootDeclaration> {
//!         Some(RootDeclaration::new("infoDoc"))
//!     }
//!
//!     fn describe() -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::element("E01", "razaoSocial", FieldKind::String)
//!                 .describe("Nome empresarial")
//!                 .required(),
//!         ]
//!     }
//!
//!     fn field(&self, index: usize) -> FieldRef<'_> {
//!         match index {
//!             0 => FieldRef::scalar(&self.razao_social),
//!             _ => FieldRef::Absent,
//!         }
//!     }
//!
//!     fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
//!         match index {
//!             0 => FieldMut::scalar(&mut self.razao_social),
//!             _ => FieldMut::Ignore,
//!         }
//!     }
//! }
//!
//! let serializer = DfeSerializer::<InfoDoc>::new()?;
//! let (xml, report) =
//!     serializer.serialize_to_string(&InfoDoc::default(), &SerializationOptions::default())?;
//!
//! assert_eq!(xml, r#"<?xml version="1.0" encoding="UTF-8"?><infoDoc/>"#);
//! assert_eq!(
//!     report.alerts.texts(),
//!     vec!["TAG:razaoSocial ID:E01/razaoSocial(Nome empresarial) - campo obrigatório não informado."]
//! );
//! # Ok::<(), dfe_serde::DfeError>(())
//! ```

pub mod alert;
pub mod codec;
pub mod error;
pub mod io;
pub mod metadata;
pub mod model;
pub mod options;
pub mod schema;
pub mod serializer;
pub mod walker;
pub mod xml;

// Re-export common types
pub use alert::{Alert, AlertKind, AlertList};
pub use error::{DfeError, Result};
pub use io::{ByteSink, ByteSource, FileSink, FileSource, StreamSink, StreamSource};
pub use metadata::{FieldDescriptor, FieldKind, Placement, RootDeclaration, UNBOUNDED};
pub use model::{DfeModel, DfeObject, FieldMut, FieldRef, ModelType};
pub use options::SerializationOptions;
pub use schema::SchemaValidator;
pub use serializer::{DeserializeReport, DfeSerializer, DocumentSerializer, SerializeReport};
