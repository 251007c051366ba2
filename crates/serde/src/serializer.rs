//! Document serializer facade.
//!
//! A serializer is bound to one root model type. Binding validates the
//! type's declarations once; every later call only walks the instance.
//!
//! ```rust
//! # use dfe_serde::metadata::{FieldDescriptor, FieldKind, RootDeclaration};
//! # use dfe_serde::model::{DfeModel, FieldMut, FieldRef};
//! # #[derive(Debug, Default, PartialEq)]
//! # struct InfoDoc { razao_social: String }
//! # impl DfeModel for InfoDoc {
//! #     fn root() -> Option<RootDeclaration> { Some(RootDeclaration::new("infoDoc")) }
//! #     fn describe() -> Vec<FieldDescriptor> {
//! #         vec![FieldDescriptor::element("E01", "razaoSocial", FieldKind::String)
//! #             .describe("Nome empresarial").required()]
//! #     }
//! #     fn field(&self, index: usize) -> FieldRef<'_> {
//! #         match index { 0 => FieldRef::scalar(&self.razao_social), _ => FieldRef::Absent }
//! #     }
//! #     fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
//! #         match index { 0 => FieldMut::scalar(&mut self.razao_social), _ => FieldMut::Ignore }
//! #     }
//! # }
//! use dfe_serde::{DfeSerializer, SerializationOptions};
//!
//! let serializer = DfeSerializer::<InfoDoc>::new()?;
//! let options = SerializationOptions::default();
//!
//! let doc = InfoDoc { razao_social: "Padaria Pão Quente".to_string() };
//! let (xml, report) = serializer.serialize_to_string(&doc, &options)?;
//! assert!(report.is_valid());
//!
//! let back = serializer.deserialize_str(&xml, &options)?;
//! assert_eq!(back.value, Some(doc));
//! # Ok::<(), dfe_serde::DfeError>(())
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::alert::{AlertCollector, AlertKind, AlertList, MSG_NULL_ITEM};
use crate::error::{DfeError, Result};
use crate::io::{ByteSink, ByteSource};
use crate::metadata::ModelSchema;
use crate::model::{DfeModel, DfeObject, ModelType};
use crate::options::SerializationOptions;
use crate::schema::SchemaValidator;
use crate::walker;
use crate::xml::{self, utils};

/// Outcome of a serialize call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeReport {
    pub alerts: AlertList,
    /// Bytes handed to the sink; zero when nothing was written.
    pub bytes_written: usize,
}

impl SerializeReport {
    /// True when the call recorded no alert.
    pub fn is_valid(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Outcome of a deserialize call.
#[derive(Debug, Clone, PartialEq)]
pub struct DeserializeReport<T> {
    /// `None` when the document root is not the bound root element.
    pub value: Option<T>,
    pub alerts: AlertList,
}

impl<T> DeserializeReport<T> {
    pub fn is_valid(&self) -> bool {
        self.value.is_some() && self.alerts.is_empty()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

/// Type-erased serializer bound to a [`ModelType`].
pub struct DocumentSerializer {
    model: ModelType,
    schema: Arc<ModelSchema>,
    validator: Option<Box<dyn SchemaValidator>>,
}

impl DocumentSerializer {
    /// Binds to `model`, rejecting types that cannot be documents.
    pub fn new(model: ModelType) -> Result<Self> {
        let schema = model.schema();
        let type_name = schema.type_name();

        if schema.root.is_none() {
            return Err(DfeError::configuration(type_name, "type has no root declaration"));
        }
        if type_name.contains('<') {
            return Err(DfeError::configuration(
                type_name,
                "generic types cannot be bound as documents",
            ));
        }
        schema
            .check()
            .map_err(|reason| DfeError::configuration(type_name, reason))?;

        tracing::debug!(
            model = type_name,
            root = schema.root_name(),
            fields = schema.fields.len(),
            "bound document serializer"
        );
        Ok(Self {
            model,
            schema,
            validator: None,
        })
    }

    /// Attaches the validator consulted when schema errors are enabled.
    pub fn with_schema_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn model(&self) -> ModelType {
        self.model
    }

    /// Resolved root element name.
    pub fn root_name(&self) -> &'static str {
        self.schema.root_name()
    }

    /// Writes `item` as one XML document to `sink`.
    ///
    /// A `None` item is reported as an alert, not an error. Fails with
    /// [`DfeError::TypeMismatch`] when `item` is not the bound type.
    pub fn serialize(
        &self,
        item: Option<&dyn DfeObject>,
        sink: &mut dyn ByteSink,
        options: &SerializationOptions,
    ) -> Result<SerializeReport> {
        let mut alerts = AlertCollector::new(&options.alert_format);
        let Some(item) = item else {
            tracing::debug!(root = self.root_name(), "serialize called without an item");
            alerts.general(AlertKind::NullInput, MSG_NULL_ITEM);
            return Ok(SerializeReport {
                alerts: alerts.finish(),
                bytes_written: 0,
            });
        };

        if item.as_any().type_id() != self.model.type_id() {
            return Err(DfeError::TypeMismatch {
                expected: self.model.type_path(),
                found: item.type_path(),
            });
        }

        let root = self.root_name();
        tracing::debug!(root, "serialize start");

        let mut tree = walker::to_element(item, root, options, &mut alerts);
        utils::strip_empty_namespaces(&mut tree);
        let bytes = xml::to_xml_vec(&tree, options)?;
        sink.write_all_bytes(&bytes)?;

        if options.show_schema_errors
            && let Some(validator) = &self.validator
        {
            for violation in validator.validate(&bytes) {
                alerts.general(AlertKind::Schema, violation);
            }
        }

        let alerts = alerts.finish();
        tracing::debug!(root, alerts = alerts.len(), bytes = bytes.len(), "serialize end");
        Ok(SerializeReport {
            alerts,
            bytes_written: bytes.len(),
        })
    }

    /// Reads one XML document from `source` into a new model instance.
    ///
    /// A document whose root element is not the bound root yields no value
    /// and no alert.
    pub fn deserialize(
        &self,
        source: &mut dyn ByteSource,
        options: &SerializationOptions,
    ) -> Result<DeserializeReport<Box<dyn DfeObject>>> {
        let bytes = source.read_all_bytes()?;
        let tree = xml::from_xml_slice(&bytes)?;

        let root = self.root_name();
        if tree.name != root {
            tracing::debug!(expected = root, found = %tree.name, "root element mismatch");
            return Ok(DeserializeReport {
                value: None,
                alerts: AlertList::new(),
            });
        }

        tracing::debug!(root, bytes = bytes.len(), "deserialize start");
        let mut alerts = AlertCollector::new(&options.alert_format);
        let mut value = self.model.create();
        walker::from_element(value.as_mut(), &tree, options, &mut alerts);

        let alerts = alerts.finish();
        tracing::debug!(root, alerts = alerts.len(), "deserialize end");
        Ok(DeserializeReport {
            value: Some(value),
            alerts,
        })
    }
}

impl fmt::Debug for DocumentSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSerializer")
            .field("model", &self.model)
            .field("root", &self.root_name())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Serializer for one statically known root model.
pub struct DfeSerializer<T> {
    inner: DocumentSerializer,
    _model: PhantomData<fn() -> T>,
}

impl<T: DfeModel> DfeSerializer<T> {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: DocumentSerializer::new(ModelType::of::<T>())?,
            _model: PhantomData,
        })
    }

    pub fn with_schema_validator(self, validator: impl SchemaValidator + 'static) -> Self {
        Self {
            inner: self.inner.with_schema_validator(validator),
            _model: PhantomData,
        }
    }

    pub fn root_name(&self) -> &'static str {
        self.inner.root_name()
    }

    /// Type-erased serializer backing this one.
    pub fn erased(&self) -> &DocumentSerializer {
        &self.inner
    }

    pub fn serialize(
        &self,
        item: Option<&T>,
        sink: &mut dyn ByteSink,
        options: &SerializationOptions,
    ) -> Result<SerializeReport> {
        self.inner
            .serialize(item.map(|item| item as &dyn DfeObject), sink, options)
    }

    pub fn deserialize(
        &self,
        source: &mut dyn ByteSource,
        options: &SerializationOptions,
    ) -> Result<DeserializeReport<T>> {
        let report = self.inner.deserialize(source, options)?;
        let value = match report.value {
            Some(object) => Some(*object.into_any().downcast::<T>().map_err(|_| {
                DfeError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    found: self.inner.model.type_path(),
                }
            })?),
            None => None,
        };
        Ok(DeserializeReport {
            value,
            alerts: report.alerts,
        })
    }

    /// Serializes to an in-memory UTF-8 document.
    pub fn serialize_to_vec(
        &self,
        item: &T,
        options: &SerializationOptions,
    ) -> Result<(Vec<u8>, SerializeReport)> {
        let mut buffer: Vec<u8> = Vec::new();
        let report = self.serialize(Some(item), &mut buffer, options)?;
        Ok((buffer, report))
    }

    pub fn serialize_to_string(
        &self,
        item: &T,
        options: &SerializationOptions,
    ) -> Result<(String, SerializeReport)> {
        let (buffer, report) = self.serialize_to_vec(item, options)?;
        Ok((String::from_utf8(buffer)?, report))
    }

    pub fn deserialize_slice(
        &self,
        xml: &[u8],
        options: &SerializationOptions,
    ) -> Result<DeserializeReport<T>> {
        let mut source = xml;
        self.deserialize(&mut source, options)
    }

    pub fn deserialize_str(
        &self,
        xml: &str,
        options: &SerializationOptions,
    ) -> Result<DeserializeReport<T>> {
        self.deserialize_slice(xml.as_bytes(), options)
    }
}

impl<T> fmt::Debug for DfeSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DfeSerializer").field(&self.inner).finish()
    }
}
