//! Field metadata for DFe models.
//!
//! Every model type declares its fields once through
//! [`DfeModel::describe`](crate::model::DfeModel::describe). The resulting
//! [`ModelSchema`] is built lazily on first use, cached per type, and shared
//! read-only between every call on every thread afterwards.
//!
//! ## Occurrence bounds
//!
//! `min_occurs`/`max_occurs` are interpreted per kind:
//!
//! | Kind | Meaning |
//! |------|---------|
//! | scalar kinds | character length of the encoded text |
//! | `Collection` | number of repeated sibling elements |
//! | `NestedObject` | ignored |

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::model::DfeModel;

/// Upper bound used when a field declares no maximum.
pub const UNBOUNDED: usize = usize::MAX;

/// Semantic kind of a field, deciding codec behavior and tree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Decimal,
    Date,
    DateTime,
    Time,
    /// Value drawn from a fixed vocabulary of document tokens.
    Enumerated(&'static [&'static str]),
    NestedObject,
    Collection(Box<FieldKind>),
}

impl FieldKind {
    /// Shorthand for `Collection(Box::new(item))`.
    pub fn collection(item: FieldKind) -> Self {
        FieldKind::Collection(Box::new(item))
    }

    /// True for kinds the codec converts directly.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldKind::NestedObject | FieldKind::Collection(_))
    }

    /// Short label used in log output and messages.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Time => "time",
            FieldKind::Enumerated(_) => "enumerated",
            FieldKind::NestedObject => "object",
            FieldKind::Collection(_) => "collection",
        }
    }
}

/// Where a scalar field is written on its parent element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    #[default]
    Element,
    Attribute,
}

/// Immutable description of one model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Identifier from the layout manual (e.g. `E01`).
    pub id: &'static str,
    /// XML element or attribute name.
    pub name: &'static str,
    pub kind: FieldKind,
    pub placement: Placement,
    pub min_occurs: usize,
    pub max_occurs: usize,
    pub required: bool,
    pub description: &'static str,
    /// Fixed number of decimal places for `Decimal` fields.
    pub decimals: Option<u32>,
}

impl FieldDescriptor {
    /// Describes a field written as a child element.
    pub fn element(id: &'static str, name: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            name,
            kind,
            placement: Placement::Element,
            min_occurs: 0,
            max_occurs: UNBOUNDED,
            required: false,
            description: "",
            decimals: None,
        }
    }

    /// Describes a scalar field written as an attribute of the parent element.
    pub fn attribute(id: &'static str, name: &'static str, kind: FieldKind) -> Self {
        Self {
            placement: Placement::Attribute,
            ..Self::element(id, name, kind)
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn occurs(mut self, min: usize, max: usize) -> Self {
        self.min_occurs = min;
        self.max_occurs = max;
        self
    }

    pub fn decimals(mut self, places: u32) -> Self {
        self.decimals = Some(places);
        self
    }

    pub fn is_attribute(&self) -> bool {
        self.placement == Placement::Attribute
    }
}

/// Type-level declaration that a model is a standalone document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootDeclaration {
    /// Root element name; empty means "use the type name".
    pub name: &'static str,
}

impl RootDeclaration {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Root whose element name falls back to the type name.
    pub const fn unnamed() -> Self {
        Self { name: "" }
    }
}

/// Cached metadata for one model type.
#[derive(Debug)]
pub struct ModelSchema {
    /// Full path as reported by `std::any::type_name`.
    pub type_path: &'static str,
    pub root: Option<RootDeclaration>,
    pub namespace: Option<&'static str>,
    pub fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    fn build<T: DfeModel>() -> Self {
        Self {
            type_path: std::any::type_name::<T>(),
            root: T::root(),
            namespace: T::namespace(),
            fields: T::describe(),
        }
    }

    /// Last path segment of the type name, generic arguments included.
    pub fn type_name(&self) -> &'static str {
        short_type_name(self.type_path)
    }

    /// Root element name: the explicit declaration if non-empty, otherwise
    /// the type's own name.
    pub fn root_name(&self) -> &'static str {
        match self.root {
            Some(root) if !root.name.is_empty() => root.name,
            _ => self.type_name(),
        }
    }

    /// Checks the descriptor table for declarations the walker cannot honor.
    pub fn check(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.is_attribute() && !field.kind.is_scalar() {
                return Err(format!(
                    "field {} ({}) is a {} and cannot be an attribute",
                    field.name,
                    field.id,
                    field.kind.label()
                ));
            }
            if field.min_occurs > field.max_occurs {
                return Err(format!(
                    "field {} ({}) declares min {} above max {}",
                    field.name, field.id, field.min_occurs, field.max_occurs
                ));
            }
            if !seen.insert((field.placement, field.name)) {
                return Err(format!("field name {} is declared twice", field.name));
            }
        }
        Ok(())
    }
}

/// Strips the module path from a type name while keeping generic arguments.
pub(crate) fn short_type_name(path: &'static str) -> &'static str {
    let base_end = path.find('<').unwrap_or(path.len());
    match path[..base_end].rfind("::") {
        Some(idx) => &path[idx + 2..],
        None => path,
    }
}

static SCHEMAS: Lazy<RwLock<HashMap<TypeId, Arc<ModelSchema>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Returns the cached schema for `T`, building it on first request.
pub fn schema_for<T: DfeModel>() -> Arc<ModelSchema> {
    let key = TypeId::of::<T>();
    if let Some(schema) = SCHEMAS.read().get(&key) {
        return Arc::clone(schema);
    }

    let mut schemas = SCHEMAS.write();
    let schema = schemas.entry(key).or_insert_with(|| {
        let schema = ModelSchema::build::<T>();
        tracing::trace!(
            model = schema.type_name(),
            fields = schema.fields.len(),
            "built model schema"
        );
        Arc::new(schema)
    });
    Arc::clone(schema)
}
