//! Traits that expose a typed document model to the walker.
//!
//! A model declares its descriptor table once and maps each descriptor index
//! to a [`FieldRef`] (reading) and a [`FieldMut`] (writing). No runtime
//! introspection is involved.
//!
//! ```rust
//! use dfe_serde::metadata::{FieldDescriptor, FieldKind, RootDeclaration};
//! use dfe_serde::model::{DfeModel, FieldMut, FieldRef};
//!
//! #[derive(Debug, Default, PartialEq)]
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
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::codec::Value;
use crate::metadata::{FieldDescriptor, ModelSchema, RootDeclaration, schema_for};

/// A statically described document model.
pub trait DfeModel: Any + Default {
    /// Root-document declaration; `None` for types only used nested.
    fn root() -> Option<RootDeclaration> {
        None
    }

    /// Namespace declared on this type's element.
    ///
    /// `Some("")` resets the namespace and is removed during output
    /// normalization.
    fn namespace() -> Option<&'static str> {
        None
    }

    /// Field descriptors in declaration order. Called once per type.
    fn describe() -> Vec<FieldDescriptor>;

    /// Current value of the field at `index` in [`describe`](Self::describe).
    fn field(&self, index: usize) -> FieldRef<'_>;

    /// Assignment target for the field at `index`.
    fn field_mut(&mut self, index: usize) -> FieldMut<'_>;
}

/// Object-safe view of a model instance.
pub trait DfeObject: Any {
    fn schema(&self) -> Arc<ModelSchema>;
    fn read_field(&self, index: usize) -> FieldRef<'_>;
    fn write_field(&mut self, index: usize) -> FieldMut<'_>;
    fn type_path(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: DfeModel> DfeObject for T {
    fn schema(&self) -> Arc<ModelSchema> {
        schema_for::<T>()
    }

    fn read_field(&self, index: usize) -> FieldRef<'_> {
        self.field(index)
    }

    fn write_field(&mut self, index: usize) -> FieldMut<'_> {
        self.field_mut(index)
    }

    fn type_path(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Read view of one field.
pub enum FieldRef<'a> {
    /// No value; for strings this includes the empty string.
    Absent,
    Value(Value),
    Object(&'a dyn DfeObject),
    List(Vec<FieldRef<'a>>),
}

impl<'a> FieldRef<'a> {
    pub fn scalar<S: Scalar>(value: &S) -> Self {
        value.to_value().map_or(FieldRef::Absent, FieldRef::Value)
    }

    pub fn object<M: DfeModel>(value: &'a M) -> Self {
        FieldRef::Object(value)
    }

    pub fn optional<M: DfeModel>(value: &'a Option<M>) -> Self {
        value.as_ref().map_or(FieldRef::Absent, |inner| FieldRef::Object(inner))
    }

    pub fn values<S: Scalar>(items: &[S]) -> Self {
        FieldRef::List(
            items
                .iter()
                .filter_map(|item| item.to_value().map(FieldRef::Value))
                .collect(),
        )
    }

    pub fn objects<M: DfeModel>(items: &'a [M]) -> Self {
        FieldRef::List(
            items
                .iter()
                .map(|item| FieldRef::Object(item as &dyn DfeObject))
                .collect(),
        )
    }

    /// True when the field carries nothing to emit.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldRef::Absent => true,
            FieldRef::List(items) => items.iter().all(FieldRef::is_empty),
            FieldRef::Value(_) | FieldRef::Object(_) => false,
        }
    }
}

/// Write target for one field.
pub enum FieldMut<'a> {
    Value(Box<dyn ValueSlot + 'a>),
    Object(Box<dyn ObjectSlot + 'a>),
    List(Box<dyn ListSlot + 'a>),
    /// The model does not accept this field.
    Ignore,
}

impl<'a> FieldMut<'a> {
    pub fn scalar<S: Scalar>(target: &'a mut S) -> Self {
        FieldMut::Value(Box::new(ScalarTarget(target)))
    }

    pub fn object<M: DfeModel>(target: &'a mut M) -> Self {
        FieldMut::Object(Box::new(ObjectTarget(target)))
    }

    pub fn optional<M: DfeModel>(target: &'a mut Option<M>) -> Self {
        FieldMut::Object(Box::new(OptionalObjectTarget(target)))
    }

    pub fn values<S: Scalar>(target: &'a mut Vec<S>) -> Self {
        FieldMut::List(Box::new(ScalarListTarget(target)))
    }

    pub fn objects<M: DfeModel>(target: &'a mut Vec<M>) -> Self {
        FieldMut::List(Box::new(ObjectListTarget(target)))
    }
}

/// Receives a decoded scalar value.
pub trait ValueSlot {
    /// Returns `false` if the value does not fit the target type.
    fn assign(&mut self, value: Value) -> bool;
}

/// Provides the nested instance to populate, creating it if needed.
pub trait ObjectSlot {
    fn object(&mut self) -> &mut dyn DfeObject;
}

/// Appends collection items in document order.
pub trait ListSlot {
    fn push_value(&mut self, _value: Value) -> bool {
        false
    }

    fn push_object(&mut self) -> Option<&mut dyn DfeObject> {
        None
    }
}

struct ScalarTarget<'a, S>(&'a mut S);

impl<S: Scalar> ValueSlot for ScalarTarget<'_, S> {
    fn assign(&mut self, value: Value) -> bool {
        match S::from_value(value) {
            Some(converted) => {
                *self.0 = converted;
                true
            }
            None => false,
        }
    }
}

struct ObjectTarget<'a, M>(&'a mut M);

impl<M: DfeModel> ObjectSlot for ObjectTarget<'_, M> {
    fn object(&mut self) -> &mut dyn DfeObject {
        &mut *self.0
    }
}

struct OptionalObjectTarget<'a, M>(&'a mut Option<M>);

impl<M: DfeModel> ObjectSlot for OptionalObjectTarget<'_, M> {
    fn object(&mut self) -> &mut dyn DfeObject {
        self.0.get_or_insert_with(M::default)
    }
}

struct ScalarListTarget<'a, S>(&'a mut Vec<S>);

impl<S: Scalar> ListSlot for ScalarListTarget<'_, S> {
    fn push_value(&mut self, value: Value) -> bool {
        match S::from_value(value) {
            Some(converted) => {
                self.0.push(converted);
                true
            }
            None => false,
        }
    }
}

struct ObjectListTarget<'a, M>(&'a mut Vec<M>);

impl<M: DfeModel> ListSlot for ObjectListTarget<'_, M> {
    fn push_object(&mut self) -> Option<&mut dyn DfeObject> {
        self.0.push(M::default());
        self.0.last_mut().map(|item| item as &mut dyn DfeObject)
    }
}

/// A Rust type that maps to one codec [`Value`].
pub trait Scalar: Sized {
    /// `None` means the field is empty.
    fn to_value(&self) -> Option<Value>;
    /// `None` means the value does not fit this type.
    fn from_value(value: Value) -> Option<Self>;
}

impl Scalar for String {
    fn to_value(&self) -> Option<Value> {
        (!self.is_empty()).then(|| Value::Str(self.clone()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(text) | Value::Token(text) => Some(text),
            _ => None,
        }
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                fn to_value(&self) -> Option<Value> {
                    Some(Value::Int(i128::from(*self)))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Int(number) => <$ty>::try_from(number).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

integer_scalar!(i32, i64, u8, u16, u32, u64);

macro_rules! plain_scalar {
    ($($ty:ty => $variant:ident),+) => {
        $(
            impl Scalar for $ty {
                fn to_value(&self) -> Option<Value> {
                    Some(Value::$variant(*self))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+
    };
}

plain_scalar!(
    Decimal => Decimal,
    NaiveDate => Date,
    DateTime<FixedOffset> => DateTime,
    NaiveTime => Time
);

impl<T: Scalar> Scalar for Option<T> {
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(Scalar::to_value)
    }

    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }
}

/// Type-erased handle to a bound model type.
#[derive(Clone, Copy)]
pub struct ModelType {
    type_id: TypeId,
    type_path: &'static str,
    schema: fn() -> Arc<ModelSchema>,
    create: fn() -> Box<dyn DfeObject>,
}

impl ModelType {
    pub fn of<T: DfeModel>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: std::any::type_name::<T>(),
            schema: schema_for::<T>,
            create: || Box::new(T::default()),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    pub fn schema(&self) -> Arc<ModelSchema> {
        (self.schema)()
    }

    /// Creates a default instance of the model.
    pub fn create(&self) -> Box<dyn DfeObject> {
        (self.create)()
    }
}

impl std::fmt::Debug for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelType")
            .field("type_path", &self.type_path)
            .finish()
    }
}

/// Declares an enumeration serialized through an explicit token table.
///
/// The document vocabulary stays separate from the Rust variant names:
///
/// ```rust
/// dfe_serde::token_enum! {
///     /// Ambiente de emissão.
///     pub enum TipoAmbiente {
///         Producao => "1",
///         Homologacao => "2",
///     }
/// }
///
/// assert_eq!(TipoAmbiente::Homologacao.token(), "2");
/// assert_eq!(TipoAmbiente::from_token("1"), Some(TipoAmbiente::Producao));
/// assert_eq!(TipoAmbiente::TOKENS, &["1", "2"]);
/// ```
#[macro_export]
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Legal document tokens, in declaration order.
            pub const TOKENS: &'static [&'static str] = &[$($token),+];

            pub fn token(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }

            pub fn from_token(token: &str) -> Option<Self> {
                match token {
                    $( $token => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl $crate::model::Scalar for $name {
            fn to_value(&self) -> Option<$crate::codec::Value> {
                Some($crate::codec::Value::Token(self.token().to_string()))
            }

            fn from_value(value: $crate::codec::Value) -> Option<Self> {
                match value {
                    $crate::codec::Value::Token(token) => Self::from_token(&token),
                    _ => None,
                }
            }
        }
    };
}
