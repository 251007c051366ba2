//! Depth-first traversal between model instances and [`Element`] trees.
//!
//! Both directions visit descriptors in declaration order and record every
//! violation in the call's [`AlertCollector`] without stopping. Recursion
//! depth is bounded by the nesting of the model types.

use crate::alert::{AlertCollector, AlertKind, MSG_REQUIRED};
use crate::codec::{self, Value};
use crate::metadata::{FieldDescriptor, FieldKind, UNBOUNDED};
use crate::model::{DfeObject, FieldMut, FieldRef};
use crate::options::SerializationOptions;
use crate::xml::Element;

/// Builds the element named `name` for `object`.
pub fn to_element(
    object: &dyn DfeObject,
    name: &str,
    options: &SerializationOptions,
    alerts: &mut AlertCollector<'_>,
) -> Element {
    Walker { options, alerts }.write_object(object, name)
}

/// Populates `object` from `element`, leaving unmatched fields at their
/// current value.
pub fn from_element(
    object: &mut dyn DfeObject,
    element: &Element,
    options: &SerializationOptions,
    alerts: &mut AlertCollector<'_>,
) {
    Walker { options, alerts }.read_object(object, element)
}

struct Walker<'w, 'f> {
    options: &'w SerializationOptions,
    alerts: &'w mut AlertCollector<'f>,
}

impl Walker<'_, '_> {
    fn write_object(&mut self, object: &dyn DfeObject, name: &str) -> Element {
        let schema = object.schema();
        let mut element = Element::new(name);
        if let Some(namespace) = schema.namespace {
            element.push_attribute("xmlns", namespace);
        }

        for (index, field) in schema.fields.iter().enumerate() {
            let value = object.read_field(index);
            if value.is_empty() {
                if field.required {
                    self.alerts
                        .field(AlertKind::RequiredMissing, field, MSG_REQUIRED);
                }
                continue;
            }

            tracing::trace!(field = field.name, kind = field.kind.label(), "write field");
            match (&field.kind, value) {
                (FieldKind::Collection(item_kind), FieldRef::List(items)) => {
                    self.write_collection(&mut element, field, item_kind, items);
                }
                (FieldKind::NestedObject, FieldRef::Object(nested)) => {
                    let child = self.write_object(nested, field.name);
                    element.push_child(child);
                }
                (kind, FieldRef::Value(value)) if kind.is_scalar() => {
                    self.write_scalar(&mut element, field, kind, &value);
                }
                (kind, _) => self.alerts.field(
                    AlertKind::Encode,
                    field,
                    format!("valor incompatível com o campo do tipo {}", kind.label()),
                ),
            }
        }

        element
    }

    fn write_collection(
        &mut self,
        parent: &mut Element,
        field: &FieldDescriptor,
        item_kind: &FieldKind,
        items: Vec<FieldRef<'_>>,
    ) {
        // Every present item is emitted even when the bound is exceeded.
        let present = items.iter().filter(|item| !item.is_empty()).count();
        self.check_cardinality(field, present);

        for item in items {
            match (item_kind, item) {
                (_, FieldRef::Absent) => {}
                (FieldKind::NestedObject, FieldRef::Object(nested)) => {
                    let child = self.write_object(nested, field.name);
                    parent.push_child(child);
                }
                (kind, FieldRef::Value(value)) if kind.is_scalar() => {
                    if let Some(text) = self.encode(field, kind, &value) {
                        parent.push_child(Element::leaf(field.name, text));
                    }
                }
                (kind, _) => self.alerts.field(
                    AlertKind::Encode,
                    field,
                    format!("item incompatível com a coleção do tipo {}", kind.label()),
                ),
            }
        }
    }

    fn write_scalar(
        &mut self,
        parent: &mut Element,
        field: &FieldDescriptor,
        kind: &FieldKind,
        value: &Value,
    ) {
        let Some(text) = self.encode(field, kind, value) else {
            return;
        };
        self.check_length(field, &text);

        if field.is_attribute() {
            parent.push_attribute(field.name, text);
        } else {
            parent.push_child(Element::leaf(field.name, text));
        }
    }

    fn encode(&mut self, field: &FieldDescriptor, kind: &FieldKind, value: &Value) -> Option<String> {
        match codec::encode(kind, value, field.decimals, self.options) {
            Ok(text) => Some(text),
            Err(problem) => {
                self.alerts.field(AlertKind::Encode, field, problem.to_string());
                None
            }
        }
    }

    fn read_object(&mut self, object: &mut dyn DfeObject, element: &Element) {
        let schema = object.schema();

        for (index, field) in schema.fields.iter().enumerate() {
            tracing::trace!(field = field.name, kind = field.kind.label(), "read field");
            match &field.kind {
                FieldKind::Collection(item_kind) => {
                    // Empty scalar items are absent, as on output.
                    let matches: Vec<&Element> = element
                        .children_named(field.name)
                        .filter(|item| {
                            **item_kind == FieldKind::NestedObject || !item.text().is_empty()
                        })
                        .collect();
                    if matches.is_empty() {
                        self.missing(field);
                        continue;
                    }
                    self.check_cardinality(field, matches.len());

                    let FieldMut::List(mut slot) = object.write_field(index) else {
                        continue;
                    };
                    for item in matches {
                        if **item_kind == FieldKind::NestedObject {
                            if let Some(nested) = slot.push_object() {
                                self.read_object(nested, item);
                            }
                        } else if let Some(value) = self.decode(field, item_kind, item.text())
                            && !slot.push_value(value)
                        {
                            self.incompatible(field);
                        }
                    }
                }
                FieldKind::NestedObject => {
                    let Some(child) = element.child(field.name) else {
                        self.missing(field);
                        continue;
                    };
                    if let FieldMut::Object(mut slot) = object.write_field(index) {
                        self.read_object(slot.object(), child);
                    }
                }
                kind => {
                    let text = if field.is_attribute() {
                        element.attribute(field.name)
                    } else {
                        element.child(field.name).map(Element::text)
                    };
                    let Some(text) = text.filter(|text| !text.is_empty()) else {
                        self.missing(field);
                        continue;
                    };
                    self.check_length(field, text);

                    if let Some(value) = self.decode(field, kind, text)
                        && let FieldMut::Value(mut slot) = object.write_field(index)
                        && !slot.assign(value)
                    {
                        self.incompatible(field);
                    }
                }
            }
        }
    }

    fn decode(&mut self, field: &FieldDescriptor, kind: &FieldKind, text: &str) -> Option<Value> {
        let decoded = codec::decode(kind, text, self.options);
        if let Some(problem) = decoded.problem {
            self.alerts.field(AlertKind::Decode, field, problem.to_string());
        }
        decoded.value
    }

    fn missing(&mut self, field: &FieldDescriptor) {
        if field.required {
            self.alerts
                .field(AlertKind::RequiredMissing, field, MSG_REQUIRED);
        }
    }

    fn incompatible(&mut self, field: &FieldDescriptor) {
        self.alerts.field(
            AlertKind::Decode,
            field,
            "valor incompatível com o tipo do modelo",
        );
    }

    /// Repetition bounds of a collection; at most one alert per field.
    fn check_cardinality(&mut self, field: &FieldDescriptor, count: usize) {
        let message = if count > field.max_occurs {
            format!(
                "quantidade de ocorrências ({}) acima do máximo permitido ({})",
                count, field.max_occurs
            )
        } else if count < field.min_occurs {
            format!(
                "quantidade de ocorrências ({}) abaixo do mínimo exigido ({})",
                count, field.min_occurs
            )
        } else {
            return;
        };
        self.alerts.field(AlertKind::Cardinality, field, message);
    }

    /// Length bounds of a scalar's text.
    fn check_length(&mut self, field: &FieldDescriptor, text: &str) {
        let length = text.chars().count();
        if length < field.min_occurs || length > field.max_occurs {
            let bounds = if field.max_occurs == UNBOUNDED {
                format!("mínimo {}", field.min_occurs)
            } else {
                format!("{}-{}", field.min_occurs, field.max_occurs)
            };
            self.alerts.field(
                AlertKind::Length,
                field,
                format!("tamanho ({}) fora do permitido ({})", length, bounds),
            );
        }
    }
}
