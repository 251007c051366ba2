//! Validation alerts collected during a single call.
//!
//! The walker never stops on a violation. Each one is pushed to the call's
//! [`AlertCollector`], so the caller sees every problem in the document
//! after one pass.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::metadata::FieldDescriptor;

/// Message for a required field with no value.
pub const MSG_REQUIRED: &str = "campo obrigatório não informado";
/// Message for a `None` item handed to `serialize`.
pub const MSG_NULL_ITEM: &str = "O item é nulo";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new("%(TAG|ID|DESCRICAO|MSG)%").expect("placeholder pattern is valid")
});

/// Category of a collected alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// No item was provided to serialize.
    NullInput,
    RequiredMissing,
    /// Collection size outside its occurrence bounds.
    Cardinality,
    /// Scalar text length outside its occurrence bounds.
    Length,
    Decode,
    Encode,
    /// Reported by the external schema validator.
    Schema,
}

/// One detected violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub tag: String,
    pub id: String,
    pub description: String,
    pub message: String,
    /// Message rendered through the alert template.
    pub text: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Ordered alerts of one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertList(Vec<Alert>);

impl AlertList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alert> {
        self.0.iter()
    }

    /// Rendered alert texts, in detection order.
    pub fn texts(&self) -> Vec<&str> {
        self.0.iter().map(|alert| alert.text.as_str()).collect()
    }

    pub fn of_kind(&self, kind: AlertKind) -> impl Iterator<Item = &Alert> {
        self.0.iter().filter(move |alert| alert.kind == kind)
    }

    pub fn into_vec(self) -> Vec<Alert> {
        self.0
    }
}

impl std::ops::Deref for AlertList {
    type Target = [Alert];

    fn deref(&self) -> &[Alert] {
        &self.0
    }
}

impl IntoIterator for AlertList {
    type Item = Alert;
    type IntoIter = std::vec::IntoIter<Alert>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AlertList {
    type Item = &'a Alert;
    type IntoIter = std::slice::Iter<'a, Alert>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Alert message template.
///
/// Placeholders are substituted in a single pass; text inserted for one
/// placeholder is never scanned again.
#[derive(Debug, Clone, Copy)]
pub struct AlertFormat<'a> {
    template: &'a str,
}

impl<'a> AlertFormat<'a> {
    pub fn new(template: &'a str) -> Self {
        Self { template }
    }

    pub fn render(&self, tag: &str, id: &str, description: &str, message: &str) -> String {
        PLACEHOLDER
            .replace_all(self.template, |caps: &Captures<'_>| match &caps[1] {
                "TAG" => tag.to_string(),
                "ID" => id.to_string(),
                "DESCRICAO" => description.to_string(),
                _ => message.to_string(),
            })
            .into_owned()
    }
}

/// Call-scoped alert accumulator.
#[derive(Debug)]
pub struct AlertCollector<'a> {
    format: AlertFormat<'a>,
    alerts: Vec<Alert>,
}

impl<'a> AlertCollector<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            format: AlertFormat::new(template),
            alerts: Vec::new(),
        }
    }

    /// Records a violation tied to a field, rendered through the template.
    pub fn field(&mut self, kind: AlertKind, field: &FieldDescriptor, message: impl Into<String>) {
        let message = message.into();
        let text = self
            .format
            .render(field.name, field.id, field.description, &message);
        tracing::trace!(field = field.name, id = field.id, ?kind, %text, "alert");
        self.alerts.push(Alert {
            kind,
            tag: field.name.to_string(),
            id: field.id.to_string(),
            description: field.description.to_string(),
            message,
            text,
        });
    }

    /// Records a violation not tied to any field; the text is the message.
    pub fn general(&mut self, kind: AlertKind, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(?kind, %message, "alert");
        self.alerts.push(Alert {
            kind,
            tag: String::new(),
            id: String::new(),
            description: String::new(),
            text: message.clone(),
            message,
        });
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn finish(self) -> AlertList {
        AlertList(self.alerts)
    }
}
