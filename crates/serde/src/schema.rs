//! External schema validation hook.
//!
//! XSD validation is not part of the marshalling core. A validator is
//! attached to the facade and consulted only when
//! [`SerializationOptions::show_schema_errors`](crate::SerializationOptions)
//! is enabled; each returned violation becomes a schema alert.

/// Validates a rendered document against its schema.
pub trait SchemaValidator: Send + Sync {
    /// Returns one message per violation; empty when the document is valid.
    fn validate(&self, document: &[u8]) -> Vec<String>;
}

impl<F> SchemaValidator for F
where
    F: Fn(&[u8]) -> Vec<String> + Send + Sync,
{
    fn validate(&self, document: &[u8]) -> Vec<String> {
        self(document)
    }
}
