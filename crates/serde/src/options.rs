//! Per-call serialization options.
//!
//! Options are plain data handed to every facade call. They hold no alert
//! state, so one instance can be shared freely between threads.
//!
//! # Example
//!
//! ```rust
//! use dfe_serde::SerializationOptions;
//!
//! let options = SerializationOptions::default()
//!     .pretty()
//!     .with_alert_format("%ID% - %MSG%");
//! assert!(options.indent_output);
//! ```

use serde::{Deserialize, Serialize};

/// Template used when no other alert format is configured.
pub const DEFAULT_ALERT_FORMAT: &str = "TAG:%TAG% ID:%ID%/%TAG%(%DESCRICAO%) - %MSG%.";

/// Options recognized by the serializer facade.
///
/// Deserializable from any serde format; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializationOptions {
    /// Pretty-print output with two-space indentation.
    pub indent_output: bool,
    /// Strip diacritics from string values before emission.
    pub remove_accents: bool,
    /// Run the attached schema validator and report its findings as alerts.
    pub show_schema_errors: bool,
    /// Alert template using `%TAG%`, `%ID%`, `%DESCRICAO%` and `%MSG%`.
    pub alert_format: String,
    /// Write the `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl Default for SerializationOptions {
    fn default() -> Self {
        Self {
            indent_output: false,
            remove_accents: false,
            show_schema_errors: false,
            alert_format: DEFAULT_ALERT_FORMAT.to_string(),
            xml_declaration: true,
        }
    }
}

impl SerializationOptions {
    pub fn pretty(mut self) -> Self {
        self.indent_output = true;
        self
    }

    pub fn compact(mut self) -> Self {
        self.indent_output = false;
        self
    }

    pub fn with_alert_format(mut self, format: impl Into<String>) -> Self {
        self.alert_format = format.into();
        self
    }

    pub fn with_schema_errors(mut self, enabled: bool) -> Self {
        self.show_schema_errors = enabled;
        self
    }

    pub fn with_accent_removal(mut self, enabled: bool) -> Self {
        self.remove_accents = enabled;
        self
    }
}
