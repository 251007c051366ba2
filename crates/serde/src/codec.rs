//! Bidirectional conversion between field values and their XML text.
//!
//! All functions are total: a failed conversion is returned as a
//! [`CodecError`] (encode) or as a [`Decoded`] carrying a problem (decode),
//! which the walker turns into an alert. Formatting never depends on the
//! host locale.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::metadata::FieldKind;
use crate::options::SerializationOptions;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
pub const TIME_FORMAT: &str = "%H:%M:%S";

const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A scalar field value as seen by the codec.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    /// Wide enough for every supported integer type, `u64` included.
    Int(i128),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Time(NaiveTime),
    /// Document token of an enumerated value.
    Token(String),
}

impl Value {
    fn label(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Time(_) => "time",
            Value::Token(_) => "enumerated",
        }
    }
}

/// Conversion failure, carrying the alert message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CodecError(pub String);

/// Result of decoding one text value.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Value to assign; a zero value for numeric kinds on failure.
    pub value: Option<Value>,
    pub problem: Option<CodecError>,
}

impl Decoded {
    fn ok(value: Value) -> Self {
        Self {
            value: Some(value),
            problem: None,
        }
    }

    fn failed(value: Option<Value>, kind: &FieldKind, text: &str) -> Self {
        Self {
            value,
            problem: Some(CodecError(format!(
                "valor '{}' inválido para o tipo {}",
                text,
                kind.label()
            ))),
        }
    }
}

/// Encodes a scalar value as XML text.
///
/// `decimals` fixes the number of decimal places for `Decimal` fields.
pub fn encode(
    kind: &FieldKind,
    value: &Value,
    decimals: Option<u32>,
    options: &SerializationOptions,
) -> Result<String, CodecError> {
    match (kind, value) {
        (FieldKind::String, Value::Str(text)) => Ok(if options.remove_accents {
            remove_accents(text)
        } else {
            text.clone()
        }),
        (FieldKind::Integer, Value::Int(number)) => Ok(number.to_string()),
        (FieldKind::Decimal, Value::Decimal(number)) => Ok(format_decimal(*number, decimals)),
        (FieldKind::Date, Value::Date(date)) => Ok(date.format(DATE_FORMAT).to_string()),
        (FieldKind::DateTime, Value::DateTime(stamp)) => {
            Ok(stamp.format(DATE_TIME_FORMAT).to_string())
        }
        (FieldKind::Time, Value::Time(time)) => Ok(time.format(TIME_FORMAT).to_string()),
        (FieldKind::Enumerated(tokens), Value::Token(token)) => {
            if tokens.contains(&token.as_str()) {
                Ok(token.clone())
            } else {
                Err(CodecError(format!(
                    "valor '{}' fora da lista de valores permitidos",
                    token
                )))
            }
        }
        (FieldKind::NestedObject | FieldKind::Collection(_), _) => Err(CodecError(format!(
            "tipo {} não é convertido diretamente",
            kind.label()
        ))),
        (_, other) => Err(CodecError(format!(
            "valor do tipo {} incompatível com o campo do tipo {}",
            other.label(),
            kind.label()
        ))),
    }
}

/// Decodes XML text into a scalar value.
pub fn decode(kind: &FieldKind, text: &str, _options: &SerializationOptions) -> Decoded {
    let trimmed = text.trim();
    match kind {
        FieldKind::String => Decoded::ok(Value::Str(text.to_string())),
        FieldKind::Integer => match trimmed.parse::<i128>() {
            Ok(number) => Decoded::ok(Value::Int(number)),
            Err(_) => Decoded::failed(Some(Value::Int(0)), kind, text),
        },
        FieldKind::Decimal => match parse_decimal(trimmed) {
            Some(number) => Decoded::ok(Value::Decimal(number)),
            None => Decoded::failed(Some(Value::Decimal(Decimal::ZERO)), kind, text),
        },
        FieldKind::Date => match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            Ok(date) => Decoded::ok(Value::Date(date)),
            Err(_) => Decoded::failed(None, kind, text),
        },
        FieldKind::DateTime => match parse_date_time(trimmed) {
            Some(stamp) => Decoded::ok(Value::DateTime(stamp)),
            None => Decoded::failed(None, kind, text),
        },
        FieldKind::Time => match NaiveTime::parse_from_str(trimmed, TIME_FORMAT) {
            Ok(time) => Decoded::ok(Value::Time(time)),
            Err(_) => Decoded::failed(None, kind, text),
        },
        FieldKind::Enumerated(tokens) => {
            if tokens.contains(&trimmed) {
                Decoded::ok(Value::Token(trimmed.to_string()))
            } else {
                Decoded {
                    value: None,
                    problem: Some(CodecError(format!(
                        "valor '{}' fora da lista de valores permitidos",
                        text
                    ))),
                }
            }
        }
        FieldKind::NestedObject | FieldKind::Collection(_) => Decoded {
            value: None,
            problem: Some(CodecError(format!(
                "tipo {} não é convertido diretamente",
                kind.label()
            ))),
        },
    }
}

/// Strips diacritics, leaving the base letters (`ação` becomes `acao`).
pub fn remove_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

fn format_decimal(number: Decimal, decimals: Option<u32>) -> String {
    match decimals {
        Some(places) => {
            let rounded =
                number.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", places as usize, rounded)
        }
        None => number.to_string(),
    }
}

// Decimal::from_str accepts `_` separators; documents never carry them.
fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() || text.contains('_') {
        return None;
    }
    Decimal::from_str(text).ok()
}

fn parse_date_time(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp);
    }
    NaiveDateTime::parse_from_str(text, NAIVE_DATE_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}
