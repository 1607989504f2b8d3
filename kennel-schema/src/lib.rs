//! kennel-schema: validation of untyped field mappings.
//!
//! A [`Schema`] is a closed set of typed fields. Validating a request body
//! against it walks every field and every key once and accumulates all
//! violations, so clients get the complete list in one response. Only the
//! filtered, type-checked mapping ever leaves this crate, usually straight
//! into `serde_json::from_value` for a typed record.

use kennel_core::errors::KennelError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

/// Message for an id path segment that is not a base-10 integer.
pub const INVALID_ID_MESSAGE: &str = "id should be a number";

/// Message used when the body is valid JSON but not an object.
pub const NOT_AN_OBJECT_MESSAGE: &str = "request body should be an object";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// A JSON number without a fractional part that fits in an `i64`.
    /// `3.0` and `1e2` count; they are stored as `3` and `100`.
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
        }
    }

    /// Type-check a present value and return it in canonical form, or the
    /// violation message.
    fn check(&self, value: &Value) -> Result<Value, String> {
        match (self.kind, value) {
            (FieldKind::String, Value::String(_)) => Ok(value.clone()),
            (FieldKind::String, _) => Err(format!("{} should be a string", self.name)),
            (FieldKind::Integer, Value::Number(n)) => whole_number(n)
                .map(Value::from)
                .ok_or_else(|| format!("{} should be a whole number", self.name)),
            (FieldKind::Integer, _) => Err(format!("{} should be a number", self.name)),
        }
    }
}

fn whole_number(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Whether every schema field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// create: all fields required
    Required,
    /// patch: any subset of fields
    Optional,
}

/// Ordered list of human-readable validation messages.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchemaErrors {
    messages: Vec<String>,
}

impl SchemaErrors {
    pub fn push(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    pub fn into_bad_request_anyhow(self, message: &str) -> anyhow::Error {
        KennelError::bad_request(message)
            .with_errors(self.messages)
            .into_anyhow()
    }
}

/// A closed set of typed fields.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [Field],
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate `data`, returning the known and type-correct fields.
    ///
    /// Field messages come first in schema order, then one
    /// `'<key>' is not a valid key` per unknown key in body order.
    pub fn validate(&self, data: &Value, presence: Presence) -> Result<Map<String, Value>, SchemaErrors> {
        let mut errors = SchemaErrors::default();
        let empty = Map::new();

        let obj = match data.as_object() {
            Some(obj) => obj,
            None => {
                errors.push(NOT_AN_OBJECT_MESSAGE);
                &empty
            }
        };

        let mut out = Map::new();
        for field in self.fields {
            match obj.get(field.name) {
                Some(value) => match field.check(value) {
                    Ok(value) => {
                        out.insert(field.name.to_string(), value);
                    }
                    Err(msg) => errors.push(msg),
                },
                // a missing required field is reported like a wrong type
                None if presence == Presence::Required => {
                    if let Err(msg) = field.check(&Value::Null) {
                        errors.push(msg);
                    }
                }
                None => {}
            }
        }

        for key in obj.keys() {
            if self.field(key).is_none() {
                errors.push(format!("'{key}' is not a valid key"));
            }
        }

        if errors.is_empty() {
            Ok(out)
        } else {
            Err(errors)
        }
    }

    /// Validate and deserialize into a typed record.
    ///
    /// Violations become a 400 `KennelError` carrying the message list.
    pub fn parse<T>(&self, data: &Value, presence: Presence, error_message: &str) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        let fields = self
            .validate(data, presence)
            .map_err(|e| e.into_bad_request_anyhow(error_message))?;

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            KennelError::general_error(error_message)
                .with_source(e)
                .into_anyhow()
        })
    }
}

/// Parse an id path segment as a base-10 integer.
pub fn parse_id(raw: &str) -> anyhow::Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| KennelError::bad_request(INVALID_ID_MESSAGE).into_anyhow())
}
