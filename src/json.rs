//! Canonical proto3 JSON mapping.
//!
//! Serialization walks the same [`MessageSpec`](crate::spec::MessageSpec)
//! that drives the binary codec, producing a `serde_json::Value` tree.
//! Parsing resolves object keys by the field's JSON name first, then its
//! proto name, and ignores unknown keys. Well-known types get their
//! special shapes through the hooks in [`well_known`].

pub mod well_known;

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::message::Message;

/// Options accepted by both JSON directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Use the camelCase `jsonName` for object keys; proto names otherwise.
    pub json_names: bool,
    /// Serialize enums by declared name; integer values otherwise.
    pub enum_names: bool,
    /// Elide proto3 default values.
    pub omit_default_values: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            json_names: true,
            enum_names: true,
            omit_default_values: true,
        }
    }
}

impl JsonOptions {
    /// The canonical mapping: camelCase keys, enum names, defaults elided.
    pub fn new() -> Self {
        JsonOptions::default()
    }

    /// Keep proto field names instead of camelCase JSON names.
    pub fn with_proto_names(self) -> Self {
        JsonOptions {
            json_names: false,
            ..self
        }
    }

    /// Serialize enums as their integer value.
    pub fn with_enum_numbers(self) -> Self {
        JsonOptions {
            enum_names: false,
            ..self
        }
    }

    /// Emit fields even when they hold their default value.
    pub fn with_defaults(self) -> Self {
        JsonOptions {
            omit_default_values: false,
            ..self
        }
    }

    pub(crate) fn keep_defaults(&self) -> Self {
        JsonOptions {
            omit_default_values: false,
            ..*self
        }
    }
}

/// Serialize a message to the canonical JSON mapping.
///
/// Total: a well-typed message always serializes.
pub fn to_json<M: Message>(message: &M, options: &JsonOptions) -> Value {
    // Well-known messages serialize their own fields with defaults kept so
    // the shape hooks always see seconds/nanos/value/... present.
    let effective = if well_known::is_well_known(M::NAME) {
        options.keep_defaults()
    } else {
        *options
    };
    let mut object = Map::new();
    for field_spec in M::spec().fields() {
        field_spec.emit_json(message, &effective, &mut object);
    }
    well_known::pack(M::NAME, Value::Object(object))
}

/// Parse a message from the canonical JSON mapping.
///
/// JSON `null` for a field means "absent"; unknown object keys are
/// ignored. Errors reuse the binary decode taxonomy, keyed by the
/// offending fragment.
pub fn from_json<M: Message>(value: &Value) -> Result<M, DecodeError> {
    let unpacked;
    let value = match well_known::unpack(M::NAME, value)? {
        Some(wrapped) => {
            unpacked = wrapped;
            &unpacked
        }
        None => value,
    };
    let object = value
        .as_object()
        .ok_or_else(|| DecodeError::illegal_value("expected JSON object", M::NAME))?;
    let mut message = M::default();
    for field_spec in M::spec().fields() {
        field_spec.absorb_json(&mut message, object)?;
    }
    Ok(message)
}
