//! Protobuf JSON mapping over [`DynamicMessage`].
//!
//! The field mapping itself is `prost-reflect`'s serde support. Input is
//! first read into a [`serde_json::Value`] under the message descriptor,
//! which is where the checks the mapping leaves to the caller happen:
//!
//! - a field given twice, under one key or under its JSON and proto names
//! - two members of one oneof set to non-null values
//! - nesting deeper than [`RECURSION_LIMIT`]
//!
//! The same pass pulls `float` values that only leave the `f32` range through
//! decimal rounding (`3.4028235e38`) back onto `f32::MAX`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use prost_reflect::{
    DeserializeOptions, DynamicMessage, FieldDescriptor, Kind, MessageDescriptor,
    SerializeOptions,
};
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};

/// Maximum nesting of JSON objects and arrays in one payload.
pub const RECURSION_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonParseOptions {
    /// Skip keys that name no field instead of rejecting the payload.
    pub ignore_unknown_fields: bool,
}

/// Parses `bytes` as the JSON form of a `descriptor` message.
pub fn decode(
    descriptor: &MessageDescriptor,
    bytes: &[u8],
    options: JsonParseOptions,
) -> Result<DynamicMessage, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = Checked::root(descriptor).deserialize(&mut deserializer)?;
    deserializer.end()?;

    let options = DeserializeOptions::new().deny_unknown_fields(!options.ignore_unknown_fields);
    DynamicMessage::deserialize_with_options(descriptor.clone(), value, &options)
}

/// Prints `message` in canonical form: lowerCamelCase names, default
/// values omitted, 64-bit integers quoted, enums by name.
pub fn encode(message: &DynamicMessage) -> Result<Vec<u8>, serde_json::Error> {
    let mut serializer = serde_json::Serializer::new(Vec::new());
    message.serialize_with_options(&mut serializer, &SerializeOptions::new())?;
    Ok(serializer.into_inner())
}

/// What the checking pass knows about the value it is reading.
#[derive(Debug, Clone)]
enum Shape {
    Message(MessageDescriptor),
    /// A map field's object; the shape applies to each entry value.
    Map(Box<Shape>),
    Float,
    Opaque,
}

impl Shape {
    fn of_field(field: &FieldDescriptor) -> Self {
        match field.kind() {
            Kind::Message(entry) if field.is_map() => {
                Shape::Map(Box::new(Self::of_kind(&entry.map_entry_value_field().kind())))
            }
            kind => Self::of_kind(&kind),
        }
    }

    fn of_kind(kind: &Kind) -> Self {
        match kind {
            Kind::Float => Shape::Float,
            Kind::Message(m) if m.full_name() == "google.protobuf.FloatValue" => Shape::Float,
            // Well-known types have their own JSON forms; only literal keys
            // are checked inside them.
            Kind::Message(m) if m.package_name() == "google.protobuf" => Shape::Opaque,
            Kind::Message(m) => Shape::Message(m.clone()),
            _ => Shape::Opaque,
        }
    }
}

/// `null` sets a `google.protobuf.NullValue` field rather than clearing it.
fn null_is_a_value(field: &FieldDescriptor) -> bool {
    matches!(field.kind(), Kind::Enum(e) if e.full_name() == "google.protobuf.NullValue")
}

/// Finite decimals just above `f32::MAX` still round to a finite `f32`.
fn clamp_f32_rounding(v: f64) -> f64 {
    if v.abs() > f32::MAX as f64 && (v as f32).is_finite() {
        (v as f32) as f64
    } else {
        v
    }
}

struct Checked {
    shape: Shape,
    depth: usize,
}

impl Checked {
    fn root(descriptor: &MessageDescriptor) -> Self {
        Self {
            shape: Shape::Message(descriptor.clone()),
            depth: 0,
        }
    }

    fn child(&self, shape: Shape) -> Self {
        Self {
            shape,
            depth: self.depth + 1,
        }
    }

    fn enter<E: de::Error>(&self) -> Result<(), E> {
        if self.depth >= RECURSION_LIMIT {
            return Err(E::custom(format!(
                "nesting exceeds recursion limit of {RECURSION_LIMIT}"
            )));
        }
        Ok(())
    }
}

impl<'de> DeserializeSeed<'de> for Checked {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Checked {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        let v = match self.shape {
            Shape::Float => clamp_f32_rounding(v),
            _ => v,
        };
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        self.enter()?;
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(self.child(self.shape.clone()))? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        self.enter()?;
        let mut object = Map::new();
        let mut numbers = HashSet::new();
        let mut oneofs: HashMap<String, String> = HashMap::new();

        while let Some(key) = map.next_key::<String>()? {
            if object.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key `{key}`")));
            }
            let field = match &self.shape {
                Shape::Message(message) => message
                    .get_field_by_json_name(&key)
                    .or_else(|| message.get_field_by_name(&key)),
                _ => None,
            };
            let shape = match (&field, &self.shape) {
                (Some(field), _) => Shape::of_field(field),
                (None, Shape::Map(value)) => (**value).clone(),
                (None, _) => Shape::Opaque,
            };
            let value = map.next_value_seed(self.child(shape))?;

            if let Some(field) = field {
                if !numbers.insert(field.number()) {
                    return Err(de::Error::custom(format!(
                        "field `{}` is set more than once",
                        field.name()
                    )));
                }
                let oneof = field.containing_oneof().filter(|_| !field.field_descriptor_proto().proto3_optional());
                if let Some(oneof) = oneof {
                    if !value.is_null() || null_is_a_value(&field) {
                        let name = field.name().to_owned();
                        if let Some(other) = oneofs.insert(oneof.name().to_owned(), name) {
                            return Err(de::Error::custom(format!(
                                "fields `{other}` and `{}` of oneof `{}` are both set",
                                field.name(),
                                oneof.name()
                            )));
                        }
                    }
                }
            }
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_rounding_overshoot_is_clamped() {
        let max = f32::MAX as f64;
        assert_eq!(clamp_f32_rounding(3.4028235e38), max);
        assert_eq!(clamp_f32_rounding(-3.4028235e38), -max);
        assert_eq!(clamp_f32_rounding(1.5), 1.5);
        assert_eq!(clamp_f32_rounding(1e39), 1e39);
    }
}
