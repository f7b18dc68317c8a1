//! Pokemon document model
//!
//! Field names follow the pokedex dataset (`type`, `HP`, `Sp. Attack`, ...)
//! so seeded records and API bodies share one wire format. Unknown fields are
//! dropped on decode.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ValidationError;

/// Numeric pokedex identifier, unique within the collection
pub type PokemonId = i64;

/// A single pokemon record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PokemonName>,

    /// Elemental types, checked against the [`TypeSchema`](super::TypeSchema)
    #[serde(rename = "type", default)]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<BaseStats>,
}

/// Localized names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub japanese: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french: Option<String>,
}

/// Base battle stats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(rename = "HP", default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    #[serde(rename = "Attack", default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<u32>,
    #[serde(rename = "Defense", default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<u32>,
    #[serde(rename = "Sp. Attack", default, skip_serializing_if = "Option::is_none")]
    pub sp_attack: Option<u32>,
    #[serde(rename = "Sp. Defense", default, skip_serializing_if = "Option::is_none")]
    pub sp_defense: Option<u32>,
    #[serde(rename = "Speed", default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
}

impl Pokemon {
    /// Decode a raw JSON document.
    ///
    /// Only decoding happens here; schema rules are applied by
    /// [`TypeSchema::validate`](super::TypeSchema::validate).
    pub fn from_document(doc: Value) -> Result<Self, ValidationError> {
        if !doc.is_object() {
            return Err(ValidationError::NotAnObject);
        }
        Ok(serde_json::from_value(doc)?)
    }

    /// Decode a full replacement document addressed by `id`.
    ///
    /// A body without an `id`, or with `"id": null`, takes the one from the path.
    pub fn replacement(mut doc: Value, id: PokemonId) -> Result<Self, ValidationError> {
        let Some(fields) = doc.as_object_mut() else {
            return Err(ValidationError::NotAnObject);
        };
        let slot = fields.entry("id").or_insert(Value::Null);
        if slot.is_null() {
            *slot = Value::from(id);
        }
        Self::from_document(doc)
    }

    /// Apply a partial update.
    ///
    /// Top-level keys in `patch` overwrite the stored ones; nested objects
    /// such as `name` are replaced whole.
    pub fn patched(&self, patch: Value) -> Result<Self, ValidationError> {
        let Value::Object(patch) = patch else {
            return Err(ValidationError::NotAnObject);
        };

        let mut doc: Map<String, Value> = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => return Err(ValidationError::NotAnObject),
        };
        doc.extend(patch);

        Self::from_document(Value::Object(doc))
    }

    /// English name, if any.
    pub fn english_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| n.english.as_deref())
    }
}
