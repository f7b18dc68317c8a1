//! Record schema built from the type reference data
//!
//! The schema carries the set of known elemental types and applies the
//! document validators on create, replace, patch and seed.

use std::collections::BTreeSet;

use super::{Pokemon, ValidationError};

/// Maximum length of `name.english`, in characters
pub const MAX_ENGLISH_NAME_LEN: usize = 20;

/// Validators for pokemon documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSchema {
    types: BTreeSet<String>,
}

impl TypeSchema {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` is a known type (case-sensitive).
    pub fn knows(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check a decoded record against the schema.
    ///
    /// # Rules
    /// - every `type` entry is a known type
    /// - `name.english` is at most [`MAX_ENGLISH_NAME_LEN`] characters
    pub fn validate(&self, pokemon: &Pokemon) -> Result<(), ValidationError> {
        if let Some(unknown) = pokemon.types.iter().find(|t| !self.knows(t)) {
            return Err(ValidationError::InvalidVariant {
                field: "type",
                value: unknown.clone(),
            });
        }

        if let Some(english) = pokemon.english_name() {
            if english.chars().count() > MAX_ENGLISH_NAME_LEN {
                return Err(ValidationError::TooLong {
                    field: "name.english",
                    max: MAX_ENGLISH_NAME_LEN,
                });
            }
        }

        Ok(())
    }

    /// Validate and hand the record back.
    pub fn check(&self, pokemon: Pokemon) -> Result<Pokemon, ValidationError> {
        self.validate(&pokemon)?;
        Ok(pokemon)
    }
}
