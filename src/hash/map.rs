//! Hash implementation
//!
//! HashMap-backed field table.

use std::collections::HashMap;

use crate::error::CommandError;
use super::integer::{add_checked, parse_i64};

/// A field → string mapping bound to one key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hash {
    fields: HashMap<String, String>,
}

impl Hash {
    /// Create a new empty hash
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field's stored value
    pub fn get_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Insert or overwrite a field
    ///
    /// Returns 1 if the field was newly created, 0 if it was overwritten.
    pub fn set_field(&mut self, field: impl Into<String>, value: impl Into<String>) -> usize {
        match self.fields.insert(field.into(), value.into()) {
            Some(_) => 0,
            None => 1,
        }
    }

    /// Add `delta` to the integer stored in `field`
    ///
    /// A missing field counts as `"0"`. On any error the field is left as it
    /// was; nothing is written until the new value is known to be valid.
    pub fn increment_field(&mut self, field: &str, delta: i64) -> Result<i64, CommandError> {
        let current = match self.fields.get(field) {
            Some(stored) => parse_i64(stored).ok_or(CommandError::NotAnInteger)?,
            None => 0,
        };

        let updated = add_checked(current, delta).ok_or(CommandError::IncrementOverflow)?;

        self.fields.insert(field.to_string(), updated.to_string());
        Ok(updated)
    }

    /// Check whether a field exists
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the hash has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<F, V> FromIterator<(F, V)> for Hash
where
    F: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut hash = Hash::new();
        for (field, value) in iter {
            hash.set_field(field, value);
        }
        hash
    }
}
