//! Opaque condition state payloads
//!
//! A payload is a small map of primitive-typed values owned by one
//! condition. The registry never looks inside it; conditions write it in
//! `save_state` and read it back in `restore_state`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single primitive payload value.
///
/// Untagged on the wire: booleans, integers, floats and strings serialize
/// as their natural JSON forms. Variant order matters for deserialization
/// (integers must be tried before floats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Key-value state blob owned by a condition.
///
/// Backed by a `BTreeMap` so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatePayload {
    values: BTreeMap<String, PayloadValue>,
}

impl StatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Writers ---

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), PayloadValue::Bool(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), PayloadValue::Int(value));
    }

    pub fn set_float(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), PayloadValue::Float(value));
    }

    pub fn set_str(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), PayloadValue::Str(value.to_string()));
    }

    // --- Readers ---
    // All readers return None for a missing key or a type mismatch;
    // restore paths must tolerate payloads lacking expected keys.

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(PayloadValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(PayloadValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(PayloadValue::Float(v)) => Some(*v),
            Some(PayloadValue::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(PayloadValue::Str(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
