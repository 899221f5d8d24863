//! Evaluation context: the source of input field values.
//!
//! Evaluators only read through the [`EvaluationContext`] trait. A fresh
//! context is supplied per call; nothing in it outlives the evaluation.

use std::collections::HashMap;

use crate::models::{DerivedField, Value};

/// Supplies field values and derived field definitions to the evaluators
pub trait EvaluationContext {
    /// Value of a data field, `None` when missing
    fn resolve(&self, field: &str) -> Option<Value>;

    /// Definition of a derived field, `None` when `field` is not derived
    fn resolve_derived_field(&self, field: &str) -> Option<&DerivedField>;
}

/// Context over an in-memory record plus a dictionary of derived fields
#[derive(Debug, Clone, Default)]
pub struct RecordContext {
    record: HashMap<String, Value>,
    derived_fields: HashMap<String, DerivedField>,
}

impl RecordContext {
    pub fn new(record: HashMap<String, Value>) -> Self {
        Self {
            record,
            derived_fields: HashMap::new(),
        }
    }

    /// Build a context from `(field, value)` pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }

    pub fn with_derived_field(mut self, derived_field: DerivedField) -> Self {
        self.derived_fields
            .insert(derived_field.name.clone(), derived_field);
        self
    }

    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.insert(field.into(), value.into());
        self
    }
}

impl EvaluationContext for RecordContext {
    fn resolve(&self, field: &str) -> Option<Value> {
        self.record.get(field).cloned()
    }

    fn resolve_derived_field(&self, field: &str) -> Option<&DerivedField> {
        self.derived_fields.get(field)
    }
}
