//! Evaluation results

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Numeric prediction; integer once a Target cast has been applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(&self) -> f64 {
        match self {
            Numeric::Integer(v) => *v as f64,
            Numeric::Float(v) => *v,
        }
    }
}

/// Per-field result of a model evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    /// `None` when no value could be computed and no Target default applied
    Regression(Option<Numeric>),
    Classification(ClassDistribution),
}

impl Prediction {
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            Prediction::Regression(value) => *value,
            Prediction::Classification(_) => None,
        }
    }

    pub fn as_distribution(&self) -> Option<&ClassDistribution> {
        match self {
            Prediction::Classification(distribution) => Some(distribution),
            Prediction::Regression(_) => None,
        }
    }
}

/// What the values of a [`ClassDistribution`] mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistributionKind {
    Probability,
    Confidence,
}

/// Class label → value, in insertion order, plus the entity that produced
/// the current best entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDistribution {
    pub kind: DistributionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    pub values: Vec<(String, f64)>,
}

impl ClassDistribution {
    pub fn new(kind: DistributionKind) -> Self {
        Self {
            kind,
            entity: None,
            values: Vec::new(),
        }
    }

    /// Record `value` for `label`, replacing any earlier value for it
    pub fn put(&mut self, label: impl Into<String>, value: f64) {
        let label = label.into();
        match self.values.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = value,
            None => self.values.push((label, value)),
        }
    }

    /// Record `value` for `label`; `entity` becomes the provenance when the
    /// value beats the current best.
    pub fn put_with_entity(&mut self, entity: impl Into<String>, label: impl Into<String>, value: f64) {
        let beats_best = match self.best() {
            Some((_, best)) => best < value,
            None => true,
        };
        if beats_best {
            self.entity = Some(entity.into());
        }
        self.put(label, value);
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| *value)
    }

    pub fn probability(&self, label: &str) -> Option<f64> {
        match self.kind {
            DistributionKind::Probability => self.get(label),
            DistributionKind::Confidence => None,
        }
    }

    pub fn confidence(&self, label: &str) -> Option<f64> {
        self.get(label)
    }

    /// Winning class label (first maximum wins ties)
    pub fn result(&self) -> Result<&str> {
        self.best()
            .map(|(label, _)| label)
            .ok_or_else(|| EvalError::MissingResult("empty class distribution".to_string()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn best(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (label, value) in &self.values {
            match best {
                Some((_, current)) if current >= *value => {}
                _ => best = Some((label.as_str(), *value)),
            }
        }
        best
    }
}
