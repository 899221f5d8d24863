//! Target declarations shared by all model kinds

use serde::{Deserialize, Serialize};

/// Post-processing declaration for one target field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default = "default_rescale_factor")]
    pub rescale_factor: f64,
    #[serde(default)]
    pub rescale_constant: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_integer: Option<CastInteger>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_values: Vec<TargetValue>,
}

fn default_rescale_factor() -> f64 {
    1.0
}

impl Target {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            min: None,
            max: None,
            rescale_factor: default_rescale_factor(),
            rescale_constant: 0.0,
            cast_integer: None,
            target_values: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_rescale(mut self, factor: f64, constant: f64) -> Self {
        self.rescale_factor = factor;
        self.rescale_constant = constant;
        self
    }

    pub fn with_cast_integer(mut self, cast_integer: CastInteger) -> Self {
        self.cast_integer = Some(cast_integer);
        self
    }

    pub fn with_target_value(mut self, target_value: TargetValue) -> Self {
        self.target_values.push(target_value);
        self
    }

    /// Human-readable name used in error messages
    pub fn describe(&self) -> String {
        match &self.field {
            Some(field) => format!("Target({})", field),
            None => "Target".to_string(),
        }
    }
}

/// A declared class label (classification) or default (regression)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
}

impl TargetValue {
    pub fn prior(value: impl Into<String>, prior_probability: f64) -> Self {
        Self {
            value: Some(value.into()),
            prior_probability: Some(prior_probability),
            default_value: None,
        }
    }

    pub fn default_value(default_value: f64) -> Self {
        Self {
            value: None,
            prior_probability: None,
            default_value: Some(default_value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CastInteger {
    Round,
    Ceiling,
    Floor,
}
