//! Derived field definitions and the expression kinds the evaluators touch

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Named definition of a value computed from other fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedField {
    pub name: String,
    pub expression: Expression,
}

impl DerivedField {
    pub fn new(name: impl Into<String>, expression: Expression) -> Self {
        Self {
            name: name.into(),
            expression,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum Expression {
    /// Direct reference to another (data or derived) field
    FieldRef { field: String },
    Constant { value: Value },
    /// Piecewise-linear normalization of a continuous field
    NormContinuous {
        field: String,
        linear_norms: Vec<LinearNorm>,
        #[serde(default)]
        outliers: OutlierTreatment,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        map_missing_to: Option<f64>,
    },
    /// Indicator (1.0 / 0.0) of a categorical field taking one value
    NormDiscrete {
        field: String,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        map_missing_to: Option<f64>,
    },
}

impl Expression {
    pub fn field_ref(field: impl Into<String>) -> Self {
        Expression::FieldRef {
            field: field.into(),
        }
    }

    pub fn norm_discrete(field: impl Into<String>, value: impl Into<String>) -> Self {
        Expression::NormDiscrete {
            field: field.into(),
            value: value.into(),
            map_missing_to: None,
        }
    }

    pub fn norm_continuous(field: impl Into<String>, linear_norms: Vec<LinearNorm>) -> Self {
        Expression::NormContinuous {
            field: field.into(),
            linear_norms,
            outliers: OutlierTreatment::default(),
            map_missing_to: None,
        }
    }

    /// Short name of the expression kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::FieldRef { .. } => "FieldRef",
            Expression::Constant { .. } => "Constant",
            Expression::NormContinuous { .. } => "NormContinuous",
            Expression::NormDiscrete { .. } => "NormDiscrete",
        }
    }
}

/// One (original, normalized) anchor point of a piecewise-linear mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearNorm {
    pub orig: f64,
    pub norm: f64,
}

impl LinearNorm {
    pub fn new(orig: f64, norm: f64) -> Self {
        Self { orig, norm }
    }
}

/// Handling of inputs outside the declared `orig` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutlierTreatment {
    #[default]
    AsIs,
    AsMissingValues,
    AsExtremeValues,
}
