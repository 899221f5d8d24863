//! Target post-processing shared by all evaluators.
//!
//! Regression values are clipped, rescaled and optionally cast to an
//! integer; absent values fall back to the Target's default. Absent class
//! distributions fall back to the Target's prior probabilities. Fields
//! without a Target pass through unchanged.

use indexmap::IndexMap;

use tracing::trace;

use crate::error::{EvalError, Result};
use crate::models::{
    CastInteger, ClassDistribution, DistributionKind, ModelMetadata, Numeric, Target,
};

/// Apply the model's Targets to raw regression predictions
pub fn process_regression<M>(
    model: &M,
    predictions: IndexMap<String, Option<f64>>,
) -> Result<IndexMap<String, Option<Numeric>>>
where
    M: ModelMetadata + ?Sized,
{
    let mut result = IndexMap::with_capacity(predictions.len());

    for (field, value) in predictions {
        let processed = match (model.target(&field), value) {
            (Some(target), Some(value)) => Some(process(target, value)?),
            (Some(target), None) => {
                trace!(field = %field, "substituting target default value");
                Some(Numeric::Float(default_value(target)?))
            }
            (None, value) => value.map(Numeric::Float),
        };
        result.insert(field, processed);
    }

    Ok(result)
}

/// Apply the model's Targets to raw classification predictions.
///
/// An absent distribution without a Target becomes an empty distribution.
pub fn process_classification<M>(
    model: &M,
    predictions: IndexMap<String, Option<ClassDistribution>>,
) -> Result<IndexMap<String, ClassDistribution>>
where
    M: ModelMetadata + ?Sized,
{
    let mut result = IndexMap::with_capacity(predictions.len());

    for (field, distribution) in predictions {
        let processed = match (distribution, model.target(&field)) {
            (Some(distribution), _) => distribution,
            (None, Some(target)) => {
                trace!(field = %field, "substituting target prior probabilities");
                prior_probabilities(target)?
            }
            (None, None) => ClassDistribution::new(DistributionKind::Probability),
        };
        result.insert(field, processed);
    }

    Ok(result)
}

/// Clip to the declared bounds, rescale, then cast if requested
pub fn process(target: &Target, value: f64) -> Result<Numeric> {
    let mut result = value;

    if let Some(min) = target.min {
        result = result.max(min);
    }
    if let Some(max) = target.max {
        result = result.min(max);
    }

    result = result * target.rescale_factor + target.rescale_constant;

    let Some(cast_integer) = target.cast_integer else {
        return Ok(Numeric::Float(result));
    };

    let cast = match cast_integer {
        // half-way values round up, -2.5 becomes -2
        CastInteger::Round => (result + 0.5).floor(),
        CastInteger::Ceiling => result.ceil(),
        CastInteger::Floor => result.floor(),
    };
    Ok(Numeric::Integer(cast as i64))
}

/// The single default value a regression Target declares
pub fn default_value(target: &Target) -> Result<f64> {
    let [value] = target.target_values.as_slice() else {
        return Err(EvalError::invalid(format!(
            "{} must declare exactly one default value, found {} target values",
            target.describe(),
            target.target_values.len()
        )));
    };

    if value.value.is_some() || value.prior_probability.is_some() {
        return Err(EvalError::invalid(format!(
            "{} default value must not carry a class value or prior probability",
            target.describe()
        )));
    }

    value.default_value.ok_or_else(|| {
        EvalError::invalid(format!("{} declares no default value", target.describe()))
    })
}

/// Distribution of the prior probabilities a classification Target declares
pub fn prior_probabilities(target: &Target) -> Result<ClassDistribution> {
    let mut result = ClassDistribution::new(DistributionKind::Probability);

    for value in &target.target_values {
        if value.default_value.is_some() {
            return Err(EvalError::invalid(format!(
                "{} class value must not carry a default value",
                target.describe()
            )));
        }

        let (Some(label), Some(prior)) = (&value.value, value.prior_probability) else {
            return Err(EvalError::invalid(format!(
                "{} class value needs both a value and a prior probability",
                target.describe()
            )));
        };
        result.put(label.as_str(), prior);
    }

    Ok(result)
}
