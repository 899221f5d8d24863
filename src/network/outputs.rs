//! Mapping of raw neuron outputs to named result fields

use indexmap::IndexMap;
use tracing::warn;

use super::registry::EntityRegistry;
use crate::context::EvaluationContext;
use crate::error::{EvalError, Result};
use crate::expressions::{denormalize, resolve_expression};
use crate::models::{ClassDistribution, DistributionKind, Expression, NeuralNetwork, NeuralOutput};

/// Target field → raw regression value.
///
/// A declared output must resolve to a `FieldRef` (value passed through)
/// or a `NormContinuous` (value denormalized).
pub fn map_regression<C>(
    network: &NeuralNetwork,
    raw: &IndexMap<String, f64>,
    context: &C,
) -> Result<IndexMap<String, Option<f64>>>
where
    C: EvaluationContext + ?Sized,
{
    let mut result = IndexMap::new();

    for output in &network.outputs {
        let value = raw.get(&output.output_neuron).copied();
        if value.is_none() {
            warn!(
                model_name = %network.model_name,
                neuron = %output.output_neuron,
                "no value computed for output neuron"
            );
        }

        match resolve_expression(&output.derived_field, context)? {
            Expression::FieldRef { field } => {
                result.insert(field.clone(), value);
            }
            Expression::NormContinuous {
                field,
                linear_norms,
                ..
            } => {
                let value = value
                    .map(|value| denormalize(field, linear_norms, value))
                    .transpose()?;
                result.insert(field.clone(), value);
            }
            expression @ (Expression::Constant { .. } | Expression::NormDiscrete { .. }) => {
                return Err(unsupported_output(output, expression));
            }
        }
    }

    Ok(result)
}

/// Target field → class probability distribution.
///
/// Every declared output must resolve to a `NormDiscrete` naming the class
/// label its neuron stands for.
pub fn map_classification<C>(
    network: &NeuralNetwork,
    registry: &EntityRegistry,
    raw: &IndexMap<String, f64>,
    context: &C,
) -> Result<IndexMap<String, ClassDistribution>>
where
    C: EvaluationContext + ?Sized,
{
    let mut result: IndexMap<String, ClassDistribution> = IndexMap::new();

    for output in &network.outputs {
        match resolve_expression(&output.derived_field, context)? {
            Expression::NormDiscrete { field, value, .. } => {
                let entity = registry
                    .resolve(network, &output.output_neuron)
                    .ok_or_else(|| {
                        EvalError::invalid(format!(
                            "NeuralOutput references unknown neuron {}",
                            output.output_neuron
                        ))
                    })?;
                let probability = raw.get(entity.id()).copied().ok_or_else(|| {
                    EvalError::MissingResult(format!("no output computed for neuron {}", entity.id()))
                })?;

                result
                    .entry(field.clone())
                    .or_insert_with(|| ClassDistribution::new(DistributionKind::Probability))
                    .put_with_entity(entity.id(), value.as_str(), probability);
            }
            expression @ (Expression::FieldRef { .. }
            | Expression::Constant { .. }
            | Expression::NormContinuous { .. }) => {
                return Err(unsupported_output(output, expression));
            }
        }
    }

    Ok(result)
}

fn unsupported_output(output: &NeuralOutput, expression: &Expression) -> EvalError {
    EvalError::unsupported(format!(
        "{} expression in NeuralOutput for neuron {}",
        expression.kind(),
        output.output_neuron
    ))
}
