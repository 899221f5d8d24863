//! Forward pass over a layered network and prediction assembly

use indexmap::IndexMap;

use tracing::debug;

use super::activation::{activate, layer_activation};
use super::normalization::{layer_normalization, normalize_outputs};
use super::outputs::{map_classification, map_regression};
use super::registry::entity_registry;
use crate::context::EvaluationContext;
use crate::error::{EvalError, Result};
use crate::expressions::evaluate_derived_field;
use crate::models::model::ensure_scorable;
use crate::models::{MiningFunction, NeuralNetwork, Prediction};
use crate::targets;

/// Evaluate a network into named predictions.
///
/// Regression models yield numbers, classification models yield one
/// probability distribution per target field.
pub fn evaluate_network<C>(network: &NeuralNetwork, context: &C) -> Result<IndexMap<String, Prediction>>
where
    C: EvaluationContext + ?Sized,
{
    ensure_scorable(network)?;

    debug!(
        model = %network.id(),
        model_name = %network.model_name,
        function = %network.function_name,
        "evaluating neural network"
    );

    match network.function_name {
        MiningFunction::Regression => {
            let raw = evaluate_raw(network, context)?;
            let values = map_regression(network, &raw, context)?;
            let values = targets::process_regression(network, values)?;
            Ok(values
                .into_iter()
                .map(|(field, value)| (field, Prediction::Regression(value)))
                .collect())
        }
        MiningFunction::Classification => {
            let registry = entity_registry(network)?;
            let raw = evaluate_raw(network, context)?;
            let distributions = map_classification(network, &registry, &raw, context)?;
            let distributions = targets::process_classification(
                network,
                distributions
                    .into_iter()
                    .map(|(field, distribution)| (field, Some(distribution)))
                    .collect(),
            )?;
            Ok(distributions
                .into_iter()
                .map(|(field, distribution)| (field, Prediction::Classification(distribution)))
                .collect())
        }
        function @ (MiningFunction::Clustering
        | MiningFunction::AssociationRules
        | MiningFunction::Sequences
        | MiningFunction::TimeSeries
        | MiningFunction::Mixed) => Err(EvalError::unsupported(format!(
            "mining function {} for neural network {}",
            function, network.model_name
        ))),
    }
}

/// Compute the value of every input and neuron, keyed by entity id.
///
/// Inputs are resolved first, then layers and their neurons in declaration
/// order; a connection may only refer to an id computed earlier. Layer
/// normalization is applied once all neurons of the layer are computed.
pub fn evaluate_raw<C>(network: &NeuralNetwork, context: &C) -> Result<IndexMap<String, f64>>
where
    C: EvaluationContext + ?Sized,
{
    ensure_scorable(network)?;

    let registry = entity_registry(network)?;
    let mut values: IndexMap<String, f64> = IndexMap::with_capacity(registry.len());

    for input in &network.inputs {
        let derived_field = &input.derived_field;
        let value = evaluate_derived_field(derived_field, context)?
            .ok_or_else(|| EvalError::missing_field(derived_field.name.as_str()))?;
        let number = value
            .as_f64()
            .ok_or_else(|| EvalError::type_mismatch(derived_field.name.as_str(), "number"))?;
        values.insert(input.id.clone(), number);
    }

    for layer in &network.layers {
        let (function, threshold) = layer_activation(network, layer);

        let mut outputs = Vec::with_capacity(layer.neurons.len());
        for neuron in &layer.neurons {
            let mut z = neuron.bias;
            for connection in &neuron.connections {
                let input = values.get(&connection.from).ok_or_else(|| {
                    EvalError::invalid(format!(
                        "Neuron {} is connected from {} which is not computed before it",
                        neuron.id, connection.from
                    ))
                })?;
                z += input * connection.weight;
            }
            outputs.push(activate(function, z, threshold)?);
        }

        normalize_outputs(layer_normalization(network, layer), &mut outputs);

        for (neuron, output) in layer.neurons.iter().zip(outputs) {
            values.insert(neuron.id.clone(), output);
        }
    }

    Ok(values)
}
