//! Neuron activation functions

use crate::error::{EvalError, Result};
use crate::models::{ActivationFunction, NeuralLayer, NeuralNetwork};

/// Activation function and threshold in effect for a layer.
///
/// Layer overrides win over the network defaults.
pub fn layer_activation(network: &NeuralNetwork, layer: &NeuralLayer) -> (ActivationFunction, f64) {
    let function = layer.activation_function.unwrap_or(network.activation_function);
    let threshold = layer.threshold.unwrap_or(network.threshold);
    (function, threshold)
}

/// Apply `function` to the weighted input sum `z`
pub fn activate(function: ActivationFunction, z: f64, threshold: f64) -> Result<f64> {
    let output = match function {
        ActivationFunction::Threshold => {
            if z > threshold {
                1.0
            } else {
                0.0
            }
        }
        ActivationFunction::Logistic => 1.0 / (1.0 + (-z).exp()),
        ActivationFunction::Tanh => z.tanh(),
        ActivationFunction::Identity => z,
        ActivationFunction::Exponential => z.exp(),
        ActivationFunction::Reciprocal => 1.0 / z,
        ActivationFunction::Square => z * z,
        ActivationFunction::Gauss => (-(z * z)).exp(),
        ActivationFunction::Sine => z.sin(),
        ActivationFunction::Cosine => z.cos(),
        ActivationFunction::Elliott => z / (1.0 + z.abs()),
        ActivationFunction::Arctan => z.atan(),
        ActivationFunction::RadialBasis => {
            return Err(EvalError::unsupported(format!(
                "activation function {}",
                function
            )))
        }
    };
    Ok(output)
}
