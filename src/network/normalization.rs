//! Layer-wide normalization of neuron outputs

use crate::models::{NeuralLayer, NeuralNetwork, NormalizationMethod};

/// Normalization method in effect for a layer
pub fn layer_normalization(network: &NeuralNetwork, layer: &NeuralLayer) -> NormalizationMethod {
    layer
        .normalization_method
        .unwrap_or(network.normalization_method)
}

/// Rewrite a layer's outputs in place.
///
/// SIMPLEMAX divides every output by the sum of outputs, SOFTMAX divides
/// `exp(output)` by the sum of exponentials.
pub fn normalize_outputs(method: NormalizationMethod, outputs: &mut [f64]) {
    match method {
        NormalizationMethod::None => {}
        NormalizationMethod::Simplemax => {
            let sum: f64 = outputs.iter().sum();
            for output in outputs.iter_mut() {
                *output /= sum;
            }
        }
        NormalizationMethod::Softmax => {
            // shifting by the maximum leaves the quotients unchanged
            let max = outputs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mut sum = 0.0;
            for output in outputs.iter_mut() {
                *output = (*output - max).exp();
                sum += *output;
            }
            for output in outputs.iter_mut() {
                *output /= sum;
            }
        }
    }
}
