//! Feed-forward network model graph

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expression::DerivedField;
use super::model::{default_scorable, MiningFunction, ModelId, ModelMetadata};
use super::target::Target;
use crate::network::registry::EntityCache;

/// Layered network of neurons fed by derived-field inputs.
///
/// Immutable once built and safe to share between concurrent evaluations.
/// Each instance carries its own [`ModelId`]; cloning yields a new id.
#[derive(Debug, Serialize, Deserialize)]
pub struct NeuralNetwork {
    #[serde(skip, default = "ModelId::next")]
    id: ModelId,
    #[serde(default)]
    pub model_name: String,
    pub function_name: MiningFunction,
    pub activation_function: ActivationFunction,
    #[serde(default)]
    pub normalization_method: NormalizationMethod,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default = "default_scorable")]
    pub is_scorable: bool,
    pub inputs: Vec<NeuralInput>,
    pub layers: Vec<NeuralLayer>,
    #[serde(default)]
    pub outputs: Vec<NeuralOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,
}

impl NeuralNetwork {
    pub fn new(
        model_name: impl Into<String>,
        function_name: MiningFunction,
        activation_function: ActivationFunction,
    ) -> Self {
        Self {
            id: ModelId::next(),
            model_name: model_name.into(),
            function_name,
            activation_function,
            normalization_method: NormalizationMethod::default(),
            threshold: 0.0,
            width: None,
            altitude: None,
            is_scorable: true,
            inputs: Vec::new(),
            layers: Vec::new(),
            outputs: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn with_normalization(mut self, normalization_method: NormalizationMethod) -> Self {
        self.normalization_method = normalization_method;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_input(mut self, input: NeuralInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_layer(mut self, layer: NeuralLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_output(mut self, output: NeuralOutput) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    pub fn scorable(mut self, is_scorable: bool) -> Self {
        self.is_scorable = is_scorable;
        self
    }
}

impl Clone for NeuralNetwork {
    fn clone(&self) -> Self {
        Self {
            id: ModelId::next(),
            model_name: self.model_name.clone(),
            function_name: self.function_name,
            activation_function: self.activation_function,
            normalization_method: self.normalization_method,
            threshold: self.threshold,
            width: self.width,
            altitude: self.altitude,
            is_scorable: self.is_scorable,
            inputs: self.inputs.clone(),
            layers: self.layers.clone(),
            outputs: self.outputs.clone(),
            targets: self.targets.clone(),
        }
    }
}

impl Drop for NeuralNetwork {
    fn drop(&mut self) {
        EntityCache::global().invalidate(self.id);
    }
}

impl ModelMetadata for NeuralNetwork {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn function_name(&self) -> MiningFunction {
        self.function_name
    }

    fn is_scorable(&self) -> bool {
        self.is_scorable
    }

    fn targets(&self) -> &[Target] {
        &self.targets
    }
}

/// Network input whose value comes from a derived field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralInput {
    pub id: String,
    pub derived_field: DerivedField,
}

impl NeuralInput {
    pub fn new(id: impl Into<String>, derived_field: DerivedField) -> Self {
        Self {
            id: id.into(),
            derived_field,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    pub id: String,
    #[serde(default)]
    pub bias: f64,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Neuron {
    pub fn new(id: impl Into<String>, bias: f64) -> Self {
        Self {
            id: id.into(),
            bias,
            connections: Vec::new(),
        }
    }

    pub fn with_connection(mut self, from: impl Into<String>, weight: f64) -> Self {
        self.connections.push(Connection {
            from: from.into(),
            weight,
        });
        self
    }
}

/// Weighted edge from an input or earlier-layer neuron
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub weight: f64,
}

/// Ordered group of neurons with optional overrides of the network defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeuralLayer {
    pub neurons: Vec<Neuron>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_function: Option<ActivationFunction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalization_method: Option<NormalizationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl NeuralLayer {
    pub fn new(neurons: Vec<Neuron>) -> Self {
        Self {
            neurons,
            ..Self::default()
        }
    }

    pub fn with_activation(mut self, activation_function: ActivationFunction) -> Self {
        self.activation_function = Some(activation_function);
        self
    }

    pub fn with_normalization(mut self, normalization_method: NormalizationMethod) -> Self {
        self.normalization_method = Some(normalization_method);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

/// Wiring from an output neuron to a named result field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralOutput {
    pub output_neuron: String,
    pub derived_field: DerivedField,
}

impl NeuralOutput {
    pub fn new(output_neuron: impl Into<String>, derived_field: DerivedField) -> Self {
        Self {
            output_neuron: output_neuron.into(),
            derived_field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivationFunction {
    Threshold,
    Logistic,
    Tanh,
    Identity,
    Exponential,
    Reciprocal,
    Square,
    Gauss,
    Sine,
    Cosine,
    Elliott,
    Arctan,
    RadialBasis,
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivationFunction::Threshold => "threshold",
            ActivationFunction::Logistic => "logistic",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::Identity => "identity",
            ActivationFunction::Exponential => "exponential",
            ActivationFunction::Reciprocal => "reciprocal",
            ActivationFunction::Square => "square",
            ActivationFunction::Gauss => "Gauss",
            ActivationFunction::Sine => "sine",
            ActivationFunction::Cosine => "cosine",
            ActivationFunction::Elliott => "Elliott",
            ActivationFunction::Arctan => "arctan",
            ActivationFunction::RadialBasis => "radialBasis",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NormalizationMethod {
    #[default]
    None,
    Simplemax,
    Softmax,
}
