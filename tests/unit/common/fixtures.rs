//! Shared model and record builders

use modelscore::models::{
    ActivationFunction, DerivedField, Expression, MiningFunction, NeuralInput, NeuralLayer,
    NeuralNetwork, NeuralOutput, NormalizationMethod, Neuron,
};
use modelscore::RecordContext;

pub const TOLERANCE: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub fn input(id: &str, field: &str) -> NeuralInput {
    NeuralInput::new(id, DerivedField::new(format!("{}_in", field), Expression::field_ref(field)))
}

/// Two inputs, two LOGISTIC hidden neurons, one IDENTITY output
pub fn regression_network() -> NeuralNetwork {
    NeuralNetwork::new("two-layer", MiningFunction::Regression, ActivationFunction::Logistic)
        .with_input(input("x1", "x1"))
        .with_input(input("x2", "x2"))
        .with_layer(NeuralLayer::new(vec![
            Neuron::new("h1", 0.1)
                .with_connection("x1", 0.4)
                .with_connection("x2", -0.6),
            Neuron::new("h2", -0.2)
                .with_connection("x1", 0.3)
                .with_connection("x2", 0.8),
        ]))
        .with_layer(
            NeuralLayer::new(vec![Neuron::new("y", 0.5)
                .with_connection("h1", 1.2)
                .with_connection("h2", -0.7)])
            .with_activation(ActivationFunction::Identity),
        )
        .with_output(NeuralOutput::new(
            "y",
            DerivedField::new("y_out", Expression::field_ref("price")),
        ))
}

/// Hand-computed output of [`regression_network`] for x1 = 0.5, x2 = -1.0
pub const REGRESSION_OUTPUT: f64 = 1.1435364028817856;

/// One IDENTITY layer of three class neurons fed by `x1`
pub fn classification_network(normalization: NormalizationMethod) -> NeuralNetwork {
    NeuralNetwork::new("classes", MiningFunction::Classification, ActivationFunction::Identity)
        .with_input(input("x1", "x1"))
        .with_layer(
            NeuralLayer::new(vec![
                Neuron::new("a", 0.0).with_connection("x1", 1.0),
                Neuron::new("b", 0.5).with_connection("x1", 0.0),
                Neuron::new("c", -1.0).with_connection("x1", 2.0),
            ])
            .with_normalization(normalization),
        )
        .with_output(NeuralOutput::new(
            "a",
            DerivedField::new("a_out", Expression::norm_discrete("species", "setosa")),
        ))
        .with_output(NeuralOutput::new(
            "b",
            DerivedField::new("b_out", Expression::norm_discrete("species", "versicolor")),
        ))
        .with_output(NeuralOutput::new(
            "c",
            DerivedField::new("c_out", Expression::norm_discrete("species", "virginica")),
        ))
}

pub fn record(pairs: &[(&str, f64)]) -> RecordContext {
    RecordContext::from_pairs(pairs.iter().map(|(field, value)| (*field, *value)))
}
