//! Unit tests for the network forward pass

use crate::fixtures::{assert_close, record, regression_network, REGRESSION_OUTPUT};
use modelscore::models::{
    ActivationFunction, MiningFunction, NeuralLayer, NeuralNetwork, NormalizationMethod, Neuron,
};
use modelscore::{evaluate_network, evaluate_raw, EvalError, RecordContext};

fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[test]
fn test_hand_computed_output() {
    let network = regression_network();
    let raw = evaluate_raw(&network, &record(&[("x1", 0.5), ("x2", -1.0)])).unwrap();

    assert_close(raw["x1"], 0.5);
    assert_close(raw["h1"], 0.7109495026250039);
    assert_close(raw["h2"], 0.29943285752602705);
    assert_close(raw["y"], REGRESSION_OUTPUT);
}

#[test]
fn test_single_layer_matches_closed_form() {
    let network = NeuralNetwork::new("single", MiningFunction::Regression, ActivationFunction::Logistic)
        .with_input(crate::fixtures::input("x1", "x1"))
        .with_input(crate::fixtures::input("x2", "x2"))
        .with_layer(NeuralLayer::new(vec![Neuron::new("n", 0.25)
            .with_connection("x1", 1.5)
            .with_connection("x2", -2.0)]));

    let raw = evaluate_raw(&network, &record(&[("x1", 0.4), ("x2", 0.1)])).unwrap();
    assert_close(raw["n"], logistic(0.25 + 1.5 * 0.4 - 2.0 * 0.1));
}

#[test]
fn test_connection_order_does_not_matter() {
    let mut reversed = regression_network();
    for layer in &mut reversed.layers {
        for neuron in &mut layer.neurons {
            neuron.connections.reverse();
        }
    }

    let context = record(&[("x1", 0.5), ("x2", -1.0)]);
    let forward = evaluate_raw(&regression_network(), &context).unwrap();
    let backward = evaluate_raw(&reversed, &context).unwrap();

    for id in ["h1", "h2", "y"] {
        assert_close(backward[id], forward[id]);
    }
}

#[test]
fn test_softmax_layer_sums_to_one() {
    let network = crate::fixtures::classification_network(NormalizationMethod::Softmax);
    for x1 in [-50.0, -1.0, 0.0, 2.0, 30.0] {
        let raw = evaluate_raw(&network, &record(&[("x1", x1)])).unwrap();
        let outputs = [raw["a"], raw["b"], raw["c"]];
        let sum: f64 = outputs.iter().sum();
        assert_close(sum, 1.0);
        assert!(outputs.iter().all(|value| *value > 0.0 && value.is_finite()));
    }
}

#[test]
fn test_softmax_keeps_order() {
    let network = crate::fixtures::classification_network(NormalizationMethod::Softmax);
    let raw = evaluate_raw(&network, &record(&[("x1", 2.0)])).unwrap();
    assert!(raw["a"] > 0.0 && raw["b"] > 0.0 && raw["c"] > 0.0);
    assert!(raw["c"] > raw["a"] && raw["a"] > raw["b"]);
}

#[test]
fn test_simplemax_keeps_order() {
    let network = crate::fixtures::classification_network(NormalizationMethod::Simplemax);
    // pre-normalization: a = 2.0, b = 0.5, c = 3.0
    let raw = evaluate_raw(&network, &record(&[("x1", 2.0)])).unwrap();
    assert_close(raw["a"] + raw["b"] + raw["c"], 1.0);
    assert_close(raw["a"], 2.0 / 5.5);
    assert!(raw["c"] > raw["a"] && raw["a"] > raw["b"]);
}

#[test]
fn test_missing_input_fails() {
    let network = regression_network();
    let result = evaluate_network(&network, &record(&[("x1", 0.5)]));
    assert_eq!(result.unwrap_err(), EvalError::MissingField("x2_in".to_string()));
}

#[test]
fn test_non_numeric_input_fails() {
    let network = regression_network();
    let context = RecordContext::default()
        .with_value("x1", 0.5)
        .with_value("x2", "high");
    assert!(matches!(
        evaluate_raw(&network, &context),
        Err(EvalError::TypeMismatch { .. })
    ));
}

#[test]
fn test_not_scorable_rejected() {
    let network = regression_network().scorable(false);
    let context = record(&[("x1", 0.5), ("x2", -1.0)]);
    assert!(matches!(evaluate_network(&network, &context), Err(EvalError::NotScorable(_))));
    assert!(matches!(evaluate_raw(&network, &context), Err(EvalError::NotScorable(_))));
}

#[test]
fn test_radial_basis_unsupported() {
    let mut network = regression_network();
    network.activation_function = ActivationFunction::RadialBasis;
    let result = evaluate_raw(&network, &record(&[("x1", 0.5), ("x2", -1.0)]));
    assert!(matches!(result, Err(EvalError::UnsupportedFeature(_))));
}

#[test]
fn test_unknown_connection_is_invalid() {
    let network = regression_network().with_layer(NeuralLayer::new(vec![
        Neuron::new("z", 0.0).with_connection("nowhere", 1.0),
    ]));
    let result = evaluate_raw(&network, &record(&[("x1", 0.5), ("x2", -1.0)]));
    assert!(matches!(result, Err(EvalError::InvalidConfiguration(_))));
}

#[test]
fn test_layer_threshold_override() {
    let network = NeuralNetwork::new("step", MiningFunction::Regression, ActivationFunction::Threshold)
        .with_threshold(10.0)
        .with_input(crate::fixtures::input("x1", "x1"))
        .with_layer(
            NeuralLayer::new(vec![Neuron::new("n", 0.0).with_connection("x1", 1.0)])
                .with_threshold(0.5),
        );

    let raw = evaluate_raw(&network, &record(&[("x1", 1.0)])).unwrap();
    assert_close(raw["n"], 1.0);
}

#[test]
fn test_unsupported_mining_function() {
    let mut network = regression_network();
    network.function_name = MiningFunction::Clustering;
    let result = evaluate_network(&network, &record(&[("x1", 0.5), ("x2", -1.0)]));
    assert!(matches!(result, Err(EvalError::UnsupportedFeature(_))));
}
