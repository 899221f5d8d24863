//! Unit tests for output mapping and prediction assembly

use crate::fixtures::{
    assert_close, classification_network, record, regression_network, REGRESSION_OUTPUT,
};
use modelscore::models::{
    CastInteger, DerivedField, DistributionKind, Expression, LinearNorm, NeuralOutput,
    NormalizationMethod, Numeric, Target, TargetValue, Value,
};
use modelscore::{evaluate_network, EvalError};

fn price_norm() -> Expression {
    Expression::norm_continuous(
        "price",
        vec![LinearNorm::new(100.0, 0.0), LinearNorm::new(300.0, 1.0)],
    )
}

fn with_output(expression: Expression) -> modelscore::models::NeuralNetwork {
    let mut network = regression_network();
    network.outputs = vec![NeuralOutput::new("y", DerivedField::new("y_out", expression))];
    network
}

#[test]
fn test_regression_passes_raw_value_through() {
    let predictions =
        evaluate_network(&regression_network(), &record(&[("x1", 0.5), ("x2", -1.0)])).unwrap();
    let value = predictions["price"].as_numeric().unwrap();
    assert_close(value.as_f64(), REGRESSION_OUTPUT);
}

#[test]
fn test_regression_denormalizes() {
    let network = with_output(price_norm());
    let predictions = evaluate_network(&network, &record(&[("x1", 0.5), ("x2", -1.0)])).unwrap();
    let value = predictions["price"].as_numeric().unwrap();
    assert_close(value.as_f64(), 100.0 + REGRESSION_OUTPUT * 200.0);
}

#[test]
fn test_output_follows_derived_field_chain() {
    let network = with_output(Expression::field_ref("price_hop"));
    let context = record(&[("x1", 0.5), ("x2", -1.0)])
        .with_derived_field(DerivedField::new("price_hop", Expression::field_ref("price_norm")))
        .with_derived_field(DerivedField::new("price_norm", price_norm()));

    let predictions = evaluate_network(&network, &context).unwrap();
    let value = predictions["price"].as_numeric().unwrap();
    assert_close(value.as_f64(), 100.0 + REGRESSION_OUTPUT * 200.0);
}

#[test]
fn test_cyclic_output_chain_is_invalid() {
    let network = with_output(Expression::field_ref("left"));
    let context = record(&[("x1", 0.5), ("x2", -1.0)])
        .with_derived_field(DerivedField::new("left", Expression::field_ref("right")))
        .with_derived_field(DerivedField::new("right", Expression::field_ref("left")));

    assert!(matches!(
        evaluate_network(&network, &context),
        Err(EvalError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_constant_output_is_unsupported() {
    let network = with_output(Expression::Constant {
        value: Value::Double(1.0),
    });
    assert!(matches!(
        evaluate_network(&network, &record(&[("x1", 0.5), ("x2", -1.0)])),
        Err(EvalError::UnsupportedFeature(_))
    ));
}

#[test]
fn test_regression_target_clips_and_casts() {
    let network = regression_network().with_target(
        Target::new("price")
            .with_bounds(Some(0.0), Some(1.0))
            .with_rescale(10.0, 0.4)
            .with_cast_integer(CastInteger::Round),
    );
    let predictions = evaluate_network(&network, &record(&[("x1", 0.5), ("x2", -1.0)])).unwrap();
    // clipped to 1.0, rescaled to 10.4, rounded to 10
    assert_eq!(predictions["price"].as_numeric(), Some(Numeric::Integer(10)));
}

#[test]
fn test_uncomputed_output_uses_target_default() {
    let mut network = regression_network()
        .with_target(Target::new("price").with_target_value(TargetValue::default_value(42.0)));
    network.outputs[0].output_neuron = "ghost".to_string();

    let predictions = evaluate_network(&network, &record(&[("x1", 0.5), ("x2", -1.0)])).unwrap();
    assert_eq!(predictions["price"].as_numeric(), Some(Numeric::Float(42.0)));
}

#[test]
fn test_uncomputed_output_without_target_is_absent() {
    let mut network = regression_network();
    network.outputs[0].output_neuron = "ghost".to_string();

    let predictions = evaluate_network(&network, &record(&[("x1", 0.5), ("x2", -1.0)])).unwrap();
    assert_eq!(predictions["price"].as_numeric(), None);
}

#[test]
fn test_classification_distribution_and_provenance() {
    let network = classification_network(NormalizationMethod::Softmax);
    let predictions = evaluate_network(&network, &record(&[("x1", 2.0)])).unwrap();
    let distribution = predictions["species"].as_distribution().unwrap();

    assert_eq!(distribution.kind, DistributionKind::Probability);
    assert_eq!(distribution.result().unwrap(), "virginica");
    assert_eq!(distribution.entity.as_deref(), Some("c"));
    assert_eq!(
        distribution.labels().collect::<Vec<_>>(),
        vec!["setosa", "versicolor", "virginica"]
    );

    let total: f64 = distribution.values.iter().map(|(_, probability)| probability).sum();
    assert_close(total, 1.0);
}

#[test]
fn test_classification_unknown_neuron_is_invalid() {
    let network = classification_network(NormalizationMethod::Softmax).with_output(
        NeuralOutput::new(
            "q",
            DerivedField::new("q_out", Expression::norm_discrete("species", "other")),
        ),
    );
    assert!(matches!(
        evaluate_network(&network, &record(&[("x1", 2.0)])),
        Err(EvalError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_classification_rejects_field_ref_output() {
    let mut network = classification_network(NormalizationMethod::None);
    network.outputs[0].derived_field = DerivedField::new("a_out", Expression::field_ref("species"));
    assert!(matches!(
        evaluate_network(&network, &record(&[("x1", 2.0)])),
        Err(EvalError::UnsupportedFeature(_))
    ));
}

#[test]
fn test_predictions_follow_declared_output_order() {
    let mut network = regression_network();
    network.outputs = ["zeta", "alpha", "mid", "beta"]
        .iter()
        .map(|field| {
            NeuralOutput::new(
                "y",
                DerivedField::new(format!("{}_out", field), Expression::field_ref(*field)),
            )
        })
        .collect();

    let predictions = evaluate_network(&network, &record(&[("x1", 0.5), ("x2", -1.0)])).unwrap();
    let fields: Vec<&str> = predictions.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["zeta", "alpha", "mid", "beta"]);
}
