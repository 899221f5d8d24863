//! Unit tests for Target post-processing

use crate::fixtures::assert_close;
use modelscore::models::{
    ClassDistribution, DistributionKind, MiningFunction, Numeric, Target, TargetValue,
};
use modelscore::models::{ActivationFunction, NeuralNetwork};
use modelscore::targets::{process, process_classification, process_regression};
use modelscore::EvalError;
use indexmap::IndexMap;

fn model_with(target: Target) -> NeuralNetwork {
    NeuralNetwork::new("targets", MiningFunction::Regression, ActivationFunction::Identity)
        .with_target(target)
}

#[test]
fn test_clipping_keeps_values_in_bounds() {
    let target = Target::new("y").with_bounds(Some(-1.0), Some(2.0));
    for value in [-100.0, -1.5, -1.0, 0.0, 1.999, 2.0, 3.5, 1e9] {
        let clipped = process(&target, value).unwrap().as_f64();
        assert!((-1.0..=2.0).contains(&clipped));
        if (-1.0..=2.0).contains(&value) {
            assert_eq!(clipped, value);
        }
    }
}

#[test]
fn test_single_bound_applies_alone() {
    let target = Target::new("y").with_bounds(Some(0.0), None);
    assert_eq!(process(&target, -3.0).unwrap(), Numeric::Float(0.0));
    assert_eq!(process(&target, 1e6).unwrap(), Numeric::Float(1e6));
}

#[test]
fn test_rescale_is_linear() {
    let target = Target::new("y").with_rescale(2.5, -1.0);
    for value in [-2.0, 0.0, 0.4, 10.0] {
        assert_close(process(&target, value).unwrap().as_f64(), value * 2.5 - 1.0);
    }
}

#[test]
fn test_identity_rescale_is_idempotent() {
    let target = Target::new("y").with_rescale(1.0, 0.0);
    for value in [-7.25, 0.0, 3.125] {
        let once = process(&target, value).unwrap().as_f64();
        let twice = process(&target, once).unwrap().as_f64();
        assert_eq!(once, value);
        assert_eq!(twice, once);
    }
}

#[test]
fn test_fields_without_target_pass_through() {
    let model = model_with(Target::new("y").with_rescale(2.0, 0.0));
    let predictions = IndexMap::from([
        ("y".to_string(), Some(1.5)),
        ("other".to_string(), Some(1.5)),
        ("absent".to_string(), None),
    ]);

    let result = process_regression(&model, predictions).unwrap();
    assert_eq!(result["y"], Some(Numeric::Float(3.0)));
    assert_eq!(result["other"], Some(Numeric::Float(1.5)));
    assert_eq!(result["absent"], None);
}

#[test]
fn test_absent_value_needs_single_default() {
    let ambiguous = model_with(
        Target::new("y")
            .with_target_value(TargetValue::default_value(1.0))
            .with_target_value(TargetValue::default_value(2.0)),
    );
    let predictions = IndexMap::from([("y".to_string(), None)]);
    assert!(matches!(
        process_regression(&ambiguous, predictions.clone()),
        Err(EvalError::InvalidConfiguration(_))
    ));

    let single = model_with(Target::new("y").with_target_value(TargetValue::default_value(5.0)));
    let result = process_regression(&single, predictions).unwrap();
    assert_eq!(result["y"], Some(Numeric::Float(5.0)));
}

#[test]
fn test_absent_distribution_uses_priors() {
    let model = model_with(
        Target::new("class")
            .with_target_value(TargetValue::prior("yes", 0.25))
            .with_target_value(TargetValue::prior("no", 0.75)),
    );

    let result = process_classification(&model, IndexMap::from([("class".to_string(), None)])).unwrap();
    let distribution = &result["class"];
    assert_eq!(distribution.kind, DistributionKind::Probability);
    assert_eq!(distribution.labels().collect::<Vec<_>>(), vec!["yes", "no"]);
    assert_eq!(distribution.result().unwrap(), "no");
}

#[test]
fn test_prior_without_label_is_invalid() {
    let model = model_with(
        Target::new("class").with_target_value(TargetValue {
            value: None,
            prior_probability: Some(0.5),
            default_value: None,
        }),
    );
    assert!(matches!(
        process_classification(&model, IndexMap::from([("class".to_string(), None)])),
        Err(EvalError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_present_distribution_is_kept() {
    let model = model_with(Target::new("class").with_target_value(TargetValue::prior("yes", 1.0)));
    let mut distribution = ClassDistribution::new(DistributionKind::Probability);
    distribution.put("no", 0.9);

    let result = process_classification(
        &model,
        IndexMap::from([("class".to_string(), Some(distribution.clone()))]),
    )
    .unwrap();
    assert_eq!(result["class"], distribution);
}
