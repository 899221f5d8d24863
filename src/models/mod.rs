//! Model graph data and evaluation results.

pub mod document;
pub mod expression;
pub mod model;
pub mod network;
pub mod predicate;
pub mod prediction;
pub mod ruleset;
pub mod target;
pub mod value;

pub use document::ModelDocument;
pub use expression::{DerivedField, Expression, LinearNorm, OutlierTreatment};
pub use model::{MiningFunction, ModelId, ModelMetadata};
pub use network::{
    ActivationFunction, Connection, NeuralInput, NeuralLayer, NeuralNetwork, NeuralOutput,
    NormalizationMethod, Neuron,
};
pub use predicate::{BooleanOperator, Predicate, SetOperator, SimpleOperator};
pub use prediction::{ClassDistribution, DistributionKind, Numeric, Prediction};
pub use ruleset::{CompoundRule, Criterion, Rule, RuleSelectionMethod, RuleSet, RuleSetModel, SimpleRule};
pub use target::{CastInteger, Target, TargetValue};
pub use value::Value;
