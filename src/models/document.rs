//! Serialized model description accepted by the `score` binary

use serde::{Deserialize, Serialize};

use super::network::NeuralNetwork;
use super::ruleset::RuleSetModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "PascalCase")]
pub enum ModelDocument {
    NeuralNetwork(NeuralNetwork),
    RuleSet(RuleSetModel),
}
