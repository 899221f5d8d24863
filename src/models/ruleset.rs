//! Rule set model graph

use serde::{Deserialize, Serialize};

use super::model::{default_scorable, MiningFunction, ModelMetadata};
use super::predicate::Predicate;
use super::target::Target;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetModel {
    #[serde(default)]
    pub model_name: String,
    pub function_name: MiningFunction,
    /// Field the winning class label is reported under
    pub target_field: String,
    #[serde(default = "default_scorable")]
    pub is_scorable: bool,
    pub rule_set: RuleSet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,
}

impl RuleSetModel {
    pub fn new(model_name: impl Into<String>, target_field: impl Into<String>, rule_set: RuleSet) -> Self {
        Self {
            model_name: model_name.into(),
            function_name: MiningFunction::Classification,
            target_field: target_field.into(),
            is_scorable: true,
            rule_set,
            targets: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }
}

impl ModelMetadata for RuleSetModel {
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    /// The first entry is the effective method
    #[serde(default)]
    pub rule_selection_methods: Vec<RuleSelectionMethod>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_confidence: Option<f64>,
}

impl RuleSet {
    pub fn new(criterion: Criterion) -> Self {
        Self {
            rule_selection_methods: vec![RuleSelectionMethod { criterion }],
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_default_score(mut self, score: impl Into<String>, confidence: Option<f64>) -> Self {
        self.default_score = Some(score.into());
        self.default_confidence = confidence;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSelectionMethod {
    pub criterion: Criterion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    FirstHit,
    WeightedSum,
    WeightedMax,
}

/// Node of the rule tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum Rule {
    Simple(SimpleRule),
    Compound(CompoundRule),
}

impl Rule {
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            Rule::Simple(rule) => rule.predicate.as_ref(),
            Rule::Compound(rule) => rule.predicate.as_ref(),
        }
    }
}

/// Leaf rule: fires its score when the predicate holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Predicate>,
    pub score: String,
    #[serde(default = "default_unit")]
    pub confidence: f64,
    #[serde(default = "default_unit")]
    pub weight: f64,
}

fn default_unit() -> f64 {
    1.0
}

impl SimpleRule {
    pub fn new(predicate: Predicate, score: impl Into<String>) -> Self {
        Self {
            id: None,
            predicate: Some(predicate),
            score: score.into(),
            confidence: default_unit(),
            weight: default_unit(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Inner rule: gates its children behind its own predicate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Predicate>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl CompoundRule {
    pub fn new(predicate: Predicate, rules: Vec<Rule>) -> Self {
        Self {
            predicate: Some(predicate),
            rules,
        }
    }
}

impl From<SimpleRule> for Rule {
    fn from(rule: SimpleRule) -> Self {
        Rule::Simple(rule)
    }
}

impl From<CompoundRule> for Rule {
    fn from(rule: CompoundRule) -> Self {
        Rule::Compound(rule)
    }
}
