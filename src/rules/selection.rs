//! Fired-rule grouping and the selection criteria applied per class key

use std::collections::HashMap;

use crate::models::{ClassDistribution, Criterion, DistributionKind, SimpleRule};

/// A rule whose predicate held, with its provenance id
#[derive(Debug, Clone, Copy)]
pub struct FiredRule<'a> {
    pub entity: &'a str,
    pub rule: &'a SimpleRule,
}

/// Fired rules grouped by score.
///
/// Keys keep the order they were first seen in; rules under a key keep the
/// order they fired in.
#[derive(Debug, Default)]
pub struct FiredRules<'a> {
    groups: Vec<(&'a str, Vec<FiredRule<'a>>)>,
    index: HashMap<&'a str, usize>,
    total: usize,
}

impl<'a> FiredRules<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: &'a str, rule: &'a SimpleRule) {
        let key = rule.score.as_str();
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.groups.push((key, Vec::new()));
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[position].1.push(FiredRule { entity, rule });
        self.total += 1;
    }

    /// Class keys with their firings, in first-seen order
    pub fn groups(&self) -> impl Iterator<Item = (&'a str, &[FiredRule<'a>])> {
        self.groups.iter().map(|(key, rules)| (*key, rules.as_slice()))
    }

    pub fn get(&self, key: &str) -> Option<&[FiredRule<'a>]> {
        self.index
            .get(key)
            .map(|&position| self.groups[position].1.as_slice())
    }

    /// Number of firings across all keys
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Confidence distribution over the fired keys under `criterion`
pub fn select(criterion: Criterion, fired: &FiredRules<'_>) -> ClassDistribution {
    let mut result = ClassDistribution::new(DistributionKind::Confidence);

    for (key, rules) in fired.groups() {
        match criterion {
            Criterion::FirstHit => {
                let Some(winner) = rules.first() else {
                    continue;
                };
                // provenance is fixed by the first key only
                if result.entity.is_none() {
                    result.entity = Some(winner.entity.to_string());
                }
                result.put(key, winner.rule.confidence);
            }
            Criterion::WeightedSum => {
                let Some(winner) = heaviest(rules) else {
                    continue;
                };
                let total_weight: f64 = rules.iter().map(|fired| fired.rule.weight).sum();
                // divided by the firings of every key, not just this one
                let confidence = total_weight / fired.total() as f64;
                result.put_with_entity(winner.entity, key, confidence);
            }
            Criterion::WeightedMax => {
                let Some(winner) = heaviest(rules) else {
                    continue;
                };
                result.put_with_entity(winner.entity, key, winner.rule.confidence);
            }
        }
    }

    result
}

/// Fired rule with the greatest weight; the earliest wins ties
fn heaviest<'r, 'a>(rules: &'r [FiredRule<'a>]) -> Option<&'r FiredRule<'a>> {
    let mut winner: Option<&FiredRule<'a>> = None;
    for fired in rules {
        match winner {
            Some(current) if current.rule.weight >= fired.rule.weight => {}
            _ => winner = Some(fired),
        }
    }
    winner
}
