//! Rule set evaluation: rule tree traversal and class selection

use indexmap::IndexMap;
use tracing::debug;

use super::selection::{select, FiredRules};
use crate::context::EvaluationContext;
use crate::error::{EvalError, Result};
use crate::expressions::evaluate_predicate;
use crate::models::model::ensure_scorable;
use crate::models::{
    ClassDistribution, DistributionKind, MiningFunction, Rule, RuleSet, RuleSetModel,
};
use crate::targets;

/// Evaluate a rule set model into one distribution for its target field
pub fn evaluate_rule_set<C>(
    model: &RuleSetModel,
    context: &C,
) -> Result<IndexMap<String, ClassDistribution>>
where
    C: EvaluationContext + ?Sized,
{
    ensure_scorable(model)?;

    if model.function_name != MiningFunction::Classification {
        return Err(EvalError::unsupported(format!(
            "mining function {} for rule set {}",
            model.function_name, model.model_name
        )));
    }

    let rule_set = &model.rule_set;
    let method = rule_set.rule_selection_methods.first().ok_or_else(|| {
        EvalError::invalid(format!(
            "RuleSet of {} declares no rule selection method",
            model.model_name
        ))
    })?;

    let ids = rule_ids(&rule_set.rules);
    let mut fired = FiredRules::new();
    let mut position = 0;
    for rule in &rule_set.rules {
        collect_fired_rules(rule, &ids, &mut position, context, &mut fired)?;
    }

    debug!(
        model_name = %model.model_name,
        criterion = ?method.criterion,
        fired = fired.total(),
        "evaluated rule set"
    );

    // a rule set that ran always yields a distribution, so Target priors
    // never replace an empty outcome
    let distribution = if fired.is_empty() {
        default_distribution(rule_set)
    } else {
        select(method.criterion, &fired)
    };

    let mut predictions = IndexMap::with_capacity(1);
    predictions.insert(model.target_field.clone(), Some(distribution));
    targets::process_classification(model, predictions)
}

/// Record every simple rule whose predicate, and that of each enclosing
/// compound rule, holds.
///
/// `position` counts simple rules in traversal order, skipped subtrees
/// included, so a rule keeps the same fallback id whatever fires.
fn collect_fired_rules<'a, C>(
    rule: &'a Rule,
    ids: &'a [String],
    position: &mut usize,
    context: &C,
    fired: &mut FiredRules<'a>,
) -> Result<()>
where
    C: EvaluationContext + ?Sized,
{
    let predicate = rule.predicate().ok_or_else(|| {
        EvalError::invalid(format!("{} rule has no predicate", rule_kind(rule)))
    })?;

    // unknown counts as not fired
    let status = evaluate_predicate(predicate, context)?.unwrap_or(false);

    match rule {
        Rule::Simple(simple) => {
            if status {
                fired.push(ids[*position].as_str(), simple);
            }
            *position += 1;
        }
        Rule::Compound(compound) if status => {
            for child in &compound.rules {
                collect_fired_rules(child, ids, position, context, fired)?;
            }
        }
        Rule::Compound(compound) => {
            *position += compound.rules.iter().map(leaf_count).sum::<usize>();
        }
    }

    Ok(())
}

/// Provenance id of every simple rule, in traversal order
fn rule_ids(rules: &[Rule]) -> Vec<String> {
    fn walk(rules: &[Rule], ids: &mut Vec<String>) {
        for rule in rules {
            match rule {
                Rule::Simple(simple) => {
                    let id = match &simple.id {
                        Some(id) => id.clone(),
                        None => format!("rule-{}", ids.len() + 1),
                    };
                    ids.push(id);
                }
                Rule::Compound(compound) => walk(&compound.rules, ids),
            }
        }
    }

    let mut ids = Vec::new();
    walk(rules, &mut ids);
    ids
}

fn leaf_count(rule: &Rule) -> usize {
    match rule {
        Rule::Simple(_) => 1,
        Rule::Compound(compound) => compound.rules.iter().map(leaf_count).sum(),
    }
}

/// Outcome when no rule fired: the default score, or nothing
fn default_distribution(rule_set: &RuleSet) -> ClassDistribution {
    let mut distribution = ClassDistribution::new(DistributionKind::Confidence);
    if let Some(score) = &rule_set.default_score {
        distribution.put(score.as_str(), rule_set.default_confidence.unwrap_or(1.0));
    }
    distribution
}

fn rule_kind(rule: &Rule) -> &'static str {
    match rule {
        Rule::Simple(_) => "SimpleRule",
        Rule::Compound(_) => "CompoundRule",
    }
}
