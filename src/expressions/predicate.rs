//! Three-valued predicate evaluation
//!
//! `None` stands for an unknown outcome (typically a missing field).

use std::cmp::Ordering;

use super::evaluator::resolve_field;
use crate::context::EvaluationContext;
use crate::error::{EvalError, Result};
use crate::models::{BooleanOperator, Predicate, SetOperator, SimpleOperator, Value};

/// Evaluate a predicate against the context
pub fn evaluate_predicate<C>(predicate: &Predicate, context: &C) -> Result<Option<bool>>
where
    C: EvaluationContext + ?Sized,
{
    match predicate {
        Predicate::True => Ok(Some(true)),
        Predicate::False => Ok(Some(false)),
        Predicate::SimplePredicate {
            field,
            operator,
            value,
        } => evaluate_simple(field, *operator, value.as_deref(), context),
        Predicate::SimpleSetPredicate {
            field,
            boolean_operator,
            values,
        } => {
            let Some(value) = resolve_field(field, context)? else {
                return Ok(None);
            };
            let mut contained = false;
            for literal in values {
                if compare(field, &value, literal)? == Some(Ordering::Equal) {
                    contained = true;
                    break;
                }
            }
            Ok(Some(match boolean_operator {
                SetOperator::IsIn => contained,
                SetOperator::IsNotIn => !contained,
            }))
        }
        Predicate::CompoundPredicate {
            boolean_operator,
            predicates,
        } => evaluate_compound(*boolean_operator, predicates, context),
    }
}

fn evaluate_simple<C>(
    field: &str,
    operator: SimpleOperator,
    literal: Option<&str>,
    context: &C,
) -> Result<Option<bool>>
where
    C: EvaluationContext + ?Sized,
{
    let value = resolve_field(field, context)?;

    let ordering = match (operator, &value) {
        (SimpleOperator::IsMissing | SimpleOperator::IsNotMissing, _) => None,
        (_, None) => return Ok(None),
        (_, Some(value)) => {
            let literal = literal.ok_or_else(|| {
                EvalError::invalid(format!("SimplePredicate on {} has no value", field))
            })?;
            match compare(field, value, literal)? {
                Some(ordering) => Some(ordering),
                None => return Ok(None),
            }
        }
    };

    let outcome = match (operator, ordering) {
        (SimpleOperator::IsMissing, _) => value.is_none(),
        (SimpleOperator::IsNotMissing, _) => value.is_some(),
        (_, None) => return Ok(None),
        (SimpleOperator::Equal, Some(ordering)) => ordering == Ordering::Equal,
        (SimpleOperator::NotEqual, Some(ordering)) => ordering != Ordering::Equal,
        (SimpleOperator::LessThan, Some(ordering)) => ordering == Ordering::Less,
        (SimpleOperator::LessOrEqual, Some(ordering)) => ordering != Ordering::Greater,
        (SimpleOperator::GreaterThan, Some(ordering)) => ordering == Ordering::Greater,
        (SimpleOperator::GreaterOrEqual, Some(ordering)) => ordering != Ordering::Less,
    };
    Ok(Some(outcome))
}

fn evaluate_compound<C>(
    operator: BooleanOperator,
    predicates: &[Predicate],
    context: &C,
) -> Result<Option<bool>>
where
    C: EvaluationContext + ?Sized,
{
    if predicates.is_empty() {
        return Err(EvalError::invalid("CompoundPredicate without operands"));
    }

    match operator {
        BooleanOperator::And => {
            let mut unknown = false;
            for predicate in predicates {
                match evaluate_predicate(predicate, context)? {
                    Some(false) => return Ok(Some(false)),
                    Some(true) => {}
                    None => unknown = true,
                }
            }
            Ok(if unknown { None } else { Some(true) })
        }
        BooleanOperator::Or => {
            let mut unknown = false;
            for predicate in predicates {
                match evaluate_predicate(predicate, context)? {
                    Some(true) => return Ok(Some(true)),
                    Some(false) => {}
                    None => unknown = true,
                }
            }
            Ok(if unknown { None } else { Some(false) })
        }
        BooleanOperator::Xor => {
            let mut outcome = false;
            for predicate in predicates {
                match evaluate_predicate(predicate, context)? {
                    Some(value) => outcome ^= value,
                    None => return Ok(None),
                }
            }
            Ok(Some(outcome))
        }
        BooleanOperator::Surrogate => {
            for predicate in predicates {
                if let Some(value) = evaluate_predicate(predicate, context)? {
                    return Ok(Some(value));
                }
            }
            Ok(None)
        }
    }
}

/// Order a field value against a predicate literal, in the value's own type.
///
/// `None` when the values are unordered (NaN).
fn compare(field: &str, value: &Value, literal: &str) -> Result<Option<Ordering>> {
    match value {
        Value::Double(_) | Value::Integer(_) => {
            let expected = literal
                .trim()
                .parse::<f64>()
                .map_err(|_| EvalError::type_mismatch(field, "number"))?;
            Ok(value.as_f64().and_then(|number| number.partial_cmp(&expected)))
        }
        Value::Boolean(flag) => {
            let expected = parse_boolean(literal)
                .ok_or_else(|| EvalError::type_mismatch(field, "boolean"))?;
            Ok(Some(flag.cmp(&expected)))
        }
        Value::String(text) => Ok(Some(text.as_str().cmp(literal))),
    }
}

fn parse_boolean(literal: &str) -> Option<bool> {
    match literal.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
