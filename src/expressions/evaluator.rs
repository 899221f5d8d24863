//! Expression evaluation and derived-field reference resolution

use tracing::trace;

use super::normalization;
use crate::context::EvaluationContext;
use crate::error::{EvalError, Result};
use crate::models::{DerivedField, Expression, Value};

/// Evaluate a derived field's expression against the context
pub fn evaluate_derived_field<C>(derived_field: &DerivedField, context: &C) -> Result<Option<Value>>
where
    C: EvaluationContext + ?Sized,
{
    evaluate(&derived_field.expression, context, &mut Vec::new())
}

/// Evaluate a standalone expression against the context
pub fn evaluate_expression<C>(expression: &Expression, context: &C) -> Result<Option<Value>>
where
    C: EvaluationContext + ?Sized,
{
    evaluate(expression, context, &mut Vec::new())
}

/// Value of a named field, following derived field definitions
pub fn resolve_field<C>(field: &str, context: &C) -> Result<Option<Value>>
where
    C: EvaluationContext + ?Sized,
{
    resolve_field_guarded(field, context, &mut Vec::new())
}

/// Follow a chain of `FieldRef`s through derived field definitions until a
/// terminal expression is reached.
///
/// A `FieldRef` to a field that is not derived is itself terminal. A chain
/// that revisits a field is rejected.
pub fn resolve_expression<'a, C>(derived_field: &'a DerivedField, context: &'a C) -> Result<&'a Expression>
where
    C: EvaluationContext + ?Sized,
{
    let mut visited: Vec<&str> = Vec::new();
    let mut expression = &derived_field.expression;

    while let Expression::FieldRef { field } = expression {
        if visited.contains(&field.as_str()) {
            return Err(cycle_error(field, &visited));
        }
        visited.push(field);

        match context.resolve_derived_field(field) {
            Some(next) => expression = &next.expression,
            None => break,
        }
    }

    trace!(
        derived_field = %derived_field.name,
        hops = visited.len(),
        kind = expression.kind(),
        "resolved expression"
    );
    Ok(expression)
}

fn evaluate<C>(expression: &Expression, context: &C, visiting: &mut Vec<String>) -> Result<Option<Value>>
where
    C: EvaluationContext + ?Sized,
{
    match expression {
        Expression::Constant { value } => Ok(Some(value.clone())),
        Expression::FieldRef { field } => resolve_field_guarded(field, context, visiting),
        Expression::NormContinuous {
            field,
            linear_norms,
            outliers,
            map_missing_to,
        } => {
            let value = match resolve_field_guarded(field, context, visiting)? {
                Some(value) => value,
                None => return Ok(map_missing_to.map(Value::Double)),
            };
            let number = value
                .as_f64()
                .ok_or_else(|| EvalError::type_mismatch(field.as_str(), "number"))?;
            let normalized = normalization::normalize(field, linear_norms, *outliers, number)?;
            Ok(normalized.map(Value::Double))
        }
        Expression::NormDiscrete {
            field,
            value: category,
            map_missing_to,
        } => match resolve_field_guarded(field, context, visiting)? {
            Some(value) => {
                let indicator = if matches_category(&value, category) { 1.0 } else { 0.0 };
                Ok(Some(Value::Double(indicator)))
            }
            None => Ok(map_missing_to.map(Value::Double)),
        },
    }
}

fn resolve_field_guarded<C>(field: &str, context: &C, visiting: &mut Vec<String>) -> Result<Option<Value>>
where
    C: EvaluationContext + ?Sized,
{
    let Some(derived_field) = context.resolve_derived_field(field) else {
        return Ok(context.resolve(field));
    };

    if visiting.iter().any(|name| name == field) {
        let chain: Vec<&str> = visiting.iter().map(String::as_str).collect();
        return Err(cycle_error(field, &chain));
    }

    visiting.push(field.to_string());
    let result = evaluate(&derived_field.expression, context, visiting);
    visiting.pop();
    result
}

/// Compare a field value with a declared category label
pub(crate) fn matches_category(value: &Value, category: &str) -> bool {
    if value.is_numeric() {
        if let (Some(number), Ok(expected)) = (value.as_f64(), category.parse::<f64>()) {
            return number == expected;
        }
    }
    value.to_string() == category
}

fn cycle_error(field: &str, chain: &[&str]) -> EvalError {
    EvalError::invalid(format!(
        "Cyclic derived field reference at {} (via {})",
        field,
        chain.join(" -> ")
    ))
}
