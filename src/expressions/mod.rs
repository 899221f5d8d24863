//! Expression and predicate evaluation for the expression kinds the
//! evaluators rely on.

pub mod evaluator;
pub mod normalization;
pub mod predicate;

pub use evaluator::{evaluate_derived_field, evaluate_expression, resolve_expression, resolve_field};
pub use normalization::{denormalize, normalize};
pub use predicate::evaluate_predicate;
