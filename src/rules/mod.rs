//! Rule set evaluation

pub mod evaluator;
pub mod selection;

pub use evaluator::evaluate_rule_set;
pub use selection::{select, FiredRule, FiredRules};
