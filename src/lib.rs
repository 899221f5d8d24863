//! Scoring engine for declarative predictive models: feed-forward neural
//! networks and rule sets, with Target post-processing.

pub mod config;
pub mod context;
pub mod error;
pub mod expressions;
pub mod logging;
pub mod models;
pub mod network;
pub mod rules;
pub mod targets;

pub use context::{EvaluationContext, RecordContext};
pub use error::{EvalError, Result};
pub use network::{evaluate_network, evaluate_raw};
pub use rules::evaluate_rule_set;
