//! Neural network evaluation: forward pass, layer normalization and
//! output mapping.

pub mod activation;
pub mod evaluator;
pub mod normalization;
pub mod outputs;
pub mod registry;

pub use evaluator::{evaluate_network, evaluate_raw};
pub use registry::{entity_registry, EntityCache, EntityRegistry};
