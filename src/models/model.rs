//! Model-level metadata shared by every model kind

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::target::Target;
use crate::error::{EvalError, Result};

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity handle of one model instance.
///
/// Assigned when the instance is built, never derived from its contents:
/// two structurally identical models still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

impl ModelId {
    pub fn next() -> Self {
        ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MiningFunction {
    Regression,
    Classification,
    Clustering,
    AssociationRules,
    Sequences,
    TimeSeries,
    Mixed,
}

impl fmt::Display for MiningFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MiningFunction::Regression => "regression",
            MiningFunction::Classification => "classification",
            MiningFunction::Clustering => "clustering",
            MiningFunction::AssociationRules => "associationRules",
            MiningFunction::Sequences => "sequences",
            MiningFunction::TimeSeries => "timeSeries",
            MiningFunction::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Accessor for the owning model's metadata and target declarations
pub trait ModelMetadata {
    fn model_name(&self) -> &str;

    fn function_name(&self) -> MiningFunction;

    fn is_scorable(&self) -> bool;

    fn targets(&self) -> &[Target];

    /// Target declared for `field`, if any
    fn target(&self, field: &str) -> Option<&Target> {
        self.targets()
            .iter()
            .find(|target| target.field.as_deref() == Some(field))
    }
}

pub(crate) fn default_scorable() -> bool {
    true
}

/// Reject evaluation of a model flagged as unusable
pub(crate) fn ensure_scorable<M: ModelMetadata + ?Sized>(model: &M) -> Result<()> {
    if !model.is_scorable() {
        return Err(EvalError::NotScorable(model.model_name().to_string()));
    }
    Ok(())
}
