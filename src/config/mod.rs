//! Environment-driven settings for the `score` binary

use std::env;
use std::path::PathBuf;

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Input locations for a scoring run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreConfig {
    pub model_path: Option<PathBuf>,
    pub record_path: Option<PathBuf>,
}

impl ScoreConfig {
    /// Read `MODELSCORE_MODEL` and `MODELSCORE_RECORD`
    pub fn from_env() -> Self {
        Self {
            model_path: env::var_os("MODELSCORE_MODEL").map(PathBuf::from),
            record_path: env::var_os("MODELSCORE_RECORD").map(PathBuf::from),
        }
    }

    /// Positional arguments (model, then record) take precedence
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let mut args = args.into_iter();
        if let Some(model) = args.next() {
            self.model_path = Some(model.into());
        }
        if let Some(record) = args.next() {
            self.record_path = Some(record.into());
        }
        self
    }
}
