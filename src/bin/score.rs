//! Score one record against one model.
//!
//! Usage: `score [MODEL_JSON] [RECORD_JSON]`; missing arguments fall back to
//! `MODELSCORE_MODEL` and `MODELSCORE_RECORD`.

use dotenvy::dotenv;
use modelscore::config::{get_environment, ScoreConfig};
use modelscore::logging;
use modelscore::models::{ModelDocument, Prediction, Value};
use modelscore::{evaluate_network, evaluate_rule_set, RecordContext};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ScoreConfig::from_env().with_args(env::args_os().skip(1));
    info!(environment = %get_environment(), "Starting scorer");

    let model_path = config
        .model_path
        .ok_or("model path required (argument or MODELSCORE_MODEL)")?;
    let record_path = config
        .record_path
        .ok_or("record path required (argument or MODELSCORE_RECORD)")?;

    let document: ModelDocument = read_json(&model_path)?;
    let record: HashMap<String, Value> = read_json(&record_path)?;
    let context = RecordContext::new(record);

    let result = match &document {
        ModelDocument::NeuralNetwork(network) => evaluate_network(network, &context),
        ModelDocument::RuleSet(model) => evaluate_rule_set(model, &context).map(|distributions| {
            distributions
                .into_iter()
                .map(|(field, distribution)| (field, Prediction::Classification(distribution)))
                .collect()
        }),
    };

    let predictions = match result {
        Ok(predictions) => predictions,
        Err(e) => {
            error!(error = %e, "Evaluation failed");
            return Err(e.into());
        }
    };

    info!(fields = predictions.len(), "Evaluation complete");
    println!("{}", serde_json::to_string_pretty(&predictions)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&contents)?)
}
