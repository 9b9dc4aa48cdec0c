use std::{fs::File, io, path::Path};

use anyhow::Context as _;
use quadfall_engine::EngineConfig;
use quadfall_evaluator::{HeuristicWeights, LinearPlacementEvaluator, MoveEvaluator};
use serde::{Deserialize, Serialize};

/// Contents of the `--config` file. Missing sections use defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) engine: EngineConfig,
    pub(crate) weights: HeuristicWeights,
}

impl AppConfig {
    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        self.engine
            .validate()
            .context("Invalid engine configuration")?;
        self.weights
            .validate()
            .context("Invalid heuristic weights")?;
        Ok(())
    }

    pub(crate) fn move_evaluator(&self) -> MoveEvaluator<'static> {
        MoveEvaluator::new(Box::new(LinearPlacementEvaluator::new(self.weights)))
    }
}

pub(crate) fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads and validates the configuration file, or returns defaults.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let config: AppConfig = read_json_file("config", path)?;
    config
        .validate()
        .with_context(|| format!("Rejected config file: {}", path.display()))?;
    Ok(config)
}
