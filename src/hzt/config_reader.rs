use crate::hzt::*;

use log::debug;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fs;

/// Run configuration: where the master roster and the evaluator workbooks
/// live, and where the outputs go.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(rename = "masterFilePath")]
    pub master_file_path: String,
    #[serde(rename = "inputDirectory")]
    pub input_directory: String,
    #[serde(rename = "flatOutputPath")]
    _flat_output_path: Option<String>,
    #[serde(rename = "formsOutputDirectory")]
    _forms_output_directory: Option<String>,
}

impl RunConfig {
    pub fn flat_output_path(&self) -> String {
        self._flat_output_path
            .clone()
            .unwrap_or_else(|| "evaluations.csv".to_string())
    }

    pub fn forms_output_directory(&self) -> String {
        self._forms_output_directory
            .clone()
            .unwrap_or_else(|| "hazanotomat".to_string())
    }
}

pub fn read_config(path: &str) -> HztResult<RunConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: RunConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}
