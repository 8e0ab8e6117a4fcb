use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PennsieveError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub pennsieve_profile_name: Option<String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<Config, PennsieveError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("pennsieve.json"),
        };

        if path.is_none() && !config_path.exists() {
            return Err(PennsieveError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| PennsieveError::ConfigRead(config_path.clone()))?;
        serde_json::from_str(&content)
            .map_err(|err| PennsieveError::ConfigParse(err.to_string()))
    }
}
