use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config lists no elements")]
    EmptyElements,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Elements to commit to, in order
    pub elements: Vec<String>,
    /// Leaf to prove and verify
    pub proof_index: Option<usize>,
    /// Where to write the encoded proof, if anywhere
    pub proof_out: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            elements: ["John", "Lily", "Roy", "Suzie", "Jane", "kane"].map(String::from).to_vec(),
            proof_index: Some(2),
            proof_out: None,
        }
    }
}

/// Parse a demo run description from TOML text
pub fn load_config_toml(input: &str) -> Result<DemoConfig, ConfigError> {
    let cfg = toml::from_str::<DemoConfig>(input)?;
    if cfg.elements.is_empty() {
        return Err(ConfigError::EmptyElements);
    }
    Ok(cfg)
}

pub fn load_config_file(path: &Path) -> Result<DemoConfig, ConfigError> {
    let txt = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    load_config_toml(&txt)
}
