use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Sheet and column naming conventions.
///
/// The defaults are the conventions every spreadsheet is expected to follow:
///
/// | setting               | default    | meaning                                   |
/// |-----------------------|------------|-------------------------------------------|
/// | `settings_sheet`      | `settings` | name of the pass-through settings sheet   |
/// | `comment_prefix`      | `#`        | sheets starting with it are ignored       |
/// | `relation_separator`  | `-`        | `X-Y` names a relation sheet              |
/// | `reference_separator` | `.`        | `Group.Property[.Label]` reference columns |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub settings_sheet: String,
    pub comment_prefix: String,
    pub relation_separator: char,
    pub reference_separator: char,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            settings_sheet: "settings".to_string(),
            comment_prefix: "#".to_string(),
            relation_separator: '-',
            reference_separator: '.',
        }
    }
}

impl GraphConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: GraphConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GraphConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, or YAML for any other extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings_sheet.is_empty() {
            return Err(ConfigError::Invalid {
                field: "settings_sheet",
                reason: "must not be empty".to_string(),
            });
        }
        // An empty prefix would match every sheet name.
        if self.comment_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "comment_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.relation_separator == self.reference_separator {
            return Err(ConfigError::Invalid {
                field: "reference_separator",
                reason: format!(
                    "`{}` is also the relation separator",
                    self.reference_separator
                ),
            });
        }
        Ok(())
    }
}
