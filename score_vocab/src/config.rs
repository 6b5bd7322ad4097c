// Vocabulary configuration.
//
// A vocabulary is fully determined by its mode and the set of enabled
// control categories, so that is all the config holds. It is loaded from
// JSON, e.g.
//
//     { "mode": "score", "control_list": ["key", "tensile"] }
//
// Control names are deserialized straight into `ControlCategory`, so a
// misspelled name fails the load instead of silently dropping a category.
// Both fields are optional; the default is mode `"score"` with no controls.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::ControlCategory;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabConfig {
    /// Free-form discriminator passed through to the vocabulary.
    pub mode: String,
    /// Control categories to enable. Order and repeats do not matter.
    pub control_list: Vec<ControlCategory>,
}

impl Default for VocabConfig {
    fn default() -> Self {
        VocabConfig {
            mode: "score".to_string(),
            control_list: Vec::new(),
        }
    }
}

impl VocabConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded vocabulary config");
        Ok(config)
    }
}
