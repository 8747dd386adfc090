//! Engine configuration, optionally read from a TOML file.
//!
//! ```toml
//! record_policy = "abort"
//!
//! [workday]
//! start = "08:00"
//! end = "18:00"
//! ```
//!
//! Both top-level keys are optional and fall back to the 07:00-19:00 window and
//! the skip-invalid-records policy. A `[workday]` table needs both bounds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::ingest::RecordPolicy;
use crate::workday::WorkdayWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub record_policy: RecordPolicy,
    pub workday: WorkdayWindow,
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SlotError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SlotError::Config(e.to_string()))
    }
}
