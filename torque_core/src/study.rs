//! # Study Data Structures
//!
//! A `Study` groups the transmission variants explored for one bench (the
//! reference design, alternative pulley sets, other gearboxes) so they can be
//! saved and reloaded together. Studies serialize to `.tqs` files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Study
//! ├── meta: StudyMetadata (schema version, author, title, timestamps)
//! └── configs: HashMap<Uuid, TransmissionConfig>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use torque_core::study::Study;
//! use torque_core::calculations::TransmissionConfig;
//!
//! let mut study = Study::new("J. Student", "Pendulum bench");
//! let id = study.add_config(TransmissionConfig::reference());
//!
//! let results = study.calculate_all();
//! assert!(results[&id].is_ok());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::transmission::{calculate, TransmissionConfig, TransmissionResult};
use crate::errors::CalcResult;

/// Current schema version for .tqs files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root study container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Study {
    pub meta: StudyMetadata,

    /// Transmission variants, keyed by UUID
    pub configs: HashMap<Uuid, TransmissionConfig>,
}

impl Study {
    pub fn new(author: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Study {
            meta: StudyMetadata {
                version: SCHEMA_VERSION.to_string(),
                author: author.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            configs: HashMap::new(),
        }
    }

    /// Add a configuration; returns its new UUID.
    pub fn add_config(&mut self, config: TransmissionConfig) -> Uuid {
        let id = Uuid::new_v4();
        self.configs.insert(id, config);
        self.touch();
        id
    }

    pub fn remove_config(&mut self, id: &Uuid) -> Option<TransmissionConfig> {
        let config = self.configs.remove(id);
        if config.is_some() {
            self.touch();
        }
        config
    }

    pub fn get_config(&self, id: &Uuid) -> Option<&TransmissionConfig> {
        self.configs.get(id)
    }

    /// Find a configuration by its label.
    pub fn find_by_label(&self, label: &str) -> Option<(&Uuid, &TransmissionConfig)> {
        self.configs.iter().find(|(_, c)| c.label == label)
    }

    pub fn config_count(&self) -> usize {
        self.configs.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Calculate every configuration independently. One failing variant does
    /// not affect the others.
    pub fn calculate_all(&self) -> HashMap<Uuid, CalcResult<TransmissionResult>> {
        self.configs
            .iter()
            .map(|(id, config)| (*id, calculate(config)))
            .collect()
    }
}

impl Default for Study {
    fn default() -> Self {
        Study::new("", "")
    }
}

/// Study metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub author: String,

    pub title: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}
