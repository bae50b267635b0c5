//! The settings record handed back to callers.

use fc_steps::Step;
use serde::{Deserialize, Serialize};

use crate::settings::{Scalar, SettingsError, SettingsMap};

/// Starting and ending procedures produced by one assembler run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Procedures {
    pub starting: Vec<Step>,
    pub ending: Vec<Step>,
}

/// Merged settings plus the two assembled procedures.
///
/// Serializes as one flat object: every setting key, then
/// `starting_procedure_steps` and `ending_procedure_steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    #[serde(flatten)]
    pub settings: SettingsMap,

    pub starting_procedure_steps: Vec<Step>,

    pub ending_procedure_steps: Vec<Step>,
}

impl SettingsRecord {
    pub fn new(settings: SettingsMap, procedures: Procedures) -> Self {
        Self {
            settings,
            starting_procedure_steps: procedures.starting,
            ending_procedure_steps: procedures.ending,
        }
    }

    pub fn get(&self, key: &str) -> Result<&Scalar, SettingsError> {
        self.settings.get(key)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Numbered one-line-per-step listing of both procedures.
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        for (title, steps) in [
            ("Starting procedure", &self.starting_procedure_steps),
            ("Ending procedure", &self.ending_procedure_steps),
        ] {
            out.push_str(&format!("{} ({} steps):\n", title, steps.len()));
            for (i, step) in steps.iter().enumerate() {
                out.push_str(&format!("  {:>2}. {}\n", i + 1, step));
            }
        }
        out
    }
}
