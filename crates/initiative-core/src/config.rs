use crate::catalog::ActionCatalog;
use crate::dice;
use crate::error::{InitiativeError, Result};
use crate::startup::{MAX_ARG_DURATION, MIN_ARG_DURATION};
use crate::timeline::{Timeline, DEFAULT_TIME_UNITS_PER_SECOND, DEFAULT_TURN_DURATION};
use crate::token::TokenRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const CONFIG_FILE: &str = ".initiative.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ActionEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub name: String,
    pub duration: u32,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_time_units_per_second")]
    pub time_units_per_second: u32,
    /// Selectable turn lengths in seconds; the first one is active at startup.
    #[serde(default = "default_turn_durations")]
    pub turn_durations: Vec<u32>,
    #[serde(default = "default_resolve_dice")]
    pub resolve_dice: String,
    /// Defined or overridden on top of the builtin catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionEntry>,
    /// Registered after the builtin token kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
}

fn default_version() -> u32 {
    1
}

fn default_time_units_per_second() -> u32 {
    DEFAULT_TIME_UNITS_PER_SECOND
}

fn default_turn_durations() -> Vec<u32> {
    vec![DEFAULT_TURN_DURATION, 10]
}

fn default_resolve_dice() -> String {
    "d20".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            time_units_per_second: default_time_units_per_second(),
            turn_durations: default_turn_durations(),
            resolve_dice: default_resolve_dice(),
            actions: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(InitiativeError::ConfigNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        crate::io::atomic_write(path, self.to_yaml()?.as_bytes())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn default_turn(&self) -> u32 {
        self.turn_durations
            .first()
            .copied()
            .filter(|&d| d > 0)
            .unwrap_or(DEFAULT_TURN_DURATION)
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Builtin catalog with `actions` applied. Entries that fail validation
    /// are skipped.
    pub fn build_catalog(&self) -> ActionCatalog {
        let mut catalog = ActionCatalog::builtin();
        for entry in &self.actions {
            if let Err(e) = catalog.define_or_override(&entry.name, entry.duration) {
                tracing::warn!(action = %entry.name, error = %e, "skipping configured action");
            }
        }
        catalog
    }

    pub fn build_registry(&self) -> TokenRegistry {
        let mut registry = TokenRegistry::builtin();
        for name in &self.tokens {
            if registry.lookup(name).is_none() {
                registry.register(name.clone());
            }
        }
        registry
    }

    pub fn build_timeline(&self) -> Timeline {
        let mut timeline = Timeline::new(self.time_units_per_second);
        timeline.set_turn_duration(self.default_turn());
        timeline
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut push = |level: WarnLevel, message: String| {
            warnings.push(ConfigWarning { level, message });
        };

        if self.time_units_per_second == 0 {
            push(
                WarnLevel::Error,
                "time_units_per_second must be greater than zero".to_string(),
            );
        }

        if self.turn_durations.is_empty() {
            push(
                WarnLevel::Warning,
                format!("turn_durations is empty; using {DEFAULT_TURN_DURATION}s"),
            );
        }
        if self.turn_durations.contains(&0) {
            push(
                WarnLevel::Error,
                "turn_durations contains a zero-length turn".to_string(),
            );
        }

        if let Err(e) = dice::validate(&self.resolve_dice) {
            push(
                WarnLevel::Error,
                format!("resolve_dice '{}': {e}", self.resolve_dice),
            );
        }

        let mut seen = HashSet::new();
        for entry in &self.actions {
            if entry.duration == 0 {
                push(
                    WarnLevel::Error,
                    format!("action '{}' has zero duration", entry.name),
                );
            } else if !(MIN_ARG_DURATION..=MAX_ARG_DURATION).contains(&entry.duration) {
                push(
                    WarnLevel::Warning,
                    format!(
                        "action '{}' duration {} is outside {MIN_ARG_DURATION}..={MAX_ARG_DURATION}",
                        entry.name, entry.duration
                    ),
                );
            }
            if !seen.insert(entry.name.as_str()) {
                push(
                    WarnLevel::Warning,
                    format!("action '{}' is listed more than once; last entry wins", entry.name),
                );
            }
        }

        let mut seen = HashSet::new();
        for name in &self.tokens {
            if !seen.insert(name.as_str()) {
                push(
                    WarnLevel::Warning,
                    format!("token '{name}' is listed more than once"),
                );
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
