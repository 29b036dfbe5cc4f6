use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::categories::DEFAULT_CATEGORIES;
use crate::error::{Result, SklogError};
use crate::views::SortKey;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub categories: CategoriesConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub decay: DecayConfig,
    #[serde(default)]
    pub challenges: ChallengesConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    /// Layered load: defaults, then the global file, then `<root>/config.toml`.
    /// An explicit path (flag or `SKLOG_CONFIG`) replaces both files.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKLOG_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch)?,
                None => {
                    return Err(SklogError::MissingConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global)?;
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a single TOML document over the defaults, without env overrides.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| SklogError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch)?;
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("sklog/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join("config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SklogError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SklogError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) -> Result<()> {
        if let Some(patch) = patch.display {
            self.display.merge(patch)?;
        }
        if let Some(patch) = patch.categories {
            self.categories.merge(patch);
        }
        if let Some(patch) = patch.timer {
            self.timer.merge(patch);
        }
        if let Some(patch) = patch.decay {
            self.decay.merge(patch);
        }
        if let Some(patch) = patch.challenges {
            self.challenges.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("SKLOG_ROBOT_FORMAT") {
            self.robot.format = value;
        }

        if let Some(value) = env_string("SKLOG_DEFAULT_SORT") {
            self.display.default_sort = value.parse()?;
        }
        if let Some(value) = env_usize("SKLOG_TIMELINE_LIMIT")? {
            self.display.timeline_limit = value;
        }

        if let Some(values) = env_list("SKLOG_CATEGORIES") {
            self.categories.defaults = values;
        }

        if let Some(value) = env_u32("SKLOG_FOCUS_MINUTES")? {
            self.timer.focus_minutes = value;
        }
        if let Some(value) = env_u32("SKLOG_SHORT_BREAK_MINUTES")? {
            self.timer.short_break_minutes = value;
        }
        if let Some(value) = env_u32("SKLOG_LONG_BREAK_MINUTES")? {
            self.timer.long_break_minutes = value;
        }
        if let Some(value) = env_u32("SKLOG_LONG_BREAK_EVERY")? {
            self.timer.long_break_every = value;
        }

        if let Some(value) = env_u32("SKLOG_DECAY_MEDIUM_DAYS")? {
            self.decay.medium_days = value;
        }
        if let Some(value) = env_u32("SKLOG_DECAY_HIGH_DAYS")? {
            self.decay.high_days = value;
        }
        if let Some(value) = env_u32("SKLOG_DECAY_CRITICAL_DAYS")? {
            self.decay.critical_days = value;
        }
        if let Some(value) = env_u32("SKLOG_CERT_EXPIRY_WARNING_DAYS")? {
            self.decay.cert_expiry_warning_days = value;
        }

        if let Some(value) = env_usize("SKLOG_DAILY_CHALLENGES")? {
            self.challenges.daily_count = value;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.timer.focus_minutes == 0 {
            return Err(SklogError::Config(
                "timer.focus_minutes must be at least 1".to_string(),
            ));
        }
        if self.timer.long_break_every == 0 {
            return Err(SklogError::Config(
                "timer.long_break_every must be at least 1".to_string(),
            ));
        }
        let decay = &self.decay;
        if !(decay.medium_days <= decay.high_days && decay.high_days <= decay.critical_days) {
            return Err(SklogError::Config(format!(
                "decay thresholds must be ordered medium <= high <= critical, got {}/{}/{}",
                decay.medium_days, decay.high_days, decay.critical_days
            )));
        }
        Ok(())
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default = "default_timeline_limit")]
    pub timeline_limit: usize,
}

const fn default_timeline_limit() -> usize {
    crate::views::timeline::DEFAULT_LIMIT
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::default(),
            timeline_limit: default_timeline_limit(),
        }
    }
}

impl DisplayConfig {
    fn merge(&mut self, patch: DisplayPatch) -> Result<()> {
        if let Some(value) = patch.default_sort {
            self.default_sort = value.parse()?;
        }
        if let Some(value) = patch.timeline_limit {
            self.timeline_limit = value;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesConfig {
    #[serde(default)]
    pub defaults: Vec<String>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            defaults: DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl CategoriesConfig {
    fn merge(&mut self, patch: CategoriesPatch) {
        if let Some(values) = patch.defaults {
            let mut out: Vec<String> = Vec::new();
            for value in values {
                let value = value.trim().to_string();
                if !value.is_empty() && !out.contains(&value) {
                    out.push(value);
                }
            }
            self.defaults = out;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Every n-th completed focus session is followed by a long break.
    pub long_break_every: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_every: 4,
        }
    }
}

impl TimerConfig {
    fn merge(&mut self, patch: TimerPatch) {
        if let Some(value) = patch.focus_minutes {
            self.focus_minutes = value;
        }
        if let Some(value) = patch.short_break_minutes {
            self.short_break_minutes = value;
        }
        if let Some(value) = patch.long_break_minutes {
            self.long_break_minutes = value;
        }
        if let Some(value) = patch.long_break_every {
            self.long_break_every = value;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayConfig {
    pub medium_days: u32,
    pub high_days: u32,
    pub critical_days: u32,
    pub cert_expiry_warning_days: u32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            medium_days: 30,
            high_days: 60,
            critical_days: 90,
            cert_expiry_warning_days: 90,
        }
    }
}

impl DecayConfig {
    fn merge(&mut self, patch: DecayPatch) {
        if let Some(value) = patch.medium_days {
            self.medium_days = value;
        }
        if let Some(value) = patch.high_days {
            self.high_days = value;
        }
        if let Some(value) = patch.critical_days {
            self.critical_days = value;
        }
        if let Some(value) = patch.cert_expiry_warning_days {
            self.cert_expiry_warning_days = value;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengesConfig {
    pub daily_count: usize,
}

impl Default for ChallengesConfig {
    fn default() -> Self {
        Self { daily_count: 3 }
    }
}

impl ChallengesConfig {
    fn merge(&mut self, patch: ChallengesPatch) {
        if let Some(value) = patch.daily_count {
            self.daily_count = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfig {
    #[serde(default)]
    pub format: String,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
        }
    }
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

// =============================================================================
// PATCHES
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub display: Option<DisplayPatch>,
    pub categories: Option<CategoriesPatch>,
    pub timer: Option<TimerPatch>,
    pub decay: Option<DecayPatch>,
    pub challenges: Option<ChallengesPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DisplayPatch {
    pub default_sort: Option<String>,
    pub timeline_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CategoriesPatch {
    pub defaults: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TimerPatch {
    pub focus_minutes: Option<u32>,
    pub short_break_minutes: Option<u32>,
    pub long_break_minutes: Option<u32>,
    pub long_break_every: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DecayPatch {
    pub medium_days: Option<u32>,
    pub high_days: Option<u32>,
    pub critical_days: Option<u32>,
    pub cert_expiry_warning_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChallengesPatch {
    pub daily_count: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub format: Option<String>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(value) => value.trim().parse::<u32>().map(Some).map_err(|err| {
            SklogError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.trim().parse::<usize>().map(Some).map_err(|err| {
            SklogError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(ToString::to_string)
            .collect()
    })
}
