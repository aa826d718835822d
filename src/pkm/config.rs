use crate::error::{PkmError, Result};
use crate::model::Priority;
use crate::services::tasks::WEEK_WINDOW_DAYS;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DATA_DIR_NAME: &str = ".pkm";
const MAX_WEEK_WINDOW_DAYS: u32 = 3650;

pub const DATA_DIR_ENV: &str = "PKM_DATA_DIR";

/// Configuration for pkm, stored in `<data_dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PkmConfig {
    /// Priority for new tasks when none is given
    #[serde(default, with = "priority_name")]
    pub default_priority: Priority,

    /// How many days ahead the week view looks
    #[serde(default = "default_week_window_days")]
    pub week_window_days: u32,
}

fn default_week_window_days() -> u32 {
    WEEK_WINDOW_DAYS
}

/// Week window must be between 1 and 3650 days.
fn check_week_window(days: u32) -> std::result::Result<u32, String> {
    if (1..=MAX_WEEK_WINDOW_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(format!(
            "week-window-days must be between 1 and {}, got {}",
            MAX_WEEK_WINDOW_DAYS, days
        ))
    }
}

impl Default for PkmConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::default(),
            week_window_days: WEEK_WINDOW_DAYS,
        }
    }
}

impl PkmConfig {
    pub const KEYS: [&'static str; 2] = ["default-priority", "week-window-days"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PkmError::Io)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PkmError::Config(format!("{}: {}", config_path.display(), e)))?;
        check_week_window(config.week_window_days)
            .map_err(|e| PkmError::Config(format!("{}: {}", config_path.display(), e)))?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PkmError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PkmError::Serialization)?;
        fs::write(config_path, content).map_err(PkmError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-priority" => Some(self.default_priority.to_string()),
            "week-window-days" => Some(self.week_window_days.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-priority" => {
                self.default_priority = value.trim().to_lowercase().parse()?;
            }
            "week-window-days" => {
                let days: u32 = value.trim().parse().map_err(|_| {
                    PkmError::Validation(format!(
                        "week-window-days must be a number, got '{}'",
                        value
                    ))
                })?;
                self.week_window_days = check_week_window(days).map_err(PkmError::Validation)?;
            }
            other => {
                return Err(PkmError::Validation(format!(
                    "unknown config key '{}' (known: {})",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

/// Picks the data directory: explicit flag, then `$PKM_DATA_DIR`, then `~/.pkm`.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    UserDirs::new()
        .map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
        .ok_or_else(|| PkmError::Config("could not determine home directory".into()))
}

mod priority_name {
    use crate::model::Priority;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(priority: &Priority, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(priority.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Priority, D::Error> {
        let name = String::deserialize(d)?;
        name.parse().map_err(de::Error::custom)
    }
}
