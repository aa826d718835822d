use crate::commands::{CmdMessage, CmdResult};
use crate::config::PkmConfig;
use crate::error::{PkmError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = PkmConfig::load(data_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = PkmConfig::load(data_dir)?;
            let message = match config.get(&key) {
                Some(val) => CmdMessage::info(val),
                None => CmdMessage::error(format!("Unknown config key: {}", key)),
            };
            Ok(CmdResult::default().with_message(message))
        }
        ConfigAction::Set(key, value) => {
            let mut config = PkmConfig::load(data_dir)?;
            match config.set(&key, &value) {
                Ok(()) => {}
                Err(e @ (PkmError::Validation(_) | PkmError::InvalidPriority(_))) => {
                    return Ok(CmdResult::default().with_message(CmdMessage::error(e.to_string())));
                }
                Err(e) => return Err(e),
            }
            config.save(data_dir)?;

            let display_val = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_config(config)
                .with_message(CmdMessage::success(format!("{} set to {}", key, display_val))))
        }
    }
}
