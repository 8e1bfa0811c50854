//! Startup configuration
//!
//! Read once from the environment and treated as immutable for the process
//! lifetime.

use crate::catalog::StyleCommand;
use thiserror::Error;

pub const DEFAULT_AVATAR_API_BASE: &str = "https://api.dicebear.com/8.x";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN is not set")]
    MissingToken,

    #[error("invalid BOT_COMMANDS entry {0:?} (expected command=style)")]
    InvalidCommandSpec(String),
}

/// Configuration for the bot process
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub telegram_api_base: String,
    pub avatar_api_base: String,
    pub commands: Vec<StyleCommand>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = std::env::var("BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let commands = match std::env::var("BOT_COMMANDS") {
            Ok(spec) => parse_command_spec(&spec)?,
            Err(_) => default_commands(),
        };

        Ok(Self {
            bot_token,
            telegram_api_base: env_or("TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE),
            avatar_api_base: env_or("AVATAR_API_BASE", DEFAULT_AVATAR_API_BASE),
            commands,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Built-in command catalog, used when `BOT_COMMANDS` is not set.
pub fn default_commands() -> Vec<StyleCommand> {
    [
        ("/adventurer", "adventurer"),
        ("/avataaars", "avataaars"),
        ("/bottts", "bottts"),
        ("/croodles", "croodles"),
        ("/identicon", "identicon"),
        ("/lorelei", "lorelei"),
        ("/micah", "micah"),
        ("/pixel-art", "pixel-art"),
        ("/shapes", "shapes"),
        ("/thumbs", "thumbs"),
    ]
    .into_iter()
    .map(|(command, style)| StyleCommand::new(command, style))
    .collect()
}

/// Parse a comma-separated `command=style` list.
fn parse_command_spec(spec: &str) -> Result<Vec<StyleCommand>, ConfigError> {
    spec.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (command, style) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidCommandSpec(entry.to_string()))?;
            let (command, style) = (command.trim(), style.trim());
            if command.is_empty() || style.is_empty() {
                return Err(ConfigError::InvalidCommandSpec(entry.to_string()));
            }
            Ok(StyleCommand::new(command, style))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_includes_the_legacy_default_style() {
        let commands = default_commands();
        assert!(!commands.is_empty());
        assert!(commands
            .iter()
            .any(|entry| entry.style == crate::avatar::DEFAULT_STYLE));
    }

    #[test]
    fn command_spec_parses_in_order() {
        let commands = parse_command_spec("/bottts=bottts, /shapes=shapes").unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], StyleCommand::new("/bottts", "bottts"));
        assert_eq!(commands[1], StyleCommand::new("/shapes", "shapes"));
    }

    #[test]
    fn malformed_command_specs_are_rejected() {
        assert!(matches!(
            parse_command_spec("/bottts"),
            Err(ConfigError::InvalidCommandSpec(_))
        ));
        assert!(matches!(
            parse_command_spec("=bottts"),
            Err(ConfigError::InvalidCommandSpec(_))
        ));
    }

    #[test]
    fn empty_entries_in_command_spec_are_skipped() {
        let commands = parse_command_spec("/bottts=bottts,,").unwrap();
        assert_eq!(commands.len(), 1);
    }
}
