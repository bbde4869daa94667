//! Runtime configuration read from the process environment

use crate::{BotError, Result};

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot needs before it does anything else
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config").finish_non_exhaustive()
    }
}

impl Config {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// A variable that is absent or empty counts as missing, and every
    /// missing variable is named in the error.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match get(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let practicum_token = read(PRACTICUM_TOKEN_VAR);
        let telegram_token = read(TELEGRAM_TOKEN_VAR);
        let telegram_chat_id = read(TELEGRAM_CHAT_ID_VAR);

        if !missing.is_empty() {
            return Err(BotError::Config(format!(
                "required environment variables are missing or empty: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name: &str| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn reads_all_three_variables() {
        let config = Config::from_lookup(lookup(&[
            (PRACTICUM_TOKEN_VAR, "practicum-secret"),
            (TELEGRAM_TOKEN_VAR, "telegram-secret"),
            (TELEGRAM_CHAT_ID_VAR, "12345"),
        ]))
        .unwrap();
        assert_eq!(config.practicum_token, "practicum-secret");
        assert_eq!(config.telegram_token, "telegram-secret");
        assert_eq!(config.telegram_chat_id, "12345");
    }

    #[test]
    fn missing_variable_is_named_in_error() {
        let err = Config::from_lookup(lookup(&[
            (PRACTICUM_TOKEN_VAR, "practicum-secret"),
            (TELEGRAM_CHAT_ID_VAR, "12345"),
        ]))
        .unwrap_err();
        match &err {
            BotError::Config(msg) => {
                assert!(msg.contains(TELEGRAM_TOKEN_VAR), "{msg}");
                assert!(!msg.contains(PRACTICUM_TOKEN_VAR), "{msg}");
            }
            other => panic!("expected BotError::Config, got {other:?}"),
        }
    }

    #[test]
    fn empty_variable_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            (PRACTICUM_TOKEN_VAR, ""),
            (TELEGRAM_TOKEN_VAR, "telegram-secret"),
            (TELEGRAM_CHAT_ID_VAR, "12345"),
        ]))
        .unwrap_err();
        match &err {
            BotError::Config(msg) => assert!(msg.contains(PRACTICUM_TOKEN_VAR), "{msg}"),
            other => panic!("expected BotError::Config, got {other:?}"),
        }
    }

    #[test]
    fn all_missing_variables_are_listed() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        match &err {
            BotError::Config(msg) => {
                assert!(msg.contains(PRACTICUM_TOKEN_VAR), "{msg}");
                assert!(msg.contains(TELEGRAM_TOKEN_VAR), "{msg}");
                assert!(msg.contains(TELEGRAM_CHAT_ID_VAR), "{msg}");
            }
            other => panic!("expected BotError::Config, got {other:?}"),
        }
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config {
            practicum_token: "practicum-secret".to_string(),
            telegram_token: "telegram-secret".to_string(),
            telegram_chat_id: "12345".to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("practicum-secret"));
        assert!(!rendered.contains("telegram-secret"));
    }
}
