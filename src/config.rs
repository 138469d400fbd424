use std::{env, num::ParseIntError};

use poise::serenity_prelude::Permissions;

const TOKEN_VAR: &str = "DISCORD_TOKEN";
const PERMISSIONS_VAR: &str = "INVITE_PERMISSIONS";

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    /// Permissions requested by the invite link, administrator unless overridden.
    pub invite_permissions: Permissions,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing(TOKEN_VAR))?;

        let invite_permissions = match lookup(PERMISSIONS_VAR) {
            Some(raw) => Permissions::from_bits_truncate(raw.trim().parse().map_err(|source| {
                ConfigError::Invalid {
                    var: PERMISSIONS_VAR,
                    source,
                }
            })?),
            None => Permissions::ADMINISTRATOR,
        };

        Ok(Config {
            token,
            invite_permissions,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing `{0}` environment variable")]
    Missing(&'static str),
    #[error("`{var}` is not a valid permission bitfield")]
    Invalid {
        var: &'static str,
        #[source]
        source: ParseIntError,
    },
}
