use std::fmt;

use crate::config::Config;

/// Environment variable naming the current competitor
pub const ENV_USER_VAR: &str = "SETUP_SCOUT_USER";

#[derive(Debug, PartialEq, Eq)]
pub enum IdentityError {
    NotConfigured,
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::NotConfigured => write!(
                f,
                "No competitor selected. Pass --user, set {}, or add `user:` to the config file",
                ENV_USER_VAR
            ),
        }
    }
}

impl std::error::Error for IdentityError {}

/// Read the competitor from the SETUP_SCOUT_USER environment variable.
/// Returns None if unset or blank.
pub fn get_user_from_env() -> Option<String> {
    std::env::var(ENV_USER_VAR).ok().and_then(non_blank)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Work out whose runs to read and write.
///
/// Precedence: `--user` flag, then the environment, then `user:` in the
/// config file. Blank values are skipped.
pub fn resolve_user(flag: Option<String>, config: &Config) -> Result<String, IdentityError> {
    resolve_from(flag, get_user_from_env(), config)
}

fn resolve_from(
    flag: Option<String>,
    env: Option<String>,
    config: &Config,
) -> Result<String, IdentityError> {
    flag.and_then(non_blank)
        .or_else(|| env.and_then(non_blank))
        .or_else(|| config.user.clone().and_then(non_blank))
        .ok_or(IdentityError::NotConfigured)
}
