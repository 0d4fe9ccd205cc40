use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// Errors raised while reading configuration from the process environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvVarError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    Missing(String),

    /// The variable is set but its value could not be parsed.
    #[error("Invalid value for environment variable {name}: {message}")]
    Invalid { name: String, message: String },
}

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, EnvVarError> {
    std::env::var(name).map_err(|_| EnvVarError::Missing(name.to_string()))
}

/// Reads an optional override from the environment.
///
/// Unset or blank variables yield `Ok(None)`. A value that fails to parse as
/// `T` is an error rather than being silently ignored, so a typo in a
/// deployment surfaces at startup.
pub fn env_override<T>(name: &str) -> Result<Option<T>, EnvVarError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = match get_env_var(name) {
        Ok(raw) => raw,
        Err(EnvVarError::Missing(_)) => return Ok(None),
        Err(e) => return Err(e),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|e| EnvVarError::Invalid {
            name: name.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VAR: &str = "SHARED_UTILS_TEST_VAR";

    // SAFETY (all tests): `#[serial]` keeps environment mutation single-threaded.

    #[test]
    #[serial]
    fn missing_var_is_reported_by_name() {
        unsafe { std::env::remove_var(VAR) };
        assert_eq!(get_env_var(VAR), Err(EnvVarError::Missing(VAR.to_string())));
    }

    #[test]
    #[serial]
    fn override_is_none_when_unset_or_blank() {
        unsafe { std::env::remove_var(VAR) };
        assert_eq!(env_override::<u64>(VAR), Ok(None));

        unsafe { std::env::set_var(VAR, "   ") };
        assert_eq!(env_override::<u64>(VAR), Ok(None));
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn override_parses_trimmed_value() {
        unsafe { std::env::set_var(VAR, " 42 ") };
        assert_eq!(env_override::<u64>(VAR), Ok(Some(42)));
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn override_rejects_garbage() {
        unsafe { std::env::set_var(VAR, "five") };
        let err = env_override::<u64>(VAR).unwrap_err();
        assert!(matches!(err, EnvVarError::Invalid { ref name, .. } if name == VAR));
        unsafe { std::env::remove_var(VAR) };
    }
}
