//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a config value.
///
/// - `${VAR}` expands to the value of VAR and errors if it is unset
/// - `${VAR:-default}` falls back to `default` when VAR is unset
///
/// Bare `$VAR` is left alone, so values without `${` are returned unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of an environment variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LW_TEST_DATA_DIR", "/srv/pages");
        }
        let result = expand_env("${LW_TEST_DATA_DIR}", "storage.data_dir").unwrap();
        assert_eq!(result, "/srv/pages");
        unsafe {
            std::env::remove_var("LW_TEST_DATA_DIR");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LW_UNSET_HOST");
        }
        let result = expand_env("${LW_UNSET_HOST:-0.0.0.0}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LW_MISSING_VAR");
        }
        let err = expand_env("${LW_MISSING_VAR}", "server.host").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("LW_MISSING_VAR"));
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LW_TEST_HOME", "/home/wiki");
        }
        let result = expand_env("${LW_TEST_HOME}/data", "storage.data_dir").unwrap();
        assert_eq!(result, "/home/wiki/data");
        unsafe {
            std::env::remove_var("LW_TEST_HOME");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("$HOME/data", "storage.data_dir").unwrap(), "$HOME/data");
    }
}
