//! Configuration management for LW.
//!
//! Parses `lw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `storage.data_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override page data directory.
    pub data_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lw.toml";

/// Route verbs the server knows how to handle.
pub const KNOWN_VERBS: [&str; 4] = ["view", "edit", "save", "lotto"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Page storage configuration (paths are relative strings from TOML).
    storage: StorageConfigRaw,
    /// Static asset configuration (paths are relative strings from TOML).
    assets: AssetsConfigRaw,
    /// Lottery ticket configuration.
    pub lotto: LottoConfig,
    /// Routing configuration.
    pub routes: RoutesConfig,

    /// Resolved storage configuration (set after loading).
    #[serde(skip)]
    pub storage_resolved: StorageConfig,
    /// Resolved asset configuration (set after loading).
    #[serde(skip)]
    pub assets_resolved: AssetsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw storage configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StorageConfigRaw {
    data_dir: Option<String>,
}

/// Resolved storage configuration with absolute paths.
#[derive(Debug, Default)]
pub struct StorageConfig {
    /// Directory holding one `<title>.txt` file per page.
    pub data_dir: PathBuf,
}

/// Raw asset configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AssetsConfigRaw {
    static_dir: Option<String>,
}

/// Resolved asset configuration with absolute paths.
#[derive(Debug, Default)]
pub struct AssetsConfig {
    /// Directory served under `/static/`.
    pub static_dir: PathBuf,
}

/// Lottery ticket configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LottoConfig {
    /// Main numbers per ticket.
    pub main_count: usize,
    /// Largest main number.
    pub main_max: u32,
    /// Bonus numbers per ticket.
    pub bonus_count: usize,
    /// Largest bonus number.
    pub bonus_max: u32,
    /// Upper bound on tickets per request.
    pub max_tickets: usize,
}

impl Default for LottoConfig {
    fn default() -> Self {
        Self {
            main_count: 5,
            main_max: 50,
            bonus_count: 2,
            bonus_max: 10,
            max_tickets: 100,
        }
    }
}

/// Routing configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoutesConfig {
    /// Verbs accepted in `/<verb>/<title>` paths.
    pub verbs: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            verbs: KNOWN_VERBS.iter().map(|&v| v.to_owned()).collect(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`storage.data_dir`").
        field: String,
        /// Error message (e.g., "${`LW_DATA`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a draw of `count` distinct numbers from `1..=max` to be possible.
fn require_drawable(count: usize, max: u32, field: &str) -> Result<(), ConfigError> {
    if max == 0 {
        return Err(ConfigError::Validation(format!(
            "lotto.{field}_max must be greater than 0"
        )));
    }
    if !u32::try_from(count).is_ok_and(|c| c <= max) {
        return Err(ConfigError::Validation(format!(
            "lotto.{field}_count ({count}) cannot exceed lotto.{field}_max ({max})"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration, then apply CLI settings on top.
    ///
    /// An explicit `config_path` must exist. Without one, the nearest `lw.toml`
    /// in the current directory or its ancestors is used, and if there is none
    /// the defaults apply with paths relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, the file can't be
    /// parsed, or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = match Self::locate(config_path)? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default_with_base(&std::env::current_dir().unwrap_or_default()),
        };

        if let Some(settings) = cli_settings {
            config.override_with(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Overwrite loaded values with the CLI settings that are present.
    fn override_with(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        self.server.port = settings.port.unwrap_or(self.server.port);
        if let Some(data_dir) = &settings.data_dir {
            self.storage_resolved.data_dir.clone_from(data_dir);
        }
    }

    /// Find the config file to read, if any, searching from the current directory.
    fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::locate_from(&cwd, explicit)
    }

    /// Find the config file to read, searching `start` and its ancestors.
    ///
    /// An explicit path must exist. Otherwise the nearest `lw.toml` wins.
    fn locate_from(start: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        match explicit {
            Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
            Some(path) => Err(ConfigError::NotFound(path.to_path_buf())),
            None => Ok(start
                .ancestors()
                .map(|dir| dir.join(CONFIG_FILENAME))
                .find(|candidate| candidate.is_file())),
        }
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfigRaw::default(),
            assets: AssetsConfigRaw::default(),
            lotto: LottoConfig::default(),
            routes: RoutesConfig::default(),
            storage_resolved: StorageConfig {
                data_dir: base.join("data"),
            },
            assets_resolved: AssetsConfig {
                static_dir: base.join("static"),
            },
            config_path: None,
        }
    }

    /// Parse, expand, resolve and validate a config file.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_lotto()?;
        self.validate_routes()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate lottery field shapes.
    fn validate_lotto(&self) -> Result<(), ConfigError> {
        require_drawable(self.lotto.main_count, self.lotto.main_max, "main")?;
        require_drawable(self.lotto.bonus_count, self.lotto.bonus_max, "bonus")?;

        if self.lotto.max_tickets == 0 {
            return Err(ConfigError::Validation(
                "lotto.max_tickets must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate that every configured verb is known.
    fn validate_routes(&self) -> Result<(), ConfigError> {
        if let Some(unknown) = self
            .routes
            .verbs
            .iter()
            .find(|v| !KNOWN_VERBS.contains(&v.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "routes.verbs contains unknown verb \"{unknown}\" (expected one of: {})",
                KNOWN_VERBS.join(", ")
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref data_dir) = self.storage.data_dir {
            self.storage.data_dir = Some(expand::expand_env(data_dir, "storage.data_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.storage_resolved = StorageConfig {
            data_dir: resolve(self.storage.data_dir.as_deref(), "data"),
        };
        self.assets_resolved = AssetsConfig {
            static_dir: resolve(self.assets.static_dir.as_deref(), "static"),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage_resolved.data_dir, PathBuf::from("/test/data"));
        assert_eq!(
            config.assets_resolved.static_dir,
            PathBuf::from("/test/static")
        );
        assert_eq!(config.lotto, LottoConfig::default());
        assert_eq!(config.routes.verbs, vec!["view", "edit", "save", "lotto"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.lotto.main_count, 5);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_parse_lotto_config() {
        let toml = r"
[lotto]
main_count = 6
main_max = 49
bonus_count = 1
bonus_max = 10
max_tickets = 12
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.lotto,
            LottoConfig {
                main_count: 6,
                main_max: 49,
                bonus_count: 1,
                bonus_max: 10,
                max_tickets: 12,
            }
        );
    }

    #[test]
    fn test_parse_partial_lotto_config_keeps_defaults() {
        let toml = r"
[lotto]
max_tickets = 3
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.lotto.max_tickets, 3);
        assert_eq!(config.lotto.main_max, 50);
        assert_eq!(config.lotto.bonus_count, 2);
    }

    #[test]
    fn test_parse_routes_config() {
        let toml = r#"
[routes]
verbs = ["view", "lotto"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.routes.verbs, vec!["view", "lotto"]);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[storage]
data_dir = "pages"

[assets]
static_dir = "public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.storage_resolved.data_dir,
            PathBuf::from("/project/pages")
        );
        assert_eq!(
            config.assets_resolved.static_dir,
            PathBuf::from("/project/public")
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.storage_resolved.data_dir,
            PathBuf::from("/project/data")
        );
        assert_eq!(
            config.assets_resolved.static_dir,
            PathBuf::from("/project/static")
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lw.toml");
        std::fs::write(&path, "[server]\nport = 9100\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.storage_resolved.data_dir, temp_dir.path().join("data"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/lw.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_locate_finds_config_in_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("notes/drafts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join("lw.toml"), "").unwrap();

        let found = Config::locate_from(&nested, None).unwrap();

        assert_eq!(found, Some(temp_dir.path().join("lw.toml")));
    }

    #[test]
    fn test_locate_prefers_nearest_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("notes/drafts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join("lw.toml"), "").unwrap();
        std::fs::write(temp_dir.path().join("notes/lw.toml"), "").unwrap();

        let found = Config::locate_from(&nested, None).unwrap();

        assert_eq!(found, Some(temp_dir.path().join("notes/lw.toml")));
    }

    #[test]
    fn test_locate_without_config() {
        let temp_dir = tempfile::tempdir().unwrap();

        let found = Config::locate_from(temp_dir.path(), None).unwrap();

        assert_eq!(found, None);
    }

    #[test]
    fn test_locate_explicit_path_skips_search() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("lw.toml"), "").unwrap();
        let explicit = temp_dir.path().join("other.toml");
        std::fs::write(&explicit, "").unwrap();

        let found = Config::locate_from(temp_dir.path(), Some(&explicit)).unwrap();

        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lw.toml");
        std::fs::write(&path, "[server\n").unwrap();

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_override_with_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            ..Default::default()
        };

        config.override_with(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080); // Unchanged
    }

    #[test]
    fn test_override_with_data_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            data_dir: Some(PathBuf::from("/srv/pages")),
            ..Default::default()
        };

        config.override_with(&overrides);

        assert_eq!(config.storage_resolved.data_dir, PathBuf::from("/srv/pages"));
        assert_eq!(
            config.assets_resolved.static_dir,
            PathBuf::from("/test/static")
        ); // Unchanged
    }

    #[test]
    fn test_override_with_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.override_with(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage_resolved.data_dir, PathBuf::from("/test/data"));
    }

    #[test]
    fn test_expand_env_vars_data_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LW_CONFIG_TEST_DATA", "/var/lib/lw");
        }

        let toml = r#"
[storage]
data_dir = "${LW_CONFIG_TEST_DATA}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.storage_resolved.data_dir, PathBuf::from("/var/lib/lw"));

        unsafe {
            std::env::remove_var("LW_CONFIG_TEST_DATA");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LW_CONFIG_MISSING_HOST");
        }

        let toml = r#"
[server]
host = "${LW_CONFIG_MISSING_HOST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("server.host"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();

        assert_validation_error(&config, &["server.host"]);
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;

        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_main_count_exceeds_max() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.lotto.main_count = 51;

        assert_validation_error(&config, &["lotto.main_count", "51", "50"]);
    }

    #[test]
    fn test_validate_bonus_max_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.lotto.bonus_max = 0;
        config.lotto.bonus_count = 0;

        assert_validation_error(&config, &["lotto.bonus_max"]);
    }

    #[test]
    fn test_validate_zero_max_tickets() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.lotto.max_tickets = 0;

        assert_validation_error(&config, &["lotto.max_tickets"]);
    }

    #[test]
    fn test_validate_unknown_verb() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.routes.verbs.push("delete".to_owned());

        assert_validation_error(&config, &["routes.verbs", "delete"]);
    }

    #[test]
    fn test_validate_empty_verbs_is_valid() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.routes.verbs.clear();

        assert!(config.validate().is_ok());
    }
}
