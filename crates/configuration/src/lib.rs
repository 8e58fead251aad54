use crate::error::ConfigError;
use crate::settings::DEFAULT_BASE_URL;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ApiConfig, Config, LogLevel, LoggingConfig, SessionConfig};

/// Environment variables override file settings, e.g. `STOCKPILOT_API__BASE_URL`.
pub const ENV_PREFIX: &str = "STOCKPILOT";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then `stockpilot.toml` in the
/// working directory (or the file at `path`, which must then exist), then
/// `STOCKPILOT_*` environment variables. The merged result is validated
/// before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file_source = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("stockpilot").required(false),
    };

    let builder = config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .add_source(file_source)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = url::Url::parse(&config.api.base_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "api.base_url '{}' is not a valid URL: {}",
            config.api.base_url, e
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "api.base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.api.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "api.timeout_secs must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LogLevel;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_all_sections_from_file() {
        let file = write_config(
            r#"
            [api]
            base_url = "https://broker.example.com"
            timeout_secs = 30

            [session]
            token_file = "/tmp/stockpilot-session.toml"

            [logging]
            level = "debug"
            "#,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://broker.example.com");
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(
            config.session.token_file.as_deref(),
            Some(Path::new("/tmp/stockpilot-session.toml"))
        );
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let file = write_config("[logging]\nlevel = \"info\"\n");

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.timeout().is_none());
        assert!(config.session.token_file.is_none());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let file = write_config("[api]\nbase_url = \"ftp://broker.example.com\"\n");

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let file = write_config("[api]\nbase_url = \"http://localhost:8000\"\ntimeout_secs = 0\n");

        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn loaded_settings_are_exposed_at_crate_root() {
        let file = write_config("[api]\nbase_url = \"http://localhost:9000\"\n");

        let config: crate::Config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000");
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config(Some(Path::new("/nonexistent/stockpilot.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
