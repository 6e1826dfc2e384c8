use crate::error::config::ConfigError;
use crate::model::clock::ClockProfile;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.toml";
pub const API_URL_ENV: &str = "CV_UPLOADER_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// User settings, read from `settings.toml` in the settings directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub base_url: String,
    pub animation: ClockProfile,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            animation: ClockProfile::default(),
            request_timeout_secs: 60,
        }
    }
}

impl Settings {
    /// Loads settings from `dir`, falling back to defaults when the file is
    /// absent, then applies the environment override.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let settings = match fs::read_to_string(dir.join(SETTINGS_FILE)) {
            Ok(contents) => Self::parse(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };
        settings.with_base_url(std::env::var(API_URL_ENV).ok())
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validated()
    }

    fn with_base_url(mut self, base_url: Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.base_url));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn parses_all_fields() {
        let settings = Settings::parse(
            r#"
            base_url = "https://hr.example.com/"
            animation = "linear"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(settings.base_url, "https://hr.example.com");
        assert_eq!(settings.animation, ClockProfile::Linear);
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_url_without_scheme() {
        match Settings::parse(r#"base_url = "localhost:8000""#) {
            Err(ConfigError::InvalidUrl(url)) => assert_eq!(url, "localhost:8000"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_animation() {
        assert!(matches!(
            Settings::parse(r#"animation = "bouncy""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn override_replaces_file_value() {
        let settings = Settings::default()
            .with_base_url(Some("http://10.0.0.2:9000/".to_string()))
            .unwrap();
        assert_eq!(settings.base_url, "http://10.0.0.2:9000");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.animation, ClockProfile::Humanized);
        assert_eq!(settings.request_timeout_secs, 60);
    }

    #[test]
    fn reads_file_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "animation = \"linear\"\n").unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.animation, ClockProfile::Linear);
    }
}
