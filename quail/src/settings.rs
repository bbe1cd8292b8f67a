use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use quail_auth::{OAuthSettings, TokenPair};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::frontmatter::FieldMapping;

pub const APP_DIR: &str = "quail-cli";
const CONFIG_FILE: &str = "config.yaml";
const ENV_PREFIX: &str = "QUAIL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("could not write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode settings: {0}")]
    Encode(#[from] serde_yaml::Error),
    #[error("could not find home directory")]
    NoHomeDir,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostSettings {
    /// Canonical front-matter field -> key used in local documents
    #[serde(default)]
    pub frontmatter_mapping: FieldMapping,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: TokenPair,

    #[serde(default)]
    pub post: PostSettings,

    #[serde(default, skip_serializing_if = "OAuthSettings::is_default")]
    pub oauth: OAuthSettings,
}

/// `$HOME/.config/quail-cli`
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join(APP_DIR))
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dir()?.join(CONFIG_FILE))
}

impl Settings {
    /// Read the YAML file at `path` (missing is fine), then `QUAIL_*` overrides,
    /// e.g. `QUAIL_APP__ACCESS_TOKEN`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Write the settings over the existing file, keeping any keys this
    /// program does not know about.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut document = read_existing(path)?;
        if let Value::Mapping(fields) = serde_yaml::to_value(self)? {
            document.extend(fields);
        }
        let yaml = serde_yaml::to_string(&document)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // Owner read/write only, the file holds tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;

        // `mode` only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(yaml.as_bytes())?;

        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    pub fn frontmatter_mapping(&self) -> &FieldMapping {
        &self.post.frontmatter_mapping
    }
}

fn read_existing(path: &Path) -> Result<Mapping, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Mapping::new()),
        Err(e) => return Err(e.into()),
    };

    match serde_yaml::from_str::<Value>(&text)? {
        Value::Mapping(fields) => Ok(fields),
        _ => Ok(Mapping::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("config.yaml")).unwrap();

        assert_eq!(settings.app, TokenPair::default());
        assert!(settings.frontmatter_mapping().is_empty());
        assert_eq!(settings.oauth, OAuthSettings::default());
    }

    #[test]
    fn reads_tokens_and_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "app:\n  access_token: at\n  refresh_token: rt\n  token_type: Bearer\n  expiry: 2024-01-02T10:00:00Z\npost:\n  frontmatter_mapping:\n    datetime: pubDate\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.app.access_token, "at");
        assert_eq!(settings.app.refresh_token, "rt");
        assert_eq!(settings.app.token_type, "Bearer");
        assert_eq!(
            settings.app.expiry,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap())
        );
        assert_eq!(
            settings.frontmatter_mapping().get("datetime").map(String::as_str),
            Some("pubDate")
        );
    }

    #[test]
    fn save_then_load_keeps_tokens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut settings = Settings::default();
        settings.app = TokenPair {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            token_type: "Bearer".to_string(),
            expiry: Some(Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()),
        };
        settings
            .post
            .frontmatter_mapping
            .insert("cover_image_url".to_string(), "image".to_string());

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded.app, settings.app);
        assert_eq!(loaded.post, settings.post);
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        Settings::default().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn default_oauth_section_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        Settings::default().save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("oauth"));
        assert!(written.contains("app:"));
    }

    #[test]
    fn save_keeps_user_oauth_and_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "oauth:\n  callback_port: 1234\n  login_timeout_secs: 30\neditor: vim\n",
        )
        .unwrap();

        let mut settings = Settings::load(&path).unwrap();
        settings.app.access_token = "at".to_string();
        settings.save(&path).unwrap();

        let reloaded = Settings::load(&path).unwrap();
        assert_eq!(reloaded.oauth.callback_port, 1234);
        assert_eq!(reloaded.oauth.login_timeout_secs, Some(30));
        assert_eq!(reloaded.app.access_token, "at");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("editor: vim"));
    }

    #[cfg(unix)]
    #[test]
    fn save_tightens_existing_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "app: {}\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        Settings::default().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "app: [unclosed\n").unwrap();

        assert!(matches!(Settings::load(&path), Err(ConfigError::Load(_))));
    }
}
