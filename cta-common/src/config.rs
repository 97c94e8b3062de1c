//! Configuration loading and root folder resolution

use crate::audio::AudioSettings;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "CTA_ROOT_FOLDER";

/// Default HTTP port of the catalog service
pub const DEFAULT_PORT: u16 = 5730;

/// Dataset file looked up in the root folder when none is configured
pub const DATASET_FILENAME: &str = "cassette_library.db";

/// Bootstrap configuration read from TOML
///
/// ```toml
/// root_folder = "/srv/cta"
/// dataset = "https://archive.example/cassette_library.db"
/// port = 5730
///
/// [audio]
/// base_location = "/audio"
/// extension = "mp3"
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    /// Path or http(s) URL of the dataset
    pub dataset: Option<String>,
    pub port: u16,
    pub audio: AudioSettings,
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            dataset: None,
            port: DEFAULT_PORT,
            audio: AudioSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `path`, or the platform default location when `None`
    ///
    /// A missing file yields the defaults. An unreadable or malformed file
    /// is an error. The returned [`ConfigOrigin`] is logged by the caller
    /// once a subscriber is installed.
    pub fn load_or_default(path: Option<&Path>) -> Result<(Self, ConfigOrigin)> {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => return Ok((Self::default(), ConfigOrigin::NoLocation)),
        };

        if !path.exists() {
            return Ok((Self::default(), ConfigOrigin::Missing(path)));
        }

        let config = Self::load(&path)?;
        Ok((config, ConfigOrigin::File(path)))
    }
}

/// Where the bootstrap configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    /// Defaults used because the file does not exist
    Missing(PathBuf),
    /// No config location could be determined for this platform
    NoLocation,
}

impl ConfigOrigin {
    pub fn is_default(&self) -> bool {
        !matches!(self, ConfigOrigin::File(_))
    }

    pub fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("Loaded config from {}", path.display()),
            ConfigOrigin::Missing(path) => {
                warn!("Config file {} not found, using defaults", path.display())
            }
            ConfigOrigin::NoLocation => warn!("No config location available, using defaults"),
        }
    }
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. `root_folder` from the TOML config
/// 4. OS-dependent default
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// Default dataset location inside the root folder
pub fn default_dataset(root_folder: &Path) -> PathBuf {
    root_folder.join(DATASET_FILENAME)
}

/// Platform config file: `~/.config/cta/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cta").join("config.toml"))
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/cta
        dirs::data_local_dir()
            .map(|d| d.join("cta"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/cta"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("cta"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/cta"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\cta
        dirs::data_local_dir()
            .map(|d| d.join("cta"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\cta"))
    } else {
        PathBuf::from("./cta_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const TEST_ENV: &str = "CTA_TEST_ROOT_FOLDER";

    #[test]
    fn test_parse_full() {
        let config = TomlConfig::parse(
            r#"
            root_folder = "/srv/cta"
            dataset = "https://archive.example/cassette_library.db"
            port = 8080

            [audio]
            base_location = "https://cdn.example/tapes/"
            extension = "ogg"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.root_folder, Some(PathBuf::from("/srv/cta")));
        assert_eq!(config.port, 8080);
        assert_eq!(config.audio.extension, "ogg");
        assert_eq!(config.audio.url_for("Tape013A"), "https://cdn.example/tapes/Tape013A.ogg");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config = TomlConfig::parse("[audio]\nextension = \"flac\"\n").unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.audio.base_location, "/audio");
        assert_eq!(config.audio.extension, "flac");
        assert_eq!(config.logging.level, "info");
        assert!(config.dataset.is_none());
    }

    #[test]
    fn test_malformed_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let result = TomlConfig::load_or_default(Some(file.path()));
        assert!(matches!(result, Err(Error::Config(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080").unwrap();
        let (config, origin) = TomlConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(origin, ConfigOrigin::File(file.path().to_path_buf()));
        assert!(!origin.is_default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let (config, origin) = TomlConfig::load_or_default(Some(&absent)).unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(origin, ConfigOrigin::Missing(absent));
        assert!(origin.is_default());
    }

    #[test]
    #[serial]
    fn test_root_folder_priority() {
        let config = TomlConfig {
            root_folder: Some(PathBuf::from("/from/toml")),
            ..TomlConfig::default()
        };

        std::env::set_var(TEST_ENV, "/from/env");
        assert_eq!(
            resolve_root_folder(Some(Path::new("/from/cli")), TEST_ENV, &config),
            PathBuf::from("/from/cli")
        );
        assert_eq!(
            resolve_root_folder(None, TEST_ENV, &config),
            PathBuf::from("/from/env")
        );

        std::env::remove_var(TEST_ENV);
        assert_eq!(
            resolve_root_folder(None, TEST_ENV, &config),
            PathBuf::from("/from/toml")
        );
        assert_eq!(
            resolve_root_folder(None, TEST_ENV, &TomlConfig::default()),
            default_root_folder()
        );
    }

    #[test]
    fn test_default_dataset() {
        assert_eq!(
            default_dataset(Path::new("/srv/cta")),
            PathBuf::from("/srv/cta/cassette_library.db")
        );
    }
}
