use std::{env, fmt, fs, io, path};

use sentinel::RequestLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config {}: {source}", .path.display())]
    ReadFailed { path: path::PathBuf, source: io::Error },
    #[error("Failed to write config {}: {source}", .path.display())]
    WriteFailed { path: path::PathBuf, source: io::Error },
    #[error("Failed to parse config: {0}")]
    ParseFailed(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("No config path available: neither XDG_CONFIG_HOME nor HOME is set")]
    ConfigPathUnavailable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub monitor: Monitor,
    pub reports: Reports,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

/// Limits applied to every monitor request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monitor {
    pub max_endpoints: usize,
    pub max_timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reports {
    pub dir: path::PathBuf,
    pub max_upload_bytes: usize,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/sentinel/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("sentinel/config.toml"))
}

impl Default for Server {
    fn default() -> Self {
        Self { bind: "0.0.0.0".into(), port: 8503 }
    }
}

impl Default for Monitor {
    fn default() -> Self {
        let limits = RequestLimits::default();
        Self { max_endpoints: limits.max_endpoints, max_timeout: limits.max_timeout }
    }
}

impl Default for Reports {
    fn default() -> Self {
        Self { dir: "reports".into(), max_upload_bytes: 10 * 1024 * 1024 }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Configuration State:")?;
        write_title_1(f, "Server")?;
        write_1(f, "Bind Address", &self.server.bind)?;
        write_1(f, "Port", &self.server.port)?;
        write_title_1(f, "Monitor")?;
        write_1(f, "Max Endpoints", &self.monitor.max_endpoints)?;
        write_1(f, "Max Timeout (s)", &self.monitor.max_timeout)?;
        write_title_1(f, "Reports")?;
        write_1(f, "Directory", &self.reports.dir.display())?;
        write_1(f, "Max Upload (bytes)", &self.reports.max_upload_bytes)?;

        Ok(())
    }
}

impl Config {
    /// Resolve where the config lives: the given path (forced to `.toml`) or
    /// the per-user default.
    pub fn resolve_path(optional_path: Option<impl AsRef<path::Path>>) -> Result<path::PathBuf, Error> {
        match optional_path {
            Some(path) => Ok(normalize_toml_path(path.as_ref())),
            None => default_config_path(),
        }
    }

    /// Generate Config structure from file
    ///
    /// Falls back to the defaults when no file exists at the resolved path.
    ///
    /// ```ignore
    /// let cfg = config::Config::from_config(None::<&path::Path>)?;
    /// println!("{}", cfg);
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path = match Self::resolve_path(optional_path) {
            Ok(path) => path,
            Err(Error::ConfigPathUnavailable) => return Ok(Self::default()),
            Err(error) => return Err(error),
        };

        if config_path.exists() {
            let raw_string =
                fs::read_to_string(&config_path)
                    .map_err(|source| Error::ReadFailed { path: config_path.clone(), source })?;
            Self::from_toml(&raw_string)
        } else {
            info!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, Error> {
        Ok(toml::from_str(raw)?)
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| Error::WriteFailed { path: parent.to_path_buf(), source })?;
        }

        fs::write(path, config_str).map_err(|source| Error::WriteFailed { path: path.to_path_buf(), source })
    }

    pub fn request_limits(&self) -> RequestLimits {
        RequestLimits { max_endpoints: self.monitor.max_endpoints, max_timeout: self.monitor.max_timeout }
    }
}
