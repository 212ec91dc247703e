use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::CliArgs;

/// Depth used for recursive targets when the config file does not say
/// otherwise: the target plus two levels of subdirectories.
pub const DEFAULT_DEPTH: u32 = 2;

/// Depth used when no targets are given at all: the current directory plus
/// its immediate subdirectories.
pub const DEFAULT_CWD_DEPTH: u32 = 1;

/// Suffix marking a target for recursive expansion.
const RECURSIVE_SUFFIX: &str = "/...";

/// The single legitimate abort point of a scan. Everything else recovers
/// locally.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no targets given and the current directory is not accessible")]
    NoTargets,

    #[error("cannot expand '~' in target '{0}': home directory unknown")]
    HomeDirUnavailable(String),
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    /// Raw target strings; may use `~` and the `/...` recursive suffix.
    #[serde(default)]
    pub targets: Vec<String>,
    pub depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            targets: Vec::new(),
            depth: DEFAULT_DEPTH,
        }
    }
}

/// One parsed scan target. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub path: PathBuf,
    /// Set when the raw target carried the `/...` suffix.
    pub recursive: bool,
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let (raw, recursive) = match raw.strip_suffix(RECURSIVE_SUFFIX) {
            Some(stripped) => (stripped, true),
            None => (raw, false),
        };
        let path = expand_tilde(raw, dirs::home_dir().as_deref())
            .ok_or_else(|| ConfigError::HomeDirUnavailable(raw.to_string()))?;
        Ok(Target { path, recursive })
    }
}

/// Fully resolved scan parameters: where to look and how deep.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub targets: Vec<Target>,
    pub max_depth: u32,
}

impl ScanConfig {
    /// Depth 0 means "check only the target itself"; only recursive targets
    /// are walked to the configured bound.
    pub fn depth_for(&self, target: &Target) -> u32 {
        if target.recursive { self.max_depth } else { 0 }
    }
}

/// Replace a leading `~` with the home directory. Returns `None` only when
/// the raw target needs expansion and no home directory is known.
fn expand_tilde(raw: &str, home: Option<&Path>) -> Option<PathBuf> {
    if raw == "~" {
        return home.map(Path::to_path_buf);
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        return home.map(|h| h.join(rest));
    }
    Some(PathBuf::from(raw))
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("", "", "spotcheck").context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("spotcheck.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: CliArgs) -> Result<Self> {
        let mut config = Self::load(cli_args.config)?;

        // CLI args override config file
        if !cli_args.targets.is_empty() {
            config.targets = cli_args.targets;
        }
        if let Some(depth) = cli_args.depth {
            config.depth = depth;
        }

        Ok(config)
    }

    /// Turn raw configuration into an immutable `ScanConfig`. With no targets
    /// at all, fall back to scanning the current directory and its immediate
    /// subdirectories.
    pub fn resolve(&self) -> Result<ScanConfig, ConfigError> {
        if self.targets.is_empty() {
            let cwd = std::env::current_dir().map_err(|_| ConfigError::NoTargets)?;
            return Ok(ScanConfig {
                targets: vec![Target {
                    path: cwd,
                    recursive: true,
                }],
                max_depth: DEFAULT_CWD_DEPTH,
            });
        }

        let targets = self
            .targets
            .iter()
            .map(|raw| Target::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScanConfig {
            targets,
            max_depth: self.depth,
        })
    }
}
