use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::core::locator::DEFAULT_PATTERNS;
use crate::types::{AppError, AppResult};

pub const CONFIG_FILENAME: &str = "pitscore.toml";

/// How located reports are reduced to a score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Strategy {
    /// Union of every report under the root
    #[default]
    All,
    /// Only the most recently modified report
    Latest,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    // stdout carries only the score, and stderr stays quiet unless asked
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("warn")
    }

    pub fn color(&self) -> Option<bool> {
        self.color // None has semantic meaning (auto-detect)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    // Top-level fields
    pub strategy: Option<Strategy>,
    pub patterns: Option<Vec<String>>,
    pub format: Option<OutputFormat>,

    // Nested sections
    pub log: Option<LogConfig>,
}

impl Config {
    pub fn strategy(&self) -> Strategy {
        self.strategy.unwrap_or_default()
    }

    pub fn patterns(&self) -> Vec<String> {
        match self.patterns.as_deref() {
            Some(patterns) if !patterns.is_empty() => patterns.to_vec(),
            _ => DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    /// Defaults, then the nearest config file above `cwd`, then CLI overrides
    pub fn resolve(cwd: &Path, overrides: &CliOverrides) -> AppResult<Self> {
        let mut cfg = Config::default();

        if let Some(path) = find_nearest_config_file(cwd)
            && let Some(file_cfg) = read_config_file(&path)
        {
            apply_file_config(&mut cfg, &file_cfg);
        }

        apply_cli_overrides(&mut cfg, overrides)?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub strategy: Option<String>,
    pub patterns: Vec<String>,
    pub format: Option<String>,
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
}

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut cfg = Config::default();
        if let Ok(cwd) = std::env::current_dir()
            && let Some(path) = find_nearest_config_file(&cwd)
            && let Some(file_cfg) = read_config_file(&path)
        {
            apply_file_config(&mut cfg, &file_cfg);
        }
        cfg
    })
}

pub fn init_with_overrides(overrides: &CliOverrides) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let cfg = Config::resolve(&cwd, overrides)?;
    let _ = CONFIG.set(cfg);
    Ok(())
}

fn read_config_file(path: &Path) -> Option<Config> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<Config>(&contents).ok(),
        Err(_) => None,
    }
}

fn apply_file_config(cfg: &mut Config, file: &Config) {
    if file.strategy.is_some() {
        cfg.strategy = file.strategy;
    }
    if file.patterns.as_ref().is_some_and(|p| !p.is_empty()) {
        cfg.patterns = file.patterns.clone(); // override semantics
    }
    if file.format.is_some() {
        cfg.format = file.format;
    }

    if let Some(file_log) = &file.log {
        let mut log = cfg.log.clone().unwrap_or_default();
        if file_log.level.is_some() {
            log.level = file_log.level.clone();
        }
        if file_log.color.is_some() {
            log.color = file_log.color;
        }
        cfg.log = Some(log);
    }
}

fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) -> AppResult<()> {
    if let Some(strategy) = &overrides.strategy {
        cfg.strategy = Some(Strategy::from_str(strategy.trim()).map_err(|_| {
            AppError::InvalidArgument(format!(
                "unknown strategy '{strategy}' (expected 'all' or 'latest')"
            ))
        })?);
    }
    let patterns: Vec<String> = overrides
        .patterns
        .iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if !patterns.is_empty() {
        cfg.patterns = Some(patterns);
    }
    if let Some(format) = &overrides.format {
        cfg.format = Some(OutputFormat::from_str(format.trim()).map_err(|_| {
            AppError::InvalidArgument(format!(
                "unknown format '{format}' (expected 'plain' or 'json')"
            ))
        })?);
    }

    // Log overrides
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = &overrides.log_level
        && !level.trim().is_empty()
    {
        log.level = Some(level.trim().to_string());
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            _ => {}
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }

    Ok(())
}

fn find_nearest_config_file(cwd: &Path) -> Option<PathBuf> {
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

pub fn colors_enabled() -> bool {
    match config().log().color() {
        Some(force) => force,
        None => console::colors_enabled_stderr(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn defaults_cover_both_report_layouts() {
        let cfg = Config::default();
        assert_eq!(cfg.strategy(), Strategy::All);
        assert_eq!(cfg.format(), OutputFormat::Plain);
        assert_eq!(cfg.log().level(), "warn");
        assert_eq!(
            cfg.patterns(),
            vec![
                "**/target/pit-reports/mutations.xml".to_string(),
                "**/target/pit-reports/*/mutations.xml".to_string(),
            ]
        );
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!(Strategy::from_str("LATEST").unwrap(), Strategy::Latest);
        assert_eq!(Strategy::from_str("all").unwrap(), Strategy::All);
        assert!(Strategy::from_str("newest").is_err());
        assert_eq!(Strategy::Latest.to_string(), "latest");
    }

    #[test]
    fn nearest_config_file_is_found_from_subdirectory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("module").join("src");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "strategy = \"latest\"\nformat = \"json\"\n\n[log]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let cfg = Config::resolve(&nested, &CliOverrides::default()).unwrap();
        assert_eq!(cfg.strategy(), Strategy::Latest);
        assert_eq!(cfg.format(), OutputFormat::Json);
        assert_eq!(cfg.log().level(), "debug");
    }

    #[test]
    fn malformed_config_file_is_ignored() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "strategy = [").unwrap();

        let cfg = Config::resolve(dir.path(), &CliOverrides::default()).unwrap();
        assert_eq!(cfg.strategy(), Strategy::All);
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "strategy = \"latest\"\npatterns = [\"**/a.xml\"]\n",
        )
        .unwrap();

        let overrides = CliOverrides {
            strategy: Some("all".to_string()),
            patterns: vec!["**/b.xml".to_string(), " ".to_string()],
            log_color: Some("off".to_string()),
            ..Default::default()
        };
        let cfg = Config::resolve(dir.path(), &overrides).unwrap();
        assert_eq!(cfg.strategy(), Strategy::All);
        assert_eq!(cfg.patterns(), vec!["**/b.xml".to_string()]);
        assert_eq!(cfg.log().color(), Some(false));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let dir = tempdir().unwrap();
        let overrides = CliOverrides {
            strategy: Some("median".to_string()),
            ..Default::default()
        };
        let err = Config::resolve(dir.path(), &overrides).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }
}
