use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Weekday};
use crate::schedule::{DayResolver, SystemClock};

pub mod themes;

const APP_DOMAIN: &str = "io";
const APP_ORG: &str = "StaffBoard";
const APP_NAME: &str = "staffboard";

pub struct ConfigLoader {
    paths: ConfigPaths,
}

impl ConfigLoader {
    pub fn discover() -> Result<Self> {
        let paths = ConfigPaths::discover()?;
        Ok(Self { paths })
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        self.paths.ensure_directories()?;
        if !self.paths.config_file.exists() {
            let mut default_cfg = AppConfig::default();
            default_cfg.post_load(&self.paths);
            self.write_default_config(&default_cfg)?;
            return Ok(default_cfg);
        }

        self.load()
    }

    pub fn load(&self) -> Result<AppConfig> {
        let raw = fs::read_to_string(&self.paths.config_file)
            .with_context(|| format!("reading config {}", self.paths.config_file.display()))?;
        let mut cfg: AppConfig = toml::from_str(&raw).context("parsing config toml")?;
        cfg.post_load(&self.paths);
        Ok(cfg)
    }

    fn write_default_config(&self, cfg: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(cfg).context("serializing default config")?;
        if let Some(parent) = self.paths.config_file.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file = fs::File::create(&self.paths.config_file)
            .with_context(|| format!("creating config {}", self.paths.config_file.display()))?;
        file.write_all(toml.as_bytes())
            .context("writing default config")?;
        tracing::info!(path = %self.paths.config_file.display(), "wrote default config");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    /// Catalog file forced through `STAFFBOARD_CATALOG`; wins over the config.
    pub catalog_override: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl ConfigPaths {
    pub fn discover() -> Result<Self> {
        let override_config = env::var("STAFFBOARD_CONFIG").ok().map(PathBuf::from);
        let catalog_override = env::var("STAFFBOARD_CATALOG").ok().map(PathBuf::from);

        let project_dirs = ProjectDirs::from(APP_DOMAIN, APP_ORG, APP_NAME)
            .context("resolving XDG project directories")?;

        let config_dir = override_config
            .clone()
            .map(|p| {
                if p.is_dir() {
                    p
                } else {
                    p.parent().map(Path::to_path_buf).unwrap_or(p)
                }
            })
            .unwrap_or_else(|| project_dirs.config_dir().to_path_buf());

        let config_file = override_config
            .filter(|p| p.is_file() || p.extension().is_some())
            .unwrap_or_else(|| config_dir.join("config.toml"));

        let state_dir = project_dirs
            .state_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_dirs.data_dir().join("state"));
        let log_dir = state_dir.join("logs");

        Ok(Self {
            config_dir,
            config_file,
            catalog_override,
            log_dir,
            state_dir,
        })
    }

    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.config_dir, &self.log_dir, &self.state_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating application directory {}", dir.display()))?;
        }
        Ok(())
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("staffboard.log")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeName,
    pub catalog: CatalogOptions,
    pub display: DisplayOptions,
    pub schedule: ScheduleOptions,
}

impl AppConfig {
    fn post_load(&mut self, paths: &ConfigPaths) {
        if let Some(path) = &paths.catalog_override {
            self.catalog.path = Some(path.clone());
        }
        if let Some(path) = self.catalog.path.as_mut() {
            if path.is_relative() {
                *path = paths.config_dir.join(&*path);
            }
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.path {
            Some(path) => Catalog::load(path),
            None => {
                let catalog = Catalog::builtin()?;
                tracing::debug!(records = catalog.len(), "using built-in staff catalog");
                Ok(catalog)
            }
        }
    }

    pub fn day_resolver(&self) -> DayResolver {
        match self.schedule.day_override {
            Some(day) => {
                tracing::info!(%day, "weekday pinned by configuration");
                DayResolver::fixed(day)
            }
            None => DayResolver::resolve(&SystemClock),
        }
    }

    /// Display name with the configured honorific appended.
    pub fn display_name(&self, name: &str) -> String {
        format!("{name}{}", self.display.name_suffix)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Relative paths resolve against the config directory. Unset means the
    /// built-in catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_phonetic: bool,
    pub show_image_ref: bool,
    pub name_suffix: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_phonetic: true,
            show_image_ref: true,
            name_suffix: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_override: Option<Weekday>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    HighContrast,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_paths(root: &Path) -> ConfigPaths {
        ConfigPaths {
            config_dir: root.join("config"),
            config_file: root.join("config/config.toml"),
            catalog_override: None,
            log_dir: root.join("state/logs"),
            state_dir: root.join("state"),
        }
    }

    #[test]
    fn first_run_writes_default_config() -> Result<()> {
        let temp = TempDir::new()?;
        let loader = ConfigLoader::with_paths(temp_paths(temp.path()));
        let cfg = loader.load_or_init()?;
        assert_eq!(cfg.theme, ThemeName::Dark);
        assert!(cfg.catalog.path.is_none());
        assert!(loader.paths().config_file.exists());
        assert!(loader.paths().log_dir.is_dir());

        let reloaded = loader.load()?;
        assert!(reloaded.display.show_phonetic);
        assert_eq!(reloaded.display.name_suffix, "");
        Ok(())
    }

    #[test]
    fn partial_config_falls_back_to_defaults() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = temp_paths(temp.path());
        fs::create_dir_all(&paths.config_dir)?;
        fs::write(
            &paths.config_file,
            "theme = \"light\"\n[catalog]\npath = \"staff.toml\"\n[display]\nname_suffix = \"先生\"\n[schedule]\nday_override = \"Tuesday\"\n",
        )?;
        let cfg = ConfigLoader::with_paths(paths.clone()).load()?;
        assert_eq!(cfg.theme, ThemeName::Light);
        assert_eq!(cfg.catalog.path, Some(paths.config_dir.join("staff.toml")));
        assert!(cfg.display.show_image_ref);
        assert_eq!(cfg.display_name("Ada"), "Ada先生");
        assert_eq!(cfg.day_resolver().current_day(), Weekday::Tuesday);
        Ok(())
    }

    #[test]
    fn day_override_accepts_lowercase_and_japanese_labels() -> Result<()> {
        let temp = TempDir::new()?;
        let paths = temp_paths(temp.path());
        fs::create_dir_all(&paths.config_dir)?;
        for (raw, expected) in [("tuesday", Weekday::Tuesday), ("金曜日", Weekday::Friday)] {
            fs::write(
                &paths.config_file,
                format!("[schedule]\nday_override = \"{raw}\"\n"),
            )?;
            let cfg = ConfigLoader::with_paths(paths.clone()).load()?;
            assert_eq!(cfg.schedule.day_override, Some(expected));
        }
        Ok(())
    }

    #[test]
    fn catalog_override_wins_over_config() -> Result<()> {
        let temp = TempDir::new()?;
        let mut paths = temp_paths(temp.path());
        let forced = temp.path().join("forced.json");
        paths.catalog_override = Some(forced.clone());
        fs::create_dir_all(&paths.config_dir)?;
        fs::write(&paths.config_file, "[catalog]\npath = \"/elsewhere/staff.toml\"\n")?;
        let cfg = ConfigLoader::with_paths(paths).load()?;
        assert_eq!(cfg.catalog.path, Some(forced));
        Ok(())
    }

    #[test]
    fn default_config_uses_builtin_catalog() -> Result<()> {
        let cfg = AppConfig::default();
        assert_eq!(cfg.load_catalog()?.len(), 12);
        Ok(())
    }
}
