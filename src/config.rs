use std::fs;
use std::io::Write;
use std::path::PathBuf;

use dirs_next as dirs;
use globset::{Glob, GlobSet};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::format::parse_size;
use crate::settings::DataSettings;

const APP_DIR: &str = "storekeep";
const DEFAULT_LARGE_FILE_THRESHOLD: &str = "10 MiB";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directories whose contents count as clearable cache.
    #[serde(default = "default_cache_dirs")]
    pub cache_dirs: Vec<String>,

    /// Directories holding persistent application data.
    #[serde(default = "default_app_dirs")]
    pub app_dirs: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_large_file_threshold")]
    pub large_file_threshold: String,

    #[serde(default)]
    pub data: DataSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cache_dirs: default_cache_dirs(),
            app_dirs: default_app_dirs(),
            exclude: Vec::new(),
            large_file_threshold: default_large_file_threshold(),
            data: DataSettings::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_file_path()?;
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        let path = config_file_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = fs::File::create(path)?;
        let contents = toml::to_string_pretty(self)?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    pub fn append_exclude(&mut self, value: String) {
        append_unique(&mut self.exclude, value);
    }

    pub fn append_cache_dir(&mut self, value: String) {
        append_unique(&mut self.cache_dirs, value);
    }

    pub fn compile_excludes(&self) -> Result<Option<GlobSet>, AppError> {
        if self.exclude.is_empty() {
            return Ok(None);
        }

        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.exclude {
            let expanded = expand_home(pattern)?;
            builder.add(Glob::new(&expanded)?);
        }

        Ok(Some(builder.build()?))
    }

    pub fn cache_paths(&self) -> Result<Vec<PathBuf>, AppError> {
        expand_all(&self.cache_dirs)
    }

    pub fn app_paths(&self) -> Result<Vec<PathBuf>, AppError> {
        expand_all(&self.app_dirs)
    }

    pub fn large_file_threshold_bytes(&self) -> Result<u64, AppError> {
        parse_size(&self.large_file_threshold)
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join(APP_DIR).join("config.toml"))
}

pub fn ensure_config_file() -> Result<PathBuf, AppError> {
    let path = config_file_path()?;
    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let default = Config::default();
        let contents = toml::to_string_pretty(&default)?;
        fs::write(&path, contents)?;
    }
    Ok(path)
}

fn default_cache_dirs() -> Vec<String> {
    dirs::cache_dir()
        .map(|dir| vec![dir.join(APP_DIR).display().to_string()])
        .unwrap_or_default()
}

fn default_app_dirs() -> Vec<String> {
    dirs::data_dir()
        .map(|dir| vec![dir.join(APP_DIR).display().to_string()])
        .unwrap_or_default()
}

fn default_large_file_threshold() -> String {
    DEFAULT_LARGE_FILE_THRESHOLD.to_string()
}

fn append_unique(values: &mut Vec<String>, value: String) {
    if !values.iter().any(|existing| existing == &value) {
        values.push(value);
    }
}

fn expand_all(values: &[String]) -> Result<Vec<PathBuf>, AppError> {
    values.iter().map(|value| expand_home(value).map(PathBuf::from)).collect()
}

fn expand_home(value: &str) -> Result<String, AppError> {
    if !value.starts_with('~') {
        return Ok(value.to_string());
    }
    let home_dir = dirs::home_dir().ok_or_else(|| {
        AppError::config("Unable to expand '~' because the home directory is unknown")
    })?;
    if value == "~" {
        Ok(home_dir.display().to_string())
    } else if let Some(stripped) = value.strip_prefix("~/") {
        Ok(home_dir.join(stripped).display().to_string())
    } else {
        Ok(value.to_string())
    }
}
