use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::config::{Config, config_file_path, ensure_config_file};
use crate::error::AppError;
use crate::path::display_path;
use crate::settings::{
    DataSettings, MediaType, MediaUploadQuality, NetworkType, describe_media,
};

pub struct ConfigOptions {
    pub show_path: bool,
    pub show: bool,
    pub edit: bool,
    pub add_cache_dir: Option<String>,
    pub add_exclude: Option<String>,
    pub data_saver: Option<bool>,
    pub less_data_calls: Option<bool>,
    pub upload_quality: Option<MediaUploadQuality>,
    pub auto_download: Vec<(NetworkType, BTreeSet<MediaType>)>,
}

impl ConfigOptions {
    fn modifies(&self) -> bool {
        self.add_cache_dir.is_some()
            || self.add_exclude.is_some()
            || self.data_saver.is_some()
            || self.less_data_calls.is_some()
            || self.upload_quality.is_some()
            || !self.auto_download.is_empty()
    }
}

pub fn execute_config(options: ConfigOptions) -> Result<(), AppError> {
    if options.show_path {
        let path = config_file_path()?;
        println!("Configuration file: {}", display_path(&path));
    }

    if options.modifies() {
        let mut config = Config::load()?;
        apply_changes(&mut config, &options);
        config.save()?;
        info!(path = %config_file_path()?.display(), "configuration saved");
    }

    if options.show {
        let config = Config::load()?;
        print_data_settings(&config.data);
    }

    if options.edit {
        let path = ensure_config_file()?;
        open_editor(&path)?;
    }

    if !options.show_path && !options.show && !options.modifies() && !options.edit {
        let path = config_file_path()?;
        println!("Configuration file: {}", display_path(&path));
    }

    Ok(())
}

fn apply_changes(config: &mut Config, options: &ConfigOptions) {
    if let Some(ref dir) = options.add_cache_dir {
        config.append_cache_dir(dir.clone());
        println!("Added cache directory '{}'.", dir);
    }
    if let Some(ref pattern) = options.add_exclude {
        config.append_exclude(pattern.clone());
        println!("Added exclude pattern '{}'.", pattern);
    }
    if let Some(enabled) = options.data_saver {
        config.data.data_saver = enabled;
        println!("Data saver {}.", on_off(enabled));
    }
    if let Some(enabled) = options.less_data_calls {
        config.data.use_less_data_calls = enabled;
        println!("Use less data for calls {}.", on_off(enabled));
    }
    if let Some(quality) = options.upload_quality {
        config.data.media_upload_quality = quality;
        println!("Media upload quality set to {}.", quality.display_name());
    }
    for (network, media) in &options.auto_download {
        config.data.auto_download.set_rule(*network, media.clone());
        println!("Auto-download on {}: {}.", network.display_name(), describe_media(media));
    }
}

fn print_data_settings(data: &DataSettings) {
    println!("Data usage settings:");
    println!("  Data saver: {}", on_off(data.data_saver));
    println!("  Use less data for calls: {}", on_off(data.use_less_data_calls));
    println!(
        "  Media upload quality: {} ({})",
        data.media_upload_quality.display_name(),
        data.media_upload_quality.description()
    );
    println!("  Media auto-download:");
    for network in NetworkType::ALL {
        println!(
            "    {:<12} {}",
            network.display_name(),
            describe_media(data.auto_download.rule(network))
        );
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn open_editor(path: &Path) -> Result<(), AppError> {
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| "nano".to_string());

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|err| AppError::Editor(err.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(AppError::Editor(format!("Editor exited with status {}", status)))
    }
}
