use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use storekeep::commands::cache_cmd::{CacheOptions, ClearOptions};
use storekeep::commands::config_cmd::ConfigOptions;
use storekeep::commands::format_cmd::FormatOptions;
use storekeep::commands::review_cmd::{EntriesOptions, LargeOptions};
use storekeep::commands::usage_cmd::UsageOptions;
use storekeep::commands::{
    execute_cache, execute_clear, execute_config, execute_entries, execute_format, execute_large,
    execute_usage,
};
use storekeep::error::AppError;
use storekeep::format::parse_size;
use storekeep::logging;
use storekeep::path::{resolve_root, resolve_roots};
use storekeep::settings::{MediaType, MediaUploadQuality, NetworkType, parse_auto_download_rule};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.quiet);

    match cli.command {
        Commands::Usage(args) => {
            execute_usage(UsageOptions { root: resolve_root(args.path), json: args.json })?;
        }
        Commands::Cache(args) => {
            execute_cache(CacheOptions { json: args.json, verbose: args.verbose })?;
        }
        Commands::Clear(args) => {
            execute_clear(ClearOptions { assume_yes: args.yes })?;
        }
        Commands::Large(args) => {
            let options = LargeOptions {
                roots: resolve_roots(&args.paths),
                threshold: args.min,
                media: args.media,
                verbose: args.verbose,
            };
            execute_large(options)?;
        }
        Commands::Entries(args) => {
            execute_entries(EntriesOptions { root: resolve_root(args.path), limit: args.limit })?;
        }
        Commands::Format(args) => {
            execute_format(FormatOptions { bytes: args.bytes, gigabytes: args.gb })?;
        }
        Commands::Config(args) => {
            let options = ConfigOptions {
                show_path: args.path,
                show: args.show,
                edit: args.edit,
                add_cache_dir: args.add_cache_dir,
                add_exclude: args.add_exclude,
                data_saver: args.data_saver,
                less_data_calls: args.less_data_calls,
                upload_quality: args.upload_quality,
                auto_download: args.auto_download,
            };
            execute_config(options)?;
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "storekeep", version, about = "Inspect and reclaim storage used by app data and caches.")]
struct Cli {
    /// Only log errors.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    quiet: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long = "log-level", value_name = "LEVEL", global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show used and free space on a volume, split by app data.
    #[command(visible_alias = "us")]
    Usage(UsageArgs),
    /// Show the size of the app cache.
    #[command(visible_alias = "ca")]
    Cache(CacheArgs),
    /// Clear the app cache and report the space freed.
    #[command(visible_alias = "cl")]
    Clear(ClearArgs),
    /// List files above a size threshold.
    #[command(visible_alias = "lg")]
    Large(LargeArgs),
    /// Show storage used by each entry of a directory.
    #[command(visible_alias = "en")]
    Entries(EntriesArgs),
    /// Format a byte count for display.
    #[command(visible_alias = "fmt")]
    Format(FormatArgs),
    /// Manage storekeep configuration (cache directories, exclusions, data usage).
    #[command(visible_alias = "cfg")]
    Config(ConfigArgs),
}

#[derive(Args)]
struct UsageArgs {
    /// Path on the volume to inspect (defaults to the home directory).
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Print the breakdown as JSON.
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Args)]
struct CacheArgs {
    /// Print cache statistics as JSON.
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// List the cache directories that were measured.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Args)]
struct ClearArgs {
    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue)]
    yes: bool,
}

#[derive(Args)]
struct LargeArgs {
    /// Minimum file size, e.g. `25 MiB` (defaults to the configured threshold).
    #[arg(long = "min", value_name = "SIZE", value_parser = parse_size_arg)]
    min: Option<u64>,

    /// Only list files of this media type (photo, audio, video, document).
    #[arg(short = 't', long = "type", value_name = "MEDIA", action = ArgAction::Append)]
    media: Vec<MediaType>,

    /// Show every matching file.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Paths to search (defaults to the home directory).
    #[arg(value_name = "PATH", num_args = 0..)]
    paths: Vec<PathBuf>,
}

#[derive(Args)]
struct EntriesArgs {
    /// Directory to break down (defaults to the home directory).
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Show at most this many entries.
    #[arg(short = 'n', long = "limit", value_name = "N")]
    limit: Option<usize>,
}

#[derive(Args)]
struct FormatArgs {
    /// Number of bytes.
    #[arg(value_name = "BYTES")]
    bytes: u64,

    /// Always render in gigabytes.
    #[arg(long = "gb", action = ArgAction::SetTrue)]
    gb: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Show the configuration file path.
    #[arg(long = "path", action = ArgAction::SetTrue)]
    path: bool,

    /// Show the data usage settings.
    #[arg(long = "show", action = ArgAction::SetTrue)]
    show: bool,

    /// Open the configuration file in $EDITOR.
    #[arg(long = "edit", action = ArgAction::SetTrue)]
    edit: bool,

    /// Add a directory to the list of cache directories.
    #[arg(long = "add-cache-dir", value_name = "DIR")]
    add_cache_dir: Option<String>,

    /// Add a glob pattern that is never measured or cleared.
    #[arg(long = "add-exclude", value_name = "GLOB")]
    add_exclude: Option<String>,

    /// Turn data saver on or off.
    #[arg(long = "data-saver", value_name = "on|off", value_parser = BoolishValueParser::new())]
    data_saver: Option<bool>,

    /// Turn "use less data for calls" on or off.
    #[arg(long = "less-data-calls", value_name = "on|off", value_parser = BoolishValueParser::new())]
    less_data_calls: Option<bool>,

    /// Media upload quality (standard or hd).
    #[arg(long = "upload-quality", value_name = "QUALITY")]
    upload_quality: Option<MediaUploadQuality>,

    /// Auto-download rule such as `mobile=photo,audio`, `wifi=all` or `roaming=none`.
    #[arg(long = "auto-download", value_name = "NETWORK=TYPES", action = ArgAction::Append, value_parser = parse_auto_download_rule)]
    auto_download: Vec<(NetworkType, BTreeSet<MediaType>)>,
}

fn parse_size_arg(value: &str) -> Result<u64, String> {
    parse_size(value).map_err(|err| err.to_string())
}
