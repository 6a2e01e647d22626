use std::io::{self, Write};

use crate::cache::{CacheManager, cleared_message};
use crate::config::Config;
use crate::error::AppError;
use crate::format::format_bytes;
use crate::path::display_path;

use super::with_spinner;

pub struct CacheOptions {
    pub json: bool,
    pub verbose: bool,
}

pub struct ClearOptions {
    pub assume_yes: bool,
}

pub fn execute_cache(options: CacheOptions) -> Result<(), AppError> {
    let config = Config::load()?;
    let manager = CacheManager::new(&config)?;
    let stats = with_spinner("Calculating cache size...", || manager.statistics());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Cache size: {}", stats.cache_size_formatted);
    if options.verbose {
        for dir in manager.dirs() {
            let state = if dir.exists() { "" } else { " (missing)" };
            println!("    • {}{}", display_path(dir), state);
        }
    }
    Ok(())
}

pub fn execute_clear(options: ClearOptions) -> Result<(), AppError> {
    let config = Config::load()?;
    let manager = CacheManager::new(&config)?;
    let size = with_spinner("Calculating cache size...", || manager.calculate_cache_size());

    if size == 0 {
        println!("{}", cleared_message(0));
        return Ok(());
    }

    if !options.assume_yes {
        match confirm_clear(size) {
            Ok(true) => {}
            Ok(false) | Err(AppError::Cancelled) => {
                println!("Aborted. Cache was left untouched.");
                return Ok(());
            }
            Err(err) => return Err(err),
        }
    }

    let freed = with_spinner("Clearing cache...", || manager.clear_cache())?;
    println!("{}", cleared_message(freed));
    Ok(())
}

fn confirm_clear(size: u64) -> Result<bool, AppError> {
    println!("About to clear {} of cached data. Proceed? [y/N]", format_bytes(size));
    print!("Confirm: ");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(AppError::Cancelled);
    }
    let answer = input.trim().to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}
