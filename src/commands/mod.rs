use std::time::Duration;

use indicatif::ProgressBar;

pub mod cache_cmd;
pub mod config_cmd;
pub mod format_cmd;
pub mod review_cmd;
pub mod usage_cmd;

pub use cache_cmd::{execute_cache, execute_clear};
pub use config_cmd::execute_config;
pub use format_cmd::execute_format;
pub use review_cmd::{execute_entries, execute_large};
pub use usage_cmd::execute_usage;

/// Run `work` behind a stderr spinner; hidden automatically when stderr is not a terminal.
fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work();
    spinner.finish_and_clear();
    result
}
