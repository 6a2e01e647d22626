//! Library entry point for the storekeep CLI.

pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod path;
pub mod review;
pub mod settings;
pub mod usage;

pub use format::{format_bytes, format_bytes_to_gb};
