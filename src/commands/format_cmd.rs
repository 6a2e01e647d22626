use crate::error::AppError;
use crate::format::{format_bytes, format_bytes_to_gb};

pub struct FormatOptions {
    pub bytes: u64,
    pub gigabytes: bool,
}

pub fn execute_format(options: FormatOptions) -> Result<String, AppError> {
    let formatted = if options.gigabytes {
        format_bytes_to_gb(options.bytes)
    } else {
        format_bytes(options.bytes)
    };
    println!("{formatted}");
    Ok(formatted)
}
