use byte_unit::{Byte, Unit};

use crate::error::AppError;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Binary magnitude bucket used when rendering a byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    B,
    Kb,
    Mb,
    Gb,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::B, Tier::Kb, Tier::Mb, Tier::Gb];

    /// Pick the largest tier whose lower bound does not exceed `bytes`.
    pub fn for_bytes(bytes: u64) -> Self {
        if bytes < KIB {
            Tier::B
        } else if bytes < MIB {
            Tier::Kb
        } else if bytes < GIB {
            Tier::Mb
        } else {
            Tier::Gb
        }
    }

    pub fn lower_bound(&self) -> u64 {
        match self {
            Tier::B => 0,
            Tier::Kb => KIB,
            Tier::Mb => MIB,
            Tier::Gb => GIB,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::B => "B",
            Tier::Kb => "KB",
            Tier::Mb => "MB",
            Tier::Gb => "GB",
        }
    }

    fn unit(&self) -> Unit {
        match self {
            Tier::B => Unit::B,
            Tier::Kb => Unit::KiB,
            Tier::Mb => Unit::MiB,
            Tier::Gb => Unit::GiB,
        }
    }

    /// Value of `bytes` expressed in this tier's unit.
    pub fn scale(&self, bytes: u64) -> f64 {
        Byte::from_u64(bytes).get_adjusted_unit(self.unit()).get_value()
    }
}

/// Format bytes into a human-readable string using 1024-based tiers.
pub fn format_bytes(bytes: u64) -> String {
    match Tier::for_bytes(bytes) {
        Tier::B => format!("{bytes} B"),
        tier => format!("{:.1} {}", tier.scale(bytes), tier.label()),
    }
}

/// Format bytes as gigabytes regardless of magnitude.
pub fn format_bytes_to_gb(bytes: u64) -> String {
    format!("{:.1} {}", Tier::Gb.scale(bytes), Tier::Gb.label())
}

/// Parse a human size such as `10 MiB`, `500KB` or `2048`.
pub fn parse_size(text: &str) -> Result<u64, AppError> {
    Byte::parse_str(text.trim(), true)
        .map(|byte| byte.as_u64())
        .map_err(|_| AppError::InvalidSize(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_part(formatted: &str) -> f64 {
        formatted.split(' ').next().unwrap().parse().unwrap()
    }

    #[test]
    fn small_counts_stay_in_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1), "1 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn larger_counts_use_one_decimal() {
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024 / 2), "2.5 GB");
        assert_eq!(format_bytes(1024 * 1024 * 1024 * 1024), "1024.0 GB");
    }

    #[test]
    fn gigabytes_ignore_tier_selection() {
        assert_eq!(format_bytes_to_gb(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(format_bytes_to_gb(512 * 1024 * 1024), "0.5 GB");
        assert_eq!(format_bytes_to_gb(0), "0.0 GB");
        assert_eq!(format_bytes_to_gb(128 * 1024 * 1024 * 1024), "128.0 GB");
    }

    #[test]
    fn boundary_values_drop_to_lower_tier() {
        for (below, at) in [(KIB - 1, KIB), (MIB - 1, MIB), (GIB - 1, GIB)] {
            assert!(Tier::for_bytes(below) < Tier::for_bytes(at));
        }
        assert!(format_bytes(MIB - 1).ends_with(" KB"));
        assert!(format_bytes(GIB - 1).ends_with(" MB"));
    }

    #[test]
    fn numeric_part_is_monotonic_within_tier() {
        for tier in Tier::ALL.into_iter().skip(1) {
            let start = tier.lower_bound();
            let mut previous = numeric_part(&format_bytes(start));
            for step in 1..200u64 {
                let bytes = start + step * (start / 37 + 1);
                if Tier::for_bytes(bytes) != tier {
                    break;
                }
                let current = numeric_part(&format_bytes(bytes));
                assert!(previous <= current, "{tier:?}: {previous} > {current}");
                previous = current;
            }
        }
    }

    #[test]
    fn parses_human_sizes() {
        assert_eq!(parse_size("2048").unwrap(), 2048);
        assert_eq!(parse_size("10 MiB").unwrap(), 10 * MIB);
        assert_eq!(parse_size("1KB").unwrap(), 1000);
        assert!(matches!(parse_size("lots"), Err(AppError::InvalidSize(_))));
    }
}
