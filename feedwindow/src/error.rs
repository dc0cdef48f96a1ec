use core::fmt;

/// An invalid configuration value.
///
/// Runtime guards (loading twice, loading past the end) are not errors; they are reported as
/// `false`/`None` return values. This type only covers option validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `page_size` must be at least 1, otherwise `load_more` could never make progress.
    ZeroPageSize,
    /// A visibility threshold is a percentage in `0..=100`.
    ThresholdOutOfRange { value: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPageSize => f.write_str("page_size must be greater than zero"),
            Self::ThresholdOutOfRange { value } => {
                write!(f, "item_visible_percent_threshold={value} (must be 0..=100)")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
