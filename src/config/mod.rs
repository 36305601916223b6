//! Configuration module.
//!
//! `loader` reads and merges the TOML file, environment and CLI overrides
//! into a [`loader::ResolvedConfig`]; [`GridConfig`] is the validated subset
//! the layout core consumes.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

/// Supported lengths, in minutes, for events created by tapping the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventLength {
    /// 30 minutes.
    #[default]
    HalfHour,
    /// 60 minutes.
    Hour,
}

impl EventLength {
    /// Length in minutes.
    pub fn minutes(&self) -> u32 {
        match self {
            EventLength::HalfHour => 30,
            EventLength::Hour => 60,
        }
    }

    /// Parse a minute count. Only 30 and 60 are accepted.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            30 => Some(EventLength::HalfHour),
            60 => Some(EventLength::Hour),
            _ => None,
        }
    }
}

/// Validated grid configuration used by the layout core.
///
/// Built once from a [`ResolvedConfig`] (see [`ResolvedConfig::grid_config`])
/// and then passed by reference; nothing in a layout pass mutates it.
///
/// # Invariants
/// - `pixels_per_minute` is finite and `> 0`
/// - `top_inset_margin`, `all_day_row_height`, `all_day_header_inset` are finite and `>= 0`
/// - `default_hour <= 23`
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pixels_per_minute: f64,
    top_inset_margin: f64,
    default_event_length: EventLength,
    all_day_row_height: f64,
    all_day_header_inset: f64,
    default_hour: u32,
    created_event_text: String,
}

impl GridConfig {
    /// Grid density in pixels per minute.
    pub fn pixels_per_minute(&self) -> f64 {
        self.pixels_per_minute
    }

    /// Vertical offset of 00:00 from the top of the grid.
    pub fn top_inset_margin(&self) -> f64 {
        self.top_inset_margin
    }

    /// Length of events created by tapping. Does not affect layout.
    pub fn default_event_length(&self) -> EventLength {
        self.default_event_length
    }

    /// Height of one all-day row.
    pub fn all_day_row_height(&self) -> f64 {
        self.all_day_row_height
    }

    /// Padding added once to the all-day strip.
    pub fn all_day_header_inset(&self) -> f64 {
        self.all_day_header_inset
    }

    /// Hour shown at the top of the grid when scrolling is reset.
    pub fn default_hour(&self) -> u32 {
        self.default_hour
    }

    /// Title given to events created by tapping.
    pub fn created_event_text(&self) -> &str {
        &self.created_event_text
    }

    /// Bit-exact key for memoization. Two configs with equal keys lay out
    /// identically.
    pub(crate) fn layout_key(&self) -> [u64; 2] {
        [
            self.pixels_per_minute.to_bits(),
            self.top_inset_margin.to_bits(),
        ]
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pixels_per_minute: loader::DEFAULT_PIXELS_PER_MINUTE,
            top_inset_margin: loader::DEFAULT_TOP_INSET_MARGIN,
            default_event_length: EventLength::default(),
            all_day_row_height: loader::DEFAULT_ALL_DAY_ROW_HEIGHT,
            all_day_header_inset: loader::DEFAULT_ALL_DAY_HEADER_INSET,
            default_hour: loader::DEFAULT_HOUR,
            created_event_text: loader::DEFAULT_CREATED_EVENT_TEXT.to_string(),
        }
    }
}
