//! Application-level configuration constants.

// Timers
pub const TICK_MS: u32 = 1_000;
pub const FLIP_MS: u32 = 600;
pub const FLIP_MIDPOINT_MS: u32 = FLIP_MS / 2;

// Persistence
pub const THEME_STORAGE_KEY: &str = "countdownBackground";

// Title auto-scaling (pixels)
pub const TITLE_REFERENCE_PX: f64 = 120.0;
pub const TITLE_MIN_PX: f64 = 16.0;
pub const TITLE_MAX_PX: f64 = 120.0;
pub const TITLE_SAFETY: f64 = 0.95;

// Quick-add buttons, in minutes
pub const QUICK_ADD_MINUTES: [i64; 4] = [60, 30, 15, 5];

// `datetime-local` value formats; the seconds part is optional on input
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATETIME_INPUT_FORMAT_NO_SECONDS: &str = "%Y-%m-%dT%H:%M";

// Live clock line
pub const CLOCK_FORMAT: &str = "%Y. %-m. %-d. (%a) %p %-I:%M:%S";
