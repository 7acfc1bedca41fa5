//! Panel configuration
//!
//! Compile-time constants, the built-in profiles, and the runtime parser
//! for the `panel.toml` file embedded in the firmware image.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ConfigError, ConfigErrorKind};
pub use types::*;

/// Startup lines written once to the log and the serial port
pub const BANNER: [&str; 2] = [
    "=== Deckstat Serial Status Display ===",
    "Waiting for serial stats lines from host...",
];

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Minimum time between dashboard redraws
pub const DEFAULT_DASHBOARD_INTERVAL_MS: u32 = 200;

/// Extra delay per rain step, on top of the loop sleep
pub const DEFAULT_RAIN_DELAY_MS: u32 = 40;

/// Sleep at the end of every loop iteration
pub const DEFAULT_LOOP_SLEEP_MS: u32 = 5;

/// Button debounce time
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;
