//! Build-time configuration.
//!
//! Values can be overridden when building the firmware:
//!
//! ```sh
//! HEXBADGE_NAME="Ada" HEXBADGE_FRAME_MS=40 HEXBADGE_LED_DIM=4 \
//!     cargo run --release --features badge --no-default-features
//! ```

use embassy_time::Duration;

const NAME: Option<&str> = option_env!("HEXBADGE_NAME");
const FRAME_MS: Option<&str> = option_env!("HEXBADGE_FRAME_MS");
const LED_DIM: Option<&str> = option_env!("HEXBADGE_LED_DIM");

const DEFAULT_FRAME_MS: u64 = 33;
const DEFAULT_LED_DIM: u8 = 8;

/// Prompt shown by the name-entry overlay.
pub const ENTRY_PROMPT: &str = "What is your name?";

/// Longest name the overlay will accept.
pub const NAME_MAX_LEN: usize = 16;

/// Runtime knobs for the controller and the board drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Name used to seed the settings store on first boot, if any.
    pub default_name: Option<&'static str>,
    /// Time the renderer waits after presenting each frame.
    pub frame_period: Duration,
    /// Divisor applied to LED channel values before transmission.
    pub led_dim: u8,
    pub entry_prompt: &'static str,
    pub name_max_len: usize,
}

/// The build's configuration. Evaluated at compile time, so a malformed
/// override fails the build instead of the boot.
pub const CONFIG: Config = Config::from_env();

impl Default for Config {
    fn default() -> Self {
        CONFIG
    }
}

impl Config {
    /// Configuration with every build-time override applied. Prefer
    /// [`CONFIG`]; calling this at runtime defers override errors to a panic.
    #[must_use]
    pub const fn from_env() -> Self {
        let frame_ms = match FRAME_MS {
            Some(s) => match parse_u64(s) {
                Some(ms) if ms > 0 => ms,
                _ => panic!("HEXBADGE_FRAME_MS must be a positive integer"),
            },
            None => DEFAULT_FRAME_MS,
        };
        let led_dim = match LED_DIM {
            Some(s) => match parse_u64(s) {
                Some(d) if d > 0 && d <= u8::MAX as u64 => d as u8,
                _ => panic!("HEXBADGE_LED_DIM must be in 1..=255"),
            },
            None => DEFAULT_LED_DIM,
        };

        Self {
            default_name: NAME,
            frame_period: Duration::from_millis(frame_ms),
            led_dim,
            entry_prompt: ENTRY_PROMPT,
            name_max_len: NAME_MAX_LEN,
        }
    }
}

/// Const-compatible decimal parser. `None` on empty input, stray
/// characters or overflow.
const fn parse_u64(s: &str) -> Option<u64> {
    let b = s.as_bytes();
    if b.is_empty() {
        return None;
    }
    let mut value: u64 = 0;
    let mut i = 0;
    while i < b.len() {
        let digit = match b[i] {
            c @ b'0'..=b'9' => (c - b'0') as u64,
            _ => return None,
        };
        value = match value.checked_mul(10) {
            Some(v) => match v.checked_add(digit) {
                Some(v) => v,
                None => return None,
            },
            None => return None,
        };
        i += 1;
    }
    Some(value)
}
