//! # hexbadge
//!
//! Rotating hexagon name badge for the Disobey 2026 badge.
//!
//! Six concentric hexagon outlines rotate with a shared, slowly reversing
//! drive while the LED ring sweeps through hues that follow the outermost
//! ring. Until a name has been stored the badge shows a prompt and opens a
//! glyph-picker overlay to capture one.
//!
//! - **Colour**: HSV → RGB for the LED ring
//! - **Rotation**: the damped oscillation driving every ring
//! - **Scene**: rotation state → hexagons, LED colours, label
//! - **Controller**: frame loop and name-capture state machine
//! - **Board** (`badge` feature): display, LEDs, buttons and backlight
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = hexbadge::board::init();
//! let resources = hexbadge::split_resources!(peripherals);
//!
//! let config = hexbadge::CONFIG;
//! let mut controller = hexbadge::InteractionController::new(config, hexbadge::Io {
//!     render: hexbadge::board::DisplayRenderer::new(resources.display.into(), &config),
//!     leds: hexbadge::board::Leds::new(resources.leds.into(), config.led_dim),
//!     input: hexbadge::board::Keypad::from(resources.buttons),
//!     entry: hexbadge::PickerEntry::new(config.name_max_len),
//!     settings: hexbadge::MemorySettings::seeded(config.default_name),
//!     host: hexbadge::board::BadgeHost::new(resources.backlight.into()),
//! });
//! controller.run().await?;
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod color;
pub mod config;
pub mod controller;
pub mod entry;
mod error;
pub mod io;
pub mod rotation;
pub mod scene;
pub mod settings;

#[cfg(feature = "badge")]
pub mod board;

pub use color::hsv_to_rgb;
pub use config::{
    CONFIG,
    Config,
};
pub use controller::{
    InteractionController,
    Io,
    State,
};
pub use entry::{
    PickerEntry,
    TextEntry,
};
pub use error::{
    Error,
    Result,
    SettingsError,
};
pub use io::{
    EntryOutcome,
    EntryView,
    Host,
    Input,
    Key,
    LedSink,
    NameEntry,
    RenderSink,
};
pub use rotation::{
    RING_COUNT,
    RotationField,
};
pub use scene::{
    LED_RING_COUNT,
    Scene,
    SceneComposer,
};
pub use settings::{
    MemorySettings,
    NAME_KEY,
    SettingsStore,
};
