//! Collaborators the controller drives but does not own the behaviour of.
//!
//! The board module provides hardware implementations; tests use
//! recording fakes.

use alloc::string::String;

use embassy_time::Instant;
use palette::Srgb;

use crate::{
    Result,
    scene::{
        Scene,
        TextMetrics,
    },
};

/// Draws frames. Each call suspends until the frame has been presented.
pub trait RenderSink: TextMetrics {
    /// Present the animation: hexagon outlines first, label on top.
    async fn render(&mut self, scene: &Scene<'_>) -> Result<()>;

    /// Present the name-entry overlay over whatever is on screen.
    async fn render_overlay(&mut self, view: &EntryView<'_>) -> Result<()>;
}

/// The status LED ring.
///
/// Sinks with fewer physical LEDs than colours write the leading prefix.
/// `show` must not suspend; the frame's only await is the render.
pub trait LedSink {
    fn show(&mut self, colors: &[Srgb<u8>]);
}

/// Logical keys used by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Accept,
    Cancel,
}

pub trait Input {
    /// Whether cancel was pressed since the last call. Reading clears it.
    fn take_cancel(&mut self) -> bool;

    /// Wait for the next key press.
    async fn next_key(&mut self) -> Result<Key>;
}

/// What the overlay currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryView<'a> {
    pub prompt: &'a str,
    pub text: &'a str,
    /// Glyph under the cursor, not yet part of `text`.
    pub pending: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Accepted(String),
    Cancelled,
}

/// Modal name-entry overlay. Owns input and rendering until it resolves.
pub trait NameEntry {
    async fn run<R: RenderSink, I: Input>(
        &mut self,
        prompt: &str,
        render: &mut R,
        input: &mut I,
    ) -> Result<EntryOutcome>;
}

/// The app lifecycle host.
pub trait Host {
    /// Frame clock.
    fn now(&self) -> Instant;

    /// Hide this app. No further frames are expected afterwards.
    fn minimise(&mut self);

    /// Called once when the controller is built, before the first frame.
    /// Hosts that run their own LED patterns stop them here.
    fn on_start(&mut self) {}
}
