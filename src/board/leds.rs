//! WS2812 addressable LED driver using the RMT peripheral.
//!
//! The badge has 10 RGB LEDs in two bars of five. The app's 13-colour ring
//! is written from index 0, so the last three colours have no LED.

extern crate alloc;

use alloc::vec::Vec;

use esp_hal::{
    Blocking,
    delay::Delay,
    gpio::Level,
    rmt::{
        PulseCode,
        Tx,
    },
};
use palette::Srgb;

use crate::io::LedSink;

/// Number of WS2812 LEDs on the badge. Index 0 is bottom right, counting
/// counter-clockwise to index 9 at bottom left.
pub const LED_COUNT: usize = 10;

const RESET_US: u32 = 50;

/// WS2812 strip with an in-memory framebuffer flushed by [`update`](Leds::update).
pub struct Leds<'a> {
    channel: Option<esp_hal::rmt::Channel<'a, Blocking, Tx>>,
    framebuffer: [Srgb<u8>; LED_COUNT],
    dim: u8,
}

impl<'a> Leds<'a> {
    /// `dim` divides every channel before transmission; full-scale WS2812s
    /// are painfully bright at arm's length.
    pub const fn new(channel: esp_hal::rmt::Channel<'a, Blocking, Tx>, dim: u8) -> Self {
        Self {
            channel: Some(channel),
            framebuffer: [Srgb::new(0, 0, 0); LED_COUNT],
            dim: if dim == 0 { 1 } else { dim },
        }
    }

    /// Flush the framebuffer to the physical LEDs. Blocks for the
    /// transmission and the latch time.
    pub fn update(&mut self) {
        let Some(channel) = self.channel.take() else {
            error!("RMT channel lost during previous transmission");
            return;
        };

        let pulses = self
            .framebuffer
            .iter()
            .flat_map(|c| {
                // WS2812 expects GRB byte order
                [c.green, c.red, c.blue]
                    .into_iter()
                    .flat_map(|byte| byte_to_pulses(byte / self.dim))
            })
            .chain(core::iter::once(PulseCode::end_marker()))
            .collect::<Vec<_>>();

        let transaction = match channel.transmit(&pulses) {
            Ok(t) => t,
            Err(e) => {
                error!("RMT transmit failed: {:?}", e);
                return;
            }
        };

        self.channel = Some(match transaction.wait() {
            Ok(ch) => ch,
            Err((err, ch)) => {
                error!("RMT transaction failed: {:?}", err);
                ch
            }
        });

        // WS2812 reset time
        Delay::new().delay_micros(RESET_US);
    }

    /// Turn all LEDs off. Takes effect on the next [`update`](Leds::update).
    pub fn clear(&mut self) {
        self.framebuffer.fill(Srgb::new(0, 0, 0));
    }
}

impl LedSink for Leds<'_> {
    fn show(&mut self, colors: &[Srgb<u8>]) {
        for (led, &color) in self.framebuffer.iter_mut().zip(colors) {
            *led = color;
        }
        self.update();
    }
}

/// WS2812 bit timing at 40 MHz RMT clock.
const fn bit_to_pulse(bit: bool) -> PulseCode {
    if bit {
        // '1': 0.8 µs high (32 ticks), 0.45 µs low (18 ticks)
        PulseCode::new(Level::High, 32, Level::Low, 18)
    } else {
        // '0': 0.4 µs high (16 ticks), 0.85 µs low (34 ticks)
        PulseCode::new(Level::High, 16, Level::Low, 34)
    }
}

/// MSB first.
fn byte_to_pulses(byte: u8) -> [PulseCode; 8] {
    core::array::from_fn(|i| bit_to_pulse((byte >> (7 - i)) & 1 != 0))
}
