//! Disobey 2026 badge hardware (ESP32-S3).
//!
//! Pin assignment, board bring-up and the hardware side of every
//! collaborator the controller talks to:
//! - **Display**: 320×170 ST7789 LCD over SPI with DMA, drawn by [`DisplayRenderer`]
//! - **LEDs**: WS2812 strip via RMT, the [`LedSink`](crate::LedSink)
//! - **Buttons**: D-pad, A and B as a [`Keypad`]
//! - **Backlight**: switched by [`BadgeHost`] on start and minimise

mod backlight;
mod buttons;
mod display;
mod leds;
mod render;

pub use backlight::Backlight;
pub use buttons::{
    Buttons,
    Keypad,
};
pub use display::Display;
use embassy_time::Instant;
use esp_hal::{
    Blocking,
    assign_resources,
    clock::{
        Clock,
        CpuClock,
    },
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    rmt::{
        Rmt,
        Tx,
        TxChannelConfig,
        TxChannelCreator as _,
    },
    rom,
    time::Rate,
};
pub use leds::{
    LED_COUNT,
    Leds,
};
pub use render::DisplayRenderer;

use crate::io::Host;

/// StaticCell helper: allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        buttons: ButtonResources<'d> {
            up: GPIO11,
            down: GPIO1,
            left: GPIO21,
            right: GPIO2,
            a: GPIO13,
            b: GPIO38,
        },
        leds: LedResources<'d> {
            power: GPIO17,
            io: GPIO18,
            rmt: RMT,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Step the CPU clock through the intermediate PLL setting the ESP32-S3
/// needs before it will accept the target frequency.
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Bring up clocks and return the raw peripheral set.
///
/// Call once at the top of `main`, then split with [`split_resources!`].
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

/// Power the LED strip and claim RMT channel 0 at 40 MHz for WS2812 timing.
impl<'a> From<LedResources<'a>> for esp_hal::rmt::Channel<'a, Blocking, Tx> {
    fn from(res: LedResources<'a>) -> Self {
        let _ws_power = Output::new(res.power, Level::High, OutputConfig::default());
        let rmt = Rmt::new(res.rmt, Rate::from_mhz(40)).unwrap();
        let tx_config = TxChannelConfig::default().with_clk_divider(1);
        rmt.channel0.configure_tx(res.io, tx_config).unwrap()
    }
}

// ── App host ────────────────────────────────────────────────────────────────

/// The badge has no window manager: "minimising" switches the display off
/// and leaves the firmware idling.
pub struct BadgeHost {
    backlight: Backlight,
}

impl BadgeHost {
    pub const fn new(backlight: Backlight) -> Self {
        Self { backlight }
    }
}

impl Host for BadgeHost {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn minimise(&mut self) {
        info!("Minimising, backlight off");
        self.backlight.off();
    }

    fn on_start(&mut self) {
        self.backlight.on();
    }
}
