//! Hexagon name badge firmware.
//!
//! Bake a name in at build time, or leave it unset to be asked on boot:
//!
//! ```sh
//! HEXBADGE_NAME="Ada" cargo run --release --no-default-features --features badge
//! ```

#![no_std]
#![no_main]

use defmt::{
    error,
    info,
};
#[allow(clippy::wildcard_imports)]
use hexbadge::board::*;
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use hexbadge::{
    CONFIG,
    InteractionController,
    Io,
    MemorySettings,
    PickerEntry,
};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

type Badge = InteractionController<
    DisplayRenderer<'static>,
    Leds<'static>,
    Keypad,
    PickerEntry,
    MemorySettings,
    BadgeHost,
>;

#[embassy_executor::task]
async fn badge_task(mut badge: Badge) {
    info!("Hexagon badge started");

    match badge.run().await {
        Ok(()) => info!("Hexagon badge minimised"),
        Err(e) => error!("Hexagon badge stopped: {}", e),
    }

    let mut io = badge.into_io();
    io.leds.clear();
    io.leds.update();
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = hexbadge::board::init();
    let resources = hexbadge::split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let config = CONFIG;
    let badge = InteractionController::new(
        config,
        Io {
            render: DisplayRenderer::new(resources.display.into(), &config),
            leds: Leds::new(resources.leds.into(), config.led_dim),
            input: Keypad::from(resources.buttons),
            entry: PickerEntry::new(config.name_max_len),
            settings: MemorySettings::seeded(config.default_name),
            host: BadgeHost::new(resources.backlight.into()),
        },
    );
    spawner.must_spawn(badge_task(badge));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
