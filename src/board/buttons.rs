//! D-pad and A/B buttons with async debouncing.
//!
//! All six buttons are active low with internal pull-ups.

use embassy_futures::select::select_array;
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use super::ButtonResources;
use crate::{
    Result,
    io::{
        self,
        Key,
    },
};

const DEBOUNCE_MS: u64 = 20;

/// The buttons the badge app reads.
pub struct Buttons {
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub left: Input<'static>,
    pub right: Input<'static>,
    pub a: Input<'static>,
    pub b: Input<'static>,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            up: Input::new(res.up, pull_up),
            down: Input::new(res.down, pull_up),
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
            a: Input::new(res.a, pull_up),
            b: Input::new(res.b, pull_up),
        }
    }
}

impl Buttons {
    /// Wait for a debounced press (falling edge, active low).
    pub async fn debounce_press(button: &mut Input<'_>) {
        loop {
            button.wait_for_falling_edge().await;
            Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
            if button.is_low() {
                return;
            }
        }
    }
}

/// Buttons mapped onto the controller's [`io::Input`].
///
/// B is the cancel button. While animating it is polled once per frame
/// and latched on the press edge; during name entry every button is
/// awaited with debouncing.
pub struct Keypad {
    buttons: Buttons,
    cancel_held: bool,
}

impl From<ButtonResources<'static>> for Keypad {
    fn from(res: ButtonResources<'static>) -> Self {
        Self::new(res.into())
    }
}

impl Keypad {
    pub const fn new(buttons: Buttons) -> Self {
        Self {
            buttons,
            cancel_held: false,
        }
    }
}

impl io::Input for Keypad {
    fn take_cancel(&mut self) -> bool {
        let down = self.buttons.b.is_low();
        let pressed = down && !self.cancel_held;
        self.cancel_held = down;
        pressed
    }

    async fn next_key(&mut self) -> Result<Key> {
        let b = &mut self.buttons;
        let (_, index) = select_array([
            Buttons::debounce_press(&mut b.up),
            Buttons::debounce_press(&mut b.down),
            Buttons::debounce_press(&mut b.left),
            Buttons::debounce_press(&mut b.right),
            Buttons::debounce_press(&mut b.a),
            Buttons::debounce_press(&mut b.b),
        ])
        .await;

        let key = match index {
            0 => Key::Up,
            1 => Key::Down,
            2 => Key::Left,
            3 => Key::Right,
            4 => Key::Accept,
            _ => Key::Cancel,
        };
        // The overlay consumed this B press; don't let the frame loop see it too.
        self.cancel_held = self.buttons.b.is_low();
        debug!("Key {:?}", key);
        Ok(key)
    }
}
