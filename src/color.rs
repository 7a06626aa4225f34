//! HSV → RGB conversion for the LED ring.

use palette::Srgb;

/// Convert a hue/saturation/value triple into an 8-bit RGB colour.
///
/// `hue` is periodic with period 1; any finite value is accepted and
/// wraps into the six 1/6-wide sectors. `saturation` and `value` are
/// expected in `0.0..=1.0`. Channels are scaled by 255 and truncated.
#[must_use]
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Srgb<u8> {
    let scaled = hue * 6.0;
    let sector = libm::floorf(scaled);
    let f = scaled - sector;

    let p = value * (1.0 - saturation);
    let q = value * (1.0 - f * saturation);
    let t = value * (1.0 - (1.0 - f) * saturation);

    let (r, g, b) = match (sector as i32).rem_euclid(6) {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };

    Srgb::new(channel(r), channel(g), channel(b))
}

fn channel(v: f32) -> u8 {
    // `as` truncates toward zero and saturates at the u8 bounds.
    (v * 255.0) as u8
}
