//! Maps animation state to drawable primitives.
//!
//! Everything here is pure: the controller composes a [`Scene`] and an LED
//! ring each frame and hands them to the sinks.

use core::f32::consts::TAU;

use palette::Srgb;

use crate::{
    color::hsv_to_rgb,
    rotation::{
        RING_COUNT,
        RotationField,
    },
};

/// LEDs in the status ring.
pub const LED_RING_COUNT: usize = 13;

const LED_SATURATION: f32 = 1.0;
const LED_VALUE: f32 = 0.5;

/// Corners per ring.
pub const SIDES: usize = 6;

const OUTER_RADIUS: f32 = 120.0;
const RADIUS_STEP: f32 = 5.0;

/// Ring colours, outermost first. Later rings draw on top.
pub const RING_PALETTE: [Srgb<u8>; RING_COUNT] = [
    Srgb::new(255, 255, 255),
    Srgb::new(0, 255, 0),
    Srgb::new(255, 255, 0),
    Srgb::new(0, 0, 255),
    Srgb::new(255, 0, 0),
    Srgb::new(0, 255, 255),
];

/// Prompt drawn in place of the name until one has been captured.
pub const NAME_PROMPT: &str = "Set your name in\nthe settings app!";

const NAME_HALF_HEIGHT: f32 = 11.0;
const PROMPT_POSITION: (f32, f32) = (-80.0, -20.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontStyle {
    Bold,
    Italic,
}

/// Presentation font request. Renderers pick their closest match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Font {
    pub size: u8,
    pub style: FontStyle,
}

pub const NAME_FONT: Font = Font { size: 36, style: FontStyle::Bold };
pub const PROMPT_FONT: Font = Font { size: 22, style: FontStyle::Italic };

/// Text measurement supplied by whatever draws the label.
pub trait TextMetrics {
    fn text_width(&self, text: &str, font: Font) -> f32;
}

/// Static layout of one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub radius: f32,
    pub color: Srgb<u8>,
}

/// Default ring table: radii shrink by a fixed step, one palette colour each.
#[must_use]
pub fn ring_geometry() -> [RingGeometry; RING_COUNT] {
    core::array::from_fn(|i| RingGeometry {
        radius: OUTER_RADIUS - i as f32 * RADIUS_STEP,
        color: RING_PALETTE[i],
    })
}

/// One hexagon outline to stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hexagon {
    pub radius: f32,
    pub angle: f32,
    pub color: Srgb<u8>,
}

impl Hexagon {
    #[must_use]
    pub fn vertices(&self) -> [(f32, f32); SIDES] {
        hexagon_vertices(self.radius, self.angle)
    }
}

/// Zip ring geometry with the current angles, preserving ring order.
#[must_use]
pub fn compose_hexagons(
    field: &RotationField,
    geometry: &[RingGeometry; RING_COUNT],
) -> [Hexagon; RING_COUNT] {
    let angles = field.angles();
    core::array::from_fn(|i| Hexagon {
        radius: geometry[i].radius,
        angle: angles[i],
        color: geometry[i].color,
    })
}

/// Corner points of a hexagon centred on the origin.
///
/// Corner `s` sits at `angle + TAU * s / 6`. Connect them in order and
/// back to the first to close the outline.
#[must_use]
pub fn hexagon_vertices(radius: f32, angle: f32) -> [(f32, f32); SIDES] {
    core::array::from_fn(|s| {
        let t = angle + TAU * s as f32 / SIDES as f32;
        (radius * libm::sinf(t), radius * libm::cosf(t))
    })
}

/// Hue sweep for the LED ring, scaled by the outermost ring's angle.
#[must_use]
pub fn compose_led_ring<const N: usize>(field: &RotationField) -> [Srgb<u8>; N] {
    let reference = field.reference_angle();
    // A single LED has no span to sweep; it stays at hue 0.
    let span = N.saturating_sub(1).max(1) as f32;
    core::array::from_fn(|i| hsv_to_rgb(i as f32 / span * reference, LED_SATURATION, LED_VALUE))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LabelKind {
    Name,
    Prompt,
}

/// Text drawn over the rings. `position` is the baseline origin of the
/// first line, relative to the ring centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label<'a> {
    pub kind: LabelKind,
    pub text: &'a str,
    pub position: (f32, f32),
    pub font: Font,
}

/// The name centred on its measured width, or the fixed set-your-name prompt.
pub fn compose_label<'a>(name: Option<&'a str>, metrics: &impl TextMetrics) -> Label<'a> {
    match name {
        Some(text) => {
            let width = metrics.text_width(text, NAME_FONT);
            Label {
                kind: LabelKind::Name,
                text,
                position: (-width / 2.0, NAME_HALF_HEIGHT),
                font: NAME_FONT,
            }
        }
        None => Label {
            kind: LabelKind::Prompt,
            text: NAME_PROMPT,
            position: PROMPT_POSITION,
            font: PROMPT_FONT,
        },
    }
}

/// Everything the renderer needs for one frame, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    pub hexagons: [Hexagon; RING_COUNT],
    pub label: Label<'a>,
}

/// Holds the ring table and builds per-frame output from it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneComposer {
    geometry: [RingGeometry; RING_COUNT],
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new(ring_geometry())
    }
}

impl SceneComposer {
    #[must_use]
    pub const fn new(geometry: [RingGeometry; RING_COUNT]) -> Self {
        Self { geometry }
    }

    pub const fn geometry(&self) -> &[RingGeometry; RING_COUNT] {
        &self.geometry
    }

    pub fn scene<'a>(
        &self,
        field: &RotationField,
        name: Option<&'a str>,
        metrics: &impl TextMetrics,
    ) -> Scene<'a> {
        Scene {
            hexagons: compose_hexagons(field, &self.geometry),
            label: compose_label(name, metrics),
        }
    }

    #[must_use]
    pub fn leds(&self, field: &RotationField) -> [Srgb<u8>; LED_RING_COUNT] {
        compose_led_ring(field)
    }
}
