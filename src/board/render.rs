//! Draws scenes and the name-entry overlay onto the LCD.
//!
//! Polygons are drawn straight to the panel with no framebuffer. Each frame
//! first re-strokes the previous outlines in the background colour, so only
//! the pixels that changed are touched.

use embassy_time::{
    Duration,
    Timer,
};
use embedded_graphics::{
    mono_font::{
        MonoFont,
        MonoTextStyle,
        ascii::{
            FONT_6X10,
            FONT_6X13_ITALIC,
            FONT_9X18_BOLD,
            FONT_10X20,
        },
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        Line,
        PrimitiveStyle,
        PrimitiveStyleBuilder,
        Rectangle,
    },
    text::Text,
};
use palette::Srgb;

use super::display::{
    Display,
    HEIGHT,
    WIDTH,
};
use crate::{
    Error,
    Result,
    config::Config,
    io::{
        EntryView,
        RenderSink,
    },
    rotation::RING_COUNT,
    scene::{
        Font,
        FontStyle,
        Label,
        SIDES,
        Scene,
        TextMetrics,
    },
};

const CENTER: Point = Point::new(WIDTH as i32 / 2, HEIGHT as i32 / 2);
const BACKGROUND: Rgb565 = Rgb565::BLACK;
const FOREGROUND: Rgb565 = Rgb565::WHITE;
const PENDING: Rgb565 = Rgb565::CSS_ORANGE;
const PANEL_FILL: Rgb565 = Rgb565::new(2, 4, 8);

/// Scene units → pixels. The outer ring (radius 120) fits the panel height.
const RING_SCALE: f32 = (HEIGHT as f32 / 2.0 - 4.0) / 120.0;

const PANEL: Rectangle = Rectangle::new(Point::new(20, 40), Size::new(WIDTH - 40, HEIGHT - 80));

type Outline = [Point; SIDES];

/// LCD renderer. Frame pacing lives in [`render`](RenderSink::render), which
/// waits out the frame period after drawing. [`render_overlay`](RenderSink::render_overlay)
/// only yields, so the overlay redraws as fast as keys arrive.
pub struct DisplayRenderer<'a> {
    display: Display<'a>,
    frame_period: Duration,
    /// Outlines on screen, erased before the next frame is drawn.
    drawn: Option<[Outline; RING_COUNT]>,
}

impl<'a> DisplayRenderer<'a> {
    pub const fn new(display: Display<'a>, config: &Config) -> Self {
        Self {
            display,
            frame_period: config.frame_period,
            drawn: None,
        }
    }

    fn stroke(&mut self, outline: &Outline, color: Rgb565) -> Result<()> {
        let style = PrimitiveStyle::with_stroke(color, 1);
        for s in 0..SIDES {
            Line::new(outline[s], outline[(s + 1) % SIDES])
                .into_styled(style)
                .draw(&mut self.display)
                .map_err(|_| Error::Display)?;
        }
        Ok(())
    }

    fn draw_label(&mut self, label: &Label<'_>) -> Result<()> {
        let style = MonoTextStyle::new(mono_font(label.font), FOREGROUND);
        let (x, y) = label.position;
        Text::new(label.text, CENTER + Point::new(round(x), round(y)), style)
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;
        Ok(())
    }
}

impl TextMetrics for DisplayRenderer<'_> {
    fn text_width(&self, text: &str, font: Font) -> f32 {
        let font = mono_font(font);
        let advance = font.character_size.width + font.character_spacing;
        (text.chars().count() as u32 * advance) as f32
    }
}

impl RenderSink for DisplayRenderer<'_> {
    async fn render(&mut self, scene: &Scene<'_>) -> Result<()> {
        match self.drawn.take() {
            Some(previous) => {
                for outline in &previous {
                    self.stroke(outline, BACKGROUND)?;
                }
            }
            None => self.display.clear(BACKGROUND).map_err(|_| Error::Display)?,
        }

        let outlines: [Outline; RING_COUNT] = core::array::from_fn(|i| {
            scene.hexagons[i]
                .vertices()
                .map(|(x, y)| CENTER + Point::new(round(x * RING_SCALE), round(y * RING_SCALE)))
        });
        for (outline, hexagon) in outlines.iter().zip(&scene.hexagons) {
            self.stroke(outline, to_rgb565(hexagon.color))?;
        }
        self.drawn = Some(outlines);

        // Erasing may have cut through the text, so it is drawn every frame.
        self.draw_label(&scene.label)?;

        Timer::after(self.frame_period).await;
        Ok(())
    }

    async fn render_overlay(&mut self, view: &EntryView<'_>) -> Result<()> {
        // The panel covers part of the rings; start the next scene from a clean screen.
        self.drawn = None;

        PANEL
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .fill_color(PANEL_FILL)
                    .stroke_color(FOREGROUND)
                    .stroke_width(1)
                    .build(),
            )
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;

        let prompt = MonoTextStyle::new(&FONT_6X10, FOREGROUND);
        Text::new(view.prompt, PANEL.top_left + Point::new(8, 16), prompt)
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;

        let text_style = MonoTextStyle::new(&FONT_10X20, FOREGROUND);
        let origin = PANEL.top_left + Point::new(8, 50);
        let next = Text::new(view.text, origin, text_style)
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;

        let mut pending = [0_u8; 4];
        let pending_style = MonoTextStyle::new(&FONT_10X20, PENDING);
        Text::new(view.pending.encode_utf8(&mut pending), next, pending_style)
            .draw(&mut self.display)
            .map_err(|_| Error::Display)?;

        embassy_futures::yield_now().await;
        Ok(())
    }
}

fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font.style {
        FontStyle::Bold => &FONT_9X18_BOLD,
        FontStyle::Italic => &FONT_6X13_ITALIC,
    }
}

fn round(v: f32) -> i32 {
    libm::roundf(v) as i32
}

fn to_rgb565(c: Srgb<u8>) -> Rgb565 {
    Rgb565::new(c.red >> 3, c.green >> 2, c.blue >> 3)
}
