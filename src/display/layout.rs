//! Dashboard layout and rendering.
//!
//! Rendering happens in two steps. [`compose`] turns a [`DashboardState`]
//! into a [`DrawList`] of positioned text and glyph commands, which keeps the
//! state-to-screen mapping testable without pixels. [`DrawList::draw`] then
//! rasterises those commands with `embedded-graphics`.
//!
//! # Layout (128x64)
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                                              │
//! │  G         SPEED        km/h                 │  ← y = 20
//! │                                              │
//! │                 ◁   ○   ▷                    │  ← y = 50..60
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The glyph matching the active page is filled, the other two are outlines.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10, FONT_9X15},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Triangle},
    text::{Baseline, Text},
};
use heapless::{String, Vec};

use crate::state::{DashboardState, PAGE_COUNT};

/// Top-left corner of the speed readout
pub const SPEED_ORIGIN: Point = Point::new(42, 20);
/// Top-left corner of the unit label
pub const UNIT_ORIGIN: Point = Point::new(80, 20);
/// Top-left corner of the gear digit
pub const GEAR_ORIGIN: Point = Point::new(10, 20);

pub const UNIT_LABEL: &str = "km/h";

/// Page indicator centre (middle glyph)
pub const INDICATOR_CENTER: Point = Point::new(64, 55);
const DOT_DIAMETER: u32 = 11;

/// Text sizes used by the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    fn font(self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &FONT_6X10,
            TextSize::Medium => &FONT_9X15,
            TextSize::Large => &FONT_10X20,
        }
    }
}

/// The three page glyphs, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    LeftArrow,
    Dot,
    RightArrow,
}

impl Glyph {
    /// Glyph for each page slot
    pub const SLOTS: [Glyph; PAGE_COUNT] = [Glyph::LeftArrow, Glyph::Dot, Glyph::RightArrow];

    /// A point inside the glyph, lit only when the glyph is filled
    pub fn interior(self) -> Point {
        match self {
            Glyph::LeftArrow => Point::new(52, 55),
            Glyph::Dot => INDICATOR_CENTER,
            Glyph::RightArrow => Point::new(76, 55),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Filled,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Text {
        text: String<8>,
        origin: Point,
        size: TextSize,
    },
    Glyph {
        glyph: Glyph,
        fill: Fill,
    },
}

/// Everything one frame draws, in drawing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawList {
    commands: Vec<DrawCommand, 8>,
}

impl DrawList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of the first text command drawn at `origin`
    pub fn text_at(&self, origin: Point) -> Option<&str> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Text { text, origin: o, .. } if *o == origin => Some(text.as_str()),
            _ => None,
        })
    }

    /// Fill of each page glyph, left to right
    pub fn glyph_fills(&self) -> [Option<Fill>; PAGE_COUNT] {
        let mut fills = [None; PAGE_COUNT];
        for cmd in &self.commands {
            if let DrawCommand::Glyph { glyph, fill } = cmd {
                if let Some(slot) = Glyph::SLOTS.iter().position(|g| g == glyph) {
                    fills[slot] = Some(*fill);
                }
            }
        }
        fills
    }

    fn push(&mut self, cmd: DrawCommand) {
        // Capacity covers the fixed layout; an overflow would be a layout bug
        if self.commands.push(cmd).is_err() {
            log::error!("Draw list full, command dropped");
        }
    }

    fn push_text(&mut self, origin: Point, size: TextSize, args: core::fmt::Arguments<'_>) {
        let mut text: String<8> = String::new();
        // core::fmt::Write on heapless::String; longest text is "km/h"
        let _ = text.write_fmt(args);
        self.push(DrawCommand::Text { text, origin, size });
    }

    /// Rasterise the commands onto a display buffer
    pub fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Text { text, origin, size } => {
                    let style = MonoTextStyle::new(size.font(), BinaryColor::On);
                    Text::with_baseline(text, *origin, style, Baseline::Top).draw(display)?;
                }
                DrawCommand::Glyph { glyph, fill } => draw_glyph(display, *glyph, *fill)?,
            }
        }
        Ok(())
    }
}

fn draw_glyph<D>(display: &mut D, glyph: Glyph, fill: Fill) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = match fill {
        Fill::Filled => PrimitiveStyle::with_fill(BinaryColor::On),
        Fill::Outline => PrimitiveStyle::with_stroke(BinaryColor::On, 1),
    };

    match glyph {
        Glyph::LeftArrow => Triangle::new(Point::new(54, 50), Point::new(49, 55), Point::new(54, 60))
            .into_styled(style)
            .draw(display),
        Glyph::Dot => Circle::with_center(INDICATOR_CENTER, DOT_DIAMETER)
            .into_styled(style)
            .draw(display),
        Glyph::RightArrow => Triangle::new(Point::new(74, 50), Point::new(79, 55), Point::new(74, 60))
            .into_styled(style)
            .draw(display),
    }
}

/// Map the dashboard state to draw commands
pub fn compose(state: &DashboardState) -> DrawList {
    let mut list = DrawList::default();

    list.push_text(SPEED_ORIGIN, TextSize::Large, format_args!("{}", state.speed()));
    list.push_text(UNIT_ORIGIN, TextSize::Small, format_args!("{}", UNIT_LABEL));
    list.push_text(GEAR_ORIGIN, TextSize::Medium, format_args!("{}", state.gear()));

    for (slot, glyph) in Glyph::SLOTS.into_iter().enumerate() {
        let fill = if slot == usize::from(state.page()) {
            Fill::Filled
        } else {
            Fill::Outline
        };
        list.push(DrawCommand::Glyph { glyph, fill });
    }

    list
}

/// Compose and draw in one go
pub fn render<D>(display: &mut D, state: &DashboardState) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    compose(state).draw(display)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::InitialState;
    use core::convert::Infallible;

    /// 128x64 one-bit frame buffer for checking what got drawn
    pub(crate) struct TestBuffer {
        pixels: [[bool; 128]; 64],
    }

    impl TestBuffer {
        pub(crate) fn new() -> Self {
            Self {
                pixels: [[false; 128]; 64],
            }
        }

        pub(crate) fn is_on(&self, p: Point) -> bool {
            self.pixels[p.y as usize][p.x as usize]
        }

        pub(crate) fn lit_in(&self, top_left: Point, size: Size) -> usize {
            let mut count = 0;
            for y in top_left.y..top_left.y + size.height as i32 {
                for x in top_left.x..top_left.x + size.width as i32 {
                    if self.is_on(Point::new(x, y)) {
                        count += 1;
                    }
                }
            }
            count
        }

        pub(crate) fn clear_all(&mut self) {
            self.pixels = [[false; 128]; 64];
        }
    }

    impl OriginDimensions for TestBuffer {
        fn size(&self) -> Size {
            Size::new(128, 64)
        }
    }

    impl DrawTarget for TestBuffer {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, color) in pixels {
                if (0..128).contains(&p.x) && (0..64).contains(&p.y) {
                    self.pixels[p.y as usize][p.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    fn state(speed: u8, gear: u8, page: u8) -> DashboardState {
        DashboardState::from_initial(InitialState { speed, gear, page })
    }

    #[test]
    fn compose_places_speed_gear_and_unit() {
        let list = compose(&state(60, 1, 1));
        assert_eq!(list.text_at(SPEED_ORIGIN), Some("60"));
        assert_eq!(list.text_at(GEAR_ORIGIN), Some("1"));
        assert_eq!(list.text_at(UNIT_ORIGIN), Some("km/h"));
    }

    #[test]
    fn compose_fits_largest_speed() {
        let list = compose(&state(255, 5, 0));
        assert_eq!(list.text_at(SPEED_ORIGIN), Some("255"));
        assert_eq!(list.text_at(GEAR_ORIGIN), Some("5"));
    }

    #[test]
    fn exactly_one_glyph_filled_per_page() {
        for page in 0..PAGE_COUNT as u8 {
            let fills = compose(&state(0, 0, page)).glyph_fills();
            for (slot, fill) in fills.iter().enumerate() {
                let expected = if slot == usize::from(page) {
                    Fill::Filled
                } else {
                    Fill::Outline
                };
                assert_eq!(*fill, Some(expected), "page {} slot {}", page, slot);
            }
            let filled = fills.iter().filter(|f| **f == Some(Fill::Filled)).count();
            assert_eq!(filled, 1);
        }
    }

    #[test]
    fn draw_fills_only_the_active_glyph() {
        let mut buffer = TestBuffer::new();
        for page in 0..PAGE_COUNT as u8 {
            buffer.clear_all();
            render(&mut buffer, &state(0, 0, page)).unwrap();
            for (slot, glyph) in Glyph::SLOTS.iter().enumerate() {
                assert_eq!(
                    buffer.is_on(glyph.interior()),
                    slot == usize::from(page),
                    "page {} glyph {:?}",
                    page,
                    glyph
                );
            }
        }
    }

    #[test]
    fn draw_puts_text_in_its_regions() {
        let mut buffer = TestBuffer::new();
        render(&mut buffer, &state(88, 3, 1)).unwrap();

        assert!(buffer.lit_in(SPEED_ORIGIN, Size::new(30, 20)) > 0);
        assert!(buffer.lit_in(GEAR_ORIGIN, Size::new(9, 15)) > 0);
        assert!(buffer.lit_in(UNIT_ORIGIN, Size::new(24, 10)) > 0);
        // Nothing between the gear digit and the speed
        assert_eq!(buffer.lit_in(Point::new(20, 20), Size::new(20, 20)), 0);
    }

    #[test]
    fn outline_glyphs_still_draw_edges() {
        let mut buffer = TestBuffer::new();
        render(&mut buffer, &state(0, 0, 1)).unwrap();
        // Vertical edges of both arrows
        assert!(buffer.is_on(Point::new(54, 55)));
        assert!(buffer.is_on(Point::new(74, 55)));
    }
}
