//! Scrolling text.
//!
//! Text is rendered into one wide raster which is then cut into 24x5 frames.
//! A blank frame goes first so the text scrolls in from an empty display.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{Dimensions, DrawTarget, OriginDimensions, Pixel, Point, Size};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;

use crate::capacity::MAX_FRAMES;
use crate::error::GeometryError;
use crate::frame::{Frame, Geometry, PixelGrid};

pub const SPACER_FRAMES: usize = 1;

const GEOMETRY: Geometry = Geometry::Matrix24x5;
const FRAME_WIDTH: usize = GEOMETRY.width() as usize;
const RASTER_HEIGHT: u32 = GEOMETRY.height();

/// Widest raster that still fits the frame memory of the device.
pub const MAX_RASTER_WIDTH: usize = (MAX_FRAMES as usize - SPACER_FRAMES) * FRAME_WIDTH;

pub type Frames = heapless::Vec<Frame, { MAX_FRAMES as usize }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("requires more than {max} frames: {required}")]
    TooManyFrames { required: usize, max: u8 },
}

/// Number of frames needed to scroll a raster of the given width.
pub fn frames_for_width(width: usize) -> usize {
    SPACER_FRAMES + width.div_ceil(FRAME_WIDTH)
}

/// A monochrome raster as tall as a 24x5 frame and as wide as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    columns: heapless::Vec<u8, MAX_RASTER_WIDTH>,
}

impl Raster {
    pub fn new(width: u32) -> Result<Self, LayoutError> {
        let mut columns = heapless::Vec::new();
        columns
            .resize(width as usize, 0)
            .map_err(|_| LayoutError::TooManyFrames {
                required: frames_for_width(width as usize),
                max: MAX_FRAMES,
            })?;

        Ok(Self { columns })
    }

    pub fn width(&self) -> u32 {
        self.columns.len() as u32
    }

    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if y >= RASTER_HEIGHT {
            return;
        }
        if let Some(column) = self.columns.get_mut(x as usize) {
            if on {
                *column |= 1 << y;
            } else {
                *column &= !(1 << y);
            }
        }
    }
}

impl OriginDimensions for Raster {
    fn size(&self) -> Size {
        Size::new(self.width(), RASTER_HEIGHT)
    }
}

impl PixelGrid for Raster {
    fn luma_at(&self, x: u32, y: u32) -> u8 {
        match self.columns.get(x as usize) {
            Some(column) if y < RASTER_HEIGHT && column & (1 << y) != 0 => u8::MAX,
            _ => 0,
        }
    }
}

impl DrawTarget for Raster {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

/// Renders text with a 4 pixel wide font. The descender row of the font
/// doesn't fit on the display and is dropped.
pub fn render_text(text: &str) -> Result<Raster, LayoutError> {
    let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
    let text = Text::with_baseline(text, Point::zero(), style, Baseline::Top);

    let mut raster = Raster::new(text.bounding_box().size.width)?;
    text.draw(&mut raster).unwrap_or_else(|never| match never {});

    Ok(raster)
}

/// Slices a raster into frames for scrolling, starting with a blank frame.
/// The last frame is padded with unlit columns.
pub fn layout(raster: &impl PixelGrid) -> Result<Frames, LayoutError> {
    let size = raster.size();
    if size.height != RASTER_HEIGHT {
        return Err(GeometryError {
            expected_width: size.width,
            expected_height: RASTER_HEIGHT,
            actual_width: size.width,
            actual_height: size.height,
        }
        .into());
    }

    let width = size.width as usize;
    let required = frames_for_width(width);
    let too_many = LayoutError::TooManyFrames {
        required,
        max: MAX_FRAMES,
    };
    if required > usize::from(MAX_FRAMES) {
        return Err(too_many);
    }

    let mut frames = Frames::new();
    frames.push(Frame::new(GEOMETRY)).map_err(|_| too_many)?;

    for left in (0..width).step_by(FRAME_WIDTH) {
        let mut frame = Frame::new(GEOMETRY);
        for x in 0..FRAME_WIDTH.min(width - left) {
            for y in 0..RASTER_HEIGHT {
                frame.set_luma(x as u32, y, raster.luma_at((left + x) as u32, y));
            }
        }
        frames.push(frame).map_err(|_| too_many)?;
    }

    Ok(frames)
}
