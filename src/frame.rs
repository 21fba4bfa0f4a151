use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use embedded_graphics::pixelcolor::{Gray8, GrayColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use crate::config::{ON_OFF_BYTES, PWM_BYTES};
use crate::error::GeometryError;

pub const OFF: Gray8 = Gray8::BLACK;
pub const ON: Gray8 = Gray8::WHITE;

/// Rows in one physical segment, every segment takes 11 PWM bytes.
const SEGMENT_ROWS: usize = 11;

/// Pixels in the largest frame.
pub const MAX_PIXELS: usize = 12 * 11;

/// Anything that can be sampled as a grayscale grid.
pub trait PixelGrid: OriginDimensions {
    /// Brightness of the pixel at `(x, y)`. Callers stay within `size()`.
    fn luma_at(&self, x: u32, y: u32) -> u8;
}

/// How the LEDs of a matrix are wired to the segments of the AS1130.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// 12x11 matrix with every LED connected.
    Matrix12x11,
    /// 24x5 matrix where the last LED of each segment is disconnected.
    #[default]
    Matrix24x5,
}

impl Geometry {
    pub const fn width(self) -> u32 {
        match self {
            Geometry::Matrix12x11 => 12,
            Geometry::Matrix24x5 => 24,
        }
    }

    pub const fn height(self) -> u32 {
        match self {
            Geometry::Matrix12x11 => 11,
            Geometry::Matrix24x5 => 5,
        }
    }

    pub const fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Segment and position within the segment of the LED at `(x, y)`.
    /// A 24x5 segment holds two columns, the first one in positions 0..5.
    fn segment_offset(self, x: u32, y: u32) -> (usize, usize) {
        match self {
            Geometry::Matrix12x11 => (x as usize, y as usize),
            Geometry::Matrix24x5 => {
                let rows = self.height() as usize;
                ((x / 2) as usize, (x % 2) as usize * rows + y as usize)
            }
        }
    }

    fn check(self, grid: &impl PixelGrid) -> Result<(), GeometryError> {
        let actual = grid.size();
        if actual != self.size() {
            return Err(GeometryError {
                expected_width: self.width(),
                expected_height: self.height(),
                actual_width: actual.width,
                actual_height: actual.height,
            });
        }
        Ok(())
    }

    /// Renders on/off LED data, two bytes per segment filled from the least
    /// significant bit. Pixels brighter than 0 are on.
    pub fn on_off_bytes(self, grid: &impl PixelGrid) -> Result<[u8; ON_OFF_BYTES], GeometryError> {
        self.check(grid)?;

        let mut data = [0; ON_OFF_BYTES];
        for x in 0..self.width() {
            for y in 0..self.height() {
                if grid.luma_at(x, y) > 0 {
                    let (segment, offset) = self.segment_offset(x, y);
                    data[segment * 2 + offset / 8] |= 1 << (offset % 8);
                }
            }
        }

        Ok(data)
    }

    /// Renders PWM (brightness) LED data, one byte per LED. Positions of
    /// disconnected LEDs stay 0.
    pub fn pwm_bytes(self, grid: &impl PixelGrid) -> Result<[u8; PWM_BYTES], GeometryError> {
        self.check(grid)?;

        let mut data = [0; PWM_BYTES];
        for x in 0..self.width() {
            for y in 0..self.height() {
                let (segment, offset) = self.segment_offset(x, y);
                data[segment * SEGMENT_ROWS + offset] = grid.luma_at(x, y);
            }
        }

        Ok(data)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid size")]
pub struct ParseGeometryError;

impl FromStr for Geometry {
    type Err = ParseGeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12x11" => Ok(Geometry::Matrix12x11),
            "24x5" => Ok(Geometry::Matrix24x5),
            _ => Err(ParseGeometryError),
        }
    }
}

/// One displayable image. Pixels are grayscale: any brightness above 0
/// turns the LED on, the brightness itself is used for PWM sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    geometry: Geometry,
    pixels: [u8; MAX_PIXELS],
    pwm_set: u8,
}

impl Frame {
    pub const fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            pixels: [0; MAX_PIXELS],
            pwm_set: 0,
        }
    }

    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Blink and PWM set used to display this frame, 0 means the default.
    pub const fn pwm_set(&self) -> u8 {
        self.pwm_set
    }

    pub fn set_pwm_set(&mut self, set: u8) {
        self.pwm_set = set;
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.geometry.width() && y < self.geometry.height() {
            Some((y * self.geometry.width() + x) as usize)
        } else {
            None
        }
    }

    /// Sets a single pixel, coordinates outside of the frame are ignored.
    pub fn set_luma(&mut self, x: u32, y: u32, luma: u8) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = luma;
        }
    }

    pub fn fill_luma(&mut self, luma: u8) {
        let len = (self.geometry.width() * self.geometry.height()) as usize;
        self.pixels[..len].fill(luma);
    }

    pub fn on_off_bytes(&self) -> Result<[u8; ON_OFF_BYTES], GeometryError> {
        self.geometry.on_off_bytes(self)
    }

    pub fn pwm_bytes(&self) -> Result<[u8; PWM_BYTES], GeometryError> {
        self.geometry.pwm_bytes(self)
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        self.geometry.size()
    }
}

impl PixelGrid for Frame {
    fn luma_at(&self, x: u32, y: u32) -> u8 {
        self.index(x, y).map_or(0, |index| self.pixels[index])
    }
}

impl DrawTarget for Frame {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_luma(point.x as u32, point.y as u32, color.luma());
            }
        }
        Ok(())
    }
}
