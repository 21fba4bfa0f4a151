#![no_std]

//! Driver for the AS1130 132 LED cross-plexing matrix driver.
//!
//! The device is addressed through register pages: every access selects a
//! page first and then writes or reads one address within it. Frames hold
//! the on/off state of the LEDs, blink and PWM sets hold blinking and
//! brightness, and a handful of control registers decide what is shown.

mod as1130;
pub mod capacity;
pub mod config;
mod error;
pub mod frame;
mod i2c;
pub mod registers;
#[cfg(test)]
mod test_utils;
pub mod text;
mod transport;

pub use crate::as1130::AS1130;
pub use crate::capacity::{Capacity, CapacityError};
pub use crate::error::{Error, GeometryError, RangeError};
pub use crate::frame::{Frame, Geometry, ParseGeometryError, PixelGrid};
pub use crate::i2c::I2cAdapter;
pub use crate::registers::*;
pub use crate::text::{layout, render_text, LayoutError, Raster};
pub use crate::transport::Transport;
