//! Control register values and their single byte encodings.
//!
//! Each register is a small struct with descriptive fields. Zero values
//! select the documented default wherever the device has one. Frame numbers
//! are 1-based here and 0-based on the wire.

use crate::capacity::{MAX_BLINK_AND_PWM_SETS, MAX_FRAMES};
use crate::error::RangeError;

const fn bit(value: bool, position: u8) -> u8 {
    (value as u8) << position
}

const fn is_set(data: u8, position: u8) -> bool {
    data & (1 << position) != 0
}

fn frame_or_default(field: &'static str, frame: u8, max_frames: u8) -> Result<u8, RangeError> {
    let frame = if frame == 0 { 1 } else { frame };
    RangeError::check(field, 1, max_frames.min(MAX_FRAMES), frame)
}

/// Picture register format (fig. 39)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Picture {
    /// All LEDs in blink mode during display picture
    pub blink: bool,
    /// Display picture
    pub display: bool,
    /// Number of the picture frame, 1 if unset
    pub frame: u8,
}

impl Picture {
    pub fn encode(&self, max_frames: u8) -> Result<u8, RangeError> {
        let frame = frame_or_default("frame", self.frame, max_frames)?;
        Ok(bit(self.blink, 7) | bit(self.display, 6) | (frame - 1))
    }
}

/// Movie register format (fig. 40)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Movie {
    /// All LEDs in blink mode during play movie
    pub blink: bool,
    /// Display movie
    pub display: bool,
    /// Number of the first frame in the movie, 1 if unset
    pub frame: u8,
}

impl Movie {
    pub fn encode(&self, max_frames: u8) -> Result<u8, RangeError> {
        let frame = frame_or_default("frame", self.frame, max_frames)?;
        Ok(bit(self.blink, 7) | bit(self.display, 6) | (frame - 1))
    }
}

/// Movie mode register format (fig. 41)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovieMode {
    /// All LEDs in blink mode during play movie
    pub blink: bool,
    /// End the movie with the last frame instead of the first
    pub end_last: bool,
    /// Number of frames to play in the movie, 1 if unset
    pub frames: u8,
}

impl MovieMode {
    pub fn encode(&self, max_frames: u8) -> Result<u8, RangeError> {
        let frames = frame_or_default("frames", self.frames, max_frames)?;
        Ok(bit(self.blink, 7) | bit(self.end_last, 6) | (frames - 1))
    }
}

/// Frame time and scroll register format (fig. 42)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    /// Fade at the end of a frame
    pub fade: bool,
    /// Scroll right instead of left
    pub scroll_right: bool,
    /// Scroll in 12x11 mode instead of 24x5
    pub scroll_12x11: bool,
    /// Scroll digits during play movie
    pub scrolling: bool,
    /// Delay between frame changes in a movie, multiple of 32.5ms
    pub delay: u8,
}

impl FrameTime {
    pub const MAX_DELAY: u8 = 15;

    pub fn encode(&self) -> Result<u8, RangeError> {
        let delay = RangeError::check("delay", 0, Self::MAX_DELAY, self.delay)?;

        Ok(bit(self.fade, 7)
            | bit(!self.scroll_right, 6)
            | bit(!self.scroll_12x11, 5)
            | bit(self.scrolling, 4)
            | delay)
    }
}

/// Display option register format (fig. 43)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOption {
    /// Number of loops played in one movie, forever (7) if unset
    pub loops: u8,
    /// Blink every 3s instead of 1.5s
    pub blink_frequency: bool,
    /// Number of displayed segments in one frame, all (12) if unset
    pub scan_limit: u8,
}

impl DisplayOption {
    pub const MAX_LOOPS: u8 = 7;
    pub const MAX_SCAN_LIMIT: u8 = 12;

    pub fn encode(&self) -> Result<u8, RangeError> {
        let loops = match self.loops {
            0 => Self::MAX_LOOPS,
            loops => RangeError::check("loops", 1, Self::MAX_LOOPS, loops)?,
        };
        let scan_limit = match self.scan_limit {
            0 => Self::MAX_SCAN_LIMIT,
            limit => RangeError::check("scan_limit", 1, Self::MAX_SCAN_LIMIT, limit)?,
        };

        Ok(loops << 5 | bit(self.blink_frequency, 4) | (scan_limit - 1))
    }
}

/// Current source register, the current for all LEDs in mA.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CurrentSource {
    pub milliamps: u8,
}

impl CurrentSource {
    pub const MAX_MILLIAMPS: u8 = 30;

    pub fn encode(&self) -> Result<u8, RangeError> {
        let milliamps = RangeError::check("current", 0, Self::MAX_MILLIAMPS, self.milliamps)?;
        // Truncating keeps 15mA at the 0x7f midpoint
        Ok((u16::from(milliamps) * 255 / u16::from(Self::MAX_MILLIAMPS)) as u8)
    }
}

/// Config register format (fig. 45)
///
/// The config cannot be changed once frame data has been written, the
/// device needs a hard reset first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Reset LowVDD at the end of a movie or picture
    pub low_vdd_reset: bool,
    /// Map LowVDD to the IRQ pin
    pub low_vdd_status: bool,
    /// Disable open LEDs
    pub led_error_correction: bool,
    /// Analog current dot correction
    pub dot_correction: bool,
    /// I2C common address for all AS1130
    pub common_address: bool,
    /// Number of blink and PWM sets, 1 if unset, each uses 6 on/off frames
    pub blink_and_pwm_sets: u8,
}

impl Config {
    pub const SETS_MASK: u8 = 0b0000_0111;

    /// The number of sets that will be written, with the default applied.
    pub fn sets(&self) -> Result<u8, RangeError> {
        match self.blink_and_pwm_sets {
            0 => Ok(1),
            sets => RangeError::check("blink_and_pwm_sets", 1, MAX_BLINK_AND_PWM_SETS, sets),
        }
    }

    pub fn encode(&self) -> Result<u8, RangeError> {
        Ok(bit(self.low_vdd_reset, 7)
            | bit(self.low_vdd_status, 6)
            | bit(self.led_error_correction, 5)
            | bit(self.dot_correction, 4)
            | bit(self.common_address, 3)
            | self.sets()?)
    }
}

/// Interrupt mask register format (fig. 46). The interrupt status register
/// shares the same layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InterruptMask {
    /// Frame defined by the interrupt frame register is displayed
    pub frame: bool,
    /// The I2C watchdog triggered
    pub watchdog: bool,
    /// Power or reset occurred
    pub power_or_reset: bool,
    /// Overtemperature limit reached
    pub over_temp: bool,
    /// VDD too low for the used LEDs
    pub low_vdd: bool,
    /// Error on the open test
    pub open_error: bool,
    /// Error on the short test
    pub short_error: bool,
    /// Movie finished
    pub movie_finish: bool,
}

impl InterruptMask {
    pub fn encode(&self) -> u8 {
        bit(self.frame, 7)
            | bit(self.watchdog, 6)
            | bit(self.power_or_reset, 5)
            | bit(self.over_temp, 4)
            | bit(self.low_vdd, 3)
            | bit(self.open_error, 2)
            | bit(self.short_error, 1)
            | bit(self.movie_finish, 0)
    }

    pub fn decode(data: u8) -> Self {
        Self {
            frame: is_set(data, 7),
            watchdog: is_set(data, 6),
            power_or_reset: is_set(data, 5),
            over_temp: is_set(data, 4),
            low_vdd: is_set(data, 3),
            open_error: is_set(data, 2),
            short_error: is_set(data, 1),
            movie_finish: is_set(data, 0),
        }
    }
}

/// Interrupt frame register, the last frame of a movie that raises the
/// frame interrupt.
pub fn encode_interrupt_frame(last_frame: u8, max_frames: u8) -> Result<u8, RangeError> {
    Ok(RangeError::check("frame", 1, max_frames.min(MAX_FRAMES), last_frame)? - 1)
}

/// Shutdown and open/short register format (fig. 48)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Shutdown {
    /// LED open/short test is performed on all LED locations
    pub test_all: bool,
    /// Automatic LED open/short test when a picture or movie is displayed
    pub auto_test: bool,
    /// Manual LED open/short test after updating the shutdown register
    pub manual_test: bool,
    /// Reset the internal state machine
    pub initialise: bool,
    /// Turn the outputs off and stop the internal state machine
    pub shutdown: bool,
}

impl Shutdown {
    pub fn encode(&self) -> u8 {
        bit(self.test_all, 4)
            | bit(self.auto_test, 3)
            | bit(self.manual_test, 2)
            | bit(!self.initialise, 1)
            | bit(!self.shutdown, 0)
    }
}

/// Clock out frequency.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockFrequency {
    #[default]
    Mhz1 = 0,
    Khz500 = 1,
    Khz125 = 2,
    Khz32 = 3,
}

/// Source of the oscillator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    #[default]
    None,
    /// Internal oscillator is used and made available on the SYNC pin
    Out,
    /// Internal oscillator is disabled and the SYNC pin is used as input
    In,
}

/// Clock synchronization register format (fig. 50)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClockSync {
    pub frequency: ClockFrequency,
    pub sync: SyncMode,
}

impl ClockSync {
    pub fn encode(&self) -> u8 {
        (self.frequency as u8) << 2
            | bit(self.sync == SyncMode::Out, 1)
            | bit(self.sync == SyncMode::In, 0)
    }
}

/// Status register format (fig. 52)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Frame currently displayed, 1-based
    pub frame: u8,
    /// A movie is running
    pub movie: bool,
    /// An open/short test is running
    pub test: bool,
}

impl Status {
    pub fn decode(data: u8) -> Self {
        Self {
            frame: (data >> 2) + 1,
            movie: is_set(data, 1),
            test: is_set(data, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picture_test() {
        assert_eq!(Picture::default().encode(36), Ok(0b0000_0000));

        let picture = Picture {
            blink: true,
            display: true,
            frame: 36,
        };
        assert_eq!(picture.encode(36), Ok(0b1110_0011));

        let too_high = Picture {
            frame: 37,
            ..Default::default()
        };
        assert_eq!(
            too_high.encode(36),
            Err(RangeError {
                field: "frame",
                min: 1,
                max: 36,
                actual: 37,
            })
        );
    }

    #[test]
    fn movie_test() {
        assert_eq!(Movie::default().encode(36), Ok(0b0000_0000));

        let movie = Movie {
            blink: true,
            display: true,
            frame: 36,
        };
        assert_eq!(movie.encode(36), Ok(0b1110_0011));
        assert!(movie.encode(30).is_err());
    }

    #[test]
    fn movie_mode_test() {
        assert_eq!(MovieMode::default().encode(36), Ok(0b0000_0000));

        let mode = MovieMode {
            blink: true,
            end_last: true,
            frames: 36,
        };
        assert_eq!(mode.encode(36), Ok(0b1110_0011));

        let too_many = MovieMode {
            frames: 37,
            ..Default::default()
        };
        assert_eq!(too_many.encode(36).unwrap_err().field, "frames");
    }

    #[test]
    fn frame_time_test() {
        assert_eq!(FrameTime::default().encode(), Ok(0b0110_0000));

        let frame_time = FrameTime {
            fade: true,
            scroll_right: true,
            scroll_12x11: true,
            scrolling: true,
            delay: 15,
        };
        assert_eq!(frame_time.encode(), Ok(0b1001_1111));

        let too_slow = FrameTime {
            delay: 16,
            ..Default::default()
        };
        assert_eq!(
            too_slow.encode(),
            Err(RangeError {
                field: "delay",
                min: 0,
                max: 15,
                actual: 16,
            })
        );
    }

    #[test]
    fn display_option_test() {
        assert_eq!(DisplayOption::default().encode(), Ok(0b1110_1011));

        let option = DisplayOption {
            loops: 1,
            blink_frequency: true,
            scan_limit: 12,
        };
        assert_eq!(option.encode(), Ok(0b0011_1011));

        let loops = DisplayOption {
            loops: 8,
            ..Default::default()
        };
        assert_eq!(loops.encode().unwrap_err().field, "loops");

        let scan_limit = DisplayOption {
            scan_limit: 13,
            ..Default::default()
        };
        assert_eq!(scan_limit.encode().unwrap_err().field, "scan_limit");
    }

    #[test]
    fn current_source_test() {
        assert_eq!(CurrentSource { milliamps: 0 }.encode(), Ok(0x00));
        assert_eq!(CurrentSource { milliamps: 15 }.encode(), Ok(0x7f));
        assert_eq!(CurrentSource { milliamps: 30 }.encode(), Ok(0xff));
        assert_eq!(
            CurrentSource { milliamps: 31 }.encode(),
            Err(RangeError {
                field: "current",
                min: 0,
                max: 30,
                actual: 31,
            })
        );
    }

    #[test]
    fn config_test() {
        assert_eq!(Config::default().encode(), Ok(0b0000_0001));

        let config = Config {
            low_vdd_reset: true,
            low_vdd_status: true,
            led_error_correction: true,
            dot_correction: true,
            common_address: true,
            blink_and_pwm_sets: 6,
        };
        assert_eq!(config.encode(), Ok(0b1111_1110));

        let too_many = Config {
            blink_and_pwm_sets: 7,
            ..Default::default()
        };
        assert_eq!(
            too_many.encode(),
            Err(RangeError {
                field: "blink_and_pwm_sets",
                min: 1,
                max: 6,
                actual: 7,
            })
        );
    }

    #[test]
    fn interrupt_mask_test() {
        assert_eq!(InterruptMask::default().encode(), 0b0000_0000);

        let all = InterruptMask {
            frame: true,
            watchdog: true,
            power_or_reset: true,
            over_temp: true,
            low_vdd: true,
            open_error: true,
            short_error: true,
            movie_finish: true,
        };
        assert_eq!(all.encode(), 0b1111_1111);
    }

    #[test]
    fn interrupt_status_test() {
        assert_eq!(InterruptMask::decode(0b0000_0000), InterruptMask::default());
        assert_eq!(
            InterruptMask::decode(0b1010_1010),
            InterruptMask {
                frame: true,
                watchdog: false,
                power_or_reset: true,
                over_temp: false,
                low_vdd: true,
                open_error: false,
                short_error: true,
                movie_finish: false,
            }
        );

        for data in [0x00, 0xff, 0xaa, 0x55] {
            assert_eq!(InterruptMask::decode(data).encode(), data);
        }
    }

    #[test]
    fn interrupt_frame_test() {
        assert_eq!(encode_interrupt_frame(1, 36), Ok(0b0000_0000));
        assert_eq!(encode_interrupt_frame(36, 36), Ok(0b0010_0011));
        assert!(encode_interrupt_frame(0, 36).is_err());
        assert!(encode_interrupt_frame(37, 36).is_err());
        assert!(encode_interrupt_frame(64, 64).is_err());
    }

    #[test]
    fn frame_bound_limited_to_frame_memory_test() {
        let picture = Picture {
            frame: 100,
            ..Default::default()
        };
        assert_eq!(
            picture.encode(100),
            Err(RangeError {
                field: "frame",
                min: 1,
                max: 36,
                actual: 100,
            })
        );

        let movie = Movie {
            frame: 37,
            ..Default::default()
        };
        assert!(movie.encode(u8::MAX).is_err());

        let mode = MovieMode {
            frames: 37,
            ..Default::default()
        };
        assert!(mode.encode(u8::MAX).is_err());
    }

    #[test]
    fn shutdown_test() {
        assert_eq!(Shutdown::default().encode(), 0b0000_0011);

        let shutdown = Shutdown {
            test_all: true,
            auto_test: true,
            manual_test: true,
            initialise: true,
            shutdown: true,
        };
        assert_eq!(shutdown.encode(), 0b0001_1100);
    }

    #[test]
    fn clock_sync_test() {
        assert_eq!(ClockSync::default().encode(), 0b0000_0000);

        let slow = ClockSync {
            frequency: ClockFrequency::Khz32,
            ..Default::default()
        };
        assert_eq!(slow.encode(), 0b0000_1100);

        let out = ClockSync {
            sync: SyncMode::Out,
            ..Default::default()
        };
        assert_eq!(out.encode(), 0b0000_0010);

        let sync_in = ClockSync {
            sync: SyncMode::In,
            ..Default::default()
        };
        assert_eq!(sync_in.encode(), 0b0000_0001);
    }

    #[test]
    fn status_test() {
        let cases = [
            (0x00, 1, false, false),
            (0x8c, 36, false, false),
            (0x02, 1, true, false),
            (0x01, 1, false, true),
            (0xff, 64, true, true),
            (0xaa, 43, true, false),
            (0x55, 22, false, true),
        ];

        for (data, frame, movie, test) in cases {
            assert_eq!(Status::decode(data), Status { frame, movie, test });
        }
    }
}
