use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::capacity::Capacity;
use crate::config::*;
use crate::error::{Error, RangeError};
use crate::frame::Frame;
use crate::registers::*;
use crate::transport::Transport;

pub struct AS1130<T> {
    transport: T,
    capacity: Capacity,
}

impl<T: Transport> AS1130<T> {
    /// Create a new AS1130 driver
    /// # Arguments
    /// * `transport` - The transport to the device
    ///
    /// # Returns
    /// A new AS1130 driver with no blink and PWM sets committed
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            capacity: Capacity::new(),
        }
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Write a byte to an address of a register page
    ///
    /// # Arguments
    /// * `register` - The register page to select
    /// * `address` - The address within the page
    /// * `data` - The byte to write
    pub fn write(&mut self, register: u8, address: u8, data: u8) -> Result<(), Error<T::Error>> {
        trace!("write {register:#04x}:{address:#04x} = {data:#010b}");
        self.transport.select(register).map_err(Error::Transport)?;
        self.transport.write(address, data).map_err(Error::Transport)
    }

    /// Read a byte from an address of a register page
    ///
    /// # Arguments
    /// * `register` - The register page to select
    /// * `address` - The address within the page
    pub fn read(&mut self, register: u8, address: u8) -> Result<u8, Error<T::Error>> {
        self.transport.select(register).map_err(Error::Transport)?;
        let data = self.transport.read(address).map_err(Error::Transport)?;
        trace!("read {register:#04x}:{address:#04x} = {data:#010b}");
        Ok(data)
    }

    fn write_register(&mut self, register: PagedRegister, data: u8) -> Result<(), Error<T::Error>> {
        self.write(register.page, register.register, data)
    }

    fn read_register(&mut self, register: PagedRegister) -> Result<u8, Error<T::Error>> {
        self.read(register.page, register.register)
    }

    /// Performs the startup sequence with default settings. `start()` still
    /// needs to be called once all frames and related settings are written.
    pub fn init(&mut self, blink_and_pwm_sets: u8) -> Result<(), Error<T::Error>> {
        self.set_config(Config {
            blink_and_pwm_sets,
            ..Default::default()
        })?;
        self.set_current_source(DEFAULT_CURRENT_SOURCE)?;
        self.set_display_option(DisplayOption::default())?;

        Ok(())
    }

    /// Takes the device out of shutdown, enables the display and starts the
    /// state machine.
    pub fn start(&mut self) -> Result<(), Error<T::Error>> {
        self.set_shutdown(Shutdown::default())
    }

    /// Resets the device. The outputs and the state machine are shut down,
    /// the committed blink and PWM sets are forgotten and the device is given
    /// time to settle. `init()` needs to be called afterwards.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<T::Error>> {
        let result = self.set_shutdown(Shutdown {
            initialise: true,
            shutdown: true,
            ..Default::default()
        });
        self.capacity.reset();
        delay.delay_ms(RESET_SETTLE_MS);

        debug!("reset device");
        result
    }

    /// Total number of frames that can be used with the committed blink and
    /// PWM sets.
    pub fn max_frames(&self) -> Result<u8, Error<T::Error>> {
        Ok(self.capacity.max_frames()?)
    }

    fn committed_sets(&self) -> Result<u8, Error<T::Error>> {
        self.capacity.sets().ok_or(Error::NotConfigured)
    }

    pub fn set_picture(&mut self, picture: Picture) -> Result<(), Error<T::Error>> {
        let data = picture.encode(self.max_frames()?)?;
        self.write_register(PICTURE_REGISTER, data)
    }

    pub fn set_movie(&mut self, movie: Movie) -> Result<(), Error<T::Error>> {
        let data = movie.encode(self.max_frames()?)?;
        self.write_register(MOVIE_REGISTER, data)
    }

    pub fn set_movie_mode(&mut self, mode: MovieMode) -> Result<(), Error<T::Error>> {
        let data = mode.encode(self.max_frames()?)?;
        self.write_register(MOVIE_MODE_REGISTER, data)
    }

    pub fn set_frame_time(&mut self, frame_time: FrameTime) -> Result<(), Error<T::Error>> {
        let data = frame_time.encode()?;
        self.write_register(FRAME_TIME_REGISTER, data)
    }

    pub fn set_display_option(&mut self, option: DisplayOption) -> Result<(), Error<T::Error>> {
        let data = option.encode()?;
        self.write_register(DISPLAY_OPTION_REGISTER, data)
    }

    /// Sets the current for all LEDs, 0 to 30mA.
    pub fn set_current_source(&mut self, milliamps: u8) -> Result<(), Error<T::Error>> {
        let data = CurrentSource { milliamps }.encode()?;
        self.write_register(CURRENT_SOURCE_REGISTER, data)
    }

    /// Sets the config register. The number of blink and PWM sets is locked
    /// after the first write, both here and on the device, until a reset.
    pub fn set_config(&mut self, config: Config) -> Result<(), Error<T::Error>> {
        let sets = config.sets()?;
        let data = config.encode()?;
        self.capacity.check(sets)?;

        let latched = self.read_register(CONFIG_REGISTER)? & Config::SETS_MASK;
        if latched != 0 && latched != sets {
            return Err(Error::ConfigLock {
                committed: latched,
                requested: sets,
            });
        }

        self.write_register(CONFIG_REGISTER, data)?;
        self.capacity.commit(sets)?;

        debug!(
            "committed {sets} blink and PWM sets, {} frames available",
            self.max_frames()?
        );
        Ok(())
    }

    pub fn set_interrupt_mask(&mut self, mask: InterruptMask) -> Result<(), Error<T::Error>> {
        self.write_register(INTERRUPT_MASK_REGISTER, mask.encode())
    }

    /// Sets the frame that raises the frame interrupt, see
    /// `InterruptMask::frame`.
    pub fn set_interrupt_frame(&mut self, last_frame: u8) -> Result<(), Error<T::Error>> {
        let data = encode_interrupt_frame(last_frame, self.max_frames()?)?;
        self.write_register(INTERRUPT_FRAME_REGISTER, data)
    }

    pub fn set_shutdown(&mut self, shutdown: Shutdown) -> Result<(), Error<T::Error>> {
        self.write_register(SHUTDOWN_REGISTER, shutdown.encode())
    }

    pub fn set_clock_sync(&mut self, clock_sync: ClockSync) -> Result<(), Error<T::Error>> {
        self.write_register(CLOCK_SYNC_REGISTER, clock_sync.encode())
    }

    pub fn interrupt_status(&mut self) -> Result<InterruptMask, Error<T::Error>> {
        Ok(InterruptMask::decode(self.read_register(INTERRUPT_STATUS_REGISTER)?))
    }

    pub fn status(&mut self) -> Result<Status, Error<T::Error>> {
        Ok(Status::decode(self.read_register(STATUS_REGISTER)?))
    }

    /// Writes the on/off data of a frame, one command per segment byte.
    ///
    /// # Arguments
    /// * `index` - The 1-based frame number
    /// * `frame` - The frame, its PWM set defaults to 1
    pub fn set_frame(&mut self, index: u8, frame: &Frame) -> Result<(), Error<T::Error>> {
        let max_frames = self.max_frames()?;
        RangeError::check("frame", 1, max_frames, index)?;

        let pwm_set = match frame.pwm_set() {
            0 => 1,
            set => set,
        };
        RangeError::check("pwm_set", 1, self.committed_sets()?, pwm_set)?;

        let mut data = frame.on_off_bytes()?;
        data[1] |= (pwm_set - 1) << 5;

        let register = on_off_frame_page(index);
        for (segment, byte) in data.into_iter().enumerate() {
            self.write(register, FRAME_SEGMENT_FIRST + segment as u8, byte)?;
        }

        Ok(())
    }

    /// Writes frames in order starting with frame 1.
    ///
    /// # Returns
    /// The number of frames written
    pub fn set_frames(&mut self, frames: &[Frame]) -> Result<u8, Error<T::Error>> {
        let max = self.max_frames()?;
        if frames.len() > usize::from(max) {
            return Err(Error::TooManyFrames {
                required: frames.len(),
                max,
            });
        }

        for (index, frame) in (1..=max).zip(frames) {
            self.set_frame(index, frame)?;
        }

        Ok(frames.len() as u8)
    }

    /// Writes a blink and PWM set. LEDs lit in `blink` flash, the brightness
    /// of every LED is taken from `pwm`.
    ///
    /// # Arguments
    /// * `set` - The 1-based set number
    pub fn set_blink_and_pwm_set(
        &mut self,
        set: u8,
        blink: &Frame,
        pwm: &Frame,
    ) -> Result<(), Error<T::Error>> {
        RangeError::check("set", 1, self.committed_sets()?, set)?;

        let blink_data = blink.on_off_bytes()?;
        let pwm_data = pwm.pwm_bytes()?;

        let register = blink_pwm_set_page(set);
        for (segment, byte) in blink_data.into_iter().enumerate() {
            self.write(register, FRAME_SEGMENT_FIRST + segment as u8, byte)?;
        }
        for (segment, byte) in pwm_data.into_iter().enumerate() {
            self.write(register, PWM_SEGMENT_FIRST + segment as u8, byte)?;
        }

        Ok(())
    }
}
