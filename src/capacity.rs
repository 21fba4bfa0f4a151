use crate::config::ON_OFF_FRAME_LAST;
use crate::error::RangeError;

pub const MAX_BLINK_AND_PWM_SETS: u8 = 6;

/// Every blink and PWM set beyond the first takes the space of this many
/// on/off frames.
pub const FRAMES_RESERVED_PER_SET: u8 = 6;

/// Frames available with a single blink and PWM set.
pub const MAX_FRAMES: u8 = ON_OFF_FRAME_LAST;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error("must set Config.blink_and_pwm_sets first")]
    NotConfigured,
    #[error("hard reset the device to change blink and PWM sets from {committed} to {requested}")]
    ConfigLock { committed: u8, requested: u8 },
}

/// Number of usable frames for a given number of blink and PWM sets.
pub fn max_frames_for(sets: u8) -> Result<u8, RangeError> {
    let sets = RangeError::check("blink_and_pwm_sets", 1, MAX_BLINK_AND_PWM_SETS, sets)?;
    Ok(MAX_FRAMES - (sets - 1) * FRAMES_RESERVED_PER_SET)
}

/// Tracks the number of blink and PWM sets committed to the device since
/// the last hard reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    sets: Option<u8>,
}

impl Capacity {
    pub const fn new() -> Self {
        Self { sets: None }
    }

    /// The committed number of sets, if any.
    pub fn sets(&self) -> Option<u8> {
        self.sets
    }

    /// Checks that `sets` could be committed without storing it.
    pub fn check(&self, sets: u8) -> Result<(), CapacityError> {
        RangeError::check("blink_and_pwm_sets", 1, MAX_BLINK_AND_PWM_SETS, sets)?;

        match self.sets {
            Some(committed) if committed != sets => Err(CapacityError::ConfigLock {
                committed,
                requested: sets,
            }),
            _ => Ok(()),
        }
    }

    /// Stores `sets` for the current reset epoch. Committing the same value
    /// again is allowed, a different one is not.
    pub fn commit(&mut self, sets: u8) -> Result<(), CapacityError> {
        self.check(sets)?;
        self.sets = Some(sets);
        Ok(())
    }

    pub fn max_frames(&self) -> Result<u8, CapacityError> {
        let sets = self.sets.ok_or(CapacityError::NotConfigured)?;
        Ok(max_frames_for(sets)?)
    }

    /// Forgets the committed value. Must be paired with a hard reset of the
    /// device.
    pub fn reset(&mut self) {
        self.sets = None;
    }
}
