use crate::capacity::CapacityError;
use crate::text::LayoutError;

/// A field was outside of its documented bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} out of range [{min},{max}]: {actual}")]
pub struct RangeError {
    pub field: &'static str,
    pub min: u16,
    pub max: u16,
    pub actual: u16,
}

impl RangeError {
    pub(crate) fn check(field: &'static str, min: u8, max: u8, actual: u8) -> Result<u8, Self> {
        if actual < min || actual > max {
            return Err(Self {
                field,
                min: min.into(),
                max: max.into(),
                actual: actual.into(),
            });
        }
        Ok(actual)
    }
}

/// A pixel grid didn't match the fixed size of an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("doesn't match size {expected_width}x{expected_height}: {actual_width}x{actual_height}")]
pub struct GeometryError {
    pub expected_width: u32,
    pub expected_height: u32,
    pub actual_width: u32,
    pub actual_height: u32,
}

/// Errors reported by the controller, generic over the transport error.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("must set Config.blink_and_pwm_sets first")]
    NotConfigured,
    #[error("hard reset the device to change blink and PWM sets from {committed} to {requested}")]
    ConfigLock { committed: u8, requested: u8 },
    #[error("requires more than {max} frames: {required}")]
    TooManyFrames { required: usize, max: u8 },
    #[error("transport error: {0:?}")]
    Transport(E),
}

impl<E> From<CapacityError> for Error<E> {
    fn from(error: CapacityError) -> Self {
        match error {
            CapacityError::Range(range) => Error::Range(range),
            CapacityError::NotConfigured => Error::NotConfigured,
            CapacityError::ConfigLock {
                committed,
                requested,
            } => Error::ConfigLock {
                committed,
                requested,
            },
        }
    }
}

impl<E> From<LayoutError> for Error<E> {
    fn from(error: LayoutError) -> Self {
        match error {
            LayoutError::Geometry(geometry) => Error::Geometry(geometry),
            LayoutError::TooManyFrames { required, max } => Error::TooManyFrames { required, max },
        }
    }
}
