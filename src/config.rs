//! AS1130 register map and defaults.
//!
//! Datasheet: register selection address map (fig. 31) and control register
//! address map (fig. 38).

pub const DEFAULT_ADDRESS: u8 = 0x30;
pub const DEFAULT_CURRENT_SOURCE: u8 = 5;

/// Time the device needs after a reset before it accepts commands again.
pub const RESET_SETTLE_MS: u32 = 5;

pub const REGISTER_SELECT: u8 = 0xfd;

pub const ON_OFF_FRAME_FIRST: u8 = 0x01;
pub const ON_OFF_FRAME_LAST: u8 = 0x24;
pub const BLINK_PWM_SET_FIRST: u8 = 0x40;
pub const BLINK_PWM_SET_LAST: u8 = 0x45;
pub const CONTROL_PAGE: u8 = 0xc0;

// On/off and blink frame register format (fig. 34, 35)
pub const FRAME_SEGMENT_FIRST: u8 = 0x00;
pub const FRAME_SEGMENT_LAST: u8 = 0x17;

// PWM register format (fig. 36)
pub const PWM_SEGMENT_FIRST: u8 = 0x18;
pub const PWM_SEGMENT_LAST: u8 = 0x9b;

pub const ON_OFF_BYTES: usize = (FRAME_SEGMENT_LAST - FRAME_SEGMENT_FIRST) as usize + 1;
pub const PWM_BYTES: usize = (PWM_SEGMENT_LAST - PWM_SEGMENT_FIRST) as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedRegister {
    pub page: u8,
    pub register: u8,
}

const fn control(register: u8) -> PagedRegister {
    PagedRegister {
        page: CONTROL_PAGE,
        register,
    }
}

pub const PICTURE_REGISTER: PagedRegister = control(0x00);
pub const MOVIE_REGISTER: PagedRegister = control(0x01);
pub const MOVIE_MODE_REGISTER: PagedRegister = control(0x02);
pub const FRAME_TIME_REGISTER: PagedRegister = control(0x03);
pub const DISPLAY_OPTION_REGISTER: PagedRegister = control(0x04);
pub const CURRENT_SOURCE_REGISTER: PagedRegister = control(0x05);
pub const CONFIG_REGISTER: PagedRegister = control(0x06);
pub const INTERRUPT_MASK_REGISTER: PagedRegister = control(0x07);
pub const INTERRUPT_FRAME_REGISTER: PagedRegister = control(0x08);
pub const SHUTDOWN_REGISTER: PagedRegister = control(0x09);
pub const I2C_MONITORING_REGISTER: PagedRegister = control(0x0a);
pub const CLOCK_SYNC_REGISTER: PagedRegister = control(0x0b);
pub const INTERRUPT_STATUS_REGISTER: PagedRegister = control(0x0c);
pub const STATUS_REGISTER: PagedRegister = control(0x0d);

/// Page holding the on/off data of a 1-based frame.
pub const fn on_off_frame_page(frame: u8) -> u8 {
    ON_OFF_FRAME_FIRST + (frame - 1)
}

/// Page holding the blink and PWM data of a 1-based set.
pub const fn blink_pwm_set_page(set: u8) -> u8 {
    BLINK_PWM_SET_FIRST + (set - 1)
}
