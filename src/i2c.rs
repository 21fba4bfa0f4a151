use crate::as1130::AS1130;
use crate::config::REGISTER_SELECT;
use crate::transport::Transport;

use embedded_hal::i2c::I2c;

impl<BUS: I2c> AS1130<I2cAdapter<BUS>> {
    /// Create a new AS1130 driver
    /// # Arguments
    /// * `i2c` - The I2C bus to use
    /// * `address` - The I2C address of the device
    ///
    /// # Returns
    /// A new AS1130 driver
    pub fn new_with_i2c_bus(i2c: BUS, address: u8) -> Self {
        Self::new(I2cAdapter::new(i2c, address))
    }
}

pub struct I2cAdapter<BUS: I2c> {
    i2c: BUS,
    address: u8,
}

impl<BUS: I2c> I2cAdapter<BUS> {
    pub fn new(i2c: BUS, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn into_inner(self) -> BUS {
        self.i2c
    }
}

impl<BUS: I2c> Transport for I2cAdapter<BUS> {
    type Error = BUS::Error;

    fn select(&mut self, register: u8) -> Result<(), BUS::Error> {
        self.i2c.write(self.address, &[REGISTER_SELECT, register])
    }

    fn write(&mut self, address: u8, data: u8) -> Result<(), BUS::Error> {
        self.i2c.write(self.address, &[address, data])
    }

    fn read(&mut self, address: u8) -> Result<u8, BUS::Error> {
        let mut buffer = [0; 1];
        self.i2c.write_read(self.address, &[address], &mut buffer)?;
        Ok(buffer[0])
    }
}
