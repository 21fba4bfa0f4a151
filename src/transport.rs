/// Byte oriented access to the device. Every command is a register
/// selection followed by a write or read within the selected register.
pub trait Transport {
    type Error;

    /// Selects the register page following writes and reads go to.
    fn select(&mut self, register: u8) -> Result<(), Self::Error>;

    fn write(&mut self, address: u8, data: u8) -> Result<(), Self::Error>;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error>;
}

impl<T> Transport for &mut T
where
    T: Transport,
{
    type Error = T::Error;

    fn select(&mut self, register: u8) -> Result<(), Self::Error> {
        T::select(self, register)
    }

    fn write(&mut self, address: u8, data: u8) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8) -> Result<u8, Self::Error> {
        T::read(self, address)
    }
}
