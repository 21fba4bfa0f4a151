use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error, ErrorKind, ErrorType, Operation, SevenBitAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeI2cError {
    Error,
}
impl Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Records every byte written to it and answers reads from `read_data`.
/// Each I2C transaction counts as one command for `failing_after`.
pub struct FakeI2cBus<const N: usize, const M: usize> {
    pub write_data: heapless::Vec<u8, N>,
    pub read_data: heapless::Vec<u8, M>,
    pub addresses: heapless::Vec<u8, N>,
    pub fail_after: Option<usize>,
}

impl<const N: usize, const M: usize> ErrorType for FakeI2cBus<N, M> {
    type Error = FakeI2cError;
}

impl<const N: usize, const M: usize> FakeI2cBus<N, M> {
    pub fn new() -> Self {
        Self {
            write_data: heapless::Vec::new(),
            read_data: heapless::Vec::new(),
            addresses: heapless::Vec::new(),
            fail_after: None,
        }
    }

    pub fn new_with_read_data(read_data: &[u8]) -> Self {
        Self {
            read_data: heapless::Vec::from_slice(read_data).unwrap(),
            ..Self::new()
        }
    }

    /// Fails every transaction after the first `transactions`.
    pub fn failing_after(mut self, transactions: usize) -> Self {
        self.fail_after = Some(transactions);
        self
    }

    pub fn write_data_as_ref(&self) -> &[u8] {
        self.write_data.as_slice()
    }

    pub fn read_data_as_ref(&self) -> &[u8] {
        self.read_data.as_slice()
    }

    pub fn addresses_as_ref(&self) -> &[u8] {
        self.addresses.as_slice()
    }
}

impl<const N: usize, const M: usize> embedded_hal::i2c::I2c for FakeI2cBus<N, M> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if let Some(remaining) = self.fail_after.as_mut() {
            if *remaining == 0 {
                return Err(FakeI2cError::Error);
            }
            *remaining -= 1;
        }

        self.addresses
            .push(address)
            .map_err(|_| FakeI2cError::Error)?;

        for operation in operations {
            match operation {
                Operation::Write(write) => {
                    self.write_data
                        .extend_from_slice(write)
                        .map_err(|_| FakeI2cError::Error)?;
                }
                Operation::Read(read) => {
                    for byte in read.iter_mut() {
                        if self.read_data.is_empty() {
                            return Err(FakeI2cError::Error);
                        }
                        *byte = self.read_data.remove(0);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Remembers how long it was asked to wait.
#[derive(Debug, Default)]
pub struct FakeDelay {
    pub waited_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waited_ns += u64::from(ns);
    }
}
