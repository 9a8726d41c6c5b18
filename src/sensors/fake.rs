//! In-memory I2C bus and delay used by the unit tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub(crate) struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// A peripheral with a 256-byte register file. A device with a fixed reply
/// answers every read with it instead, the way command-driven parts do.
pub(crate) struct Device {
    registers: [u8; 256],
    pointer: u8,
    reply: Option<Vec<u8>>,
    writes: Vec<Vec<u8>>,
    fail_reads: bool,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            registers: [0; 256],
            pointer: 0,
            reply: None,
            writes: Vec::new(),
            fail_reads: false,
        }
    }
}

impl Device {
    pub(crate) fn with_register_block(mut self, start: u8, bytes: &[u8]) -> Self {
        for (offset, byte) in bytes.iter().enumerate() {
            self.registers[start as usize + offset] = *byte;
        }
        self
    }

    pub(crate) fn with_reply(mut self, reply: &[u8]) -> Self {
        self.reply = Some(reply.to_vec());
        self
    }

    fn write(&mut self, bytes: &[u8]) {
        self.writes.push(bytes.to_vec());
        if self.reply.is_some() {
            return;
        }
        if let Some((&register, payload)) = bytes.split_first() {
            self.pointer = register;
            for (offset, byte) in payload.iter().enumerate() {
                self.registers[(register as usize + offset) % 256] = *byte;
            }
        }
    }

    fn read(&mut self, buffer: &mut [u8]) {
        if let Some(reply) = &self.reply {
            for (slot, byte) in buffer.iter_mut().zip(reply) {
                *slot = *byte;
            }
            return;
        }
        for (offset, slot) in buffer.iter_mut().enumerate() {
            *slot = self.registers[(self.pointer as usize + offset) % 256];
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeBus {
    devices: Arc<Mutex<HashMap<u8, Device>>>,
}

impl FakeBus {
    pub(crate) fn attach(&self, address: u8, device: Device) {
        self.devices.lock().unwrap().insert(address, device);
    }

    pub(crate) fn set_reply(&self, address: u8, reply: &[u8]) {
        let mut devices = self.devices.lock().unwrap();
        devices.get_mut(&address).expect("no device at address").reply = Some(reply.to_vec());
    }

    pub(crate) fn fail_reads(&self, address: u8, fail: bool) {
        let mut devices = self.devices.lock().unwrap();
        devices.get_mut(&address).expect("no device at address").fail_reads = fail;
    }

    pub(crate) fn writes(&self, address: u8) -> Vec<Vec<u8>> {
        let devices = self.devices.lock().unwrap();
        devices
            .get(&address)
            .map(|device| device.writes.clone())
            .unwrap_or_default()
    }

    pub(crate) fn register(&self, address: u8, register: u8) -> u8 {
        self.devices.lock().unwrap()[&address].registers[register as usize]
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut devices = self.devices.lock().unwrap();
        let device = devices
            .get_mut(&address)
            .ok_or(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))?;

        for operation in operations {
            match operation {
                Operation::Write(bytes) => device.write(bytes),
                Operation::Read(buffer) => {
                    if device.fail_reads {
                        return Err(ErrorKind::ArbitrationLoss);
                    }
                    device.read(buffer)
                }
            }
        }
        Ok(())
    }
}
