// src/common/command.rs

//! Host to device command frames.

use arrayvec::ArrayVec;

use super::checksum::{calculate_checksum, encode_checksum};
use super::frame::SOF;
use super::types::Mode;

/// Command code selecting active or passive reporting.
pub const CMD_SET_MODE: u8 = 0xe1;
/// Command code requesting one data frame while in passive mode.
pub const CMD_READ_PASSIVE: u8 = 0xe2;

/// Data length field carried by every command frame.
pub const COMMAND_DATA_LEN: u16 = 0x0001;
/// Start marker, command byte, data length, data byte and checksum.
pub const COMMAND_FRAME_LEN: usize = 8;

/// Buffer holding one formatted command frame.
pub type CommandBuffer = ArrayVec<u8, COMMAND_FRAME_LEN>;

/// Commands the host can send to the sensor.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Switch between active and passive reporting.
    SetMode(Mode),
    /// Ask for one data frame (passive mode only).
    ReadPassive,
}

impl Command {
    pub const fn code(&self) -> u8 {
        match self {
            Command::SetMode(_) => CMD_SET_MODE,
            Command::ReadPassive => CMD_READ_PASSIVE,
        }
    }

    pub const fn data(&self) -> u8 {
        match self {
            Command::SetMode(mode) => mode.command_data(),
            Command::ReadPassive => 0x00,
        }
    }

    /// Formats the full frame, checksum over all preceding bytes appended.
    pub fn format_into(&self) -> CommandBuffer {
        let mut buffer = CommandBuffer::new();
        buffer.extend(SOF);
        buffer.push(self.code());
        buffer.extend(COMMAND_DATA_LEN.to_be_bytes());
        buffer.push(self.data());
        let checksum = calculate_checksum(&buffer);
        buffer.extend(encode_checksum(checksum));
        buffer
    }
}
