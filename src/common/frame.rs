// src/common/frame.rs

use super::checksum::{calculate_checksum, encode_checksum};
use super::error::{LengthSource, Pms5003Error};

/// Two-byte start of frame marker ("BM") opening every frame in both directions.
pub const SOF: [u8; 2] = [0x42, 0x4d];

/// Length of the start marker plus the length field.
pub const HEADER_LEN: usize = 4;
/// Total length of a data frame on the wire.
pub const FRAME_LEN: usize = 32;
/// Declared length of a data frame, includes the trailing checksum.
pub const DATA_LEN: usize = FRAME_LEN - HEADER_LEN;
/// Declared length of the acknowledgement sent after a set-mode command.
pub const ACK_DATA_LEN: usize = 4;
/// Big-endian u16 fields in a data frame payload, the checksum being the last.
pub const FIELD_COUNT: usize = DATA_LEN / 2;
/// Fields preceding the checksum (twelve measurements and the reserved word).
pub const VALUE_COUNT: usize = FIELD_COUNT - 1;

/// Fails with `FrameLength` unless `len` is the data frame length.
pub fn check_data_len<E>(len: usize, field: LengthSource) -> Result<(), Pms5003Error<E>>
where
    E: core::fmt::Debug,
{
    if len == DATA_LEN {
        Ok(())
    } else {
        Err(Pms5003Error::FrameLength { field, got: len, expected: DATA_LEN })
    }
}

/// Start marker and length field as received, both covered by the checksum.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameHeader {
    length_bytes: [u8; 2],
}

impl FrameHeader {
    pub const fn from_length_bytes(length_bytes: [u8; 2]) -> Self {
        FrameHeader { length_bytes }
    }

    /// Header a well-formed data frame carries.
    pub const fn data() -> Self {
        FrameHeader { length_bytes: (DATA_LEN as u16).to_be_bytes() }
    }

    pub fn length(&self) -> usize {
        usize::from(u16::from_be_bytes(self.length_bytes))
    }

    pub fn length_bytes(&self) -> [u8; 2] {
        self.length_bytes
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        [SOF[0], SOF[1], self.length_bytes[0], self.length_bytes[1]]
    }

    /// Rejects anything but a data frame before a payload is read.
    pub fn check_data_len<E>(&self) -> Result<(), Pms5003Error<E>>
    where
        E: core::fmt::Debug,
    {
        check_data_len(self.length(), LengthSource::LengthField)
    }
}

/// Matching state against the two start marker bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SofState {
    #[default]
    SeekingFirst,
    SeekingSecond,
}

/// Byte-at-a-time start marker matcher.
///
/// A stray byte drops back to `SeekingFirst`, except for a repeated first
/// marker byte which is itself the start of a new match ("BBM" still syncs).
#[derive(Debug, Default)]
pub struct SofMatcher {
    state: SofState,
}

impl SofMatcher {
    pub const fn new() -> Self {
        SofMatcher { state: SofState::SeekingFirst }
    }

    pub fn state(&self) -> SofState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = SofState::SeekingFirst;
    }

    /// Feeds one byte; returns `true` once both marker bytes were seen in order.
    pub fn feed(&mut self, byte: u8) -> bool {
        match (self.state, byte) {
            (SofState::SeekingSecond, b) if b == SOF[1] => {
                self.state = SofState::SeekingFirst;
                true
            }
            (_, b) if b == SOF[0] => {
                self.state = SofState::SeekingSecond;
                false
            }
            _ => {
                self.state = SofState::SeekingFirst;
                false
            }
        }
    }
}

/// Builds a complete data frame, checksum included, from the 13 values
/// preceding the checksum.
pub fn encode_data_frame(values: &[u16; VALUE_COUNT]) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[..HEADER_LEN].copy_from_slice(&FrameHeader::data().to_bytes());
    for (i, value) in values.iter().enumerate() {
        let at = HEADER_LEN + i * 2;
        frame[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }
    let checksum = calculate_checksum(&frame[..FRAME_LEN - 2]);
    frame[FRAME_LEN - 2..].copy_from_slice(&encode_checksum(checksum));
    frame
}
