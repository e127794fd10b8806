// src/common/error.rs

use core::fmt;

/// Where a frame length was taken from when it failed validation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LengthSource {
    /// The 2-byte length field following the start marker.
    LengthField,
    /// The payload handed to the decoder.
    Payload,
}

impl fmt::Display for LengthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthSource::LengthField => f.write_str("length field"),
            LengthSource::Payload => f.write_str("data"),
        }
    }
}

/// Which part of a frame the channel starved on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReadStage {
    StartOfFrame,
    LengthField,
    Payload,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadStage::StartOfFrame => f.write_str("start of frame byte"),
            ReadStage::LengthField => f.write_str("length field"),
            ReadStage::Payload => f.write_str("frame payload"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Pms5003Error<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the serial channel.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// Driving the enable or reset line failed.
    #[error("control line error: {0:?}")]
    Pin(embedded_hal::digital::ErrorKind),

    /// Declared or actual frame length is not the data frame length.
    /// Structural, never retried.
    #[error("{field} length mismatch: got {got} bytes, expected {expected}")]
    FrameLength {
        field: LengthSource,
        got: usize,
        expected: usize,
    },

    /// Well-formed frame whose checksum does not add up.
    #[error("checksum mismatch: expected {expected:#06x}, calculated {calculated:#06x}")]
    ChecksumMismatch { expected: u16, calculated: u16 },

    /// No start of frame found within the overall read timeout.
    #[error("read timed out: could not find start of frame")]
    ReadTimeout,

    /// A single read on the channel returned nothing.
    #[error("serial read timed out on {stage}: got {got} of {expected} bytes")]
    SerialTimeout {
        stage: ReadStage,
        got: usize,
        expected: usize,
    },

    /// The channel would not accept a command byte in time.
    #[error("serial write timed out")]
    WriteTimeout,
}

impl<E: core::fmt::Debug> Pms5003Error<E> {
    /// Only a corrupted but well-formed frame is worth reading past.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Pms5003Error::ChecksumMismatch { .. })
    }
}

/// Caller asked for a particle size the sensor does not report.
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
#[error("particle size {0} um measurement not available")]
pub struct UnknownSize(pub f32);
