// src/session/sync_session/io_helpers.rs

use super::Pms5003;
use crate::common::{
    error::{Pms5003Error, ReadStage},
    frame::{FrameHeader, SofMatcher, DATA_LEN},
    hal_traits::{Pms5003Serial, Pms5003Timer},
    measurement::Measurement,
    timing,
};
use core::time::Duration;
use embedded_hal::digital::OutputPin;
use log::trace;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<S, EN, RST, T> Pms5003<S, EN, RST, T>
where
    S: Pms5003Serial,
    EN: OutputPin,
    RST: OutputPin,
    T: Pms5003Timer,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, R>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<R, Pms5003Error<S::Error>>
    where
        FN: FnMut(&mut S) -> NbResult<R, S::Error>,
    {
        let deadline = self.timer.now() + timeout;

        loop {
            match f(&mut self.serial) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.timer.now() >= deadline {
                        return Err(Pms5003Error::WriteTimeout);
                    }
                    self.timer.delay_ms(timing::WRITE_POLL_INTERVAL_MS);
                }
                Err(nb::Error::Other(e)) => return Err(Pms5003Error::Io(e)),
            }
        }
    }

    /// Writes a formatted command frame and waits for it to drain.
    pub(super) fn send_command_bytes(&mut self, cmd_bytes: &[u8]) -> Result<(), Pms5003Error<S::Error>> {
        for &byte in cmd_bytes {
            self.execute_blocking_io_with_timeout(timing::WRITE_BYTE_TIMEOUT, |serial| {
                serial.write_byte(byte)
            })?;
        }
        self.execute_blocking_io_with_timeout(timing::FLUSH_TIMEOUT, |serial| serial.flush())
    }

    /// Reads one byte; an empty read is a channel stall, not a reason to wait.
    fn read_byte(&mut self, stage: ReadStage) -> Result<u8, Pms5003Error<S::Error>> {
        let mut byte = [0u8; 1];
        match self.serial.read(&mut byte).map_err(Pms5003Error::Io)? {
            0 => Err(Pms5003Error::SerialTimeout { stage, got: 0, expected: 1 }),
            _ => Ok(byte[0]),
        }
    }

    /// Fills `buf`, failing as soon as the channel returns nothing.
    fn read_exact(&mut self, buf: &mut [u8], stage: ReadStage) -> Result<(), Pms5003Error<S::Error>> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.serial.read(&mut buf[filled..]).map_err(Pms5003Error::Io)?;
            if n == 0 {
                return Err(Pms5003Error::SerialTimeout { stage, got: filled, expected: buf.len() });
            }
            filled += n;
        }
        Ok(())
    }

    /// Consumes bytes up to and including the next start of frame marker.
    ///
    /// `start` is when the enclosing `read` began; the overall timeout is
    /// checked before every byte, so its resolution is one channel read.
    fn sync_to_frame_start(&mut self, start: T::Instant) -> Result<(), Pms5003Error<S::Error>> {
        let mut matcher = SofMatcher::new();
        let mut skipped: usize = 0;

        loop {
            if self.timer.now() - start > self.config.read_timeout {
                return Err(Pms5003Error::ReadTimeout);
            }

            let byte = self.read_byte(ReadStage::StartOfFrame)?;
            if matcher.feed(byte) {
                if skipped > 0 {
                    trace!("skipped {} bytes before start of frame", skipped);
                }
                return Ok(());
            }
            skipped += 1;
        }
    }

    /// Locates, reads and decodes the next data frame on the channel.
    ///
    /// A bad length field is reported straight away rather than hunting for
    /// the next marker.
    pub(super) fn read_frame(&mut self, start: T::Instant) -> Result<Measurement, Pms5003Error<S::Error>> {
        self.sync_to_frame_start(start)?;

        let mut length_bytes = [0u8; 2];
        self.read_exact(&mut length_bytes, ReadStage::LengthField)?;
        let header = FrameHeader::from_length_bytes(length_bytes);
        header.check_data_len()?;

        let mut payload = [0u8; DATA_LEN];
        self.read_exact(&mut payload, ReadStage::Payload)?;

        Measurement::decode(header, &payload)
    }
}
