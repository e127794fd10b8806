// src/session/sync_session/read.rs

use super::Pms5003;
use crate::common::{
    error::Pms5003Error,
    hal_traits::{Pms5003Serial, Pms5003Timer},
    measurement::Measurement,
    types::Mode,
};
use embedded_hal::digital::OutputPin;
use log::warn;

impl<S, EN, RST, T> Pms5003<S, EN, RST, T>
where
    S: Pms5003Serial,
    EN: OutputPin,
    RST: OutputPin,
    T: Pms5003Timer,
{
    /// Blocks until the next valid data frame has been read and decoded.
    ///
    /// In passive mode a read request is sent before every attempt.
    ///
    /// Checksum mismatches are retried up to `Config::retries` times by moving
    /// on to the next frame. Every other error is returned at once: a bad
    /// length field or a stalled channel means the stream itself is broken.
    /// Bytes consumed by a failed attempt are not replayed.
    ///
    /// # Errors
    ///
    /// * `ReadTimeout` if no start of frame shows up within `Config::read_timeout`.
    /// * `SerialTimeout` if the channel returns nothing for an expected byte.
    /// * `FrameLength` if the length field is not that of a data frame.
    /// * `ChecksumMismatch` once the retries are used up.
    pub fn read(&mut self) -> Result<Measurement, Pms5003Error<S::Error>> {
        let start = self.timer.now();
        let mut retries_left = self.config.retries;
        self.last_read_retries = 0;

        loop {
            if self.mode == Mode::Passive {
                self.cmd_read_passive()?;
            }

            match self.read_frame(start) {
                Ok(measurement) => return Ok(measurement),
                Err(e) if e.is_retryable() && retries_left > 0 => {
                    retries_left -= 1;
                    self.last_read_retries += 1;
                    warn!("PMS5003 {}, retrying ({} left)", e, retries_left);
                }
                Err(e) => {
                    if e.is_retryable() {
                        warn!("PMS5003 {}, no retries left", e);
                    }
                    return Err(e);
                }
            }
        }
    }
}
