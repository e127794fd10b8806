// src/session/sync_session/mod.rs

use crate::common::{
    config::Config,
    error::Pms5003Error,
    hal_traits::{Pms5003Serial, Pms5003Timer},
    types::Mode,
};
use core::time::Duration;
use embedded_hal::digital::{Error as _, OutputPin};
use log::debug;

mod io_helpers;
mod mode;
mod read;

#[cfg(test)]
mod test_support;

/// A PMS5003 attached to a serial channel plus its SET (enable) and RESET lines.
///
/// The session owns the channel, both lines and the timer for its whole
/// lifetime. It is single-owner and synchronous: calls block the caller and
/// must not be made concurrently.
#[derive(Debug)]
pub struct Pms5003<S, EN, RST, T>
where
    S: Pms5003Serial,
    EN: OutputPin,
    RST: OutputPin,
    T: Pms5003Timer,
{
    serial: S,
    enable: EN,
    reset: RST,
    timer: T,
    config: Config,
    mode: Mode,
    last_read_retries: u8,
}

impl<S, EN, RST, T> Pms5003<S, EN, RST, T>
where
    S: Pms5003Serial,
    EN: OutputPin,
    RST: OutputPin,
    T: Pms5003Timer,
{
    /// Wraps the parts without touching the hardware; call `setup` next.
    pub fn new(serial: S, enable: EN, reset: RST, timer: T, config: Config) -> Self {
        Pms5003 {
            serial,
            enable,
            reset,
            timer,
            config,
            mode: Mode::Active,
            last_read_retries: 0,
        }
    }

    /// Powers the device up and resets it into the configured mode.
    ///
    /// Safe to call again on a running session; it replays the same sequence.
    pub fn setup(&mut self) -> Result<(), Pms5003Error<S::Error>> {
        debug!("PMS5003 setup, mode {:?}", self.config.mode);
        self.enable.set_high().map_err(|e| Pms5003Error::Pin(e.kind()))?;
        self.reset.set_high().map_err(|e| Pms5003Error::Pin(e.kind()))?;
        self.mode = self.config.mode;
        self.reset()
    }

    /// Pulses the RESET line and drops whatever was buffered, so the next
    /// read starts on a frame boundary.
    ///
    /// The device comes back in active mode; passive mode is re-sent if that
    /// is what the session is tracking.
    pub fn reset(&mut self) -> Result<(), Pms5003Error<S::Error>> {
        debug!("PMS5003 reset");
        self.delay(self.config.reset_settle);
        self.reset.set_low().map_err(|e| Pms5003Error::Pin(e.kind()))?;
        self.serial.clear_input().map_err(Pms5003Error::Io)?;
        self.delay(self.config.reset_settle);
        self.reset.set_high().map_err(|e| Pms5003Error::Pin(e.kind()))?;

        if self.mode == Mode::Passive {
            self.cmd_mode_passive()?;
        }
        Ok(())
    }

    /// Whether the channel has received bytes waiting. Never blocks.
    pub fn data_available(&self) -> bool {
        self.serial.bytes_available() > 0
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Retries the last `read` spent on checksum failures.
    pub fn last_read_retries(&self) -> u8 {
        self.last_read_retries
    }

    /// Gives back the channel, lines and timer, e.g. to rebind the channel.
    pub fn release(self) -> (S, EN, RST, T) {
        (self.serial, self.enable, self.reset, self.timer)
    }

    fn delay(&mut self, duration: Duration) {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        if ms > 0 {
            self.timer.delay_ms(ms);
        }
    }
}
