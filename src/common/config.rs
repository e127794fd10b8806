// src/common/config.rs

use super::timing;
use super::types::Mode;
use core::time::Duration;

/// Settings for a `Pms5003` session.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
    /// Mode `setup` leaves the device in.
    pub mode: Mode,
    /// Checksum failures tolerated per `read` before giving up.
    pub retries: u8,
    /// Overall budget for `read` to find a frame.
    pub read_timeout: Duration,
    /// Delay around the reset pulse.
    pub reset_settle: Duration,
    /// Delay after a set-mode command.
    pub command_settle: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::Active,
            retries: 5,
            read_timeout: timing::DEFAULT_READ_TIMEOUT,
            reset_settle: timing::RESET_SETTLE,
            command_settle: timing::COMMAND_SETTLE,
        }
    }
}

impl Config {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn with_reset_settle(mut self, reset_settle: Duration) -> Self {
        self.reset_settle = reset_settle;
        self
    }

    pub fn with_command_settle(mut self, command_settle: Duration) -> Self {
        self.command_settle = command_settle;
        self
    }
}
