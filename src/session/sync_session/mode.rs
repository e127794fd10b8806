// src/session/sync_session/mode.rs

use super::Pms5003;
use crate::common::{
    command::Command,
    error::Pms5003Error,
    hal_traits::{Pms5003Serial, Pms5003Timer},
    types::Mode,
};
use embedded_hal::digital::OutputPin;
use log::debug;

impl<S, EN, RST, T> Pms5003<S, EN, RST, T>
where
    S: Pms5003Serial,
    EN: OutputPin,
    RST: OutputPin,
    T: Pms5003Timer,
{
    /// Mode last commanded by this session.
    ///
    /// The device is never queried. A frame already in flight when the mode
    /// changes can still arrive afterwards, so callers should tolerate one
    /// frame produced under the previous mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches the device to passive mode; `read` then requests each frame.
    pub fn cmd_mode_passive(&mut self) -> Result<(), Pms5003Error<S::Error>> {
        self.set_mode(Mode::Passive)
    }

    /// Switches the device back to streaming frames on its own.
    pub fn cmd_mode_active(&mut self) -> Result<(), Pms5003Error<S::Error>> {
        self.set_mode(Mode::Active)
    }

    /// Asks for a single data frame. Only meaningful in passive mode;
    /// `read` already sends this itself when the session is passive.
    pub fn cmd_read_passive(&mut self) -> Result<(), Pms5003Error<S::Error>> {
        self.send_command(Command::ReadPassive)
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), Pms5003Error<S::Error>> {
        self.send_command(Command::SetMode(mode))?;
        self.mode = mode;

        // The device answers with a short acknowledgement frame. Let it
        // arrive, then drop it along with anything sent under the old mode.
        self.delay(self.config.command_settle);
        self.serial.clear_input().map_err(Pms5003Error::Io)?;
        debug!("PMS5003 mode set to {:?}", mode);
        Ok(())
    }

    fn send_command(&mut self, command: Command) -> Result<(), Pms5003Error<S::Error>> {
        let frame = command.format_into();
        debug!("PMS5003 command {:?}: {:02x?}", command, frame.as_slice());
        self.send_command_bytes(&frame)
    }
}
