// src/common/types.rs

use super::error::UnknownSize;

/// Reporting mode of the sensor, tracked on the host side only.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Mode {
    /// Device streams data frames unsolicited, roughly once a second.
    #[default]
    Active,
    /// Device sends one data frame per on-demand read request.
    Passive,
}

impl Mode {
    /// Data byte of the set-mode command selecting this mode.
    pub const fn command_data(self) -> u8 {
        match self {
            Mode::Passive => 0x00,
            Mode::Active => 0x01,
        }
    }
}

/// Which of the two factory calibrations a mass concentration uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Calibration {
    /// CF=1, standard particle.
    #[default]
    Standard,
    /// Under atmospheric environment.
    Atmospheric,
}

/// Nominal sizes reported as mass concentration (µg/m³).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PmSize {
    Pm1_0,
    Pm2_5,
    Pm10,
}

impl PmSize {
    pub const ALL: [PmSize; 3] = [PmSize::Pm1_0, PmSize::Pm2_5, PmSize::Pm10];

    pub const fn microns(self) -> f32 {
        match self {
            PmSize::Pm1_0 => 1.0,
            PmSize::Pm2_5 => 2.5,
            PmSize::Pm10 => 10.0,
        }
    }
}

impl TryFrom<f32> for PmSize {
    type Error = UnknownSize;

    fn try_from(microns: f32) -> Result<Self, Self::Error> {
        PmSize::ALL
            .into_iter()
            .find(|size| size.microns() == microns)
            .ok_or(UnknownSize(microns))
    }
}

/// Thresholds reported as particle counts (beyond size, per 0.1 L of air).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParticleSize {
    Um0_3,
    Um0_5,
    Um1_0,
    Um2_5,
    Um5_0,
    Um10,
}

impl ParticleSize {
    pub const ALL: [ParticleSize; 6] = [
        ParticleSize::Um0_3,
        ParticleSize::Um0_5,
        ParticleSize::Um1_0,
        ParticleSize::Um2_5,
        ParticleSize::Um5_0,
        ParticleSize::Um10,
    ];

    pub const fn microns(self) -> f32 {
        match self {
            ParticleSize::Um0_3 => 0.3,
            ParticleSize::Um0_5 => 0.5,
            ParticleSize::Um1_0 => 1.0,
            ParticleSize::Um2_5 => 2.5,
            ParticleSize::Um5_0 => 5.0,
            ParticleSize::Um10 => 10.0,
        }
    }
}

impl TryFrom<f32> for ParticleSize {
    type Error = UnknownSize;

    fn try_from(microns: f32) -> Result<Self, Self::Error> {
        ParticleSize::ALL
            .into_iter()
            .find(|size| size.microns() == microns)
            .ok_or(UnknownSize(microns))
    }
}
