// src/common/measurement.rs

use super::checksum::verify_payload;
use super::error::{LengthSource, Pms5003Error};
use super::frame::{check_data_len, FrameHeader, DATA_LEN, FIELD_COUNT, FRAME_LEN, HEADER_LEN};
use super::types::{Calibration, ParticleSize, PmSize};
use core::fmt;

const RESERVED_INDEX: usize = 12;
const CHECKSUM_INDEX: usize = 13;
const ATMOSPHERIC_OFFSET: usize = 3;
const COUNT_OFFSET: usize = 6;

/// One decoded, checksum-verified data frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Measurement {
    header: FrameHeader,
    raw: [u8; DATA_LEN],
    fields: [u16; FIELD_COUNT],
}

impl Measurement {
    /// Decodes a payload assuming the standard data frame header.
    pub fn from_payload<E>(raw: &[u8]) -> Result<Self, Pms5003Error<E>>
    where
        E: fmt::Debug,
    {
        Self::decode(FrameHeader::data(), raw)
    }

    /// Decodes `raw` (the 28 bytes after the length field, checksum included)
    /// using the header bytes exactly as they were received.
    ///
    /// The length is checked before anything is unpacked, so a wrong-sized
    /// payload is always `FrameLength`, never `ChecksumMismatch`.
    pub fn decode<E>(header: FrameHeader, raw: &[u8]) -> Result<Self, Pms5003Error<E>>
    where
        E: fmt::Debug,
    {
        check_data_len(raw.len(), LengthSource::Payload)?;

        let mut bytes = [0u8; DATA_LEN];
        bytes.copy_from_slice(raw);

        let mut fields = [0u16; FIELD_COUNT];
        for (field, pair) in fields.iter_mut().zip(bytes.chunks_exact(2)) {
            *field = u16::from_be_bytes([pair[0], pair[1]]);
        }

        verify_payload(&header.to_bytes(), &bytes)?;

        Ok(Measurement { header, raw: bytes, fields })
    }

    /// Mass concentration in µg/m³.
    pub fn pm_ug_per_m3(&self, size: PmSize, calibration: Calibration) -> u16 {
        let index = match size {
            PmSize::Pm1_0 => 0,
            PmSize::Pm2_5 => 1,
            PmSize::Pm10 => 2,
        };
        match calibration {
            Calibration::Standard => self.fields[index],
            Calibration::Atmospheric => self.fields[index + ATMOSPHERIC_OFFSET],
        }
    }

    /// Number of particles beyond `size` in 0.1 L of air.
    pub fn particles_per_100ml(&self, size: ParticleSize) -> u16 {
        let index = match size {
            ParticleSize::Um0_3 => 0,
            ParticleSize::Um0_5 => 1,
            ParticleSize::Um1_0 => 2,
            ParticleSize::Um2_5 => 3,
            ParticleSize::Um5_0 => 4,
            ParticleSize::Um10 => 5,
        };
        self.fields[COUNT_OFFSET + index]
    }

    /// Raw field by position, 0 to 13.
    pub fn field(&self, index: usize) -> Option<u16> {
        self.fields.get(index).copied()
    }

    pub fn fields(&self) -> &[u16; FIELD_COUNT] {
        &self.fields
    }

    pub fn reserved(&self) -> u16 {
        self.fields[RESERVED_INDEX]
    }

    /// Checksum as stored in the frame (already verified).
    pub fn checksum(&self) -> u16 {
        self.fields[CHECKSUM_INDEX]
    }

    pub fn raw(&self) -> &[u8; DATA_LEN] {
        &self.raw
    }

    /// The frame this measurement was decoded from, header included.
    pub fn to_frame(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        frame[..HEADER_LEN].copy_from_slice(&self.header.to_bytes());
        frame[HEADER_LEN..].copy_from_slice(&self.raw);
        frame
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Calibration::*;
        writeln!(f, "PM1.0 ug/m3 (ultrafine particles):                             {}", self.pm_ug_per_m3(PmSize::Pm1_0, Standard))?;
        writeln!(f, "PM2.5 ug/m3 (combustion particles, organic compounds, metals): {}", self.pm_ug_per_m3(PmSize::Pm2_5, Standard))?;
        writeln!(f, "PM10 ug/m3  (dust, pollen, mould spores):                      {}", self.pm_ug_per_m3(PmSize::Pm10, Standard))?;
        writeln!(f, "PM1.0 ug/m3 (atmos env):                                       {}", self.pm_ug_per_m3(PmSize::Pm1_0, Atmospheric))?;
        writeln!(f, "PM2.5 ug/m3 (atmos env):                                       {}", self.pm_ug_per_m3(PmSize::Pm2_5, Atmospheric))?;
        writeln!(f, "PM10 ug/m3 (atmos env):                                        {}", self.pm_ug_per_m3(PmSize::Pm10, Atmospheric))?;
        for size in ParticleSize::ALL {
            writeln!(
                f,
                ">{:.1}um in 0.1L air:{:width$}{}",
                size.microns(),
                "",
                self.particles_per_100ml(size),
                width = 45
            )?;
        }
        Ok(())
    }
}
