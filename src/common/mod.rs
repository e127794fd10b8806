// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod checksum;
pub mod command;
pub mod config;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod measurement;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From checksum.rs
pub use checksum::{calculate_checksum, decode_checksum, encode_checksum, verify, verify_payload};

// From command.rs
pub use command::{Command, CommandBuffer};

// From config.rs
pub use config::Config;

// From error.rs
pub use error::{LengthSource, Pms5003Error, ReadStage, UnknownSize};

// From frame.rs
pub use frame::{encode_data_frame, FrameHeader, SofMatcher, SofState, DATA_LEN, FRAME_LEN, SOF};

// From hal_traits.rs
pub use hal_traits::{Pms5003Instant, Pms5003Serial, Pms5003Timer};

#[cfg(feature = "std")]
pub use hal_traits::StdTimer;

// From measurement.rs
pub use measurement::Measurement;

// From types.rs
pub use types::{Calibration, Mode, ParticleSize, PmSize};
