// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod common;
pub mod session;

// Re-export key types for convenience
pub use common::{Config, Measurement, Mode, Pms5003Error};
pub use session::Pms5003;
