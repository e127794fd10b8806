// src/session/mod.rs

// Declare the sub-module
pub mod sync_session;

// Re-export the public session struct
pub use sync_session::Pms5003;
