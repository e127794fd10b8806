// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Point in time as reported by a `Pms5003Timer`.
pub trait Pms5003Instant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> Pms5003Instant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for the clock and delays the driver needs.
///
/// Injected so tests can run on a virtual clock.
pub trait Pms5003Timer {
    type Instant: Pms5003Instant;

    /// Current monotonic time.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for the UART the sensor is attached to.
pub trait Pms5003Serial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Blocking read of up to `buf.len()` bytes.
    ///
    /// Implementations should block for no longer than their own short read
    /// timeout and return `Ok(0)` when nothing arrived in that time. The
    /// driver re-checks its overall deadline between calls.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;

    /// Discards everything currently buffered on the receive side.
    fn clear_input(&mut self) -> Result<(), Self::Error>;

    /// Number of received bytes waiting to be read.
    fn bytes_available(&self) -> usize;
}

/// `Pms5003Timer` on top of the std monotonic clock.
#[cfg(feature = "std")]
#[derive(Debug, Default, Copy, Clone)]
pub struct StdTimer;

#[cfg(feature = "std")]
impl Pms5003Timer for StdTimer {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
