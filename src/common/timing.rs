// src/common/timing.rs

use core::time::Duration;

// Nominal values from the datasheet and bench testing. The device is not
// crystal-accurate, so none of these are hard protocol deadlines.

/// UART speed the sensor talks at (8N1).
pub const BAUD_RATE: u32 = 9600;

/// 1 start bit + 8 data bits + 1 stop bit at 9600 baud.
pub const BYTE_DURATION: Duration = Duration::from_micros(1042);

/// Nominal spacing of data frames in active mode. Varies between units.
pub const ACTIVE_FRAME_INTERVAL: Duration = Duration::from_secs(1);

/// Overall budget for finding a frame in `read`.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay around the reset pulse and after asserting the control lines.
pub const RESET_SETTLE: Duration = Duration::from_millis(100);

/// Gap needed after a set-mode command before the next command is honoured.
/// 40 ms and below was seen to lose commands, 50 ms was reliable.
pub const COMMAND_SETTLE: Duration = Duration::from_millis(50);

/// Time allowed for the channel to take a single command byte.
pub const WRITE_BYTE_TIMEOUT: Duration = Duration::from_millis(20);

/// Time allowed for the transmit buffer to drain after a command.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(20);

/// Poll interval while a non-blocking write reports `WouldBlock`.
pub const WRITE_POLL_INTERVAL_MS: u32 = 1;
