// src/session/sync_session/test_support.rs

//! Mocks shared by the session tests: a virtual clock, serial channels and
//! control lines that all record into one event log.

use crate::common::{
    hal_traits::{Pms5003Serial, Pms5003Timer},
    timing,
};
use core::cell::{Cell, RefCell};
use core::time::Duration;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use heapless::Deque;
use std::rc::Rc;
use std::vec::Vec;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Pin(&'static str, bool),
    Delay(u32),
    ClearInput,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

// --- Mock Clock ---
#[derive(Debug, Clone, Default)]
pub struct MockClock(Rc<Cell<u64>>);

impl MockClock {
    pub fn now_us(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get().saturating_add(by.as_micros() as u64));
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Timer ---
pub struct MockTimer {
    clock: MockClock,
    log: EventLog,
}

impl MockTimer {
    pub fn new(clock: MockClock, log: EventLog) -> Self {
        MockTimer { clock, log }
    }
}

impl Pms5003Timer for MockTimer {
    type Instant = MockInstant;

    fn now(&self) -> Self::Instant {
        MockInstant(self.clock.now_us())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::Delay(ms));
        self.clock.advance(Duration::from_millis(u64::from(ms)));
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockCommError;

// --- Serial with a fixed-size receive buffer ---
/// Simulates a UART whose receive buffer holds `N` bytes and silently drops
/// whatever arrives while it is full.
pub struct RxSerial<const N: usize> {
    rx: Deque<u8, N>,
    pub written: Vec<u8>,
    pub fail_reads: bool,
    clock: MockClock,
    log: EventLog,
}

impl<const N: usize> RxSerial<N> {
    pub fn new(clock: MockClock, log: EventLog) -> Self {
        RxSerial {
            rx: Deque::new(),
            written: Vec::new(),
            fail_reads: false,
            clock,
            log,
        }
    }

    /// Adds received bytes, discarding anything that does not fit.
    pub fn simulate_rx(&mut self, data: &[u8]) -> usize {
        data.iter()
            .take_while(|&&byte| self.rx.push_back(byte).is_ok())
            .count()
    }
}

impl<const N: usize> Pms5003Serial for RxSerial<N> {
    type Error = MockCommError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_reads {
            return Err(MockCommError);
        }
        let mut count = 0;
        while count < buf.len() {
            match self.rx.pop_front() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        self.clock.advance(timing::BYTE_DURATION * count as u32);
        Ok(count)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.written.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }

    fn clear_input(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::ClearInput);
        self.rx.clear();
        Ok(())
    }

    fn bytes_available(&self) -> usize {
        self.rx.len()
    }
}

// --- Serial that only ever delivers zero bytes ---
pub struct ZeroSerial {
    clock: MockClock,
}

impl ZeroSerial {
    pub fn new(clock: MockClock) -> Self {
        ZeroSerial { clock }
    }
}

impl Pms5003Serial for ZeroSerial {
    type Error = MockCommError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        buf.fill(0);
        self.clock.advance(timing::BYTE_DURATION * buf.len() as u32);
        Ok(buf.len())
    }

    fn write_byte(&mut self, _byte: u8) -> nb::Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }

    fn clear_input(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn bytes_available(&self) -> usize {
        1
    }
}

// --- Mock control line ---
pub struct MockPin {
    name: &'static str,
    log: EventLog,
}

impl MockPin {
    pub fn new(name: &'static str, log: EventLog) -> Self {
        MockPin { name, log }
    }
}

impl ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Pin(self.name, true));
        Ok(())
    }
}

/// Control line whose driver always fails.
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

// --- Captured frames ---

// PMS5003 as seen from logic analyser
pub const GOOD_FRAME_1: [u8; 32] = [
    0x42, 0x4d, 0x00, 0x1c, 0x00, 0x02, 0x00, 0x04, 0x00, 0x04, 0x00, 0x02, 0x00, 0x04, 0x00,
    0x04, 0x02, 0xe8, 0x00, 0xd4, 0x00, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x97, 0x00,
    0x03, 0x34,
];

// PMS5003 from REPL on Feather nRF52840 Express
pub const GOOD_FRAME_2: [u8; 32] = *b"BM\x00\x1c\x00\x07\x00\t\x00\t\x00\x07\x00\t\x00\t\x05.\x01\x8a\x004\x00\x00\x00\x00\x00\x00\x97\x00\x02f";

/// `GOOD_FRAME_1` with its middle byte inverted.
pub fn bad_frame_1() -> [u8; 32] {
    let mut frame = GOOD_FRAME_1;
    let pos = frame.len() / 2;
    frame[pos] = !frame[pos];
    frame
}

pub type MockSession<S> = super::Pms5003<S, MockPin, MockPin, MockTimer>;

/// Everything a test needs to drive a session and inspect what it did.
pub struct Rig {
    pub clock: MockClock,
    pub log: EventLog,
}

impl Rig {
    pub fn new() -> Self {
        Rig { clock: MockClock::default(), log: Rc::new(RefCell::new(Vec::new())) }
    }

    pub fn serial<const N: usize>(&self) -> RxSerial<N> {
        RxSerial::new(self.clock.clone(), self.log.clone())
    }

    pub fn session<S: Pms5003Serial>(&self, serial: S, config: crate::common::Config) -> MockSession<S> {
        super::Pms5003::new(
            serial,
            MockPin::new("enable", self.log.clone()),
            MockPin::new("reset", self.log.clone()),
            MockTimer::new(self.clock.clone(), self.log.clone()),
            config,
        )
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().clear();
    }
}
