#![forbid(unsafe_code)]

//! Console double that records what was typed.

use osk_backend::{BackendError, BackendResult, Console};
use osk_core::OutputKey;

/// In-memory [`Console`].
///
/// Switch requests past the last console are clamped to it, the way a
/// driver with fewer terminals than configured would answer.
#[derive(Debug, Clone)]
pub struct RecordingConsole {
    count: usize,
    active: usize,
    keys: Vec<OutputKey>,
    switches: Vec<usize>,
    flushes: usize,
    calls: usize,
    initialized: bool,
    fail_init: bool,
    fail_query: bool,
    reject_switches: bool,
}

impl Default for RecordingConsole {
    fn default() -> Self {
        Self::new(6)
    }
}

impl RecordingConsole {
    /// A console with `count` terminals, showing terminal 0.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
            active: 0,
            keys: Vec::new(),
            switches: Vec::new(),
            flushes: 0,
            calls: 0,
            initialized: false,
            fail_init: false,
            fail_query: false,
            reject_switches: false,
        }
    }

    #[must_use]
    pub fn showing(mut self, index: usize) -> Self {
        self.active = index;
        self
    }

    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Make the active-console query fail.
    #[must_use]
    pub fn failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    pub fn reject_switches(&mut self, reject: bool) {
        self.reject_switches = reject;
    }

    #[must_use]
    pub fn keys(&self) -> &[OutputKey] {
        &self.keys
    }

    /// Every byte written so far.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.keys.iter().flat_map(|key| key.bytes()).copied().collect()
    }

    /// Requested indices, in order, including rejected ones.
    #[must_use]
    pub fn switches(&self) -> &[usize] {
        &self.switches
    }

    #[must_use]
    pub const fn flushes(&self) -> usize {
        self.flushes
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Every trait call after initialization.
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }

    fn begin(&mut self) -> BackendResult<()> {
        self.calls += 1;
        if self.initialized {
            Ok(())
        } else {
            Err(BackendError::NotInitialized)
        }
    }
}

impl Console for RecordingConsole {
    fn initialize(&mut self) -> BackendResult<()> {
        if self.fail_init {
            return Err(BackendError::Rejected("no console device"));
        }
        self.initialized = true;
        Ok(())
    }

    fn send_key(&mut self, key: OutputKey) -> BackendResult<()> {
        self.begin()?;
        self.keys.push(key);
        Ok(())
    }

    fn switch_to(&mut self, index: usize) -> BackendResult<usize> {
        self.begin()?;
        self.switches.push(index);
        if self.reject_switches {
            return Err(BackendError::Rejected("console switch refused"));
        }
        self.active = index.min(self.count - 1);
        Ok(self.active)
    }

    fn active(&mut self) -> BackendResult<usize> {
        self.begin()?;
        if self.fail_query {
            return Err(BackendError::Unsupported("console query"));
        }
        Ok(self.active)
    }

    fn flush(&mut self) -> BackendResult<()> {
        self.begin()?;
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_keys_as_bytes() {
        let mut console = RecordingConsole::default();
        console.initialize().unwrap();
        console.send_key(OutputKey::Char(b'a')).unwrap();
        console.send_key(OutputKey::Up).unwrap();
        assert_eq!(console.bytes(), b"a\x1b[A");
    }

    #[test]
    fn switches_are_clamped() {
        let mut console = RecordingConsole::new(2);
        console.initialize().unwrap();
        assert_eq!(console.switch_to(5).unwrap(), 1);
        assert_eq!(console.switches(), &[5]);
    }

    #[test]
    fn uninitialized_calls_fail() {
        let mut console = RecordingConsole::default();
        assert!(console.flush().is_err());
    }
}
