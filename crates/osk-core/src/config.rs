#![forbid(unsafe_code)]

//! Startup configuration consumed by the navigator and the console host.

use bitflags::bitflags;

bitflags! {
    /// Which controls may move the highlighted section.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputMode: u8 {
        /// Directional pad.
        const DPAD   = 0b01;
        /// Analog stick.
        const ANALOG = 0b10;
    }
}

impl Default for InputMode {
    fn default() -> Self {
        Self::ANALOG
    }
}

/// Smallest accepted number of virtual consoles.
pub const MIN_CONSOLES: u8 = 1;
/// Largest accepted number of virtual consoles.
pub const MAX_CONSOLES: u8 = 6;
/// Consoles cycled through when nothing else is configured.
pub const DEFAULT_CONSOLES: u8 = 4;

/// Resolved configuration. Fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub input: InputMode,
    consoles: u8,
    /// Only warnings and errors are logged.
    pub silent: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputMode::default(),
            consoles: DEFAULT_CONSOLES,
            silent: false,
        }
    }
}

impl Config {
    /// Number of virtual consoles the volume keys cycle through.
    #[must_use]
    pub const fn consoles(&self) -> u8 {
        self.consoles
    }

    /// Set the console count. Values outside
    /// [`MIN_CONSOLES`]`..=`[`MAX_CONSOLES`] are refused and leave the
    /// current value in place.
    pub fn set_consoles(&mut self, consoles: u8) -> bool {
        if (MIN_CONSOLES..=MAX_CONSOLES).contains(&consoles) {
            self.consoles = consoles;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn with_consoles(mut self, consoles: u8) -> Self {
        self.set_consoles(consoles);
        self
    }

    #[must_use]
    pub const fn with_input(mut self, input: InputMode) -> Self {
        self.input = input;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.input, InputMode::ANALOG);
        assert_eq!(config.consoles(), 4);
        assert!(!config.silent);
    }

    #[test]
    fn console_count_is_bounded() {
        let mut config = Config::default();
        assert!(!config.set_consoles(0));
        assert!(!config.set_consoles(7));
        assert_eq!(config.consoles(), 4);
        assert!(config.set_consoles(6));
        assert_eq!(config.consoles(), 6);
        assert_eq!(Config::default().with_consoles(1).consoles(), 1);
    }

    #[test]
    fn both_sources() {
        let config = Config::default().with_input(InputMode::all());
        assert_eq!(config.input, InputMode::DPAD | InputMode::ANALOG);
    }
}
