#![forbid(unsafe_code)]

use std::path::PathBuf;

use osk_backend::{BackendError, BackendResult, System};
use osk_core::Image;

/// [`System`] that keeps screenshots in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSystem {
    screenshots: Vec<Image>,
    power_offs: usize,
    fail_screenshots: bool,
    fail_power_off: bool,
}

impl RecordingSystem {
    #[must_use]
    pub fn failing_screenshots(mut self) -> Self {
        self.fail_screenshots = true;
        self
    }

    #[must_use]
    pub fn failing_power_off(mut self) -> Self {
        self.fail_power_off = true;
        self
    }

    #[must_use]
    pub fn screenshots(&self) -> &[Image] {
        &self.screenshots
    }

    #[must_use]
    pub const fn power_offs(&self) -> usize {
        self.power_offs
    }
}

impl System for RecordingSystem {
    fn save_screenshot(&mut self, frame: &Image) -> BackendResult<PathBuf> {
        if self.fail_screenshots {
            return Err(BackendError::Io(std::io::Error::other("disk full")));
        }
        self.screenshots.push(frame.clone());
        Ok(PathBuf::from(format!(
            "screenshot{:04}.bmp",
            self.screenshots.len()
        )))
    }

    fn power_off(&mut self) -> BackendResult<()> {
        self.power_offs += 1;
        if self.fail_power_off {
            Err(BackendError::Rejected("power-off command missing"))
        } else {
            Ok(())
        }
    }
}
