#![forbid(unsafe_code)]

//! Joypad input: one native-endian 32-bit word per blocking read.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use osk_backend::{BackendResult, InputSource};
use osk_core::InputSample;
use tracing::warn;

#[derive(Debug)]
pub struct JoypadInput {
    path: PathBuf,
    file: Option<File>,
}

impl JoypadInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }
}

impl InputSource for JoypadInput {
    fn initialize(&mut self) -> BackendResult<()> {
        self.file = Some(File::open(&self.path)?);
        Ok(())
    }

    fn sample(&mut self) -> InputSample {
        let Some(file) = self.file.as_mut() else {
            warn!("joypad read before initialize");
            return InputSample::EMPTY;
        };
        let mut word = [0u8; 4];
        match file.read_exact(&mut word) {
            Ok(()) => InputSample::from_raw(u32::from_ne_bytes(word)),
            Err(err) => {
                warn!(error = %err, "joypad read failed");
                InputSample::EMPTY
            }
        }
    }
}
