#![forbid(unsafe_code)]

//! Virtual-console driver: keystroke injection and console switching.

use std::fs::File;
use std::os::fd::AsFd;
use std::path::PathBuf;

use osk_backend::{BackendError, BackendResult, Console};
use osk_core::OutputKey;

use crate::sys;

/// [`Console`] over the `/dev/vcs` control device.
#[derive(Debug)]
pub struct VcsConsole {
    path: PathBuf,
    file: Option<File>,
}

impl VcsConsole {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    fn file(&self) -> BackendResult<&File> {
        self.file.as_ref().ok_or(BackendError::NotInitialized)
    }

    fn change_console(&self, request: i32) -> BackendResult<usize> {
        let answer = sys::change_console(self.file()?.as_fd(), request)?;
        usize::try_from(answer).map_err(|_| BackendError::Rejected("console change refused"))
    }
}

impl Console for VcsConsole {
    fn initialize(&mut self) -> BackendResult<()> {
        self.file = Some(File::open(&self.path)?);
        Ok(())
    }

    fn send_key(&mut self, key: OutputKey) -> BackendResult<()> {
        let fd = self.file()?.as_fd();
        for &byte in key.bytes() {
            sys::put_char(fd, byte)?;
        }
        Ok(())
    }

    fn switch_to(&mut self, index: usize) -> BackendResult<usize> {
        let request =
            i32::try_from(index).map_err(|_| BackendError::Rejected("console index too large"))?;
        self.change_console(request)
    }

    fn active(&mut self) -> BackendResult<usize> {
        self.change_console(-1)
    }

    fn flush(&mut self) -> BackendResult<()> {
        sys::update_screen(self.file()?.as_fd())?;
        Ok(())
    }
}
