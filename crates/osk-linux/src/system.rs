#![forbid(unsafe_code)]

//! Host actions: screenshot files and the power-off command.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use image::codecs::bmp::BmpEncoder;
use image::{ExtendedColorType, ImageEncoder};
use osk_backend::{BackendError, BackendResult, System};
use osk_core::{Image, unpack_rgba};
use tracing::{debug, warn};

/// Highest screenshot number tried before giving up.
pub const MAX_SCREENSHOTS: u32 = 9999;

/// File name for screenshot number `index`.
#[must_use]
pub fn screenshot_name(index: u32) -> String {
    format!("screenshot{index:04}.bmp")
}

/// Frame pixels as RGBA bytes with every pixel made opaque.
#[must_use]
pub fn opaque_rgba(frame: &Image) -> Vec<u8> {
    frame
        .pixels()
        .iter()
        .flat_map(|&pixel| {
            let [r, g, b, _] = unpack_rgba(pixel);
            [r, g, b, 0xff]
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct HostSystem {
    screenshot_dir: PathBuf,
    poweroff: PathBuf,
}

impl HostSystem {
    pub fn new(screenshot_dir: impl Into<PathBuf>, poweroff: impl Into<PathBuf>) -> Self {
        Self {
            screenshot_dir: screenshot_dir.into(),
            poweroff: poweroff.into(),
        }
    }

    #[must_use]
    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }

    /// Create the first unused `screenshotNNNN.bmp`.
    fn create_next(&self) -> BackendResult<(PathBuf, File)> {
        for index in 1..=MAX_SCREENSHOTS {
            let path = self.screenshot_dir.join(screenshot_name(index));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(BackendError::Rejected("every screenshot slot is taken"))
    }
}

fn encode_bmp(file: File, frame: &Image) -> BackendResult<()> {
    let mut out = BufWriter::new(file);
    BmpEncoder::new(&mut out)
        .write_image(
            &opaque_rgba(frame),
            frame.width(),
            frame.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|err| BackendError::Io(io::Error::other(err)))?;
    out.flush()?;
    Ok(())
}

impl System for HostSystem {
    fn save_screenshot(&mut self, frame: &Image) -> BackendResult<PathBuf> {
        let (path, file) = self.create_next()?;
        if let Err(err) = encode_bmp(file, frame) {
            if let Err(cleanup) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %cleanup, "could not remove partial screenshot");
            }
            return Err(err);
        }
        Ok(path)
    }

    fn power_off(&mut self) -> BackendResult<()> {
        let mut child = Command::new(&self.poweroff)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        debug!(pid = child.id(), command = %self.poweroff.display(), "power-off spawned");
        thread::spawn(move || {
            if let Err(err) = child.wait() {
                warn!(error = %err, "power-off command was not reaped");
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use osk_core::pack_rgba;

    use super::*;

    fn frame() -> Image {
        let pixels = vec![
            pack_rgba(0xff, 0, 0, 0),
            pack_rgba(0, 0xff, 0, 0x10),
            pack_rgba(0, 0, 0xff, 0xff),
            pack_rgba(0x12, 0x34, 0x56, 0x78),
        ];
        Image::new(2, 2, pixels).unwrap()
    }

    #[test]
    fn names_are_zero_padded() {
        assert_eq!(screenshot_name(1), "screenshot0001.bmp");
        assert_eq!(screenshot_name(42), "screenshot0042.bmp");
        assert_eq!(screenshot_name(9999), "screenshot9999.bmp");
    }

    #[test]
    fn alpha_is_forced_opaque() {
        assert_eq!(
            opaque_rgba(&frame()),
            vec![
                0xff, 0, 0, 0xff, 0, 0xff, 0, 0xff, 0, 0, 0xff, 0xff, 0x12, 0x34, 0x56, 0xff
            ]
        );
    }

    #[test]
    fn screenshots_take_the_first_free_slot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(screenshot_name(1)), b"taken").unwrap();
        let mut system = HostSystem::new(dir.path(), "/bin/true");

        let first = system.save_screenshot(&frame()).unwrap();
        let second = system.save_screenshot(&frame()).unwrap();
        assert_eq!(first, dir.path().join("screenshot0002.bmp"));
        assert_eq!(second, dir.path().join("screenshot0003.bmp"));
        assert_eq!(fs::read(dir.path().join(screenshot_name(1))).unwrap(), b"taken");
    }

    #[test]
    fn screenshot_decodes_to_the_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut system = HostSystem::new(dir.path(), "/bin/true");
        let path = system.save_screenshot(&frame()).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [0xff, 0, 0, 0xff]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0xff, 0, 0xff]);
        assert_eq!(decoded.get_pixel(0, 1).0, [0, 0, 0xff, 0xff]);
        assert_eq!(decoded.get_pixel(1, 1).0, [0x12, 0x34, 0x56, 0xff]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let mut system = HostSystem::new("/nonexistent/screenshots", "/bin/true");
        assert!(matches!(
            system.save_screenshot(&frame()),
            Err(BackendError::Io(_))
        ));
    }

    #[test]
    fn missing_poweroff_command_fails_to_spawn() {
        let mut system = HostSystem::new("/tmp", "/nonexistent/poweroff");
        assert!(system.power_off().is_err());
    }
}
