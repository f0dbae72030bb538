#![forbid(unsafe_code)]

//! Device capabilities consumed by the on-screen keyboard runtime.
//!
//! The runtime never touches hardware directly. It talks to four
//! collaborators through the traits in this crate:
//!
//! - [`InputSource`]: one blocking controller sample per tick.
//! - [`Canvas`]: a 32-bit pixel surface the keyboard artwork is drawn on.
//! - [`Console`]: keystroke injection into the active virtual console and
//!   console switching.
//! - [`System`]: host side effects (screenshot files, power-off).
//!
//! Production wiring lives in `osk-linux`; deterministic fakes live in
//! `osk-harness`.

use std::fmt;
use std::io;
use std::path::PathBuf;

use osk_core::{Image, InputSample, OutputKey, Rect};

/// Error reported by a collaborator.
#[derive(Debug)]
pub enum BackendError {
    /// The underlying device call failed.
    Io(io::Error),
    /// A method was called before `initialize` succeeded.
    NotInitialized,
    /// A draw or clear touched pixels outside the surface.
    OutOfBounds {
        area: Rect,
        width: u32,
        height: u32,
    },
    /// The device refused the request.
    Rejected(&'static str),
    /// The device cannot do what was asked.
    Unsupported(&'static str),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "device I/O failed: {err}"),
            Self::NotInitialized => f.write_str("device not initialized"),
            Self::OutOfBounds {
                area,
                width,
                height,
            } => write!(
                f,
                "{}x{} at ({}, {}) does not fit a {width}x{height} surface",
                area.width, area.height, area.x, area.y
            ),
            Self::Rejected(msg) => write!(f, "rejected: {msg}"),
            Self::Unsupported(msg) => write!(f, "unsupported: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for BackendError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Result alias used by every collaborator.
pub type BackendResult<T> = Result<T, BackendError>;

/// Controller input.
pub trait InputSource {
    /// Acquire the device.
    fn initialize(&mut self) -> BackendResult<()>;

    /// Block until the next sample.
    ///
    /// Device errors are not propagated: they yield [`InputSample::EMPTY`].
    fn sample(&mut self) -> InputSample;
}

/// A 32-bit-per-pixel drawing surface.
pub trait Canvas {
    /// Acquire the device and learn its geometry.
    fn initialize(&mut self) -> BackendResult<()>;

    /// Visible size as `(width, height)`; `(0, 0)` before initialization.
    fn size(&self) -> (u32, u32);

    /// Fill `area` with zero pixels.
    fn clear(&mut self, area: Rect) -> BackendResult<()>;

    /// Copy `src` of `image` so its top-left lands on `(dest_x, dest_y)`.
    fn draw_region(
        &mut self,
        dest_x: u32,
        dest_y: u32,
        image: &Image,
        src: Rect,
    ) -> BackendResult<()>;

    /// Read back the whole visible surface.
    fn capture_frame(&mut self) -> BackendResult<Image>;

    /// Visible surface as a rectangle at the origin.
    fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        Rect::from_size(width, height)
    }
}

/// Virtual-console keystroke injection.
pub trait Console {
    fn initialize(&mut self) -> BackendResult<()>;

    /// Type one key into the active console.
    fn send_key(&mut self, key: OutputKey) -> BackendResult<()>;

    /// Request a switch to console `index`.
    ///
    /// Returns the index the device actually selected, which is
    /// authoritative.
    fn switch_to(&mut self, index: usize) -> BackendResult<usize>;

    /// Index of the console currently shown.
    fn active(&mut self) -> BackendResult<usize>;

    /// Ask the console to repaint the screen.
    fn flush(&mut self) -> BackendResult<()>;
}

/// Host-level side effects.
pub trait System {
    /// Persist a captured frame. Returns where it was written.
    fn save_screenshot(&mut self, frame: &Image) -> BackendResult<PathBuf>;

    /// Start shutting the device down. Must not wait for completion.
    fn power_off(&mut self) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            BackendError::NotInitialized.to_string(),
            "device not initialized"
        );
        assert_eq!(
            BackendError::Unsupported("16bpp").to_string(),
            "unsupported: 16bpp"
        );
        let oob = BackendError::OutOfBounds {
            area: Rect::new(400, 0, 150, 150),
            width: 480,
            height: 272,
        };
        assert_eq!(
            oob.to_string(),
            "150x150 at (400, 0) does not fit a 480x272 surface"
        );
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error as _;
        let err = BackendError::from(io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("boom"));
    }
}
