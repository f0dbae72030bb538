#![forbid(unsafe_code)]

//! In-memory collaborators for driving the on-screen keyboard in tests.
//!
//! - [`ScriptedInput`]: replays a fixed list of samples.
//! - [`FakeCanvas`]: a pixel buffer that logs every clear and blit and can
//!   be told to start failing.
//! - [`RecordingConsole`]: records typed keys, switches and flushes.
//! - [`RecordingSystem`]: keeps screenshots in memory and counts power-offs.
//! - [`test_images`]: a full [`ImageSet`] whose pictures are solid colors, so
//!   a blit can be traced back to the image it came from.
//!
//! # Quick Start
//!
//! ```ignore
//! use osk_harness::{FakeCanvas, RecordingConsole, RecordingSystem, ScriptedInput, test_images};
//!
//! let mut ctl = Controller::new(
//!     Config::default(),
//!     test_images(),
//!     ScriptedInput::default(),
//!     FakeCanvas::default(),
//!     RecordingConsole::default(),
//!     RecordingSystem::default(),
//! );
//! ctl.initialize()?;
//! ctl.step(InputSample::pressed(Buttons::R_TRIGGER))?;
//! ```

pub mod canvas;
pub mod console;
pub mod input;
pub mod system;

pub use canvas::{CanvasOp, FakeCanvas};
pub use console::RecordingConsole;
pub use input::ScriptedInput;
pub use system::RecordingSystem;

use osk_core::image::pack_rgba;
use osk_core::{Image, ImageId, ImageSet};

/// Side of the square keyboard test images; each section is a third of it.
pub const KEYBOARD_SIZE: u32 = 150;
/// Side of the square mouse test image.
pub const MOUSE_SIZE: u32 = 30;

/// The solid color used for `id` in [`test_images`].
#[must_use]
pub const fn image_tag(id: ImageId) -> u32 {
    pack_rgba(id as u8 + 1, 0x40, 0x80, 0xff)
}

/// Map a pixel back to the test image it was drawn from.
#[must_use]
pub fn tag_image(pixel: u32) -> Option<ImageId> {
    ImageId::ALL.into_iter().find(|id| image_tag(*id) == pixel)
}

/// One solid-color picture per [`ImageId`].
#[must_use]
pub fn test_images() -> ImageSet {
    ImageSet::from_fn(|id| {
        let size = if id == ImageId::Mouse {
            MOUSE_SIZE
        } else {
            KEYBOARD_SIZE
        };
        Image::filled(size, size, image_tag(id))
    })
}
