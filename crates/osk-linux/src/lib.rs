#![deny(unsafe_code)]

//! Linux device backends for the on-screen keyboard.
//!
//! | Collaborator | Type | Device |
//! |---|---|---|
//! | `Canvas` | [`FramebufferCanvas`] | [`DEFAULT_FB_DEVICE`] |
//! | `InputSource` | [`JoypadInput`] | [`DEFAULT_JOYPAD_DEVICE`] |
//! | `Console` | [`VcsConsole`] | [`DEFAULT_VCS_DEVICE`] |
//! | `System` | [`HostSystem`] | [`DEFAULT_SCREENSHOT_DIR`], [`DEFAULT_POWEROFF`] |

pub mod framebuffer;
pub mod joypad;
mod sys;
pub mod system;
pub mod vcs;

pub use framebuffer::{FramebufferCanvas, Geometry};
pub use joypad::JoypadInput;
pub use system::HostSystem;
pub use vcs::VcsConsole;

pub const DEFAULT_FB_DEVICE: &str = "/dev/fb0";
pub const DEFAULT_JOYPAD_DEVICE: &str = "/dev/joypad";
pub const DEFAULT_VCS_DEVICE: &str = "/dev/vcs";
pub const DEFAULT_SCREENSHOT_DIR: &str = "/usr/screenshots";
pub const DEFAULT_POWEROFF: &str = "/sbin/poweroff";
