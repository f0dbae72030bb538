#![forbid(unsafe_code)]

//! Core: input samples, analog quantization, keyboard layouts, geometry and
//! image resources for the on-screen keyboard.
//!
//! Nothing in this crate performs I/O. Device access lives behind the traits
//! in `osk-backend`.

pub mod analog;
pub mod config;
pub mod geometry;
pub mod image;
pub mod input;
pub mod keys;
pub mod layout;

pub use analog::{AnalogDirection, AxisClass, classify};
pub use config::{Config, InputMode};
pub use geometry::Rect;
pub use image::{Image, ImageId, ImageSet, pack_rgba, unpack_rgba};
pub use input::{Buttons, InputSample};
pub use keys::OutputKey;
pub use layout::{Face, Section, Variant};
