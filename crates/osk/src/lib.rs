#![forbid(unsafe_code)]

//! On-screen keyboard binary support: options, logging and artwork.

pub mod assets;
pub mod cli;
pub mod logging;
