#![forbid(unsafe_code)]

//! Framebuffer canvas.
//!
//! Pixels are written with positioned writes against the device node, one
//! row at a time, using the virtual (stride) width to find each row. Only
//! 32-bit framebuffers are supported.

use std::fs::{File, OpenOptions};
use std::os::fd::AsFd;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

use osk_backend::{BackendError, BackendResult, Canvas};
use osk_core::{Image, Rect};
use tracing::{debug, trace};

use crate::sys;

const BYTES_PER_PIXEL: u64 = 4;

/// Geometry learned from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    /// Pixels per row in memory.
    pub stride: u32,
}

impl Geometry {
    /// Byte offset of pixel `(x, y)`.
    #[must_use]
    pub const fn offset(&self, x: u32, y: u32) -> u64 {
        (y as u64 * self.stride as u64 + x as u64) * BYTES_PER_PIXEL
    }

    const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// Encode a run of pixels as device bytes.
#[must_use]
pub fn encode_row(pixels: &[u32]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
}

/// [`Canvas`] over a Linux framebuffer device.
#[derive(Debug)]
pub struct FramebufferCanvas {
    path: PathBuf,
    device: Option<(File, Geometry)>,
}

impl FramebufferCanvas {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            device: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn geometry(&self) -> Option<Geometry> {
        self.device.as_ref().map(|(_, geometry)| *geometry)
    }

    fn device(&self) -> BackendResult<(&File, Geometry)> {
        self.device
            .as_ref()
            .map(|(file, geometry)| (file, *geometry))
            .ok_or(BackendError::NotInitialized)
    }

    fn check_fits(geometry: Geometry, area: Rect) -> BackendResult<()> {
        if geometry.bounds().contains_rect(&area) {
            Ok(())
        } else {
            Err(BackendError::OutOfBounds {
                area,
                width: geometry.width,
                height: geometry.height,
            })
        }
    }

    /// Push written pixels out; failures are ignored like the display does.
    fn sync(file: &File) {
        if let Err(err) = file.sync_all() {
            trace!(error = %err, "framebuffer sync failed");
        }
    }
}

impl Canvas for FramebufferCanvas {
    fn initialize(&mut self) -> BackendResult<()> {
        let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let info = sys::screen_info(file.as_fd())?;
        if info.bits_per_pixel != 32 {
            return Err(BackendError::Unsupported(
                "framebuffer is not 32 bits per pixel",
            ));
        }
        let geometry = Geometry {
            width: info.xres,
            height: info.yres,
            stride: info.xres_virtual.max(info.xres),
        };
        debug!(
            path = %self.path.display(),
            width = geometry.width,
            height = geometry.height,
            stride = geometry.stride,
            "framebuffer opened"
        );
        self.device = Some((file, geometry));
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.geometry()
            .map_or((0, 0), |geometry| (geometry.width, geometry.height))
    }

    fn clear(&mut self, area: Rect) -> BackendResult<()> {
        let (file, geometry) = self.device()?;
        Self::check_fits(geometry, area)?;
        let zeros = vec![0u8; area.width as usize * BYTES_PER_PIXEL as usize];
        for y in area.y..area.bottom() {
            file.write_all_at(&zeros, geometry.offset(area.x, y))?;
        }
        Self::sync(file);
        Ok(())
    }

    fn draw_region(
        &mut self,
        dest_x: u32,
        dest_y: u32,
        image: &Image,
        src: Rect,
    ) -> BackendResult<()> {
        let (file, geometry) = self.device()?;
        Self::check_fits(geometry, src.at(dest_x, dest_y))?;
        for row in 0..src.height {
            let line = image
                .row(src.y + row, src.x, src.width)
                .ok_or(BackendError::OutOfBounds {
                    area: src,
                    width: image.width(),
                    height: image.height(),
                })?;
            file.write_all_at(&encode_row(line), geometry.offset(dest_x, dest_y + row))?;
        }
        Self::sync(file);
        Ok(())
    }

    fn capture_frame(&mut self) -> BackendResult<Image> {
        let (file, geometry) = self.device()?;
        let mut row = vec![0u8; geometry.width as usize * BYTES_PER_PIXEL as usize];
        let mut pixels = Vec::with_capacity(geometry.width as usize * geometry.height as usize);
        for y in 0..geometry.height {
            file.read_exact_at(&mut row, geometry.offset(0, y))?;
            pixels.extend(
                row.chunks_exact(4)
                    .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]])),
            );
        }
        Image::new(geometry.width, geometry.height, pixels)
            .ok_or(BackendError::Rejected("captured frame has the wrong size"))
    }
}
