#![forbid(unsafe_code)]

//! Pixel-buffer canvas with an operation log and fault injection.

use osk_backend::{BackendError, BackendResult, Canvas};
use osk_core::{Image, Rect};

/// Default surface size (the PSP screen).
pub const DEFAULT_WIDTH: u32 = 480;
pub const DEFAULT_HEIGHT: u32 = 272;

/// A successful clear or blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasOp {
    Clear(Rect),
    Draw {
        /// Destination on the canvas.
        dest: Rect,
        /// Source rectangle within the image.
        src: Rect,
        /// Top-left source pixel; identifies harness images.
        tag: u32,
    },
}

/// In-memory [`Canvas`].
#[derive(Debug, Clone)]
pub struct FakeCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    ops: Vec<CanvasOp>,
    calls: usize,
    initialized: bool,
    fail_init: bool,
    fail_capture: bool,
    fail_from: Option<usize>,
}

impl Default for FakeCanvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl FakeCanvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            ops: Vec::new(),
            calls: 0,
            initialized: false,
            fail_init: false,
            fail_capture: false,
            fail_from: None,
        }
    }

    /// Make `initialize` fail.
    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Make `capture_frame` fail.
    #[must_use]
    pub fn failing_capture(mut self) -> Self {
        self.fail_capture = true;
        self
    }

    /// Let `ok` more clears/blits succeed, then fail every later one.
    pub fn fail_after(&mut self, ok: usize) {
        self.fail_from = Some(self.ops.len() + ok);
    }

    /// Fail every clear/blit from now on.
    pub fn fail_now(&mut self) {
        self.fail_after(0);
    }

    /// Successful operations so far.
    #[must_use]
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Drain the operation log.
    pub fn take_ops(&mut self) -> Vec<CanvasOp> {
        std::mem::take(&mut self.ops)
    }

    /// Every clear, blit or capture attempt, failed ones included.
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    fn begin(&mut self) -> BackendResult<()> {
        self.calls += 1;
        if !self.initialized {
            return Err(BackendError::NotInitialized);
        }
        if self.fail_from.is_some_and(|from| self.ops.len() >= from) {
            return Err(BackendError::Io(std::io::Error::other("injected write failure")));
        }
        Ok(())
    }

    fn check_fits(&self, area: Rect) -> BackendResult<()> {
        if Rect::from_size(self.width, self.height).contains_rect(&area) {
            Ok(())
        } else {
            Err(BackendError::OutOfBounds {
                area,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Canvas for FakeCanvas {
    fn initialize(&mut self) -> BackendResult<()> {
        if self.fail_init {
            return Err(BackendError::Rejected("no framebuffer"));
        }
        self.initialized = true;
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        if self.initialized {
            (self.width, self.height)
        } else {
            (0, 0)
        }
    }

    fn clear(&mut self, area: Rect) -> BackendResult<()> {
        self.begin()?;
        self.check_fits(area)?;
        for y in area.y..area.bottom() {
            let start = (y * self.width + area.x) as usize;
            self.pixels[start..start + area.width as usize].fill(0);
        }
        self.ops.push(CanvasOp::Clear(area));
        Ok(())
    }

    fn draw_region(
        &mut self,
        dest_x: u32,
        dest_y: u32,
        image: &Image,
        src: Rect,
    ) -> BackendResult<()> {
        self.begin()?;
        let dest = src.at(dest_x, dest_y);
        self.check_fits(dest)?;
        if !image.bounds().contains_rect(&src) {
            return Err(BackendError::OutOfBounds {
                area: src,
                width: image.width(),
                height: image.height(),
            });
        }
        for row in 0..src.height {
            let Some(line) = image.row(src.y + row, src.x, src.width) else {
                continue;
            };
            let start = ((dest.y + row) * self.width + dest.x) as usize;
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
        let tag = image.pixel(src.x, src.y).unwrap_or_default();
        self.ops.push(CanvasOp::Draw { dest, src, tag });
        Ok(())
    }

    fn capture_frame(&mut self) -> BackendResult<Image> {
        self.calls += 1;
        if !self.initialized {
            return Err(BackendError::NotInitialized);
        }
        if self.fail_capture {
            return Err(BackendError::Unsupported("capture disabled"));
        }
        Image::new(self.width, self.height, self.pixels.clone())
            .ok_or(BackendError::Rejected("frame size mismatch"))
    }
}
