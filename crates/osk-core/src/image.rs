#![forbid(unsafe_code)]

//! Bitmap resources.
//!
//! Pixels are 32-bit words in framebuffer order: read as little-endian
//! bytes they are R, G, B, A.

use crate::geometry::Rect;

/// Identifies one of the bundled pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Plain,
    PlainActive,
    Shifted,
    ShiftedActive,
    Numeric,
    NumericActive,
    Mouse,
}

impl ImageId {
    pub const ALL: [ImageId; 7] = [
        ImageId::Plain,
        ImageId::PlainActive,
        ImageId::Shifted,
        ImageId::ShiftedActive,
        ImageId::Numeric,
        ImageId::NumericActive,
        ImageId::Mouse,
    ];

    /// Asset base name, without extension.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ImageId::Plain => "plain",
            ImageId::PlainActive => "plain_active",
            ImageId::Shifted => "shifted",
            ImageId::ShiftedActive => "shifted_active",
            ImageId::Numeric => "numeric",
            ImageId::NumericActive => "numeric_active",
            ImageId::Mouse => "mouse",
        }
    }
}

/// Pack an RGBA quadruple into a framebuffer pixel.
#[inline]
#[must_use]
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

/// Split a framebuffer pixel into its RGBA quadruple.
#[inline]
#[must_use]
pub const fn unpack_rgba(pixel: u32) -> [u8; 4] {
    pixel.to_le_bytes()
}

/// A read-only 32-bit-per-pixel bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Image {
    /// Wrap row-major pixel data.
    ///
    /// Returns `None` unless `pixels.len() == width * height`.
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image filled with one pixel value.
    #[must_use]
    pub fn filled(width: u32, height: u32, pixel: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// One row of pixels, clipped to `[x, x + width)`.
    ///
    /// Returns `None` if the span falls outside the image.
    #[must_use]
    pub fn row(&self, y: u32, x: u32, width: u32) -> Option<&[u32]> {
        if y >= self.height || x.checked_add(width)? > self.width {
            return None;
        }
        let start = y as usize * self.width as usize + x as usize;
        self.pixels.get(start..start + width as usize)
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.row(y, x, 1).map(|row| row[0])
    }
}

/// The full set of pictures, one per [`ImageId`].
#[derive(Debug, Clone)]
pub struct ImageSet {
    images: [Image; 7],
}

impl ImageSet {
    /// Build a set by producing each image from its id.
    pub fn from_fn(mut f: impl FnMut(ImageId) -> Image) -> Self {
        Self {
            images: ImageId::ALL.map(&mut f),
        }
    }

    /// Like [`ImageSet::from_fn`] but stops at the first error.
    ///
    /// `f` is not called again once it has failed.
    pub fn try_from_fn<E>(mut f: impl FnMut(ImageId) -> Result<Image, E>) -> Result<Self, E> {
        let mut failure = None;
        let images = ImageId::ALL.map(|id| {
            if failure.is_some() {
                return Image::filled(0, 0, 0);
            }
            f(id).unwrap_or_else(|err| {
                failure = Some(err);
                Image::filled(0, 0, 0)
            })
        });
        match failure {
            Some(err) => Err(err),
            None => Ok(Self { images }),
        }
    }

    #[must_use]
    pub fn get(&self, id: ImageId) -> &Image {
        &self.images[id as usize]
    }
}
