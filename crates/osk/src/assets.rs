#![forbid(unsafe_code)]

//! Keyboard artwork loaded from the asset directory.

use std::fmt;
use std::path::{Path, PathBuf};

use osk_core::{Image, ImageId, ImageSet, pack_rgba};

/// Extensions tried, in order, for each image.
pub const EXTENSIONS: [&str; 2] = ["bmp", "png"];

#[derive(Debug)]
pub enum AssetError {
    /// No `<name>.bmp` or `<name>.png` in the directory.
    Missing { name: &'static str, dir: PathBuf },
    /// The file exists but could not be decoded.
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// Decoded pixel count disagrees with the dimensions.
    Malformed { path: PathBuf },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name, dir } => {
                write!(f, "no {name}.bmp or {name}.png in {}", dir.display())
            }
            Self::Decode { path, source } => {
                write!(f, "cannot decode {}: {source}", path.display())
            }
            Self::Malformed { path } => write!(f, "{} has inconsistent dimensions", path.display()),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Missing { .. } | Self::Malformed { .. } => None,
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Find the file backing `id`, if any.
#[must_use]
pub fn asset_path(dir: &Path, id: ImageId) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{ext}", id.name())))
        .find(|path| path.is_file())
}

/// Decode one file into framebuffer pixel order.
pub fn load_image(path: &Path) -> Result<Image, AssetError> {
    let decoded = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();
    let (width, height) = decoded.dimensions();
    let pixels = decoded
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            pack_rgba(r, g, b, a)
        })
        .collect();
    Image::new(width, height, pixels).ok_or_else(|| AssetError::Malformed {
        path: path.to_path_buf(),
    })
}

/// Load all seven keyboard images from `dir`.
pub fn load_images(dir: &Path) -> Result<ImageSet, AssetError> {
    ImageSet::try_from_fn(|id| {
        let path = asset_path(dir, id).ok_or_else(|| AssetError::Missing {
            name: id.name(),
            dir: dir.to_path_buf(),
        })?;
        load_image(&path)
    })
}
