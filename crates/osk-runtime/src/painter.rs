#![forbid(unsafe_code)]

//! Drawing policy.
//!
//! All artwork is anchored to the top-right corner of the canvas. Keyboard
//! images are split into a 3×3 grid; a section is one cell. Mode changes
//! (Idle, Mouse) clear the keyboard area first; section changes inside a
//! keyboard only touch the two affected cells.

use osk_backend::{BackendError, BackendResult, Canvas, Console};
use osk_core::{Image, ImageId, ImageSet, Rect, Section};

use crate::navigator::Scene;

/// Executes [`Scene`]s against a canvas.
///
/// The console is borrowed too because a mode clear ends with a console
/// repaint request.
pub struct Painter<'a, C, K> {
    canvas: &'a mut C,
    console: &'a mut K,
    images: &'a ImageSet,
}

impl<'a, C: Canvas, K: Console> Painter<'a, C, K> {
    pub fn new(canvas: &'a mut C, console: &'a mut K, images: &'a ImageSet) -> Self {
        Self {
            canvas,
            console,
            images,
        }
    }

    pub fn paint(&mut self, scene: Scene) -> BackendResult<()> {
        match scene {
            Scene::Idle => {
                self.clear()?;
                let image = self.images.get(ImageId::PlainActive);
                let src = section_cell(image, Section::Center);
                let dest = self.anchor(src.width, src.height)?;
                self.canvas.draw_region(dest.x, dest.y, image, src)
            }
            Scene::Mouse => {
                self.clear()?;
                self.draw_whole(ImageId::Mouse)
            }
            Scene::Keyboard {
                variant,
                previous,
                current,
            } => {
                let (inactive, active) = variant.images();
                match previous {
                    None => self.draw_whole(inactive)?,
                    Some(previous) => self.draw_section(inactive, previous)?,
                }
                self.draw_section(active, current)
            }
        }
    }

    /// Blank the keyboard area, then ask the console to repaint.
    fn clear(&mut self) -> BackendResult<()> {
        let image = self.images.get(ImageId::Plain);
        let area = self.anchor(image.width(), image.height())?;
        self.canvas.clear(area)?;
        self.console.flush()
    }

    fn draw_whole(&mut self, id: ImageId) -> BackendResult<()> {
        let image = self.images.get(id);
        let dest = self.anchor(image.width(), image.height())?;
        self.canvas.draw_region(dest.x, dest.y, image, image.bounds())
    }

    /// Draw one cell of `id` at its place within the anchored image.
    fn draw_section(&mut self, id: ImageId, section: Section) -> BackendResult<()> {
        let image = self.images.get(id);
        let origin = self.anchor(image.width(), image.height())?;
        let src = section_cell(image, section);
        self.canvas
            .draw_region(origin.x + src.x, origin.y + src.y, image, src)
    }

    fn anchor(&self, width: u32, height: u32) -> BackendResult<Rect> {
        let bounds = self.canvas.bounds();
        bounds
            .top_right(width, height)
            .ok_or(BackendError::OutOfBounds {
                area: Rect::from_size(width, height),
                width: bounds.width,
                height: bounds.height,
            })
    }
}

/// Source rectangle of `section` within `image`.
#[must_use]
pub fn section_cell(image: &Image, section: Section) -> Rect {
    let (col, row) = section.grid();
    image.bounds().grid_cell(3, 3, col, row)
}
