#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle in pixel coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// True if `other` lies entirely within `self`.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Same size, moved so its top-left corner is at `(x, y)`.
    #[inline]
    pub const fn at(&self, x: u32, y: u32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }

    /// Cell `(col, row)` of a `cols`×`rows` grid laid over this rectangle.
    ///
    /// Cells use integer division, so trailing pixels that do not divide
    /// evenly belong to no cell.
    #[must_use]
    pub const fn grid_cell(&self, cols: u32, rows: u32, col: u32, row: u32) -> Rect {
        let width = self.width / cols;
        let height = self.height / rows;
        Rect::new(self.x + width * col, self.y + height * row, width, height)
    }

    /// Place a `width`×`height` box against the top-right corner.
    ///
    /// Returns `None` when the box is wider or taller than `self`.
    #[must_use]
    pub const fn top_right(&self, width: u32, height: u32) -> Option<Rect> {
        if width > self.width || height > self.height {
            return None;
        }
        Some(Rect::new(self.right() - width, self.y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
    }

    #[test]
    fn contains_rect() {
        let outer = Rect::from_size(480, 272);
        assert!(outer.contains_rect(&Rect::new(330, 0, 150, 150)));
        assert!(!outer.contains_rect(&Rect::new(331, 0, 150, 150)));
        assert!(!outer.contains_rect(&Rect::new(0, 200, 10, 73)));
    }

    #[test]
    fn grid_cells_tile_the_rect() {
        let r = Rect::from_size(150, 90);
        assert_eq!(r.grid_cell(3, 3, 0, 0), Rect::new(0, 0, 50, 30));
        assert_eq!(r.grid_cell(3, 3, 2, 1), Rect::new(100, 30, 50, 30));
        assert_eq!(r.grid_cell(3, 3, 1, 2), Rect::new(50, 60, 50, 30));
    }

    #[test]
    fn grid_cell_drops_remainder() {
        let r = Rect::from_size(100, 100);
        assert_eq!(r.grid_cell(3, 3, 2, 2), Rect::new(66, 66, 33, 33));
    }

    #[test]
    fn top_right_anchoring() {
        let screen = Rect::from_size(480, 272);
        assert_eq!(screen.top_right(150, 150), Some(Rect::new(330, 0, 150, 150)));
        assert_eq!(screen.top_right(480, 272), Some(screen));
        assert_eq!(screen.top_right(481, 10), None);
        assert_eq!(screen.top_right(10, 273), None);
    }
}
