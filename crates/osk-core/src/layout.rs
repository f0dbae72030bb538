#![forbid(unsafe_code)]

//! Keyboard layouts.
//!
//! The on-screen keyboard is a 3×3 grid of sections. Each section carries
//! four keys, one per action button, arranged like the buttons on the pad:
//! Square on the left, Triangle on top, Circle on the right, Cross at the
//! bottom. Three variants share the grid.

use crate::image::ImageId;
use crate::keys::OutputKey;

/// One cell of the 3×3 keyboard grid, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::TopLeft,
        Section::Top,
        Section::TopRight,
        Section::Left,
        Section::Center,
        Section::Right,
        Section::BottomLeft,
        Section::Bottom,
        Section::BottomRight,
    ];

    /// Row-major index into the grid.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Grid position as `(column, row)`.
    #[must_use]
    pub const fn grid(self) -> (u32, u32) {
        let index = self as u32;
        (index % 3, index / 3)
    }
}

/// Position of a key within its section, matching the action button that
/// types it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Square.
    Left,
    /// Triangle.
    Top,
    /// Circle.
    Right,
    /// Cross.
    Bottom,
}

impl Face {
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Keyboard variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Lower-case letters.
    Plain,
    /// Upper-case letters and brackets.
    Shifted,
    /// Digits and punctuation.
    Numeric,
}

impl Variant {
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Artwork as `(inactive, active)`.
    #[must_use]
    pub const fn images(self) -> (ImageId, ImageId) {
        match self {
            Variant::Plain => (ImageId::Plain, ImageId::PlainActive),
            Variant::Shifted => (ImageId::Shifted, ImageId::ShiftedActive),
            Variant::Numeric => (ImageId::Numeric, ImageId::NumericActive),
        }
    }

    /// The table for this variant.
    #[must_use]
    pub fn layout(self) -> &'static Layout {
        &LAYOUTS[self.index()]
    }
}

/// Keys of one variant, indexed by section then face.
#[derive(Debug)]
pub struct Layout {
    sections: [[OutputKey; 4]; 9],
}

impl Layout {
    #[must_use]
    pub const fn key(&self, section: Section, face: Face) -> OutputKey {
        self.sections[section.index()][face.index()]
    }

    /// All four keys of `section` in face order.
    #[must_use]
    pub const fn section(&self, section: Section) -> &[OutputKey; 4] {
        &self.sections[section.index()]
    }
}

/// Look up the key typed by `face` in `section` of `variant`.
#[must_use]
pub fn key(variant: Variant, section: Section, face: Face) -> OutputKey {
    variant.layout().key(section, face)
}

const fn c(ch: u8) -> OutputKey {
    OutputKey::Char(ch)
}

const fn row(keys: &[u8; 4]) -> [OutputKey; 4] {
    [c(keys[0]), c(keys[1]), c(keys[2]), c(keys[3])]
}

use OutputKey::{Backspace, CtrlC, Delete, Enter, Escape, Tab};

static LAYOUTS: [Layout; 3] = [
    Layout {
        sections: [
            row(b"efgh"),
            row(b"ijkl"),
            row(b"mnop"),
            row(b"abcd"),
            [Backspace, c(b' '), Enter, Escape],
            row(b"qrst"),
            row(b"<[>]"),
            row(b"y.z,"),
            row(b"uvwx"),
        ],
    },
    Layout {
        sections: [
            row(b"EFGH"),
            row(b"IJKL"),
            row(b"MNOP"),
            row(b"ABCD"),
            [Delete, Tab, Enter, CtrlC],
            row(b"QRST"),
            row(b"({)}"),
            row(b"Y.Z,"),
            row(b"UVWX"),
        ],
    },
    Layout {
        sections: [
            row(b"1234"),
            row(b"5678"),
            row(b"9\"0'"),
            row(b"+-*\\"),
            [Delete, Tab, Enter, CtrlC],
            row(b"@|?/"),
            row(b"#~!`"),
            row(b";.:$"),
            row(b"&^%="),
        ],
    },
];
