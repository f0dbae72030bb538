#![forbid(unsafe_code)]

//! Keys emitted to the virtual console.

/// A key the keyboard can type.
///
/// Each key is sent as a short byte sequence; cursor keys and Delete use
/// the VT100 escape forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKey {
    /// A printable ASCII character.
    Char(u8),
    Enter,
    Tab,
    Backspace,
    Escape,
    CtrlC,
    Delete,
    Up,
    Down,
    Right,
    Left,
}

static ASCII: [[u8; 1]; 128] = {
    let mut table = [[0u8; 1]; 128];
    let mut i = 0;
    while i < 128 {
        table[i][0] = i as u8;
        i += 1;
    }
    table
};

impl OutputKey {
    /// Byte sequence written to the console for this key.
    ///
    /// Non-ASCII `Char` values produce an empty sequence.
    #[must_use]
    pub fn bytes(&self) -> &'static [u8] {
        match *self {
            Self::Char(c) if c.is_ascii() => &ASCII[c as usize],
            Self::Char(_) => &[],
            Self::Enter => b"\n",
            Self::Tab => b"\t",
            Self::Backspace => b"\x7f",
            Self::Escape => b"\x1b",
            Self::CtrlC => b"\x03",
            Self::Delete => b"\x1b[3~",
            Self::Up => b"\x1b[A",
            Self::Down => b"\x1b[B",
            Self::Right => b"\x1b[C",
            Self::Left => b"\x1b[D",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_keys_are_single_bytes() {
        assert_eq!(OutputKey::Char(b'a').bytes(), b"a");
        assert_eq!(OutputKey::Char(b'`').bytes(), b"`");
        assert_eq!(OutputKey::Char(b' ').bytes(), b" ");
    }

    #[test]
    fn control_keys() {
        assert_eq!(OutputKey::Enter.bytes(), b"\n");
        assert_eq!(OutputKey::Backspace.bytes(), [0x7f]);
        assert_eq!(OutputKey::CtrlC.bytes(), [0x03]);
        assert_eq!(OutputKey::Escape.bytes(), [0x1b]);
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(OutputKey::Delete.bytes(), b"\x1b[3~");
        assert_eq!(OutputKey::Up.bytes(), b"\x1b[A");
        assert_eq!(OutputKey::Left.bytes(), b"\x1b[D");
    }

    #[test]
    fn non_ascii_char_is_dropped() {
        assert!(OutputKey::Char(0xe9).bytes().is_empty());
    }
}
