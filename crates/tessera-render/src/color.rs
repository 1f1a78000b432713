#![forbid(unsafe_code)]

//! Terminal colors.

use std::fmt;

/// A terminal color.
///
/// `Reset` means "whatever the terminal default is"; it is also the default
/// for every color slot of a fresh [`Cell`](crate::cell::Cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Terminal default.
    #[default]
    Reset,
    /// 256-color palette index. 0-15 are the named ANSI colors.
    Indexed(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Self = Self::Indexed(0);
    pub const RED: Self = Self::Indexed(1);
    pub const GREEN: Self = Self::Indexed(2);
    pub const YELLOW: Self = Self::Indexed(3);
    pub const BLUE: Self = Self::Indexed(4);
    pub const MAGENTA: Self = Self::Indexed(5);
    pub const CYAN: Self = Self::Indexed(6);
    pub const GRAY: Self = Self::Indexed(7);
    pub const DARK_GRAY: Self = Self::Indexed(8);
    pub const LIGHT_RED: Self = Self::Indexed(9);
    pub const LIGHT_GREEN: Self = Self::Indexed(10);
    pub const LIGHT_YELLOW: Self = Self::Indexed(11);
    pub const LIGHT_BLUE: Self = Self::Indexed(12);
    pub const LIGHT_MAGENTA: Self = Self::Indexed(13);
    pub const LIGHT_CYAN: Self = Self::Indexed(14);
    pub const WHITE: Self = Self::Indexed(15);

    /// Build an RGB color from a packed `0xRRGGBB` value. The top byte is ignored.
    #[inline]
    pub const fn from_u32(rgb: u32) -> Self {
        Self::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("reset"),
            Self::Indexed(index) => write!(f, "{index}"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reset() {
        assert_eq!(Color::default(), Color::Reset);
    }

    #[test]
    fn from_u32_unpacks_channels() {
        assert_eq!(Color::from_u32(0x12_34_56), Color::Rgb(0x12, 0x34, 0x56));
        assert_eq!(Color::from_u32(0xFF_00_00_01), Color::Rgb(0, 0, 1));
    }

    #[test]
    fn display() {
        assert_eq!(Color::Reset.to_string(), "reset");
        assert_eq!(Color::RED.to_string(), "1");
        assert_eq!(Color::Rgb(255, 0, 16).to_string(), "#ff0010");
    }
}
