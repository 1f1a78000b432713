#![forbid(unsafe_code)]

//! Cell types and invariants.
//!
//! A [`Cell`] is one character position of the terminal grid: a grapheme
//! cluster plus the colors and modifier bits it is drawn with.
//!
//! # Wide glyphs
//!
//! A glyph wider than one column occupies its leading cell and marks the
//! following `width - 1` cells with `skip = true`. Skip cells hold a blank
//! symbol and are never emitted by a diff; the terminal advances over them
//! when it draws the leading glyph. [`Buffer`](crate::buffer::Buffer) keeps
//! this bookkeeping consistent on every write.
//!
//! # Equality
//!
//! `PartialEq` compares symbol, colors and modifiers, and ignores `skip`.

use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use crate::color::Color;
use crate::grapheme_width;
use crate::style::Style;

bitflags::bitflags! {
    /// Text modifier bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifier: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic text.
        const ITALIC        = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE     = 0b0000_1000;
        /// Blinking text.
        const BLINK         = 0b0001_0000;
        /// Reverse video (swap fg/bg).
        const REVERSE       = 0b0010_0000;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b0100_0000;
        /// Hidden / invisible text.
        const HIDDEN        = 0b1000_0000;
    }
}

/// A single terminal cell.
///
/// The symbol is private so a cell always holds a valid grapheme string;
/// short symbols (every single grapheme in practice) are stored inline.
#[derive(Clone)]
pub struct Cell {
    symbol: SmolStr,
    pub fg: Color,
    pub bg: Color,
    pub underline_color: Color,
    pub modifier: Modifier,
    /// Set on the trailing cells of a wide glyph. Diffs never emit skip cells.
    pub skip: bool,
}

impl Cell {
    /// A blank cell with default colors.
    pub const EMPTY: Self = Self {
        symbol: SmolStr::new_inline(" "),
        fg: Color::Reset,
        bg: Color::Reset,
        underline_color: Color::Reset,
        modifier: Modifier::empty(),
        skip: false,
    };

    /// Create a cell holding `symbol` with default colors.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: SmolStr::new(symbol),
            ..Self::EMPTY
        }
    }

    /// Create a cell holding a single character.
    pub fn from_char(ch: char) -> Self {
        let mut cell = Self::EMPTY;
        cell.set_char(ch);
        cell
    }

    /// The grapheme cluster drawn in this cell.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display width of the symbol in columns.
    ///
    /// This is the width the glyph claims, not counting any skip cells that
    /// follow it in a buffer.
    #[inline]
    pub fn width(&self) -> usize {
        grapheme_width(&self.symbol)
    }

    pub fn set_symbol(&mut self, symbol: &str) -> &mut Self {
        self.symbol = SmolStr::new(symbol);
        self
    }

    pub fn set_char(&mut self, ch: char) -> &mut Self {
        let mut utf8 = [0; 4];
        self.symbol = SmolStr::new_inline(ch.encode_utf8(&mut utf8));
        self
    }

    pub fn set_fg(&mut self, color: Color) -> &mut Self {
        self.fg = color;
        self
    }

    pub fn set_bg(&mut self, color: Color) -> &mut Self {
        self.bg = color;
        self
    }

    pub fn set_skip(&mut self, skip: bool) -> &mut Self {
        self.skip = skip;
        self
    }

    /// Patch colors and modifiers from `style`. The symbol is untouched.
    pub fn set_style<S: Into<Style>>(&mut self, style: S) -> &mut Self {
        let style = style.into();
        if let Some(fg) = style.fg {
            self.fg = fg;
        }
        if let Some(bg) = style.bg {
            self.bg = bg;
        }
        if let Some(underline_color) = style.underline_color {
            self.underline_color = underline_color;
        }
        self.modifier.insert(style.add_modifier);
        self.modifier.remove(style.sub_modifier);
        self
    }

    /// The cell's colors and modifiers as a fully-specified style.
    pub fn style(&self) -> Style {
        Style {
            fg: Some(self.fg),
            bg: Some(self.bg),
            underline_color: Some(self.underline_color),
            add_modifier: self.modifier,
            sub_modifier: Modifier::all().difference(self.modifier),
        }
    }

    /// Restore the blank state, including clearing `skip`.
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// A blank skip cell carrying this cell's colors, used to fill the
    /// trailing columns of a wide glyph.
    pub(crate) fn trailing(&self) -> Self {
        Self {
            symbol: SmolStr::new_inline(" "),
            fg: self.fg,
            bg: self.bg,
            underline_color: self.underline_color,
            modifier: self.modifier,
            skip: true,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.fg == other.fg
            && self.bg == other.bg
            && self.underline_color == other.underline_color
            && self.modifier == other.modifier
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
        self.fg.hash(state);
        self.bg.hash(state);
        self.underline_color.hash(state);
        self.modifier.hash(state);
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Cell");
        debug.field("symbol", &self.symbol.as_str());
        if self.fg != Color::Reset {
            debug.field("fg", &self.fg);
        }
        if self.bg != Color::Reset {
            debug.field("bg", &self.bg);
        }
        if self.underline_color != Color::Reset {
            debug.field("underline_color", &self.underline_color);
        }
        if !self.modifier.is_empty() {
            debug.field("modifier", &self.modifier);
        }
        if self.skip {
            debug.field("skip", &true);
        }
        debug.finish()
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}

impl From<&str> for Cell {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}
