#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, and diffs.
//!
//! Widgets draw into a [`Buffer`](buffer::Buffer); the runtime diffs the
//! previous frame against the new one and hands the changed cells to a
//! terminal backend.

pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod style;
pub mod widget;

pub use buffer::Buffer;
pub use cell::{Cell, Modifier};
pub use color::Color;
pub use diff::{BufferDiff, ChangeRun};
pub use style::Style;
pub use widget::Widget;

pub use tessera_core::geometry::{Position, Rect};

mod text_width {
    use unicode_segmentation::UnicodeSegmentation;
    use unicode_width::UnicodeWidthStr;

    #[inline]
    fn ascii_width(text: &str) -> Option<usize> {
        if text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
            Some(text.len())
        } else {
            None
        }
    }

    #[inline]
    fn ascii_display_width(text: &str) -> usize {
        text.bytes().filter(|b| (0x20..=0x7E).contains(b)).count()
    }

    #[inline]
    fn is_zero_width_codepoint(c: char) -> bool {
        let u = c as u32;
        matches!(u, 0x0000..=0x001F | 0x007F..=0x009F)
            || matches!(u, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF)
            || matches!(u, 0xFE20..=0xFE2F)
            || matches!(u, 0xFE00..=0xFE0F | 0xE0100..=0xE01EF)
            || matches!(
                u,
                0x00AD
                    | 0x034F
                    | 0x180E
                    | 0x200B
                    | 0x200C
                    | 0x200D
                    | 0x200E
                    | 0x200F
                    | 0x2060
                    | 0xFEFF
            )
            || matches!(u, 0x202A..=0x202E | 0x2066..=0x2069 | 0x206A..=0x206F)
    }

    #[inline]
    fn is_probable_emoji(c: char) -> bool {
        let u = c as u32;
        matches!(
            u,
            0x1F000..=0x1FAFF | 0x2300..=0x23FF | 0x2600..=0x27BF | 0x2B00..=0x2BFF
        ) && u != 0x2764
    }

    #[inline]
    fn is_emoji_grapheme(grapheme: &str) -> bool {
        grapheme.chars().any(|c| c as u32 == 0xFE0F) || grapheme.chars().any(is_probable_emoji)
    }

    /// Whether a grapheme cluster should never occupy a cell.
    #[inline]
    pub(crate) fn is_control_cluster(grapheme: &str) -> bool {
        grapheme.chars().any(char::is_control)
    }

    /// Display width of a single grapheme cluster, in cells.
    #[inline]
    pub fn grapheme_width(grapheme: &str) -> usize {
        if grapheme.is_ascii() {
            return ascii_display_width(grapheme);
        }
        if grapheme.chars().all(is_zero_width_codepoint) {
            return 0;
        }
        if is_emoji_grapheme(grapheme) {
            return 2;
        }
        grapheme.width()
    }

    /// Display width of a string, in cells.
    ///
    /// Control characters count as zero.
    #[inline]
    pub fn display_width(text: &str) -> usize {
        if let Some(width) = ascii_width(text) {
            return width;
        }
        if text.is_ascii() {
            return ascii_display_width(text);
        }
        text.graphemes(true).map(grapheme_width).sum()
    }
}

pub use text_width::{display_width, grapheme_width};
pub(crate) use text_width::is_control_cluster;
