#![forbid(unsafe_code)]

//! The drawing contract between widgets and buffers.

use tessera_core::geometry::Rect;

use crate::buffer::Buffer;
use crate::style::Style;

/// Something that can draw itself into a region of a [`Buffer`].
///
/// Widgets are consumed by rendering; implement the trait for a reference
/// (`impl Widget for &MyWidget`) to keep a widget around between frames.
/// Implementations should confine their writes to `area`.
///
/// ```
/// use tessera_render::{Buffer, Rect, Style, Widget};
///
/// struct Label(&'static str);
///
/// impl Widget for Label {
///     fn render(self, area: Rect, buf: &mut Buffer) {
///         buf.set_stringn(area.x, area.y, self.0, usize::from(area.width), Style::new());
///     }
/// }
///
/// let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
/// Label("hello world").render(Rect::new(1, 0, 3, 1), &mut buf);
/// assert_eq!(buf, Buffer::with_lines([" hel "]));
/// ```
pub trait Widget {
    fn render(self, area: Rect, buf: &mut Buffer);
}

/// Draws the string on the first row of `area`, truncated to its width.
impl Widget for &str {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_stringn(area.x, area.y, self, usize::from(area.width), Style::new());
    }
}
