#![forbid(unsafe_code)]

//! Style patches applied to cells.
//!
//! A [`Style`] is a partial update: `None` colors leave the target alone, and
//! modifiers are added and removed explicitly. Patching one style onto
//! another composes them the same way patching onto a cell does.

use crate::cell::Modifier;
use crate::color::Color;

/// Colors and modifier changes to apply to a cell.
///
/// # Example
///
/// ```
/// use tessera_render::{Color, Modifier, Style};
///
/// let base = Style::new().fg(Color::WHITE).add_modifier(Modifier::BOLD);
/// let highlight = Style::new().bg(Color::BLUE).remove_modifier(Modifier::BOLD);
/// let combined = base.patch(highlight);
///
/// assert_eq!(combined.fg, Some(Color::WHITE));
/// assert_eq!(combined.bg, Some(Color::BLUE));
/// assert!(combined.add_modifier.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub underline_color: Option<Color>,
    pub add_modifier: Modifier,
    pub sub_modifier: Modifier,
}

impl Style {
    /// A style that changes nothing.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            underline_color: None,
            add_modifier: Modifier::empty(),
            sub_modifier: Modifier::empty(),
        }
    }

    /// A style that resets every color and clears every modifier.
    pub const fn reset() -> Self {
        Self {
            fg: Some(Color::Reset),
            bg: Some(Color::Reset),
            underline_color: Some(Color::Reset),
            add_modifier: Modifier::empty(),
            sub_modifier: Modifier::all(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub const fn underline_color(mut self, color: Color) -> Self {
        self.underline_color = Some(color);
        self
    }

    /// Add modifiers. Cancels any pending removal of the same bits.
    #[must_use]
    pub const fn add_modifier(mut self, modifier: Modifier) -> Self {
        self.sub_modifier = self.sub_modifier.difference(modifier);
        self.add_modifier = self.add_modifier.union(modifier);
        self
    }

    /// Remove modifiers. Cancels any pending addition of the same bits.
    #[must_use]
    pub const fn remove_modifier(mut self, modifier: Modifier) -> Self {
        self.add_modifier = self.add_modifier.difference(modifier);
        self.sub_modifier = self.sub_modifier.union(modifier);
        self
    }

    /// Apply `other` on top of `self`.
    #[must_use]
    pub fn patch(mut self, other: Style) -> Self {
        self.fg = other.fg.or(self.fg);
        self.bg = other.bg.or(self.bg);
        self.underline_color = other.underline_color.or(self.underline_color);

        self.add_modifier.remove(other.sub_modifier);
        self.add_modifier.insert(other.add_modifier);
        self.sub_modifier.remove(other.add_modifier);
        self.sub_modifier.insert(other.sub_modifier);
        self
    }
}

impl From<Color> for Style {
    /// A style that only sets the foreground.
    fn from(color: Color) -> Self {
        Self::new().fg(color)
    }
}
