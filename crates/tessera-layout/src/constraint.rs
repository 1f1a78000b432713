#![forbid(unsafe_code)]

use std::fmt;

use crate::strengths;

/// A constraint on the size of one layout segment.
///
/// Constraints are applied in a fixed priority order regardless of their
/// position in the list: `Min > Max > Length > Percentage > Ratio > Fill`.
/// Percentages and ratios are taken of the whole area being split, not of
/// the space left over by stronger constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// At least this many cells. Outside [`Flex::Legacy`](crate::Flex::Legacy)
    /// the segment also grows like a `Fill(1)`.
    Min(u16),
    /// At most this many cells, preferring exactly this many.
    Max(u16),
    /// Exactly this many cells.
    Length(u16),
    /// A percentage (0..=100) of the area.
    Percentage(u16),
    /// `numerator / denominator` of the area. A zero denominator counts as 1.
    Ratio(u32, u32),
    /// A share of the leftover space proportional to the weight.
    Fill(u16),
}

impl Constraint {
    /// Priority rank of this kind; higher ranks win when constraints conflict.
    ///
    /// ```
    /// use tessera_layout::Constraint;
    ///
    /// assert!(Constraint::Min(0).priority() > Constraint::Max(0).priority());
    /// assert!(Constraint::Ratio(1, 2).priority() > Constraint::Fill(1).priority());
    /// ```
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Min(_) => 5,
            Self::Max(_) => 4,
            Self::Length(_) => 3,
            Self::Percentage(_) => 2,
            Self::Ratio(_, _) => 1,
            Self::Fill(_) => 0,
        }
    }

    /// Solver strength of the defining relation for this kind.
    pub const fn strength(&self) -> f64 {
        match self {
            Self::Min(_) => strengths::MIN_SIZE_GE,
            Self::Max(_) => strengths::MAX_SIZE_LE,
            Self::Length(_) => strengths::LENGTH_SIZE_EQ,
            Self::Percentage(_) => strengths::PERCENTAGE_SIZE_EQ,
            Self::Ratio(_, _) => strengths::RATIO_SIZE_EQ,
            Self::Fill(_) => strengths::FILL_GROW,
        }
    }

    pub fn from_lengths<T: IntoIterator<Item = u16>>(lengths: T) -> Vec<Constraint> {
        lengths.into_iter().map(Self::Length).collect()
    }

    pub fn from_percentages<T: IntoIterator<Item = u16>>(percentages: T) -> Vec<Constraint> {
        percentages.into_iter().map(Self::Percentage).collect()
    }

    pub fn from_ratios<T: IntoIterator<Item = (u32, u32)>>(ratios: T) -> Vec<Constraint> {
        ratios.into_iter().map(|(n, d)| Self::Ratio(n, d)).collect()
    }

    pub fn from_mins<T: IntoIterator<Item = u16>>(mins: T) -> Vec<Constraint> {
        mins.into_iter().map(Self::Min).collect()
    }

    pub fn from_maxes<T: IntoIterator<Item = u16>>(maxes: T) -> Vec<Constraint> {
        maxes.into_iter().map(Self::Max).collect()
    }

    pub fn from_fills<T: IntoIterator<Item = u16>>(fills: T) -> Vec<Constraint> {
        fills.into_iter().map(Self::Fill).collect()
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::Percentage(100)
    }
}

impl From<u16> for Constraint {
    fn from(length: u16) -> Self {
        Self::Length(length)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min(v) => write!(f, "Min({v})"),
            Self::Max(v) => write!(f, "Max({v})"),
            Self::Length(v) => write!(f, "Length({v})"),
            Self::Percentage(v) => write!(f, "Percentage({v})"),
            Self::Ratio(n, d) => write!(f, "Ratio({n}, {d})"),
            Self::Fill(v) => write!(f, "Fill({v})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_strict() {
        let ordered = [
            Constraint::Min(0),
            Constraint::Max(0),
            Constraint::Length(0),
            Constraint::Percentage(0),
            Constraint::Ratio(0, 1),
            Constraint::Fill(0),
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].priority() > pair[1].priority());
            assert!(pair[0].strength() > pair[1].strength());
        }
    }

    #[test]
    fn priority_ignores_payload() {
        assert_eq!(Constraint::Min(0).priority(), Constraint::Min(500).priority());
    }

    #[test]
    fn constructors() {
        assert_eq!(
            Constraint::from_lengths([1, 2]),
            vec![Constraint::Length(1), Constraint::Length(2)]
        );
        assert_eq!(
            Constraint::from_ratios([(1, 3), (2, 3)]),
            vec![Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)]
        );
        assert_eq!(Constraint::from_fills([4]), vec![Constraint::Fill(4)]);
        assert_eq!(Constraint::from_mins([4]), vec![Constraint::Min(4)]);
        assert_eq!(Constraint::from_maxes([4]), vec![Constraint::Max(4)]);
        assert_eq!(
            Constraint::from_percentages([25]),
            vec![Constraint::Percentage(25)]
        );
        assert_eq!(Constraint::from(7), Constraint::Length(7));
    }

    #[test]
    fn default_and_display() {
        assert_eq!(Constraint::default(), Constraint::Percentage(100));
        assert_eq!(Constraint::Length(10).to_string(), "Length(10)");
        assert_eq!(Constraint::Ratio(1, 4).to_string(), "Ratio(1, 4)");
    }
}
