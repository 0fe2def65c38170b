//! Column layout and border glyphs for tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a table splits its width between columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnLayout {
    /// Every column weighs 1.
    #[default]
    Equal,
    /// Relative weights, one per column.
    Weighted(Vec<u32>),
}

impl ColumnLayout {
    pub fn weighted(weights: impl IntoIterator<Item = u32>) -> Self {
        ColumnLayout::Weighted(weights.into_iter().collect())
    }

    /// Weight of each of `columns` columns. Missing weights count as 1,
    /// surplus weights are ignored.
    pub fn weights(&self, columns: usize) -> Vec<u64> {
        match self {
            ColumnLayout::Equal => vec![1; columns],
            ColumnLayout::Weighted(weights) => (0..columns)
                .map(|i| weights.get(i).map_or(1, |&w| u64::from(w)))
                .collect(),
        }
    }

    /// Split `total` columns of width between `columns` table columns.
    ///
    /// Each column gets the floor of its proportional share; the leftover
    /// units go one each to the columns with the largest fractional
    /// remainder, lowest index first on ties. The result always sums to
    /// `total`.
    pub fn widths(&self, columns: usize, total: usize) -> Vec<usize> {
        if columns == 0 {
            return Vec::new();
        }

        let weights = self.weights(columns);
        let sum: u64 = weights.iter().sum();
        if sum == 0 {
            // All-zero weights: fall back to an even split.
            return ColumnLayout::Equal.widths(columns, total);
        }

        let total64 = total as u64;
        let mut widths = Vec::with_capacity(columns);
        let mut remainders = Vec::with_capacity(columns);
        for (index, &weight) in weights.iter().enumerate() {
            let scaled = total64 * weight;
            widths.push((scaled / sum) as usize);
            remainders.push((scaled % sum, index));
        }

        let assigned: usize = widths.iter().sum();
        let leftover = total - assigned;

        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for &(_, index) in remainders.iter().take(leftover) {
            widths[index] += 1;
        }

        widths
    }
}

/// Box-drawing glyph set for one border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_tee: char,
    pub top_right: char,
    pub left_tee: char,
    pub cross: char,
    pub right_tee: char,
    pub bottom_left: char,
    pub bottom_tee: char,
    pub bottom_right: char,
}

impl BorderGlyphs {
    const fn uniform(horizontal: char, vertical: char, joint: char) -> Self {
        Self {
            horizontal,
            vertical,
            top_left: joint,
            top_tee: joint,
            top_right: joint,
            left_tee: joint,
            cross: joint,
            right_tee: joint,
            bottom_left: joint,
            bottom_tee: joint,
            bottom_right: joint,
        }
    }
}

const DASHED: BorderGlyphs = BorderGlyphs::uniform('-', '|', '+');
const STAR: BorderGlyphs = BorderGlyphs::uniform('*', '*', '*');
const SINGLE: BorderGlyphs = BorderGlyphs {
    horizontal: '─',
    vertical: '│',
    top_left: '┌',
    top_tee: '┬',
    top_right: '┐',
    left_tee: '├',
    cross: '┼',
    right_tee: '┤',
    bottom_left: '└',
    bottom_tee: '┴',
    bottom_right: '┘',
};
const DOUBLE: BorderGlyphs = BorderGlyphs {
    horizontal: '═',
    vertical: '║',
    top_left: '╔',
    top_tee: '╦',
    top_right: '╗',
    left_tee: '╠',
    cross: '╬',
    right_tee: '╣',
    bottom_left: '╚',
    bottom_tee: '╩',
    bottom_right: '╝',
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    #[default]
    Dashed,
    Star,
    Single,
    Double,
}

impl Border {
    pub const ALL: [Self; 4] = [Self::Dashed, Self::Star, Self::Single, Self::Double];

    pub fn glyphs(self) -> &'static BorderGlyphs {
        match self {
            Border::Dashed => &DASHED,
            Border::Star => &STAR,
            Border::Single => &SINGLE,
            Border::Double => &DOUBLE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Border::Dashed => "dashed",
            Border::Star => "star",
            Border::Single => "single",
            Border::Double => "double",
        }
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown border style '{0}'")]
pub struct ParseBorderError(pub String);

impl FromStr for Border {
    type Err = ParseBorderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Border::ALL
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| ParseBorderError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn weighted_split_is_exact_when_divisible() {
        let layout = ColumnLayout::weighted([1, 2, 1]);
        assert_eq!(layout.widths(3, 40), vec![10, 20, 10]);
    }

    #[test]
    fn remainder_goes_to_largest_fraction() {
        // 36 * [1, 2, 1] / 4 = [9, 18, 9]; 37 leaves [9.25, 18.5, 9.25]
        let layout = ColumnLayout::weighted([1, 2, 1]);
        assert_eq!(layout.widths(3, 36), vec![9, 18, 9]);
        assert_eq!(layout.widths(3, 37), vec![9, 19, 9]);
    }

    #[test]
    fn remainder_ties_break_by_index() {
        assert_eq!(ColumnLayout::Equal.widths(3, 10), vec![4, 3, 3]);
        assert_eq!(ColumnLayout::Equal.widths(3, 11), vec![4, 4, 3]);
    }

    #[test]
    fn missing_weights_default_to_one() {
        let layout = ColumnLayout::weighted([2]);
        assert_eq!(layout.weights(3), vec![2, 1, 1]);
        assert_eq!(layout.widths(3, 8), vec![4, 2, 2]);
    }

    #[test]
    fn surplus_weights_are_ignored() {
        let layout = ColumnLayout::weighted([1, 3, 5, 7]);
        assert_eq!(layout.widths(2, 8), vec![2, 6]);
    }

    #[test]
    fn no_columns_no_widths() {
        assert!(ColumnLayout::Equal.widths(0, 80).is_empty());
    }

    #[test]
    fn width_smaller_than_column_count() {
        let widths = ColumnLayout::Equal.widths(4, 2);
        assert_eq!(widths, vec![1, 1, 0, 0]);
    }

    #[test_case("dashed", Border::Dashed)]
    #[test_case("Star", Border::Star)]
    #[test_case(" single ", Border::Single)]
    #[test_case("DOUBLE", Border::Double)]
    fn parses_border_names(input: &str, expected: Border) {
        assert_eq!(input.parse::<Border>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_border() {
        assert_eq!(
            "wavy".parse::<Border>(),
            Err(ParseBorderError("wavy".to_string()))
        );
    }

    #[test]
    fn dashed_glyphs_use_plus_joints() {
        let glyphs = Border::Dashed.glyphs();
        assert_eq!(glyphs.horizontal, '-');
        assert_eq!(glyphs.vertical, '|');
        assert_eq!(glyphs.top_left, '+');
        assert_eq!(glyphs.cross, '+');
    }

    proptest! {
        #[test]
        fn widths_sum_to_total(
            weights in prop::collection::vec(1u32..20, 1..8),
            extra in 0usize..200,
        ) {
            let total = weights.len() + extra;
            let widths = ColumnLayout::weighted(weights.clone()).widths(weights.len(), total);
            prop_assert_eq!(widths.iter().sum::<usize>(), total);
        }

        #[test]
        fn widths_stay_within_one_of_ideal(
            weights in prop::collection::vec(1u32..20, 1..8),
            total in 0usize..300,
        ) {
            let widths = ColumnLayout::weighted(weights.clone()).widths(weights.len(), total);
            let sum: u32 = weights.iter().sum();
            for (w, &weight) in widths.iter().zip(&weights) {
                let ideal = total as f64 * f64::from(weight) / f64::from(sum);
                prop_assert!((*w as f64 - ideal).abs() < 1.0);
            }
        }
    }
}
