//! Numeric-aware ordering over node names.
//!
//! Node names double as node values. A name that parses as a finite number
//! is compared numerically against another numeric name; every other pairing
//! falls back to comparing the raw text. Tree shaping and search share this
//! single comparator so the tree they agree on is the same tree.

use std::cmp::Ordering;

/// A node name viewed as the value it orders by.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NameKey<'a> {
    /// The name parsed as a finite number.
    Numeric(f64),
    /// The name is compared as text.
    Text(&'a str),
}

impl<'a> NameKey<'a> {
    /// Classifies `name`.
    ///
    /// # Examples
    /// ```
    /// use mstree_core::NameKey;
    ///
    /// assert_eq!(NameKey::of("2.5"), NameKey::Numeric(2.5));
    /// assert_eq!(NameKey::of("NaN"), NameKey::Text("NaN"));
    /// assert_eq!(NameKey::of("b"), NameKey::Text("b"));
    /// ```
    #[must_use]
    pub fn of(name: &'a str) -> Self {
        match name.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Numeric(value),
            _ => Self::Text(name),
        }
    }
}

/// Compares two node names.
///
/// Both numeric: numeric order. Otherwise the raw strings are compared
/// lexically, including mixed numeric/text pairs.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use mstree_core::compare_names;
///
/// assert_eq!(compare_names("9", "10"), Ordering::Less);
/// assert_eq!(compare_names("b", "a"), Ordering::Greater);
/// assert_eq!(compare_names("10", "a"), Ordering::Less);
/// assert_eq!(compare_names("1.0", "1"), Ordering::Equal);
/// ```
#[must_use]
pub fn compare_names(left: &str, right: &str) -> Ordering {
    match (NameKey::of(left), NameKey::of(right)) {
        (NameKey::Numeric(a), NameKey::Numeric(b)) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        _ => left.cmp(right),
    }
}

/// Orders `names` with [`compare_names`] by stable insertion.
///
/// Each name is placed after the last already-placed name that does not
/// order above it. [`compare_names`] is not transitive across mixed
/// numeric/text names, so `slice::sort_by` is not usable here.
pub(crate) fn sorted_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut ordered: Vec<&'a str> = Vec::new();
    for name in names {
        let at = ordered
            .iter()
            .rposition(|placed| compare_names(placed, name) != Ordering::Greater)
            .map_or(0, |index| index + 1);
        ordered.insert(at, name);
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::numeric_not_lexical("9", "10", Ordering::Less)]
    #[case::negative("-3", "2", Ordering::Less)]
    #[case::fractional("2.5", "2.25", Ordering::Greater)]
    #[case::equal_values_different_text("1.0", "1", Ordering::Equal)]
    #[case::signed_zero("-0", "0", Ordering::Equal)]
    #[case::text("apple", "banana", Ordering::Less)]
    #[case::mixed_falls_back_to_text("10", "9a", Ordering::Less)]
    #[case::mixed_reversed("b", "2", Ordering::Greater)]
    #[case::nan_is_text("NaN", "1", Ordering::Greater)]
    #[case::infinity_is_text("inf", "5", Ordering::Greater)]
    fn compares_names(#[case] left: &str, #[case] right: &str, #[case] expected: Ordering) {
        assert_eq!(compare_names(left, right), expected);
        assert_eq!(compare_names(right, left), expected.reverse());
    }

    #[test]
    fn sorts_candidates_numerically() {
        let names = sorted_names(["5", "1", "3"]);
        assert_eq!(names, ["1", "3", "5"]);
    }

    #[test]
    fn sort_is_stable_for_numerically_equal_names() {
        let names = sorted_names(["2.0", "1", "2", "-0", "0"]);
        assert_eq!(names, ["-0", "0", "1", "2.0", "2"]);
    }

    #[test]
    fn sorts_many_mixed_names_without_panicking() {
        let owned: Vec<String> = (0..60)
            .map(|n| if n % 2 == 0 { n.to_string() } else { format!("{n}x") })
            .collect();
        let names = sorted_names(owned.iter().map(String::as_str));
        assert_eq!(names.len(), owned.len());
        for pair in names.windows(2) {
            assert_ne!(compare_names(pair[0], pair[1]), Ordering::Greater);
        }
    }
}
