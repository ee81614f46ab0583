//! Single-level integer score.

use std::fmt;

use super::traits::Score;

/// An `i64` score, typically a negated total distance.
///
/// ```
/// use chainforge_core::{Score, SimpleScore};
///
/// let longer_route = SimpleScore::of(-12);
/// let shorter_route = SimpleScore::of(-7);
///
/// assert!(shorter_route.is_better_than(&longer_route));
/// assert_eq!(shorter_route.to_string(), "-7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleScore(i64);

impl SimpleScore {
    #[inline]
    pub const fn of(value: i64) -> Self {
        SimpleScore(value)
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl Score for SimpleScore {}

impl fmt::Display for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_is_better() {
        assert!(SimpleScore::of(-3).is_better_than(&SimpleScore::of(-4)));
        assert!(!SimpleScore::of(-4).is_better_than(&SimpleScore::of(-4)));
        assert_eq!(SimpleScore::default(), SimpleScore::of(0));
    }

    #[test]
    fn test_display_is_the_bare_value() {
        assert_eq!(SimpleScore::of(-4).to_string(), "-4");
        assert_eq!(SimpleScore::of(-4).value(), -4);
    }
}
