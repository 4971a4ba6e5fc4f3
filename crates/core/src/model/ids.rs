use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a question in the store, starting at 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionKey(u64);

impl QuestionKey {
    /// The first question of every quiz.
    pub const FIRST: Self = Self(1);

    /// Creates a new `QuestionKey`
    #[must_use]
    pub fn new(key: u64) -> Self {
        Self(key)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The key following this one. Saturates at `u64::MAX`.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Key under which the external store holds this question.
    #[must_use]
    pub fn store_key(&self) -> String {
        self.0.to_string()
    }
}

impl Default for QuestionKey {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Debug for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionKey({})", self.0)
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_key_is_decimal() {
        assert_eq!(QuestionKey::new(42).store_key(), "42");
        assert_eq!(QuestionKey::FIRST.store_key(), "1");
    }

    #[test]
    fn next_saturates() {
        assert_eq!(QuestionKey::new(1).next(), QuestionKey::new(2));
        assert_eq!(QuestionKey::new(u64::MAX).next(), QuestionKey::new(u64::MAX));
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("7".parse::<QuestionKey>().unwrap(), QuestionKey::new(7));
        assert!("x".parse::<QuestionKey>().is_err());
    }
}
