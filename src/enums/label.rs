//! # Label Module - *Axis Label Values*
//!
//! Axis labels address positions along a dimension by key rather than by
//! integer offset. A label is either an integer or a string, and the two
//! kinds may be mixed within one axis.

use std::fmt;

/// # Label
///
/// A single axis label.
///
/// Ordering places every `Int` before every `Str`, then orders within
/// each kind. Axes built from sorted labels use this ordering when merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Int(i64),
    Str(String),
}

impl Label {
    /// Returns the string payload, or `None` for integer labels.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Label::Str(s) => Some(s),
            Label::Int(_) => None,
        }
    }

    /// Returns the integer payload, or `None` for string labels.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Label::Int(v) => Some(*v),
            Label::Str(_) => None,
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Str(value.to_owned())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Str(value)
    }
}

impl From<&String> for Label {
    fn from(value: &String) -> Self {
        Label::Str(value.clone())
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(value as i64)
    }
}

impl From<&Label> for Label {
    fn from(value: &Label) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Label {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(v) => write!(f, "{}", v),
            Label::Str(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_labels_order_before_strings() {
        let mut labels = vec![Label::from("b"), Label::from(3), Label::from("a"), Label::from(-1)];
        labels.sort();
        assert_eq!(
            labels,
            vec![Label::Int(-1), Label::Int(3), Label::from("a"), Label::from("b")]
        );
    }

    #[test]
    fn test_label_comparisons_with_raw_values() {
        assert_eq!(Label::from("x"), "x");
        assert_eq!(Label::from(7), 7i64);
        assert!(Label::from(7) != "7");
        assert_eq!(Label::from("x").as_int(), None);
        assert_eq!(Label::from(2).to_string(), "2");
    }
}
