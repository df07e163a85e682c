//! # Axis Module - *Ordered Label Sets*
//!
//! An [`Axis`] is the ordered set of labels addressing one dimension of a
//! variable. It maps each label to its position with O(1) lookup.
//!
//! ## Behaviour
//! - Labels are unique; construction rejects duplicates.
//! - Axes remember whether their labels are sorted. Merging two sorted axes
//!   yields a sorted union; otherwise the union keeps the left axis order and
//!   appends unseen labels from the right in their own order.
//! - Intersection keeps the left axis order.

use std::collections::HashMap;

use crate::{Label, MinframeError};

/// # Axis
///
/// Ordered, duplicate-free set of labels with position lookup.
#[derive(Debug, Clone, Default)]
pub struct Axis {
    labels: Vec<Label>,
    index: HashMap<Label, usize>,
    is_sorted: bool,
}

impl Axis {
    /// Builds an axis from labels, rejecting duplicates.
    pub fn new<I, L>(labels: I) -> Result<Self, MinframeError>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let labels: Vec<Label> = labels.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(labels.len());
        for (pos, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), pos).is_some() {
                return Err(MinframeError::DuplicateLabel { label: label.clone() });
            }
        }
        let is_sorted = labels.windows(2).all(|w| w[0] < w[1]);
        Ok(Axis { labels, index, is_sorted })
    }

    /// Builds an axis of integer labels `0..len`.
    pub fn range(len: usize) -> Self {
        Self::from_unique((0..len as i64).map(Label::Int).collect())
    }

    // Caller guarantees uniqueness.
    pub(crate) fn from_unique(labels: Vec<Label>) -> Self {
        let index = labels
            .iter()
            .enumerate()
            .map(|(pos, label)| (label.clone(), pos))
            .collect();
        let is_sorted = labels.windows(2).all(|w| w[0] < w[1]);
        Axis { labels, index, is_sorted }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.is_sorted
    }

    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the label at `pos`, or `None` beyond the end.
    #[inline]
    pub fn label(&self, pos: usize) -> Option<&Label> {
        self.labels.get(pos)
    }

    #[inline]
    pub fn contains(&self, label: impl Into<Label>) -> bool {
        self.index.contains_key(&label.into())
    }

    /// Position of `label`, or `None` when absent.
    #[inline]
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Position of `label`, failing with `AxisLabelNotFound` when absent.
    pub fn get(&self, label: impl Into<Label>) -> Result<usize, MinframeError> {
        let label = label.into();
        self.index_of(&label)
            .ok_or(MinframeError::AxisLabelNotFound { label })
    }

    /// Iterates `(label, position)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, usize)> + '_ {
        self.labels.iter().enumerate().map(|(pos, label)| (label, pos))
    }

    /// Union of both label sets.
    pub fn merge(&self, other: &Axis) -> Axis {
        if self == other {
            return self.clone();
        }
        if self.is_sorted && other.is_sorted {
            let mut labels = Vec::with_capacity(self.len() + other.len());
            let (mut i, mut j) = (0, 0);
            while i < self.len() && j < other.len() {
                let (l, r) = (&self.labels[i], &other.labels[j]);
                if l < r {
                    labels.push(l.clone());
                    i += 1;
                } else if r < l {
                    labels.push(r.clone());
                    j += 1;
                } else {
                    labels.push(l.clone());
                    i += 1;
                    j += 1;
                }
            }
            labels.extend_from_slice(&self.labels[i..]);
            labels.extend_from_slice(&other.labels[j..]);
            return Self::from_unique(labels);
        }
        let mut labels = self.labels.clone();
        labels.extend(
            other
                .labels
                .iter()
                .filter(|label| !self.index.contains_key(*label))
                .cloned(),
        );
        Self::from_unique(labels)
    }

    /// Labels of `self` also present in `other`, in `self` order.
    pub fn intersect(&self, other: &Axis) -> Axis {
        if self == other {
            return self.clone();
        }
        Self::from_unique(
            self.labels
                .iter()
                .filter(|label| other.index.contains_key(*label))
                .cloned()
                .collect(),
        )
    }
}

impl PartialEq for Axis {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for Axis {}

impl<'a> IntoIterator for &'a Axis {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(labels: &[&str]) -> Axis {
        Axis::new(labels.iter().copied()).unwrap()
    }

    #[test]
    fn test_lookup_and_duplicates() {
        let a = axis(&["a", "c", "d"]);
        assert_eq!(a.len(), 3);
        assert!(a.is_sorted());
        assert_eq!(a.get("c").unwrap(), 1);
        assert!(a.contains("d"));
        assert!(!a.contains("b"));
        assert_eq!(
            a.get("b"),
            Err(MinframeError::AxisLabelNotFound { label: Label::from("b") })
        );
        assert_eq!(
            Axis::new(["a", "b", "a"]),
            Err(MinframeError::DuplicateLabel { label: Label::from("a") })
        );
    }

    #[test]
    fn test_merge_sorted_axes_keeps_order() {
        let merged = axis(&["a", "c", "e"]).merge(&axis(&["b", "c", "f"]));
        assert_eq!(merged, axis(&["a", "b", "c", "e", "f"]));
        assert!(merged.is_sorted());
    }

    #[test]
    fn test_merge_unsorted_axes_appends() {
        let merged = axis(&["d", "a"]).merge(&axis(&["b", "a", "c"]));
        assert_eq!(merged, axis(&["d", "a", "b", "c"]));
        assert_eq!(merged.get("c").unwrap(), 3);
    }

    #[test]
    fn test_intersect_keeps_left_order() {
        let common = axis(&["d", "b", "a"]).intersect(&axis(&["a", "b", "c"]));
        assert_eq!(common, axis(&["d", "b", "a"]).intersect(&axis(&["b", "a"])));
        assert_eq!(common.labels(), &[Label::from("b"), Label::from("a")]);
        assert!(axis(&["x"]).intersect(&axis(&["y"])).is_empty());
    }

    #[test]
    fn test_range_axis() {
        let r = Axis::range(3);
        assert_eq!(r.labels(), &[Label::Int(0), Label::Int(1), Label::Int(2)]);
        assert_eq!(r.get(2).unwrap(), 2);
    }
}
