//! # Coordinates Module - *Dimension to Axis Mapping*
//!
//! [`Coordinates`] maps each dimension name to the [`Axis`] of labels that
//! addresses it.
//!
//! ## Broadcasting
//! [`broadcast_coordinates`] combines the coordinates of several operands
//! under a [`JoinPolicy`]:
//! - a dimension present in only some operands is carried over unchanged;
//! - a dimension present in several operands gets the joined axis
//!   (intersection for `Inner`, union for `Outer`).
//!
//! The returned [`TrivialBroadcast`] reports whether every operand already
//! shared the same dimension names and the same labels, which lets callers
//! skip the pairwise dimension-mapping reconciliation.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::{Axis, JoinPolicy};

/// # Coordinates
///
/// Ordered map from dimension name to axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinates {
    axes: BTreeMap<String, Axis>,
}

impl Coordinates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds coordinates from `(dimension, axis)` pairs. Later pairs replace
    /// earlier ones of the same dimension.
    pub fn from_axes<I, K>(axes: I) -> Self
    where
        I: IntoIterator<Item = (K, Axis)>,
        K: Into<String>,
    {
        Coordinates {
            axes: axes.into_iter().map(|(k, axis)| (k.into(), axis)).collect(),
        }
    }

    /// Inserts an axis, returning the one it replaced.
    pub fn insert(&mut self, dimension: impl Into<String>, axis: Axis) -> Option<Axis> {
        self.axes.insert(dimension.into(), axis)
    }

    #[inline]
    pub fn get(&self, dimension: &str) -> Option<&Axis> {
        self.axes.get(dimension)
    }

    #[inline]
    pub fn contains_dimension(&self, dimension: &str) -> bool {
        self.axes.contains_key(dimension)
    }

    /// Number of dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn clear(&mut self) {
        self.axes.clear();
    }

    /// Number of addressable elements: the product of all axis lengths.
    pub fn size(&self) -> usize {
        self.axes.values().map(Axis::len).product()
    }

    pub fn dimension_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.axes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Axis> {
        self.axes.iter()
    }

    /// Joins `other` into `self` under `J`.
    pub fn broadcast_with<J: JoinPolicy>(&mut self, other: &Coordinates) -> TrivialBroadcast {
        let mut trivial = TrivialBroadcast::trivial();
        if self.axes.keys().any(|dim| !other.axes.contains_key(dim)) {
            trivial.same_dimensions = false;
        }
        for (dim, axis) in &other.axes {
            match self.axes.get_mut(dim) {
                Some(existing) => {
                    if existing != axis {
                        trivial.same_labels = false;
                        *existing = J::join_axes(existing, axis);
                    }
                }
                None => {
                    trivial.same_dimensions = false;
                    self.axes.insert(dim.clone(), axis.clone());
                }
            }
        }
        trivial
    }
}

impl<'a> IntoIterator for &'a Coordinates {
    type Item = (&'a String, &'a Axis);
    type IntoIter = btree_map::Iter<'a, String, Axis>;
    fn into_iter(self) -> Self::IntoIter {
        self.axes.iter()
    }
}

/// Outcome of a coordinate broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrivialBroadcast {
    /// Every operand had the same set of dimension names.
    pub same_dimensions: bool,
    /// Every operand had identical axes for every dimension.
    pub same_labels: bool,
}

impl TrivialBroadcast {
    #[inline]
    pub fn trivial() -> Self {
        TrivialBroadcast { same_dimensions: true, same_labels: true }
    }

    #[inline]
    pub fn combine(self, other: TrivialBroadcast) -> Self {
        TrivialBroadcast {
            same_dimensions: self.same_dimensions && other.same_dimensions,
            same_labels: self.same_labels && other.same_labels,
        }
    }

    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.same_dimensions && self.same_labels
    }
}

/// Clears `output` and fills it with the join of `inputs` under `J`.
pub fn broadcast_coordinates<J: JoinPolicy>(
    output: &mut Coordinates,
    inputs: &[&Coordinates],
) -> TrivialBroadcast {
    output.clear();
    let Some((first, rest)) = inputs.split_first() else {
        return TrivialBroadcast::trivial();
    };
    output.clone_from(first);
    rest.iter().fold(TrivialBroadcast::trivial(), |trivial, coords| {
        trivial.combine(output.broadcast_with::<J>(coords))
    })
}
