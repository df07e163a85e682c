//! # Selector Module - *Label-Based Element Lookup*
//!
//! A [`Selector`] names one axis label per dimension. Operands resolve it
//! against their own coordinates into a flat position.
//!
//! ## Resolution rules
//! - Entries for dimensions the operand does not have are ignored.
//! - A dimension the operand has but the selector omits, or maps to
//!   [`SelectorValue::All`], resolves to position `0` when its axis has a
//!   single label, and fails with `UnresolvedDimension` otherwise.
//! - A label absent from the operand's axis fails with `LabelNotFound`,
//!   unless the join policy fills missing labels, in which case the
//!   operand yields the missing-value marker.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::{JoinPolicy, Label, LabelSpace, MinframeError};

/// Per-dimension entry of a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorValue {
    Label(Label),
    All,
}

impl From<Label> for SelectorValue {
    fn from(value: Label) -> Self {
        SelectorValue::Label(value)
    }
}

impl From<&Label> for SelectorValue {
    fn from(value: &Label) -> Self {
        SelectorValue::Label(value.clone())
    }
}

impl From<&str> for SelectorValue {
    fn from(value: &str) -> Self {
        SelectorValue::Label(value.into())
    }
}

impl From<String> for SelectorValue {
    fn from(value: String) -> Self {
        SelectorValue::Label(value.into())
    }
}

impl From<i64> for SelectorValue {
    fn from(value: i64) -> Self {
        SelectorValue::Label(value.into())
    }
}

impl From<i32> for SelectorValue {
    fn from(value: i32) -> Self {
        SelectorValue::Label(value.into())
    }
}

/// # Selector
///
/// Map from dimension name to the label selected on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    entries: BTreeMap<String, SelectorValue>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<SelectorValue>) -> Self {
        self.insert(dimension, value);
        self
    }

    pub fn insert(
        &mut self,
        dimension: impl Into<String>,
        value: impl Into<SelectorValue>,
    ) -> Option<SelectorValue> {
        self.entries.insert(dimension.into(), value.into())
    }

    #[inline]
    pub fn get(&self, dimension: &str) -> Option<&SelectorValue> {
        self.entries.get(dimension)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SelectorValue> {
        self.entries.iter()
    }

    /// Resolves the selector to one position per dimension of `space`, in
    /// storage order.
    ///
    /// Returns `Ok(None)` when a label is missing and `J` fills missing
    /// labels.
    pub fn resolve<J: JoinPolicy>(
        &self,
        space: &LabelSpace,
    ) -> Result<Option<Vec<usize>>, MinframeError> {
        let mut positions = Vec::with_capacity(space.dimensions.len());
        let mut missing = false;
        for dim in space.dimensions.labels() {
            let axis = space
                .coordinates
                .get(dim)
                .ok_or_else(|| MinframeError::UnknownDimension { dimension: dim.clone() })?;
            match self.entries.get(dim) {
                Some(SelectorValue::Label(label)) => match axis.index_of(label) {
                    Some(pos) => positions.push(pos),
                    None if J::FILLS_MISSING => {
                        missing = true;
                        positions.push(0);
                    }
                    None => {
                        return Err(MinframeError::LabelNotFound {
                            dimension: dim.clone(),
                            label: label.clone(),
                        });
                    }
                },
                Some(SelectorValue::All) | None if axis.len() == 1 => positions.push(0),
                Some(SelectorValue::All) | None => {
                    return Err(MinframeError::UnresolvedDimension { dimension: dim.clone() });
                }
            }
        }
        Ok((!missing).then_some(positions))
    }
}

impl<K, V> FromIterator<(K, V)> for Selector
where
    K: Into<String>,
    V: Into<SelectorValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Selector {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Selector {
    type Item = (&'a String, &'a SelectorValue);
    type IntoIter = btree_map::Iter<'a, String, SelectorValue>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, Coordinates, DimensionMapping, Inner, Outer};

    fn space() -> LabelSpace {
        LabelSpace::new(
            Coordinates::from_axes([
                ("x", Axis::new(["a", "b", "c"]).unwrap()),
                ("y", Axis::new([10, 20]).unwrap()),
                ("z", Axis::new(["only"]).unwrap()),
            ]),
            DimensionMapping::new(["x", "y", "z"]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_positions_in_storage_order() {
        let sel = Selector::new().with("y", 20).with("x", "c").with("other", "ignored");
        assert_eq!(sel.resolve::<Inner>(&space()).unwrap(), Some(vec![2, 1, 0]));
    }

    #[test]
    fn test_all_marker_needs_singleton_axis() {
        let sel = Selector::new().with("x", "a").with("y", SelectorValue::All);
        assert_eq!(
            sel.resolve::<Inner>(&space()),
            Err(MinframeError::UnresolvedDimension { dimension: "y".into() })
        );
        let sel = Selector::new().with("x", "a").with("y", 10).with("z", SelectorValue::All);
        assert_eq!(sel.resolve::<Inner>(&space()).unwrap(), Some(vec![0, 0, 0]));
    }

    #[test]
    fn test_missing_label_depends_on_join() {
        let sel = Selector::new().with("x", "d").with("y", 10);
        assert_eq!(
            sel.resolve::<Inner>(&space()),
            Err(MinframeError::LabelNotFound { dimension: "x".into(), label: "d".into() })
        );
        assert_eq!(sel.resolve::<Outer>(&space()).unwrap(), None);
    }
}
