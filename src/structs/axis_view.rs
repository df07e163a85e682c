//! # AxisView Module - *Stepped Windows over an Axis*
//!
//! `AxisView` is a **read-only, windowed view** over an [`Axis`], selecting
//! the positions `start, start + step, ...` below `stop`.
//!
//! ## Behaviour
//! - Lookups by label return the label's position in the *underlying* axis.
//! - [`to_axis`](AxisView::to_axis) re-indexes the selected labels from zero.
//! - [`LabelRange`] resolves an inclusive label interval to a
//!   [`SteppedRange`] over a given axis.
//!
//! ## Invariants
//! - `step >= 1`
//! - `stop <= axis.len()` after construction.

use std::iter::FusedIterator;

use crate::{Axis, Label, MinframeError};

/// Half-open stepped position range `[start, stop)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteppedRange {
    pub start: usize,
    pub stop: usize,
    pub step: usize,
}

impl SteppedRange {
    /// Creates a new range.
    ///
    /// # Panics
    /// Panics if `step` is zero.
    pub fn new(start: usize, stop: usize, step: usize) -> Self {
        assert!(step > 0, "SteppedRange: step must be positive");
        SteppedRange { start, stop, step }
    }

    /// Range covering `[0, len)` with unit step.
    #[inline]
    pub fn all(len: usize) -> Self {
        SteppedRange { start: 0, stop: len, step: 1 }
    }

    /// Number of positions selected.
    #[inline]
    pub fn len(&self) -> usize {
        if self.stop <= self.start {
            0
        } else {
            (self.stop - self.start).div_ceil(self.step)
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying position of the `i`-th selected element.
    #[inline]
    pub fn get(&self, i: usize) -> Option<usize> {
        (i < self.len()).then(|| self.start + i * self.step)
    }

    /// Index within the range of underlying position `pos`.
    #[inline]
    pub fn position_of(&self, pos: usize) -> Option<usize> {
        if pos < self.start || pos >= self.stop || (pos - self.start) % self.step != 0 {
            return None;
        }
        Some((pos - self.start) / self.step)
    }

    fn clamped(self, len: usize) -> Self {
        SteppedRange {
            start: self.start.min(len),
            stop: self.stop.min(len),
            step: self.step,
        }
    }
}

/// Inclusive label interval with a step, resolved against an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRange {
    pub start: Label,
    pub stop: Label,
    pub step: usize,
}

impl LabelRange {
    pub fn new(start: impl Into<Label>, stop: impl Into<Label>) -> Self {
        Self::with_step(start, stop, 1)
    }

    /// Panics if `step` is zero.
    pub fn with_step(start: impl Into<Label>, stop: impl Into<Label>, step: usize) -> Self {
        assert!(step > 0, "LabelRange: step must be positive");
        LabelRange { start: start.into(), stop: stop.into(), step }
    }

    /// Resolves both bounds to positions on `axis`.
    pub fn build_index_slice(&self, axis: &Axis) -> Result<SteppedRange, MinframeError> {
        let start = axis.get(&self.start)?;
        let stop = axis.get(&self.stop)?;
        Ok(SteppedRange::new(start, stop + 1, self.step))
    }
}

/// # AxisView
///
/// Borrowed stepped window over an [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisView<'a> {
    axis: &'a Axis,
    range: SteppedRange,
}

impl<'a> AxisView<'a> {
    /// Creates a view; the range is clamped to the axis length.
    pub fn new(axis: &'a Axis, range: SteppedRange) -> Self {
        AxisView { axis, range: range.clamped(axis.len()) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    #[inline]
    pub fn range(&self) -> SteppedRange {
        self.range
    }

    /// The `i`-th label of the view.
    #[inline]
    pub fn label(&self, i: usize) -> Option<&'a Label> {
        self.range.get(i).and_then(|pos| self.axis.label(pos))
    }

    pub fn labels(&self) -> Vec<&'a Label> {
        self.iter().map(|(label, _)| label).collect()
    }

    pub fn contains(&self, label: impl Into<Label>) -> bool {
        self.find(label).is_some()
    }

    /// Underlying axis position of `label`, failing when the label is not in
    /// the view.
    pub fn index(&self, label: impl Into<Label>) -> Result<usize, MinframeError> {
        let label = label.into();
        match self.find(&label) {
            Some((_, pos)) => Ok(pos),
            None => Err(MinframeError::AxisLabelNotFound { label }),
        }
    }

    /// `(label, underlying position)` for `label`, if in the view.
    pub fn find(&self, label: impl Into<Label>) -> Option<(&'a Label, usize)> {
        let pos = self.axis.index_of(&label.into())?;
        self.range.position_of(pos)?;
        Some((self.axis.label(pos)?, pos))
    }

    pub fn iter(&self) -> AxisViewIter<'a> {
        AxisViewIter { axis: self.axis, range: self.range, front: 0, back: self.range.len() }
    }

    /// Copies the selected labels into a new axis indexed from zero.
    pub fn to_axis(&self) -> Axis {
        Axis::from_unique(self.iter().map(|(label, _)| label.clone()).collect())
    }
}

impl<'a> IntoIterator for &AxisView<'a> {
    type Item = (&'a Label, usize);
    type IntoIter = AxisViewIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(label, underlying position)` pairs of an [`AxisView`].
#[derive(Debug, Clone)]
pub struct AxisViewIter<'a> {
    axis: &'a Axis,
    range: SteppedRange,
    front: usize,
    back: usize,
}

impl<'a> AxisViewIter<'a> {
    fn item(&self, i: usize) -> Option<(&'a Label, usize)> {
        let pos = self.range.get(i)?;
        Some((self.axis.label(pos)?, pos))
    }
}

impl<'a> Iterator for AxisViewIter<'a> {
    type Item = (&'a Label, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.item(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.saturating_sub(self.front);
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for AxisViewIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.item(self.back)
    }
}

impl ExactSizeIterator for AxisViewIter<'_> {}

impl FusedIterator for AxisViewIter<'_> {}
