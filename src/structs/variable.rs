//! # Variable Module - *Labeled Dense Arrays*
//!
//! A [`Variable`] is a dense, row-major array of optional values whose axes
//! are named dimensions addressed by axis labels.
//!
//! ## Layout
//! - `data` holds one `Option<T>` per element in row-major order of the
//!   dimension mapping; `None` marks a missing value.
//! - `shape[i]` is the length of the axis of the `i`-th dimension in the
//!   mapping.
//!
//! ## Access
//! - [`at`](Variable::at) reads by flat index, aligned on the trailing
//!   dimension, with length-one axes broadcasting.
//! - [`select`](Variable::select) reads by label through a [`Selector`].
//!
//! Combining variables with [`apply2`](crate::apply2) or the arithmetic
//! operators yields a lazy [`VariableFunction`](crate::VariableFunction).

use num_traits::{One, Zero};
use vec64::Vec64;

use crate::kernels::broadcast::{broadcast_offset, row_major_strides};
use crate::traits::closure::IntoOperand;
use crate::traits::expression::{FlatData, VariableExpr};
use crate::{
    Coordinates, DefaultJoin, DimensionMapping, JoinPolicy, LabelSpace, MinframeError, Selector,
    SpaceRef,
};

/// # Variable
///
/// Labeled dense array of optional values.
///
/// ### Properties
/// - `data`: Flat buffer in row-major order of the dimension mapping.
/// - `space`: Coordinates and dimension mapping.
/// - `shape` / `strides`: derived from `space` on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable<T> {
    data: Vec64<Option<T>>,
    space: LabelSpace,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<T> Variable<T> {
    /// Constructs a variable from optional values in row-major order.
    ///
    /// Fails if the coordinates and the dimension mapping do not name the
    /// same dimensions, or the data length is not the coordinate size.
    pub fn new(
        data: impl IntoIterator<Item = Option<T>>,
        coordinates: Coordinates,
        dimensions: DimensionMapping,
    ) -> Result<Self, MinframeError> {
        let data: Vec64<Option<T>> = data.into_iter().collect();
        let space = LabelSpace::new(coordinates, dimensions)?;
        let expected = space.size();
        if data.len() != expected {
            return Err(MinframeError::LengthMismatch { expected, found: data.len() });
        }
        let shape = space.shape();
        let strides = row_major_strides(&shape);
        Ok(Variable { data, space, shape, strides })
    }

    /// Constructs a variable where every value is present.
    pub fn from_values(
        values: impl IntoIterator<Item = T>,
        coordinates: Coordinates,
        dimensions: DimensionMapping,
    ) -> Result<Self, MinframeError> {
        Self::new(values.into_iter().map(Some), coordinates, dimensions)
    }

    /// Constructs a variable with every element missing.
    pub fn missing(coordinates: Coordinates, dimensions: DimensionMapping) -> Result<Self, MinframeError> {
        let len = coordinates.size();
        Self::new(std::iter::repeat_with(|| None).take(len), coordinates, dimensions)
    }

    #[inline]
    pub fn coordinates(&self) -> &Coordinates {
        &self.space.coordinates
    }

    #[inline]
    pub fn dimension_mapping(&self) -> &DimensionMapping {
        &self.space.dimensions
    }

    #[inline]
    pub fn dimension_labels(&self) -> &[String] {
        self.space.dimensions.labels()
    }

    #[inline]
    pub fn space(&self) -> &LabelSpace {
        &self.space
    }

    /// Number of dimensions.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The raw buffer, row-major.
    #[inline]
    pub fn values(&self) -> &[Option<T>] {
        &self.data[..]
    }

    /// Reference to the element at a flat index.
    #[inline]
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let offset = broadcast_offset(&self.shape, &self.strides, index)?;
        self.values().get(offset)?.as_ref()
    }

    /// Borrowed flat data view.
    #[inline]
    pub fn data(&self) -> VariableData<'_, T> {
        VariableData { values: &self.data[..], shape: &self.shape, strides: &self.strides }
    }

    /// Consumes the variable, returning the raw buffer and its label space.
    pub fn into_parts(self) -> (Vec64<Option<T>>, LabelSpace) {
        (self.data, self.space)
    }
}

impl<T: Clone> Variable<T> {
    /// Constructs a variable with every element set to `value`.
    pub fn full(value: T, coordinates: Coordinates, dimensions: DimensionMapping) -> Result<Self, MinframeError> {
        let len = coordinates.size();
        Self::new(std::iter::repeat_n(Some(value), len), coordinates, dimensions)
    }

    /// Element at a flat index.
    #[inline]
    pub fn at(&self, index: &[usize]) -> Option<T> {
        self.get(index).cloned()
    }

    /// Element addressed by labels, under the default join.
    pub fn select(&self, selector: &Selector) -> Result<Option<T>, MinframeError> {
        self.select_with::<DefaultJoin>(selector)
    }

    /// Element addressed by labels under `J`.
    pub fn select_with<J: JoinPolicy>(&self, selector: &Selector) -> Result<Option<T>, MinframeError> {
        match selector.resolve::<J>(&self.space)? {
            Some(index) => Ok(self.at(&index)),
            None => Ok(None),
        }
    }
}

impl<T: Clone + Zero> Variable<T> {
    pub fn zeros(coordinates: Coordinates, dimensions: DimensionMapping) -> Result<Self, MinframeError> {
        Self::full(T::zero(), coordinates, dimensions)
    }
}

impl<T: Clone + One> Variable<T> {
    pub fn ones(coordinates: Coordinates, dimensions: DimensionMapping) -> Result<Self, MinframeError> {
        Self::full(T::one(), coordinates, dimensions)
    }
}

/// Borrowed flat view over a [`Variable`]'s buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableData<'a, T> {
    values: &'a [Option<T>],
    shape: &'a [usize],
    strides: &'a [usize],
}

impl<T: Clone> FlatData for VariableData<'_, T> {
    type Value = T;

    #[inline]
    fn shape(&self) -> &[usize] {
        self.shape
    }

    #[inline]
    fn at(&self, index: &[usize]) -> Option<T> {
        let offset = broadcast_offset(self.shape, self.strides, index)?;
        self.values.get(offset)?.clone()
    }
}

impl<T: Clone> VariableExpr for Variable<T> {
    type Value = T;
    type Data<'a>
        = VariableData<'a, T>
    where
        Self: 'a;

    #[inline]
    fn label_space<J: JoinPolicy>(&self) -> Result<Option<SpaceRef<'_>>, MinframeError> {
        Ok(Some(SpaceRef::Borrowed(&self.space)))
    }

    #[inline]
    fn element(&self, index: &[usize]) -> Option<T> {
        self.at(index)
    }

    #[inline]
    fn select<J: JoinPolicy>(&self, selector: &Selector) -> Result<Option<T>, MinframeError> {
        self.select_with::<J>(selector)
    }

    #[inline]
    fn data(&self) -> Result<VariableData<'_, T>, MinframeError> {
        Ok(Variable::data(self))
    }
}

impl<T: Clone> IntoOperand for Variable<T> {
    type Operand = Self;

    #[inline]
    fn into_operand(self) -> Self {
        self
    }
}

impl<'a, T: Clone> IntoOperand for &'a Variable<T> {
    type Operand = &'a Variable<T>;

    #[inline]
    fn into_operand(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, Label, Outer, sel};

    fn grid() -> Variable<i32> {
        let coords = Coordinates::from_axes([
            ("x", Axis::new(["a", "b"]).unwrap()),
            ("y", Axis::new([1, 2, 3]).unwrap()),
        ]);
        let dims = DimensionMapping::new(["x", "y"]).unwrap();
        Variable::new(
            vec![Some(1), Some(2), None, Some(4), Some(5), Some(6)],
            coords,
            dims,
        )
        .unwrap()
    }

    #[test]
    fn test_construction_checks_length_and_dimensions() {
        let coords = Coordinates::from_axes([("x", Axis::new(["a", "b"]).unwrap())]);
        let dims = DimensionMapping::new(["x"]).unwrap();
        assert_eq!(
            Variable::from_values(vec![1.0], coords.clone(), dims).unwrap_err(),
            MinframeError::LengthMismatch { expected: 2, found: 1 }
        );
        let dims = DimensionMapping::new(["y"]).unwrap();
        assert_eq!(
            Variable::from_values(vec![1.0, 2.0], coords, dims).unwrap_err(),
            MinframeError::UnknownDimension { dimension: "y".into() }
        );
    }

    #[test]
    fn test_flat_access() {
        let v = grid();
        assert_eq!(v.shape(), &[2, 3]);
        assert_eq!(v.size(), 6);
        assert_eq!(v.dimension(), 2);
        assert_eq!(v.at(&[1, 0]), Some(4));
        assert_eq!(v.at(&[0, 2]), None);
        assert_eq!(v.at(&[2, 0]), None);
        assert_eq!(v.get(&[0, 1]), Some(&2));
    }

    #[test]
    fn test_labeled_access() {
        let v = grid();
        assert_eq!(v.select(&sel! { "x" => "b", "y" => 2 }).unwrap(), Some(5));
        assert_eq!(
            v.select(&sel! { "x" => "c", "y" => 2 }),
            Err(MinframeError::LabelNotFound { dimension: "x".into(), label: Label::from("c") })
        );
        assert_eq!(v.select_with::<Outer>(&sel! { "x" => "c", "y" => 2 }).unwrap(), None);
    }

    #[test]
    fn test_flat_view_iterates_row_major() {
        let v = grid();
        let collected: Vec<_> = v.data().iter().collect();
        assert_eq!(collected, v.values().to_vec());
        // restartable
        assert_eq!(v.data().iter().count(), 6);
    }

    #[test]
    fn test_filled_constructors() {
        let coords = Coordinates::from_axes([("x", Axis::range(3))]);
        let dims = DimensionMapping::new(["x"]).unwrap();
        let z = Variable::<f64>::zeros(coords.clone(), dims.clone()).unwrap();
        assert!(z.values().iter().all(|v| *v == Some(0.0)));
        let o = Variable::<i64>::ones(coords.clone(), dims.clone()).unwrap();
        assert_eq!(o.at(&[2]), Some(1));
        let m = Variable::<i64>::missing(coords, dims).unwrap();
        assert_eq!(m.at(&[0]), None);
    }
}
