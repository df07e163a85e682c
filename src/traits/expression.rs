//! # Expression Traits - *Operand Protocol for Lazy Variable Expressions*
//!
//! - **VariableExpr**: what a function node needs from each of its operands:
//!   a label space, flat element access, labeled selection and a lazy flat
//!   data view.
//! - **FlatData**: the coordinate-free, restartable element view underlying
//!   every operand. Function nodes build one from their operands' views so
//!   nodes nest without materializing intermediates.
//!
//! Values are returned as `Option`, where `None` is the missing-value
//! marker (a null element, an out-of-range flat index, or a label filled in
//! by an outer join).

use crate::kernels::broadcast::RowMajorIndices;
use crate::{JoinPolicy, MinframeError, Selector, SpaceRef};

/// Operand protocol for function nodes.
///
/// Implemented by [`Variable`](crate::Variable), by
/// [`ScalarOperand`](crate::ScalarOperand), by
/// [`VariableFunction`](crate::VariableFunction), and by references to any
/// of these.
pub trait VariableExpr {
    /// Element type produced by this operand
    type Value;

    /// Lazy flat view over this operand's data
    type Data<'a>: FlatData<Value = Self::Value>
    where
        Self: 'a;

    /// `true` for operands without a coordinate system.
    const IS_SCALAR: bool = false;

    /// The operand's coordinates and dimension mapping under `J`.
    ///
    /// Scalars return `Ok(None)`.
    fn label_space<J: JoinPolicy>(&self) -> Result<Option<SpaceRef<'_>>, MinframeError>;

    /// Element at a coordinate-free flat index.
    fn element(&self, index: &[usize]) -> Option<Self::Value>;

    /// Element addressed by labels.
    fn select<J: JoinPolicy>(&self, selector: &Selector) -> Result<Option<Self::Value>, MinframeError>;

    fn data(&self) -> Result<Self::Data<'_>, MinframeError>;
}

impl<E: VariableExpr + ?Sized> VariableExpr for &E {
    type Value = E::Value;
    type Data<'a>
        = E::Data<'a>
    where
        Self: 'a;

    const IS_SCALAR: bool = E::IS_SCALAR;

    #[inline]
    fn label_space<J: JoinPolicy>(&self) -> Result<Option<SpaceRef<'_>>, MinframeError> {
        (**self).label_space::<J>()
    }

    #[inline]
    fn element(&self, index: &[usize]) -> Option<Self::Value> {
        (**self).element(index)
    }

    #[inline]
    fn select<J: JoinPolicy>(&self, selector: &Selector) -> Result<Option<Self::Value>, MinframeError> {
        (**self).select::<J>(selector)
    }

    #[inline]
    fn data(&self) -> Result<Self::Data<'_>, MinframeError> {
        (**self).data()
    }
}

/// Coordinate-free element view.
pub trait FlatData {
    type Value;

    /// Shape of the view; an empty shape is a single element.
    fn shape(&self) -> &[usize];

    /// Element at `index`, aligned on the trailing dimension.
    fn at(&self, index: &[usize]) -> Option<Self::Value>;

    /// Number of elements.
    fn len(&self) -> usize {
        self.shape().iter().product()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major iteration over every element. Each call starts afresh.
    fn iter(&self) -> FlatIter<'_, Self>
    where
        Self: Sized,
    {
        FlatIter { data: self, indices: RowMajorIndices::new(self.shape()) }
    }
}

/// Row-major iterator over a [`FlatData`] view.
#[derive(Debug, Clone)]
pub struct FlatIter<'a, D> {
    data: &'a D,
    indices: RowMajorIndices,
}

impl<D: FlatData> Iterator for FlatIter<'_, D> {
    type Item = Option<D::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some(self.data.at(&index))
    }
}
