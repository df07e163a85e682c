//! # Scalar Operand
//!
//! Adapter letting a bare value take part in a function node. A scalar has
//! no coordinates and no dimension mapping; it is skipped by the coordinate
//! merge and answers every element access with its own value.

use crate::traits::closure::IntoOperand;
use crate::traits::expression::{FlatData, VariableExpr};
use crate::{JoinPolicy, MinframeError, Selector, SpaceRef};

/// Bare value participating in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScalarOperand<T>(pub T);

impl<T> ScalarOperand<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        ScalarOperand(value)
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for ScalarOperand<T> {
    #[inline]
    fn from(value: T) -> Self {
        ScalarOperand(value)
    }
}

/// Rank-0 flat view over a scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarData<'a, T>(&'a T);

impl<T: Clone> FlatData for ScalarData<'_, T> {
    type Value = T;

    #[inline]
    fn shape(&self) -> &[usize] {
        &[]
    }

    #[inline]
    fn at(&self, _index: &[usize]) -> Option<T> {
        Some(self.0.clone())
    }
}

impl<T: Clone> VariableExpr for ScalarOperand<T> {
    type Value = T;
    type Data<'a>
        = ScalarData<'a, T>
    where
        Self: 'a;

    const IS_SCALAR: bool = true;

    #[inline]
    fn label_space<J: JoinPolicy>(&self) -> Result<Option<SpaceRef<'_>>, MinframeError> {
        Ok(None)
    }

    #[inline]
    fn element(&self, _index: &[usize]) -> Option<T> {
        Some(self.0.clone())
    }

    #[inline]
    fn select<J: JoinPolicy>(&self, _selector: &Selector) -> Result<Option<T>, MinframeError> {
        Ok(Some(self.0.clone()))
    }

    #[inline]
    fn data(&self) -> Result<ScalarData<'_, T>, MinframeError> {
        Ok(ScalarData(&self.0))
    }
}

impl<T: Clone> IntoOperand for ScalarOperand<T> {
    type Operand = Self;

    #[inline]
    fn into_operand(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Inner, Outer};

    #[test]
    fn test_scalar_answers_every_access() {
        let s = ScalarOperand::new(2.5);
        assert!(<ScalarOperand<f64> as VariableExpr>::IS_SCALAR);
        assert!(s.label_space::<Inner>().unwrap().is_none());
        assert_eq!(s.element(&[7, 3]), Some(2.5));
        assert_eq!(VariableExpr::select::<Outer>(&s, &Selector::new()).unwrap(), Some(2.5));
        let data = s.data().unwrap();
        assert_eq!(data.shape(), &[] as &[usize]);
        assert_eq!(data.iter().collect::<Vec<_>>(), vec![Some(2.5)]);
    }
}
