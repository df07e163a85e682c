// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Elementwise Operators
//!
//! Builders for [`VariableFunction`] nodes.
//!
//! - `apply1` / `apply2` / `apply3` bind any closure or function to operands.
//! - `add`, `sub`, `mul`, `div`, `neg`, `abs`, `sqrt`, `maximum` and
//!   `minimum` bind the matching elementwise operation as a plain function
//!   pointer, so the node type stays nameable.
//! - `std::ops` impls on `&Variable<T>` forward to the free functions, with
//!   bare scalars accepted on either side.
//!
//! Operands are anything implementing [`IntoOperand`]: variables, function
//! nodes, references to either, or bare numbers.

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{Float, Signed};

use crate::traits::closure::{ElementFn, IntoOperand, OperandTuple};
use crate::traits::expression::VariableExpr;
use crate::{ScalarOperand, Variable, VariableFunction};

/// Binary elementwise operation on `T`.
pub type BinaryFn<T> = fn(T, T) -> T;

/// Unary elementwise operation on `T`.
pub type UnaryFn<T> = fn(T) -> T;

type Unary<T, A> = VariableFunction<UnaryFn<T>, (<A as IntoOperand>::Operand,)>;
type Binary<T, A, B> =
    VariableFunction<BinaryFn<T>, (<A as IntoOperand>::Operand, <B as IntoOperand>::Operand)>;

/// Binds `f` to one operand.
pub fn apply1<F, A>(f: F, a: A) -> VariableFunction<F, (A::Operand,)>
where
    A: IntoOperand,
    F: ElementFn<<(A::Operand,) as OperandTuple>::Values>,
{
    VariableFunction::new(f, (a.into_operand(),))
}

/// Binds `f` to two operands.
pub fn apply2<F, A, B>(f: F, a: A, b: B) -> VariableFunction<F, (A::Operand, B::Operand)>
where
    A: IntoOperand,
    B: IntoOperand,
    F: ElementFn<<(A::Operand, B::Operand) as OperandTuple>::Values>,
{
    VariableFunction::new(f, (a.into_operand(), b.into_operand()))
}

/// Binds `f` to three operands.
pub fn apply3<F, A, B, C>(
    f: F,
    a: A,
    b: B,
    c: C,
) -> VariableFunction<F, (A::Operand, B::Operand, C::Operand)>
where
    A: IntoOperand,
    B: IntoOperand,
    C: IntoOperand,
    F: ElementFn<<(A::Operand, B::Operand, C::Operand) as OperandTuple>::Values>,
{
    VariableFunction::new(f, (a.into_operand(), b.into_operand(), c.into_operand()))
}

macro_rules! binary_builder {
    ($(#[$doc:meta])* $name:ident, $bound:path, $op:expr) => {
        $(#[$doc])*
        pub fn $name<T, A, B>(a: A, b: B) -> Binary<T, A, B>
        where
            T: $bound,
            A: IntoOperand,
            B: IntoOperand,
            A::Operand: VariableExpr<Value = T>,
            B::Operand: VariableExpr<Value = T>,
        {
            apply2($op as BinaryFn<T>, a, b)
        }
    };
}

binary_builder!(
    /// Elementwise `a + b`.
    add, Add<Output = T>, <T as Add>::add
);
binary_builder!(
    /// Elementwise `a - b`.
    sub, Sub<Output = T>, <T as Sub>::sub
);
binary_builder!(
    /// Elementwise `a * b`.
    mul, Mul<Output = T>, <T as Mul>::mul
);
binary_builder!(
    /// Elementwise `a / b`.
    div, Div<Output = T>, <T as Div>::div
);
binary_builder!(
    /// Elementwise maximum. If the values are unordered, `a` wins.
    maximum, PartialOrd, max_value::<T>
);
binary_builder!(
    /// Elementwise minimum. If the values are unordered, `a` wins.
    minimum, PartialOrd, min_value::<T>
);

macro_rules! unary_builder {
    ($(#[$doc:meta])* $name:ident, $bound:path, $op:expr) => {
        $(#[$doc])*
        pub fn $name<T, A>(a: A) -> Unary<T, A>
        where
            T: $bound,
            A: IntoOperand,
            A::Operand: VariableExpr<Value = T>,
        {
            apply1($op as UnaryFn<T>, a)
        }
    };
}

unary_builder!(
    /// Elementwise `-a`.
    neg, Neg<Output = T>, <T as Neg>::neg
);
unary_builder!(
    /// Elementwise absolute value.
    abs, Signed, abs_value::<T>
);
unary_builder!(
    /// Elementwise square root.
    sqrt, Float, <T as Float>::sqrt
);

#[inline]
fn max_value<T: PartialOrd>(a: T, b: T) -> T {
    if b > a { b } else { a }
}

#[inline]
fn min_value<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

#[inline]
fn abs_value<T: Signed>(a: T) -> T {
    a.abs()
}

macro_rules! impl_variable_op {
    ($trait:ident, $method:ident, [$($scalar:ty),*]) => {
        impl<'a, 'b, T> $trait<&'b Variable<T>> for &'a Variable<T>
        where
            T: Clone + $trait<Output = T>,
        {
            type Output = VariableFunction<BinaryFn<T>, (&'a Variable<T>, &'b Variable<T>)>;

            #[inline]
            fn $method(self, rhs: &'b Variable<T>) -> Self::Output {
                $method(self, rhs)
            }
        }

        $(
            impl<'a> $trait<$scalar> for &'a Variable<$scalar> {
                type Output =
                    VariableFunction<BinaryFn<$scalar>, (&'a Variable<$scalar>, ScalarOperand<$scalar>)>;

                #[inline]
                fn $method(self, rhs: $scalar) -> Self::Output {
                    $method(self, rhs)
                }
            }

            impl<'a> $trait<&'a Variable<$scalar>> for $scalar {
                type Output =
                    VariableFunction<BinaryFn<$scalar>, (ScalarOperand<$scalar>, &'a Variable<$scalar>)>;

                #[inline]
                fn $method(self, rhs: &'a Variable<$scalar>) -> Self::Output {
                    $method(self, rhs)
                }
            }
        )*
    };
}

impl_variable_op!(Add, add, [f32, f64, i32, i64]);
impl_variable_op!(Sub, sub, [f32, f64, i32, i64]);
impl_variable_op!(Mul, mul, [f32, f64, i32, i64]);
impl_variable_op!(Div, div, [f32, f64, i32, i64]);

impl<'a, T> Neg for &'a Variable<T>
where
    T: Clone + Neg<Output = T>,
{
    type Output = VariableFunction<UnaryFn<T>, (&'a Variable<T>,)>;

    #[inline]
    fn neg(self) -> Self::Output {
        neg(self)
    }
}
