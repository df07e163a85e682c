//! # Closure Traits - *Operand Storage and Fixed-Arity Dispatch*
//!
//! - **IntoOperand**: maps an argument to the type a function node stores
//!   for it. Bare numbers become [`ScalarOperand`]s; variables, function
//!   nodes and references to either are stored unchanged.
//! - **ElementFn**: the elementwise operation, called with one tuple of
//!   operand values. Implemented for every `Fn` of matching arity.
//! - **OperandTuple** / **DataTuple**: the operand tuple of a node and the
//!   tuple of their flat data views, implemented for arities one to four.

use crate::traits::expression::{FlatData, VariableExpr};
use crate::{JoinPolicy, MinframeError, ScalarOperand, Selector, SpaceRef};

/// Conversion of a function argument into its stored operand.
pub trait IntoOperand {
    type Operand: VariableExpr;

    fn into_operand(self) -> Self::Operand;
}

macro_rules! impl_scalar_into_operand {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoOperand for $t {
                type Operand = ScalarOperand<$t>;

                #[inline]
                fn into_operand(self) -> ScalarOperand<$t> {
                    ScalarOperand(self)
                }
            }
        )*
    };
}

impl_scalar_into_operand!(f32, f64, i32, i64, u32, u64, bool);

/// Elementwise operation over a tuple of operand values.
pub trait ElementFn<Args> {
    type Output;

    fn call(&self, args: Args) -> Self::Output;
}

/// Tuple of flat data views, one per operand.
pub trait DataTuple {
    type Values;

    /// Shape of every view, in operand order.
    fn shapes(&self) -> Vec<&[usize]>;

    /// One value per view at `index`, or `None` if any is missing.
    fn at(&self, index: &[usize]) -> Option<Self::Values>;
}

/// Fixed-arity tuple of operands.
pub trait OperandTuple {
    /// Tuple of one value per operand
    type Values;

    /// Tuple of one flat view per operand
    type Data<'a>: DataTuple<Values = Self::Values>
    where
        Self: 'a;

    const ARITY: usize;

    /// `true` when no operand carries a coordinate system.
    const ALL_SCALAR: bool;

    /// Label spaces of the labeled operands, in declared order.
    fn label_spaces<J: JoinPolicy>(&self) -> Result<Vec<SpaceRef<'_>>, MinframeError>;

    /// Label space of the first labeled operand.
    fn first_non_scalar<J: JoinPolicy>(&self) -> Result<SpaceRef<'_>, MinframeError>;

    /// One element per operand at a flat index, or `None` if any is missing.
    fn elements(&self, index: &[usize]) -> Option<Self::Values>;

    /// Resolves `selector` on every operand.
    ///
    /// All operands are resolved before the results are combined, so an
    /// error from any operand surfaces even when another yields a missing
    /// value.
    fn select_all<J: JoinPolicy>(
        &self,
        selector: &Selector,
    ) -> Result<Option<Self::Values>, MinframeError>;

    fn data(&self) -> Result<Self::Data<'_>, MinframeError>;
}

macro_rules! impl_tuples {
    ($arity:expr; $($name:ident $var:ident $idx:tt),+) => {
        impl<Func, Ret, $($name),+> ElementFn<($($name,)+)> for Func
        where
            Func: Fn($($name),+) -> Ret,
        {
            type Output = Ret;

            #[inline]
            fn call(&self, ($($var,)+): ($($name,)+)) -> Ret {
                self($($var),+)
            }
        }

        impl<$($name: FlatData),+> DataTuple for ($($name,)+) {
            type Values = ($($name::Value,)+);

            fn shapes(&self) -> Vec<&[usize]> {
                vec![$(self.$idx.shape()),+]
            }

            #[inline]
            fn at(&self, index: &[usize]) -> Option<Self::Values> {
                Some(($(self.$idx.at(index)?,)+))
            }
        }

        impl<$($name: VariableExpr),+> OperandTuple for ($($name,)+) {
            type Values = ($($name::Value,)+);
            type Data<'a>
                = ($($name::Data<'a>,)+)
            where
                Self: 'a;

            const ARITY: usize = $arity;
            const ALL_SCALAR: bool = $($name::IS_SCALAR &&)+ true;

            fn label_spaces<J: JoinPolicy>(&self) -> Result<Vec<SpaceRef<'_>>, MinframeError> {
                let mut spaces = Vec::with_capacity($arity);
                $(
                    if let Some(space) = self.$idx.label_space::<J>()? {
                        spaces.push(space);
                    }
                )+
                Ok(spaces)
            }

            fn first_non_scalar<J: JoinPolicy>(&self) -> Result<SpaceRef<'_>, MinframeError> {
                $(
                    if !$name::IS_SCALAR {
                        if let Some(space) = self.$idx.label_space::<J>()? {
                            return Ok(space);
                        }
                    }
                )+
                unreachable!("function node without a labeled operand")
            }

            #[inline]
            fn elements(&self, index: &[usize]) -> Option<Self::Values> {
                Some(($(self.$idx.element(index)?,)+))
            }

            fn select_all<J: JoinPolicy>(
                &self,
                selector: &Selector,
            ) -> Result<Option<Self::Values>, MinframeError> {
                $(let $var = self.$idx.select::<J>(selector)?;)+
                Ok(match ($($var,)+) {
                    ($(Some($var),)+) => Some(($($var,)+)),
                    _ => None,
                })
            }

            fn data(&self) -> Result<Self::Data<'_>, MinframeError> {
                Ok(($(self.$idx.data()?,)+))
            }
        }
    };
}

impl_tuples!(1; A a 0);
impl_tuples!(2; A a 0, B b 1);
impl_tuples!(3; A a 0, B b 1, C c 2);
impl_tuples!(4; A a 0, B b 1, C c 2, D d 3);
