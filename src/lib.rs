//! # Minframe
//!
//! Labeled, coordinate-aware multidimensional variables with lazy
//! expression nodes.
//!
//! A [`Variable`] is a dense array whose axes are named dimensions, each
//! addressed by ordered axis labels rather than plain integer positions.
//! Combining variables with an elementwise operation produces a
//! [`VariableFunction`] node, which defers all computation: coordinates and
//! the dimension mapping of the result are derived on first query and cached
//! per join policy ([`Inner`] intersects labels, [`Outer`] unions them), and
//! values are only produced on element access, labeled selection, lazy flat
//! iteration, or explicit materialization.
//!
//! ```rust
//! use minframe::{Axis, Coordinates, DimensionMapping, Outer, Variable, sel};
//!
//! let coords = |labels: &[&str]| {
//!     Coordinates::from_axes([("x", Axis::new(labels.iter().copied()).unwrap())])
//! };
//! let dims = DimensionMapping::new(["x"]).unwrap();
//!
//! let a = Variable::from_values(vec![1.0, 2.0], coords(&["a", "b"]), dims.clone()).unwrap();
//! let b = Variable::from_values(vec![10.0, 20.0, 30.0], coords(&["a", "b", "c"]), dims).unwrap();
//!
//! let sum = &a + &b;
//! assert_eq!(sum.select(sel! { "x" => "b" }).unwrap(), Some(22.0));
//! assert_eq!(sum.select_with::<Outer, _>(sel! { "x" => "c" }).unwrap(), None);
//! ```

pub mod enums {
    pub mod error;
    pub mod join;
    pub mod label;
}

pub mod structs {
    pub mod axis;
    #[cfg(feature = "views")]
    pub mod axis_view;
    pub mod coordinates;
    pub mod dimension;
    pub mod function;
    pub mod label_space;
    pub mod scalar;
    pub mod selector;
    pub mod variable;
}

pub mod traits {
    pub mod closure;
    pub mod expression;
}

pub mod kernels {
    pub mod broadcast;
    #[cfg(feature = "ops")]
    pub mod ops;
}

pub mod macros;

pub use enums::error::MinframeError;
pub use enums::join::{DefaultJoin, Inner, JoinId, JoinPolicy, Outer};
pub use enums::label::Label;

pub use structs::axis::Axis;
#[cfg(feature = "views")]
pub use structs::axis_view::{AxisView, LabelRange, SteppedRange};
pub use structs::coordinates::{Coordinates, TrivialBroadcast, broadcast_coordinates};
pub use structs::dimension::{DimensionMapping, broadcast_dimensions};
pub use structs::function::{FunctionData, IntoOperands, VariableFunction};
pub use structs::label_space::{LabelSpace, SpaceRef};
pub use structs::scalar::{ScalarData, ScalarOperand};
pub use structs::selector::{Selector, SelectorValue};
pub use structs::variable::{Variable, VariableData};

pub use traits::closure::{DataTuple, ElementFn, IntoOperand, OperandTuple};
pub use traits::expression::{FlatData, FlatIter, VariableExpr};

#[cfg(feature = "ops")]
pub use kernels::ops::{
    BinaryFn, UnaryFn, abs, add, apply1, apply2, apply3, div, maximum, minimum, mul, neg, sqrt,
    sub,
};

pub use vec64::Vec64;
