//! # Join Module - *Label Alignment Policies*
//!
//! Join policies decide how the coordinate systems of several operands
//! combine into the coordinate system of an expression.
//!
//! - [`Inner`] keeps only labels present in every operand (intersection).
//! - [`Outer`] keeps every label present in any operand (union).
//!
//! Policies are zero-sized marker types selected at the call site, e.g.
//! `node.coordinates_with::<Outer>()`. Each exposes a static [`JoinId`]
//! token, which function nodes compare to decide whether cached metadata
//! was produced under the same policy.

use crate::Axis;

/// Identity token for a join policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinId {
    Inner,
    Outer,
}

/// Label alignment strategy.
pub trait JoinPolicy: 'static {
    /// Static identity of the policy
    const ID: JoinId;

    /// Whether a label missing from an operand's axis yields a missing value
    /// during selection rather than an error.
    const FILLS_MISSING: bool;

    /// Combines two axes of the same dimension.
    fn join_axes(lhs: &Axis, rhs: &Axis) -> Axis;

    #[inline]
    fn id() -> JoinId {
        Self::ID
    }
}

/// Intersection of labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inner;

/// Union of labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outer;

/// Policy used by the accessors that do not name one.
pub type DefaultJoin = Inner;

impl JoinPolicy for Inner {
    const ID: JoinId = JoinId::Inner;
    const FILLS_MISSING: bool = false;

    #[inline]
    fn join_axes(lhs: &Axis, rhs: &Axis) -> Axis {
        lhs.intersect(rhs)
    }
}

impl JoinPolicy for Outer {
    const ID: JoinId = JoinId::Outer;
    const FILLS_MISSING: bool = true;

    #[inline]
    fn join_axes(lhs: &Axis, rhs: &Axis) -> Axis {
        lhs.merge(rhs)
    }
}
