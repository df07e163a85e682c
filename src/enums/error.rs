//! # Error Module - Custom *Minframe* Error Type
//!
//! Defines the unified error type for Minframe.
//!
//! ## Features
//! - Covers dimension-mapping conflicts, missing labels during selection,
//! malformed axes and dimension lists, and shape mismatches between
//! flat data views.
//! - Implements `Display` for readable output and `Error` for integration
//! with standard Rust error handling.

use std::error::Error;
use std::fmt;

use crate::Label;

/// Catch all error type for `Minframe`
#[derive(Debug, Clone, PartialEq)]
pub enum MinframeError {
    /// An operand orders a dimension label inconsistently with the merged
    /// mapping: `expected` is its merged position, `found` its position in
    /// the operand.
    DimensionConflict {
        label: String,
        expected: usize,
        found: usize,
    },
    /// A selection references an axis label absent from a dimension.
    LabelNotFound {
        dimension: String,
        label: Label,
    },
    /// An axis lookup references a label absent from the axis.
    AxisLabelNotFound {
        label: Label,
    },
    /// A selection leaves a dimension of length greater than one unresolved.
    UnresolvedDimension {
        dimension: String,
    },
    DuplicateLabel {
        label: Label,
    },
    DuplicateDimension {
        dimension: String,
    },
    UnknownDimension {
        dimension: String,
    },
    LengthMismatch {
        expected: usize,
        found: usize,
    },
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// The cached metadata of a function node is still borrowed by a caller
    /// while a recomputation under another join policy was requested.
    MetadataInUse,
}

impl fmt::Display for MinframeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinframeError::DimensionConflict { label, expected, found } => {
                write!(
                    f,
                    "Dimension conflict: '{}' is at position {} in the merged mapping but {} in an operand.",
                    label, expected, found
                )
            }
            MinframeError::LabelNotFound { dimension, label } => {
                write!(f, "Label not found: '{}' is not a label of dimension '{}'.", label, dimension)
            }
            MinframeError::AxisLabelNotFound { label } => {
                write!(f, "Label not found: '{}' is not a label of this axis.", label)
            }
            MinframeError::UnresolvedDimension { dimension } => {
                write!(
                    f,
                    "Unresolved dimension: selector does not pick a single label of '{}'.",
                    dimension
                )
            }
            MinframeError::DuplicateLabel { label } => {
                write!(f, "Duplicate label: '{}' appears more than once in an axis.", label)
            }
            MinframeError::DuplicateDimension { dimension } => {
                write!(f, "Duplicate dimension: '{}' appears more than once.", dimension)
            }
            MinframeError::UnknownDimension { dimension } => {
                write!(f, "Unknown dimension: '{}' has no coordinate axis.", dimension)
            }
            MinframeError::LengthMismatch { expected, found } => {
                write!(f, "Length mismatch: expected {} values, found {}.", expected, found)
            }
            MinframeError::ShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Shape mismatch: cannot broadcast shape {:?} against {:?}.",
                    found, expected
                )
            }
            MinframeError::MetadataInUse => {
                write!(f, "Metadata in use: cached coordinates are still borrowed.")
            }
        }
    }
}

impl Error for MinframeError {}
