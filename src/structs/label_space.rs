//! # LabelSpace Module
//!
//! The coordinate system of a labeled operand: its [`Coordinates`] together
//! with its [`DimensionMapping`].

use std::cell::Ref;
use std::ops::Deref;

use crate::{Coordinates, DimensionMapping, MinframeError};

/// Coordinates and storage order of a labeled operand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSpace {
    pub coordinates: Coordinates,
    pub dimensions: DimensionMapping,
}

impl LabelSpace {
    /// Pairs coordinates with a dimension mapping, requiring both to name the
    /// same dimensions.
    pub fn new(coordinates: Coordinates, dimensions: DimensionMapping) -> Result<Self, MinframeError> {
        if let Some(dim) = dimensions.labels().iter().find(|d| !coordinates.contains_dimension(d)) {
            return Err(MinframeError::UnknownDimension { dimension: dim.clone() });
        }
        if let Some(dim) = coordinates.dimension_names().find(|d| !dimensions.contains(d)) {
            return Err(MinframeError::UnknownDimension { dimension: dim.to_owned() });
        }
        Ok(LabelSpace { coordinates, dimensions })
    }

    /// Axis lengths in storage order.
    pub fn shape(&self) -> Vec<usize> {
        self.dimensions
            .labels()
            .iter()
            .map(|dim| self.coordinates.get(dim).map_or(1, |axis| axis.len()))
            .collect()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.coordinates.size()
    }
}

/// Borrowed label space of an operand.
///
/// Variables lend their own metadata; function nodes lend a guard into
/// their metadata cache.
#[derive(Debug)]
pub enum SpaceRef<'a> {
    Borrowed(&'a LabelSpace),
    Cached(Ref<'a, LabelSpace>),
}

impl Deref for SpaceRef<'_> {
    type Target = LabelSpace;

    #[inline]
    fn deref(&self) -> &LabelSpace {
        match self {
            SpaceRef::Borrowed(space) => space,
            SpaceRef::Cached(space) => &**space,
        }
    }
}
