//! # Dimension Module - *Storage Order of Dimensions*
//!
//! A [`DimensionMapping`] lists the dimension names of a variable in storage
//! order and maps each name to its position.
//!
//! ## Broadcasting
//! [`broadcast_dimensions`] reconciles the mappings of several operands into
//! their order-preserving union, the same way an unsorted [`Axis`](crate::Axis)
//! merge keeps the left order and adds unseen labels. Operands may differ in
//! rank and in the names they carry. The merge fails only when two operands
//! order the same pair of names differently.

use std::collections::HashMap;

use log::debug;

use crate::MinframeError;

/// # DimensionMapping
///
/// Ordered, duplicate-free list of dimension names with position lookup.
#[derive(Debug, Clone, Default)]
pub struct DimensionMapping {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl DimensionMapping {
    /// Builds a mapping from names in storage order, rejecting duplicates.
    pub fn new<I, S>(labels: I) -> Result<Self, MinframeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(labels.len());
        for (pos, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), pos).is_some() {
                return Err(MinframeError::DuplicateDimension { dimension: label.clone() });
            }
        }
        Ok(DimensionMapping { labels, index })
    }

    // Caller guarantees uniqueness.
    fn from_unique(labels: Vec<String>) -> Self {
        let index = labels
            .iter()
            .enumerate()
            .map(|(pos, label)| (label.clone(), pos))
            .collect();
        DimensionMapping { labels, index }
    }

    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn index_of(&self, dimension: &str) -> Option<usize> {
        self.index.get(dimension).copied()
    }

    #[inline]
    pub fn contains(&self, dimension: &str) -> bool {
        self.index.contains_key(dimension)
    }

    /// Iterates `(name, position)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.labels.iter().enumerate().map(|(pos, label)| (label.as_str(), pos))
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.index.clear();
    }
}

impl PartialEq for DimensionMapping {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for DimensionMapping {}

/// Clears `output` and fills it with the order-preserving union of `inputs`.
///
/// The first input seeds the result. Each later input keeps the positions
/// of names already placed; its unseen names are inserted just before the
/// next shared name, or appended after the last one. The merge fails with
/// `DimensionConflict` when an input orders two shared names differently
/// from the result.
///
/// On failure `output` is left empty.
pub fn broadcast_dimensions(
    output: &mut DimensionMapping,
    inputs: &[&DimensionMapping],
) -> Result<(), MinframeError> {
    output.clear();
    let Some((first, rest)) = inputs.split_first() else {
        return Ok(());
    };
    let mut merged = first.labels.clone();
    for dims in rest {
        merge_into(&mut merged, dims)?;
    }
    *output = DimensionMapping::from_unique(merged);
    Ok(())
}

fn merge_into(merged: &mut Vec<String>, dims: &DimensionMapping) -> Result<(), MinframeError> {
    // Result position of the last shared name seen in `dims`.
    let mut last: Option<usize> = None;
    let mut pending: Vec<&String> = Vec::new();
    for (found, label) in dims.labels.iter().enumerate() {
        let Some(at) = merged.iter().position(|existing| existing == label) else {
            pending.push(label);
            continue;
        };
        if last.is_some_and(|prev| at <= prev) {
            debug!("dimension '{}' at {} in the result but {} in an operand", label, at, found);
            return Err(MinframeError::DimensionConflict {
                label: label.clone(),
                expected: at,
                found,
            });
        }
        let inserted = pending.len();
        for (offset, name) in pending.drain(..).enumerate() {
            merged.insert(at + offset, name.clone());
        }
        last = Some(at + inserted);
    }
    merged.extend(pending.into_iter().cloned());
    Ok(())
}
