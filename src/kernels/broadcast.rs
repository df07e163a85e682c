// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under MIT License.

//! # Broadcast Kernels
//!
//! Flat-index helpers shared by variables and lazy function views.
//!
//! ## Rules
//! - Index lists align on the trailing dimension. Extra leading indices are
//!   ignored; missing leading indices count as `0`.
//! - A dimension of length `1` broadcasts: any index along it reads
//!   position `0`.
//! - Shapes broadcast the same way, failing when two lengths differ and
//!   neither is `1`.

use crate::MinframeError;

/// Row-major strides for `shape`.
pub fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Flat offset of `index` into a buffer of `shape` and `strides`, or `None`
/// when an index runs past a non-broadcast dimension.
#[inline]
pub fn broadcast_offset(shape: &[usize], strides: &[usize], index: &[usize]) -> Option<usize> {
    let rank = shape.len();
    let skip = index.len().saturating_sub(rank);
    let pad = rank.saturating_sub(index.len());
    let mut offset = 0;
    for (d, &i) in index[skip..].iter().enumerate() {
        let dim = pad + d;
        match shape[dim] {
            1 => {}
            n if i < n => offset += i * strides[dim],
            _ => return None,
        }
    }
    Some(offset)
}

/// Broadcast shape of all `shapes`.
pub fn broadcast_shape(shapes: &[&[usize]]) -> Result<Vec<usize>, MinframeError> {
    let rank = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1; rank];
    for shape in shapes {
        let pad = rank - shape.len();
        for (d, &n) in shape.iter().enumerate() {
            let slot = &mut out[pad + d];
            if *slot == 1 {
                *slot = n;
            } else if n != 1 && n != *slot {
                return Err(MinframeError::ShapeMismatch {
                    expected: out.clone(),
                    found: shape.to_vec(),
                });
            }
        }
    }
    Ok(out)
}

/// Row-major iterator over every index of a shape.
///
/// A rank-0 shape yields one empty index; a shape with a zero-length
/// dimension yields nothing.
#[derive(Debug, Clone)]
pub struct RowMajorIndices {
    shape: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl RowMajorIndices {
    pub fn new(shape: &[usize]) -> Self {
        let next = (!shape.contains(&0)).then(|| vec![0; shape.len()]);
        RowMajorIndices { shape: shape.to_vec(), next }
    }
}

impl Iterator for RowMajorIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut following = current.clone();
        for d in (0..self.shape.len()).rev() {
            following[d] += 1;
            if following[d] < self.shape[d] {
                self.next = Some(following);
                break;
            }
            following[d] = 0;
        }
        Some(current)
    }
}
