//! Moment, product, and convergence helpers.
//!
//! The moment functions work on a single node's [`Distribution`]; the
//! convergence metrics compare two velocity fields node by node.

use thiserror::Error;

use crate::{Distribution, Q};

/// Two sequences that must have equal length did not.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("dimension mismatch: {left} vs {right}")]
pub struct DimensionMismatch {
    pub left: usize,
    pub right: usize,
}

impl DimensionMismatch {
    fn check(left: usize, right: usize) -> Result<(), Self> {
        if left == right {
            Ok(())
        } else {
            Err(Self { left, right })
        }
    }
}

/// Returns the dot product of two equal-length sequences.
///
/// # Errors
///
/// Returns [`DimensionMismatch`] if the lengths differ.
pub fn inner_product(a: &[f64], b: &[f64]) -> Result<f64, DimensionMismatch> {
    DimensionMismatch::check(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Multiplies a `Q × Q` matrix by a node distribution.
#[must_use]
pub fn mat_vec_product(matrix: &[[f64; Q]; Q], v: &Distribution) -> Distribution {
    matrix.map(|row| row.iter().zip(v).map(|(m, x)| m * x).sum())
}

/// Returns the zeroth moment (density) of a node distribution.
#[must_use]
pub fn zeroth_moment(df: &Distribution) -> f64 {
    df.iter().sum()
}

/// Returns the first moment (momentum) of a node distribution.
#[must_use]
pub fn first_moment(df: &Distribution, velocities: &[[f64; 2]; Q]) -> [f64; 2] {
    df.iter()
        .zip(velocities)
        .fold([0.0, 0.0], |[mx, my], (f, [ex, ey])| {
            [mx + f * ex, my + f * ey]
        })
}

/// Returns the relative L2 change between two velocity fields.
///
/// ```text
/// error = sqrt( Σ|u_curr − u_prev|² / Σ|u_curr|² )
/// ```
///
/// A field that is at rest and unchanged has zero error; a change from rest
/// into a field at rest is reported as infinite.
///
/// # Errors
///
/// Returns [`DimensionMismatch`] if the fields cover different node counts.
pub fn relative_error(prev: &[[f64; 2]], curr: &[[f64; 2]]) -> Result<f64, DimensionMismatch> {
    DimensionMismatch::check(prev.len(), curr.len())?;

    let diff: Vec<f64> = prev
        .as_flattened()
        .iter()
        .zip(curr.as_flattened())
        .map(|(p, c)| c - p)
        .collect();
    let change = inner_product(&diff, &diff)?;
    let magnitude = inner_product(curr.as_flattened(), curr.as_flattened())?;

    Ok(if change == 0.0 {
        0.0
    } else {
        (change / magnitude).sqrt()
    })
}

/// Checks whether a velocity field has reached steady state.
///
/// Each component must satisfy `Σ|u_curr − u_prev| / Σ|u_curr| < tolerance`.
/// A component that is zero everywhere is steady only if it did not change.
///
/// Dry nodes (full-way bounceback solids) should be excluded by the caller,
/// since their velocity carries no information about the flow.
///
/// # Errors
///
/// Returns [`DimensionMismatch`] if the fields cover different node counts.
pub fn check_steady_state(
    prev: &[[f64; 2]],
    curr: &[[f64; 2]],
    tolerance: f64,
) -> Result<bool, DimensionMismatch> {
    DimensionMismatch::check(prev.len(), curr.len())?;

    let mut diff_sum = [0.0; 2];
    let mut sum = [0.0; 2];
    for (p, c) in prev.iter().zip(curr) {
        for d in 0..2 {
            diff_sum[d] += (c[d] - p[d]).abs();
            sum[d] += c[d].abs();
        }
    }

    Ok((0..2).all(|d| {
        if diff_sum[d] == 0.0 {
            true
        } else {
            diff_sum[d] / sum[d] < tolerance
        }
    }))
}
