//! Error types for bounded digital objects.

use std::fmt;

use crate::kernel::Integer;

/// Errors raised when building domains or spaces from user-supplied corners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// `lower[axis] > upper[axis]`.
    InvertedBounds {
        axis: usize,
        lower: Integer,
        upper: Integer,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedBounds { axis, lower, upper } => write!(
                f,
                "inverted bounds on axis {axis}: lower {lower} > upper {upper}"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
