//! Error types for the Berth container library.
//!
//! Container mutations report capacity and bounds failures through
//! `bool`/`Option` results (see `berth-store`); the types here cover the
//! fallible *construction* paths and the cross-process layout checks.

use std::error::Error;
use std::fmt;

use crate::layout::LayoutReport;

/// A construction or conversion was asked to hold more elements than the
/// target container's compile-time capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityError {
    /// Number of elements requested.
    pub requested: usize,
    /// Compile-time capacity of the target container.
    pub capacity: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "capacity exceeded: requested {} elements, capacity is {}",
            self.requested, self.capacity
        )
    }
}

impl Error for CapacityError {}

/// Errors from cross-process layout verification.
///
/// Produced by [`LayoutCatalog`](crate::layout::LayoutCatalog) when a
/// producer and a consumer disagree about the in-memory shape of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The same type name was presented with two different layouts:
    /// the two sides were compiled with incompatible definitions.
    Conflict {
        /// Name under which the type was registered.
        type_name: &'static str,
        /// The layout already in the catalog.
        registered: LayoutReport,
        /// The conflicting layout that was offered.
        offered: LayoutReport,
    },
    /// Verification was requested for a type name the catalog has never seen.
    Unknown {
        /// The unrecognised type name.
        type_name: &'static str,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict {
                type_name,
                registered,
                offered,
            } => {
                write!(
                    f,
                    "layout conflict for '{type_name}': registered {registered}, offered {offered}"
                )
            }
            Self::Unknown { type_name } => {
                write!(f, "unknown type '{type_name}' in layout catalog")
            }
        }
    }
}

impl Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_error_display_names_both_sizes() {
        let err = CapacityError {
            requested: 12,
            capacity: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("8"));
    }

    #[test]
    fn layout_error_display_names_the_type() {
        let err = LayoutError::Unknown { type_name: "Pose" };
        assert!(err.to_string().contains("Pose"));
    }
}
