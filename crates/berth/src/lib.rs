//! Berth: fixed-capacity, heap-free containers for shared-memory transfer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Berth sub-crates. For most users, adding `berth` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use berth::prelude::*;
//!
//! // A vector of at most 8 readings, stored entirely in place.
//! let mut readings: FixedVec<f64, 8> = FixedVec::new();
//! assert!(readings.try_push(20.5));
//! assert!(readings.try_push(21.0));
//! assert!(readings.try_insert(0, 19.8));
//! assert_eq!(readings.as_slice(), &[19.8, 20.5, 21.0]);
//!
//! // Capacity overflow is a reported failure, never a reallocation.
//! let overfull = FixedVec::<f64, 2>::from_iter_checked(readings.iter().copied());
//! assert!(overfull.is_none());
//!
//! // Both sides of a shared-memory boundary can compare shapes first.
//! let mut catalog = LayoutCatalog::new();
//! catalog.register("readings", FixedVec::<f64, 8>::layout_report()).unwrap();
//! assert!(catalog.verify("readings", FixedVec::<f64, 8>::layout_report()).is_ok());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`contracts`] | `berth-core` | `Relocatable` marker, layout reports, error types |
//! | [`store`] | `berth-store` | `FixedVec`, `RawStore`, unchecked accessor views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Contract layer (`berth-core`).
///
/// The [`contracts::Relocatable`] marker trait, layout introspection
/// ([`contracts::LayoutReport`], [`contracts::LayoutCatalog`]), and error
/// types.
pub use berth_core as contracts;

/// Container layer (`berth-store`).
///
/// [`store::FixedVec`] is the container most users need; [`store::RawStore`]
/// is the unchecked storage manager underneath it.
pub use berth_store as store;

/// Common imports for typical Berth usage.
///
/// ```rust
/// use berth::prelude::*;
/// ```
///
/// Imports the container, the unchecked accessor views, the relocatability
/// marker, and the layout-verification types.
pub mod prelude {
    // Containers
    pub use berth_store::{FixedVec, UncheckedView, UncheckedViewMut};

    // Contracts
    pub use berth_core::{LayoutCatalog, LayoutReport, Relocatable};

    // Errors
    pub use berth_core::{CapacityError, LayoutError};
}
