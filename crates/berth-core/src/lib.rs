//! Layout contracts and introspection types for the Berth container library.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! abstractions shared by the rest of the workspace: the [`Relocatable`]
//! marker trait (the contract every element type stored in a Berth container
//! must satisfy), the layout-introspection types used to verify ABI agreement
//! across process boundaries, and the error types.
//!
//! The only `unsafe` in this crate is the set of `unsafe impl Relocatable`
//! blocks for primitive types; all container `unsafe` lives in `berth-store`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod layout;
pub mod relocatable;

pub use error::{CapacityError, LayoutError};
pub use layout::{LayoutCatalog, LayoutReport};
pub use relocatable::Relocatable;
