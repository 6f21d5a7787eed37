//! Fixed-capacity, heap-free containers with in-place storage.
//!
//! Berth containers hold all of their elements inside the container value
//! itself, a pre-sized byte region plus a length counter, with no heap
//! allocation anywhere. That makes them usable in shared-memory segments,
//! where a heap pointer from one process is meaningless in another. All of
//! the workspace's pointer-level `unsafe` code lives in this crate.
//!
//! # Architecture
//!
//! Two layers, built bottom-up:
//!
//! ```text
//! FixedVec<T, N>            (safety boundary: checked mutation, Option/bool results)
//! └── RawStore<T, N>        (unchecked primitives over the live range)
//!     └── [MaybeUninit<T>; N] + len: u64   (#[repr(C)] byte region)
//! ```
//!
//! [`RawStore`] owns the byte region and exposes `unsafe` primitives for
//! constructing, shifting, and destroying elements in place; every operation
//! documents the precondition its caller must have verified. [`FixedVec`]
//! is the public container: it performs exactly that verification and
//! reports failure instead of invoking undefined behavior. Data flows one
//! direction only: vector to store to raw memory.
//!
//! Element types must implement [`berth_core::Relocatable`], the marker for
//! representations that survive relocation by raw byte copy.
//!
//! # Unsafe policy
//!
//! `unsafe` is denied crate-wide and allowed per module. `raw.rs` contains
//! the pointer manipulation; `vec.rs` contains only calls into `RawStore`
//! primitives, each behind a bounds check and a `// SAFETY:` comment.
//!
//! # Feature flags
//!
//! - `serde` (off by default): `Serialize`/`Deserialize` for [`FixedVec`]
//!   as a plain sequence, capacity-checked during deserialization.
//!
//! # Concurrency
//!
//! None. Containers assume exclusive access for the duration of every call.
//! When a container lives in shared memory, synchronization between
//! processes is the embedding protocol's responsibility.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod raw;
pub mod vec;

pub use raw::RawStore;
pub use vec::{FixedVec, UncheckedView, UncheckedViewMut};
