//! The [`Relocatable`] marker trait: types safe to relocate by raw byte copy.
//!
//! Berth containers live inside pre-sized byte regions that may be placed in
//! shared memory and mapped at different addresses in different processes.
//! Every element type must therefore have a self-contained representation:
//! no pointers into its own storage, no vtable, no state derived from its
//! address. The trait is the compile-time expression of that contract.

#![allow(unsafe_code)]

/// Marker for types whose in-memory representation is self-contained.
///
/// A `Relocatable` type can be moved to a different address, including an
/// address in a different process's mapping of the same shared-memory
/// segment, by copying its bytes without running any code.
///
/// # Safety
///
/// Implementors must guarantee all of the following:
///
/// - The representation contains no pointers or references into the value's
///   own storage.
/// - There is no dynamic dispatch state (no trait-object vtable pointers).
/// - No invariant of the type depends on the value's address.
///
/// A `Drop` impl is permitted (containers run it before a slot is vacated),
/// but the destructor must not rely on the value having stayed at the
/// address it was created at.
///
/// Note that heap-owning types (`String`, `Vec`, `Box`, `Arc`) must **not**
/// implement this trait: their heap pointers are only meaningful inside the
/// allocating process.
pub unsafe trait Relocatable {}

macro_rules! impl_relocatable {
    ($($ty:ty),* $(,)?) => {
        $(
            // SAFETY: primitive scalar with no indirection.
            unsafe impl Relocatable for $ty {}
        )*
    };
}

impl_relocatable!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64, bool, char);

// usize/isize are self-contained, but their width differs between targets;
// both sides of a shared-memory boundary must be compiled for the same
// pointer width (the layout report catches a mismatch).
impl_relocatable!(usize, isize);

// SAFETY: the unit type has no representation at all.
unsafe impl Relocatable for () {}

// SAFETY: arrays have a guaranteed contiguous layout with no extra
// metadata, so an array of relocatable elements is itself relocatable.
unsafe impl<T: Relocatable, const N: usize> Relocatable for [T; N] {}
