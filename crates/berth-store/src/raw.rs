//! The raw byte-storage manager: unchecked primitives over an in-place
//! element region.
//!
//! [`RawStore`] owns a byte region sized for exactly `N` elements of `T`
//! plus a length counter, laid out `#[repr(C)]` so the shape is identical
//! across independently compiled binaries. Indices `[0, len)` are *live*
//! (constructed, readable, droppable); indices `[len, N)` are uninitialized
//! bytes that must never be read or dropped.
//!
//! This layer performs no bounds or capacity checking at all. Every mutating
//! primitive is an `unsafe fn` whose documented precondition the caller must
//! have verified; that caller is [`FixedVec`](crate::vec::FixedVec), the
//! single safety boundary in this crate. Violating a precondition is
//! undefined behavior by design; this is the one place where the
//! zero-allocation layout constraint is paid for.
//!
//! Gap-opening and gap-closing are plain overlapping `ptr::copy` calls:
//! a Rust move is an untyped byte move, so relocating live elements needs no
//! per-element move construction. Vacated slots are logically uninitialized
//! afterwards and the invariant is restored by writing into them (insert) or
//! shrinking the live range (erase).

#![allow(unsafe_code)]

use core::mem::MaybeUninit;
use core::ptr;
use core::slice;

use berth_core::Relocatable;

/// Fixed-capacity in-place element storage with a live-range counter.
///
/// Created empty. On drop, live elements are dropped in reverse index
/// order. The byte region is part of the value itself; there is no
/// separate allocation and no deallocation step.
///
/// The length counter is a `u64` regardless of target, so the layout is
/// stable across 32/64-bit producers and consumers of the same region.
#[repr(C)]
pub struct RawStore<T: Relocatable, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: u64,
}

impl<T: Relocatable, const N: usize> RawStore<T, N> {
    /// Create an empty store.
    pub const fn new() -> Self {
        const { assert!(N > 0, "a fixed-capacity container with capacity 0 is not allowed") };
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    /// Number of live elements.
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the live range is empty.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Compile-time capacity.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Byte offset of the length counter within the store.
    ///
    /// Part of the cross-process layout contract: the element array comes
    /// first, the counter immediately after it.
    pub const fn len_counter_offset() -> usize {
        core::mem::offset_of!(Self, len)
    }

    /// Pointer to the start of the element region.
    pub const fn as_ptr(&self) -> *const T {
        self.data.as_ptr().cast()
    }

    /// Mutable pointer to the start of the element region.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr().cast()
    }

    /// Pointer to the element slot at `index`. No bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be at most `N` (one-past-the-end is allowed, as for
    /// slices). Reading through the pointer additionally requires
    /// `index < len()`.
    pub unsafe fn ptr_at(&self, index: usize) -> *const T {
        debug_assert!(index <= N);
        // SAFETY: index <= N keeps the offset within the allocated region.
        unsafe { self.as_ptr().add(index) }
    }

    /// Mutable pointer to the element slot at `index`. No bounds check.
    ///
    /// # Safety
    ///
    /// Same contract as [`ptr_at`](Self::ptr_at).
    pub unsafe fn ptr_at_mut(&mut self, index: usize) -> *mut T {
        debug_assert!(index <= N);
        // SAFETY: index <= N keeps the offset within the allocated region.
        unsafe { self.as_mut_ptr().add(index) }
    }

    /// Reference to the live element at `index`. No bounds check.
    ///
    /// # Safety
    ///
    /// `index < len()` must hold.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len());
        // SAFETY: index is within the live range per the caller's contract.
        unsafe { &*self.ptr_at(index) }
    }

    /// Mutable reference to the live element at `index`. No bounds check.
    ///
    /// # Safety
    ///
    /// `index < len()` must hold.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len());
        // SAFETY: index is within the live range per the caller's contract.
        unsafe { &mut *self.ptr_at_mut(index) }
    }

    /// The live range as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) holds initialized elements (type invariant).
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len()) }
    }

    /// The live range as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        // SAFETY: [0, len) holds initialized elements (type invariant).
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Construct a new element at the back of the live range.
    ///
    /// # Safety
    ///
    /// `len() < N` must hold.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len() < N);
        let len = self.len();
        // SAFETY: slot `len` is allocated and uninitialized; writing it and
        // then extending the counter keeps the live-range invariant.
        unsafe { self.ptr_at_mut(len).write(value) };
        self.len += 1;
    }

    /// Move the last live element out of the store.
    ///
    /// # Safety
    ///
    /// `len() > 0` must hold.
    pub unsafe fn pop_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty());
        // Shrink first so the slot is outside the live range before the
        // value is read out; read cannot panic.
        self.len -= 1;
        let len = self.len();
        // SAFETY: the slot was live a moment ago and is read exactly once.
        unsafe { ptr::read(self.ptr_at(len)) }
    }

    /// Open a `gap`-element hole at `index` by shifting the tail up.
    ///
    /// After the call, `len()` has grown by `gap` and slots
    /// `[index, index + gap)` are *allocated but uninitialized* while being
    /// inside the live range. The caller must initialize every slot in the
    /// gap before any operation that reads or drops live elements, and
    /// before the store itself can be dropped.
    ///
    /// # Safety
    ///
    /// `index <= len()` and `len() + gap <= N` must hold, and the caller
    /// must fill the gap as described above.
    pub unsafe fn open_gap(&mut self, index: usize, gap: usize) {
        let len = self.len();
        debug_assert!(index <= len);
        debug_assert!(len + gap <= N);
        let tail = len - index;
        let base = self.as_mut_ptr();
        // SAFETY: source [index, len) and destination [index+gap, len+gap)
        // are within the allocated region; ptr::copy handles the overlap.
        // The vacated slots become logically uninitialized.
        unsafe { ptr::copy(base.add(index), base.add(index + gap), tail) };
        self.len += gap as u64;
    }

    /// Close a `gap`-element hole at `index` by shifting the tail down.
    ///
    /// The move-down half of erase, without destruction of the erased
    /// elements. The slots `[index, index + gap)` must already be logically
    /// uninitialized (dropped or moved out). Shrinks `len()` by `gap`.
    ///
    /// # Safety
    ///
    /// `index + gap <= len()` must hold and the gap slots must not contain
    /// live elements.
    pub unsafe fn close_gap(&mut self, index: usize, gap: usize) {
        let len = self.len();
        debug_assert!(index + gap <= len);
        let tail = len - (index + gap);
        let base = self.as_mut_ptr();
        // SAFETY: source [index+gap, len) holds live elements; destination
        // starts at a vacated slot. ptr::copy handles the overlap and the
        // vacated trailing slots leave the live range via the counter.
        unsafe { ptr::copy(base.add(index + gap), base.add(index), tail) };
        self.len -= gap as u64;
    }

    /// Construct a new element at `index`, shifting the tail up by one.
    ///
    /// # Safety
    ///
    /// `index <= len()` and `len() < N` must hold.
    pub unsafe fn insert_unchecked(&mut self, index: usize, value: T) {
        // SAFETY: preconditions forwarded from the caller. The gap is
        // filled immediately below with no intervening panic point.
        unsafe {
            self.open_gap(index, 1);
            self.ptr_at_mut(index).write(value);
        }
    }

    /// Construct `count` clones of `value` at `index`, shifting the tail up.
    ///
    /// If a clone panics part-way through, the unfilled remainder of the gap
    /// is closed again: the clones written so far stay inserted and the
    /// store remains valid (no atomicity across the multi-element fill).
    ///
    /// # Safety
    ///
    /// `index <= len()` and `len() + count <= N` must hold.
    pub unsafe fn insert_fill_unchecked(&mut self, index: usize, count: usize, value: &T)
    where
        T: Clone,
    {
        // SAFETY: preconditions forwarded from the caller.
        unsafe { self.open_gap(index, count) };
        let mut guard = GapGuard {
            store: self,
            gap_start: index,
            gap_len: count,
            filled: 0,
        };
        while guard.filled < guard.gap_len {
            let slot = guard.gap_start + guard.filled;
            let clone = value.clone();
            // SAFETY: slot is an unfilled gap position inside the region.
            unsafe { guard.store.ptr_at_mut(slot).write(clone) };
            guard.filled += 1;
        }
    }

    /// Drop the erased element at `index` and shift the tail down over it.
    ///
    /// # Safety
    ///
    /// `index < len()` must hold.
    pub unsafe fn erase_unchecked(&mut self, index: usize) {
        // SAFETY: precondition forwarded from the caller.
        unsafe { self.erase_range_unchecked(index, index + 1) };
    }

    /// Drop the erased elements `[begin, end)` and shift the tail down.
    ///
    /// # Safety
    ///
    /// `begin <= end <= len()` must hold.
    pub unsafe fn erase_range_unchecked(&mut self, begin: usize, end: usize) {
        let old_len = self.len();
        debug_assert!(begin <= end && end <= old_len);
        let base = self.as_mut_ptr();
        // Shrink the counter before dropping so a panicking Drop leaks the
        // tail instead of leaving droppable slots inside the live range.
        self.len = begin as u64;
        for i in begin..end {
            // SAFETY: [begin, end) held live elements; each is dropped once.
            unsafe { ptr::drop_in_place(base.add(i)) };
        }
        let tail = old_len - end;
        // SAFETY: [end, old_len) still holds live elements; move them down
        // over the vacated gap, then re-extend the counter to cover them.
        unsafe { ptr::copy(base.add(end), base.add(begin), tail) };
        self.len = (begin + tail) as u64;
    }

    /// Drop elements from the back until `len() == target`.
    ///
    /// # Safety
    ///
    /// `target <= len()` must hold.
    pub unsafe fn truncate_unchecked(&mut self, target: usize) {
        let old_len = self.len();
        debug_assert!(target <= old_len);
        // Shrink the counter first: a panicking Drop then leaks the rest
        // instead of exposing half-dropped slots to a second drop.
        self.len = target as u64;
        let base = self.as_mut_ptr();
        for i in (target..old_len).rev() {
            // SAFETY: [target, old_len) held live elements; reverse order.
            unsafe { ptr::drop_in_place(base.add(i)) };
        }
    }

    /// Drop every live element (back to front) and reset to empty.
    pub fn clear(&mut self) {
        // SAFETY: 0 <= len() always holds.
        unsafe { self.truncate_unchecked(0) };
    }

    /// Rotate the tail range `[to, len())` so that `[from, len())` moves to
    /// its front.
    ///
    /// Used by bulk inserts that append new elements at the back and then
    /// rotate them into their final position. Operates on live elements
    /// only, so it is safe.
    ///
    /// # Panics
    ///
    /// Panics if `to > from` or `from > len()`.
    pub fn rotate_tail(&mut self, to: usize, from: usize) {
        assert!(to <= from && from <= self.len());
        let mid = from - to;
        self.as_mut_slice()[to..].rotate_left(mid);
    }
}

impl<T: Relocatable, const N: usize> Default for RawStore<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Relocatable, const N: usize> Drop for RawStore<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Relocatable + Clone, const N: usize> Clone for RawStore<T, N> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        for item in self.as_slice() {
            // SAFETY: out.len() < N because self.len() <= N and out grows
            // by one per live element of self.
            unsafe { out.push_unchecked(item.clone()) };
        }
        out
    }
}

/// Closes the unfilled remainder of an open gap if a clone panics during
/// [`RawStore::insert_fill_unchecked`].
struct GapGuard<'a, T: Relocatable, const N: usize> {
    store: &'a mut RawStore<T, N>,
    gap_start: usize,
    gap_len: usize,
    filled: usize,
}

impl<T: Relocatable, const N: usize> Drop for GapGuard<'_, T, N> {
    fn drop(&mut self) {
        if self.filled == self.gap_len {
            return;
        }
        let unfilled = self.gap_len - self.filled;
        let tail_start = self.gap_start + self.gap_len;
        let tail = self.store.len() - tail_start;
        let base = self.store.as_mut_ptr();
        // SAFETY: [tail_start, len) holds the live tail that open_gap
        // shifted up; move it down over the unfilled slots and shrink the
        // counter so the store invariant is restored before unwinding.
        unsafe {
            ptr::copy(
                base.add(tail_start),
                base.add(self.gap_start + self.filled),
                tail,
            );
        }
        self.store.len -= unfilled as u64;
    }
}
