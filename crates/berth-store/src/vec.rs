//! The bounded vector: a checked, safe facade over [`RawStore`].
//!
//! [`FixedVec`] is the public container type. It wraps exactly one
//! `RawStore<T, N>` and forms the crate's safety boundary: every mutation
//! verifies the precondition of the raw primitive it calls and reports
//! failure through `bool`, `Option`, or `Result` instead of invoking
//! undefined behavior. Capacity and bounds failures are ordinary results,
//! never panics.
//!
//! Callers that have already established bounds elsewhere can opt out of
//! per-access checks through the [`UncheckedView`] and [`UncheckedViewMut`]
//! accessor objects, which keep the unchecked path textually distinct at
//! every call site.

#![allow(unsafe_code)]

use std::fmt;
use std::mem;
use std::ops::Range;
use std::slice;

use berth_core::{CapacityError, LayoutReport, Relocatable};

use crate::raw::RawStore;

/// A vector with compile-time capacity `N` and no heap allocation.
///
/// All storage lives inside the value itself, so a `FixedVec` can be placed
/// in a shared-memory segment and read by another process, provided both
/// sides agree on its layout (see [`FixedVec::layout_report`]). The length
/// varies at run time between `0` and `N`; exceeding `N` is a reported
/// failure, not a reallocation.
///
/// ```
/// use berth_store::FixedVec;
///
/// let mut v: FixedVec<i32, 4> = FixedVec::new();
/// assert!(v.try_push(1));
/// assert!(v.try_push(2));
/// assert!(v.try_insert(1, 99));
/// assert_eq!(v.as_slice(), &[1, 99, 2]);
/// assert_eq!(v.pop(), Some(2));
/// ```
#[repr(transparent)]
pub struct FixedVec<T: Relocatable, const N: usize> {
    store: RawStore<T, N>,
}

// SAFETY: FixedVec is its RawStore, which is an in-place element array plus
// a counter. With T relocatable the whole value is self-contained.
unsafe impl<T: Relocatable, const N: usize> Relocatable for FixedVec<T, N> {}

impl<T: Relocatable, const N: usize> FixedVec<T, N> {
    /// Create an empty vector.
    pub const fn new() -> Self {
        Self {
            store: RawStore::new(),
        }
    }

    /// Create a vector holding `count` clones of `value`.
    ///
    /// Returns `None` if `count` exceeds the capacity.
    pub fn from_elem(count: usize, value: &T) -> Option<Self>
    where
        T: Clone,
    {
        if count > N {
            return None;
        }
        let mut out = Self::new();
        for _ in 0..count {
            // SAFETY: count <= N, so the store cannot overflow here.
            unsafe { out.store.push_unchecked(value.clone()) };
        }
        Some(out)
    }

    /// Create a vector holding `count` default-constructed elements.
    ///
    /// Returns `None` if `count` exceeds the capacity.
    pub fn from_default(count: usize) -> Option<Self>
    where
        T: Default,
    {
        if count > N {
            return None;
        }
        let mut out = Self::new();
        for _ in 0..count {
            // SAFETY: count <= N, so the store cannot overflow here.
            unsafe { out.store.push_unchecked(T::default()) };
        }
        Some(out)
    }

    /// Create a vector from an iterator, all or nothing.
    ///
    /// Returns `None` the moment the iterator yields more elements than the
    /// capacity; elements consumed up to that point are dropped.
    pub fn from_iter_checked<I>(iter: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut out = Self::new();
        for value in iter {
            if !out.try_push(value) {
                return None;
            }
        }
        Some(out)
    }

    /// Create a vector with the contents of another, possibly of a different
    /// declared capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the source holds more elements than this
    /// vector's capacity.
    pub fn from_other<const M: usize>(other: &FixedVec<T, M>) -> Result<Self, CapacityError>
    where
        T: Clone,
    {
        if other.len() > N {
            return Err(CapacityError {
                requested: other.len(),
                capacity: N,
            });
        }
        let mut out = Self::new();
        for item in other.as_slice() {
            // SAFETY: other.len() <= N was checked above.
            unsafe { out.store.push_unchecked(item.clone()) };
        }
        Ok(out)
    }

    /// Number of live elements.
    pub const fn len(&self) -> usize {
        self.store.len()
    }

    /// Compile-time capacity.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether the vector holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether the vector holds `N` elements.
    pub const fn is_full(&self) -> bool {
        self.store.len() == N
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.store.as_slice()
    }

    /// The elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.store.as_mut_slice()
    }

    /// Reference to the element at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable reference to the element at `index`, or `None` if out of
    /// bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Reference to the first element, or `None` if empty.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Mutable reference to the first element, or `None` if empty.
    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Reference to the last element, or `None` if empty.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Mutable reference to the last element, or `None` if empty.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Append `value` at the back.
    ///
    /// Returns `false` if the vector is full; `value` is dropped in that
    /// case.
    #[must_use]
    pub fn try_push(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        // SAFETY: len < N was checked above.
        unsafe { self.store.push_unchecked(value) };
        true
    }

    /// Insert `value` at `index`, shifting later elements up by one.
    ///
    /// Returns `false` if `index > len()` or the vector is full; `value` is
    /// dropped in that case.
    #[must_use]
    pub fn try_insert(&mut self, index: usize, value: T) -> bool {
        if index > self.len() || self.is_full() {
            return false;
        }
        // SAFETY: index <= len and len < N were checked above.
        unsafe { self.store.insert_unchecked(index, value) };
        true
    }

    /// Insert `count` clones of `value` at `index`, shifting later elements
    /// up.
    ///
    /// Returns `false` if `index > len()` or the result would exceed the
    /// capacity. If `Clone` panics part-way through, the clones inserted so
    /// far remain and the vector stays valid.
    #[must_use]
    pub fn try_insert_fill(&mut self, index: usize, count: usize, value: &T) -> bool
    where
        T: Clone,
    {
        if index > self.len() || count > N - self.len() {
            return false;
        }
        // SAFETY: index <= len and len + count <= N were checked above.
        unsafe { self.store.insert_fill_unchecked(index, count, value) };
        true
    }

    /// Insert every element of `iter` at `index`, preserving their order.
    ///
    /// Two-phase: the elements are appended at the back, then rotated into
    /// place. Returns `false` and fully reverts to the pre-call contents if
    /// `index > len()` or the iterator yields more elements than the
    /// remaining capacity.
    #[must_use]
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let old_len = self.len();
        if index > old_len {
            return false;
        }
        for value in iter {
            if !self.try_push(value) {
                // SAFETY: old_len <= len() since the loop only appended.
                unsafe { self.store.truncate_unchecked(old_len) };
                return false;
            }
        }
        self.store.rotate_tail(index, old_len);
        true
    }

    /// Append clones of every element of `slice`, all or nothing.
    ///
    /// Returns `false` if the result would exceed the capacity.
    #[must_use]
    pub fn try_extend_from_slice(&mut self, slice: &[T]) -> bool
    where
        T: Clone,
    {
        if slice.len() > N - self.len() {
            return false;
        }
        for item in slice {
            // SAFETY: len + slice.len() <= N was checked above.
            unsafe { self.store.push_unchecked(item.clone()) };
        }
        true
    }

    /// Remove the element at `index`, shifting later elements down by one.
    ///
    /// Returns `false` if `index >= len()`.
    #[must_use]
    pub fn try_erase(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        // SAFETY: index < len was checked above.
        unsafe { self.store.erase_unchecked(index) };
        true
    }

    /// Remove the elements in `range`, shifting later elements down.
    ///
    /// An empty in-bounds range is a successful no-op. Returns `false` if
    /// the range is inverted or extends past `len()`.
    #[must_use]
    pub fn try_erase_range(&mut self, range: Range<usize>) -> bool {
        if range.start > range.end || range.end > self.len() {
            return false;
        }
        // SAFETY: start <= end <= len was checked above.
        unsafe { self.store.erase_range_unchecked(range.start, range.end) };
        true
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: len > 0 was checked above.
        Some(unsafe { self.store.pop_unchecked() })
    }

    /// Drop every element. Idempotent.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Borrow an accessor that skips bounds checks.
    pub fn unchecked(&self) -> UncheckedView<'_, T, N> {
        UncheckedView { store: &self.store }
    }

    /// Borrow a mutable accessor that skips bounds checks.
    pub fn unchecked_mut(&mut self) -> UncheckedViewMut<'_, T, N> {
        UncheckedViewMut {
            store: &mut self.store,
        }
    }

    /// Describe this vector's in-memory shape for cross-process layout
    /// verification.
    ///
    /// The report depends only on `T` and `N`: two independently compiled
    /// binaries that agree on the report may share a memory region holding
    /// this type.
    pub const fn layout_report() -> LayoutReport {
        LayoutReport {
            total_size: mem::size_of::<Self>(),
            total_align: mem::align_of::<Self>(),
            element_size: mem::size_of::<T>(),
            element_align: mem::align_of::<T>(),
            capacity: N,
            len_offset: RawStore::<T, N>::len_counter_offset(),
            len_width: mem::size_of::<u64>(),
        }
    }
}

impl<T: Relocatable, const N: usize> Default for FixedVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Relocatable + Clone, const N: usize> Clone for FixedVec<T, N> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<T: Relocatable + fmt::Debug, const N: usize> fmt::Debug for FixedVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Equality across declared capacities: same length, element-wise equal.
impl<T, const N: usize, const M: usize> PartialEq<FixedVec<T, M>> for FixedVec<T, N>
where
    T: Relocatable + PartialEq,
{
    fn eq(&self, other: &FixedVec<T, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Relocatable + Eq, const N: usize> Eq for FixedVec<T, N> {}

impl<T: Relocatable + Clone, const N: usize> TryFrom<&[T]> for FixedVec<T, N> {
    type Error = CapacityError;

    fn try_from(slice: &[T]) -> Result<Self, CapacityError> {
        if slice.len() > N {
            return Err(CapacityError {
                requested: slice.len(),
                capacity: N,
            });
        }
        let mut out = Self::new();
        let extended = out.try_extend_from_slice(slice);
        debug_assert!(extended);
        Ok(out)
    }
}

impl<T: Relocatable, const N: usize, const M: usize> TryFrom<[T; M]> for FixedVec<T, N> {
    type Error = CapacityError;

    fn try_from(array: [T; M]) -> Result<Self, CapacityError> {
        if M > N {
            return Err(CapacityError {
                requested: M,
                capacity: N,
            });
        }
        let mut out = Self::new();
        for value in array {
            // SAFETY: M <= N was checked above.
            unsafe { out.store.push_unchecked(value) };
        }
        Ok(out)
    }
}

impl<'a, T: Relocatable, const N: usize> IntoIterator for &'a FixedVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Relocatable, const N: usize> IntoIterator for &'a mut FixedVec<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{Error as _, SeqAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use berth_core::Relocatable;

    use super::FixedVec;

    /// Serialized as a plain sequence, so the declared capacity does not
    /// appear on the wire and a sequence may be read back into any vector
    /// large enough to hold it.
    impl<T: Relocatable + Serialize, const N: usize> Serialize for FixedVec<T, N> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.as_slice().serialize(serializer)
        }
    }

    struct FixedVecVisitor<T, const N: usize> {
        _marker: PhantomData<T>,
    }

    impl<'de, T: Relocatable + Deserialize<'de>, const N: usize> Visitor<'de>
        for FixedVecVisitor<T, N>
    {
        type Value = FixedVec<T, N>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a sequence of at most {N} elements")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut vec = FixedVec::new();
            while let Some(element) = seq.next_element()? {
                if !vec.try_push(element) {
                    return Err(A::Error::custom(format!(
                        "the sequence holds more than {N} elements"
                    )));
                }
            }
            Ok(vec)
        }
    }

    impl<'de, T: Relocatable + Deserialize<'de>, const N: usize> Deserialize<'de>
        for FixedVec<T, N>
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(FixedVecVisitor::<T, N> {
                _marker: PhantomData,
            })
        }
    }
}

/// Shared accessor without per-access bounds checks.
///
/// Borrowed from [`FixedVec::unchecked`]. The container cannot change length
/// while the view is alive, so a bound established once holds for every
/// access through it.
pub struct UncheckedView<'a, T: Relocatable, const N: usize> {
    store: &'a RawStore<T, N>,
}

impl<'a, T: Relocatable, const N: usize> UncheckedView<'a, T, N> {
    /// Number of live elements.
    pub const fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the container is empty.
    pub const fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Reference to the element at `index`, without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < len()` must hold.
    pub unsafe fn at(&self, index: usize) -> &T {
        // SAFETY: forwarded from the caller.
        unsafe { self.store.get_unchecked(index) }
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.store.as_slice()
    }

    /// Pointer to the start of the element region.
    pub const fn as_ptr(&self) -> *const T {
        self.store.as_ptr()
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

/// Exclusive accessor without per-access bounds checks.
///
/// Borrowed from [`FixedVec::unchecked_mut`]. Mutates elements in place;
/// the container's length cannot change through the view.
pub struct UncheckedViewMut<'a, T: Relocatable, const N: usize> {
    store: &'a mut RawStore<T, N>,
}

impl<T: Relocatable, const N: usize> UncheckedViewMut<'_, T, N> {
    /// Number of live elements.
    pub const fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the container is empty.
    pub const fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Reference to the element at `index`, without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < len()` must hold.
    pub unsafe fn at(&self, index: usize) -> &T {
        // SAFETY: forwarded from the caller.
        unsafe { self.store.get_unchecked(index) }
    }

    /// Mutable reference to the element at `index`, without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < len()` must hold.
    pub unsafe fn at_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: forwarded from the caller.
        unsafe { self.store.get_unchecked_mut(index) }
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.store.as_slice()
    }

    /// The elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.store.as_mut_slice()
    }

    /// Mutable pointer to the start of the element region.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.store.as_mut_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vector_is_empty_with_full_capacity() {
        let v: FixedVec<i32, 10> = FixedVec::new();
        assert!(v.is_empty());
        assert!(!v.is_full());
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 10);
    }

    #[test]
    fn push_fails_only_when_full() {
        let mut v: FixedVec<i32, 2> = FixedVec::new();
        assert!(v.try_push(1));
        assert!(v.try_push(2));
        assert!(v.is_full());
        assert!(!v.try_push(3));
        assert_eq!(v.as_slice(), &[1, 2]);
    }

    #[test]
    fn insert_rejects_out_of_bounds_index() {
        let mut v: FixedVec<i32, 4> = FixedVec::new();
        assert!(v.try_push(1));
        assert!(!v.try_insert(2, 99));
        assert!(v.try_insert(1, 99));
        assert_eq!(v.as_slice(), &[1, 99]);
    }

    #[test]
    fn insert_fill_rejects_overflow() {
        let mut v: FixedVec<i32, 4> = FixedVec::new();
        assert!(v.try_push(1));
        assert!(!v.try_insert_fill(0, 4, &9));
        assert!(v.try_insert_fill(0, 3, &9));
        assert_eq!(v.as_slice(), &[9, 9, 9, 1]);
    }

    #[test]
    fn insert_iter_places_the_block_in_order() {
        let mut v: FixedVec<i32, 8> = FixedVec::new();
        assert!(v.try_extend_from_slice(&[1, 2, 3]));
        assert!(v.try_insert_iter(1, [90, 91, 92]));
        assert_eq!(v.as_slice(), &[1, 90, 91, 92, 2, 3]);
    }

    #[test]
    fn insert_iter_rolls_back_on_overflow() {
        let mut v: FixedVec<i32, 4> = FixedVec::new();
        assert!(v.try_extend_from_slice(&[1, 2, 3]));
        assert!(!v.try_insert_iter(1, [90, 91]));
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn insert_iter_at_the_back_is_an_append() {
        let mut v: FixedVec<i32, 8> = FixedVec::new();
        assert!(v.try_push(1));
        assert!(v.try_insert_iter(1, [2, 3]));
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn extend_from_slice_is_all_or_nothing() {
        let mut v: FixedVec<i32, 4> = FixedVec::new();
        assert!(v.try_push(1));
        assert!(!v.try_extend_from_slice(&[2, 3, 4, 5]));
        assert_eq!(v.as_slice(), &[1]);
        assert!(v.try_extend_from_slice(&[2, 3, 4]));
        assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn erase_shifts_later_elements_down() {
        let mut v: FixedVec<i32, 5> = FixedVec::new();
        assert!(v.try_extend_from_slice(&[1, 2, 3, 4]));
        assert!(v.try_erase(1));
        assert_eq!(v.as_slice(), &[1, 3, 4]);
        assert!(!v.try_erase(3));
    }

    #[test]
    fn erase_range_handles_the_boundaries() {
        let mut v: FixedVec<i32, 6> = FixedVec::new();
        assert!(v.try_extend_from_slice(&[1, 2, 3, 4, 5]));
        assert!(v.try_erase_range(1..3));
        assert_eq!(v.as_slice(), &[1, 4, 5]);
        assert!(v.try_erase_range(2..2));
        assert_eq!(v.as_slice(), &[1, 4, 5]);
        assert!(!v.try_erase_range(2..4));
        assert!(v.try_erase_range(0..3));
        assert!(v.is_empty());
    }

    #[test]
    fn pop_returns_none_when_empty() {
        let mut v: FixedVec<i32, 3> = FixedVec::new();
        assert_eq!(v.pop(), None);
        assert!(v.try_push(7));
        assert_eq!(v.pop(), Some(7));
        assert_eq!(v.pop(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut v: FixedVec<i32, 3> = FixedVec::new();
        assert!(v.try_extend_from_slice(&[1, 2]));
        v.clear();
        assert!(v.is_empty());
        v.clear();
        assert!(v.is_empty());
    }

    #[test]
    fn from_elem_respects_capacity() {
        let v: FixedVec<i32, 4> = FixedVec::from_elem(3, &7).unwrap();
        assert_eq!(v.as_slice(), &[7, 7, 7]);
        assert!(FixedVec::<i32, 4>::from_elem(5, &7).is_none());
    }

    #[test]
    fn from_default_fills_with_defaults() {
        let v: FixedVec<i32, 4> = FixedVec::from_default(2).unwrap();
        assert_eq!(v.as_slice(), &[0, 0]);
        assert!(FixedVec::<i32, 4>::from_default(5).is_none());
    }

    #[test]
    fn from_iter_checked_discards_on_overflow() {
        let v = FixedVec::<i32, 3>::from_iter_checked(0..3).unwrap();
        assert_eq!(v.as_slice(), &[0, 1, 2]);
        assert!(FixedVec::<i32, 3>::from_iter_checked(0..4).is_none());
    }

    #[test]
    fn try_from_slice_checks_length_up_front() {
        let v = FixedVec::<i32, 3>::try_from([1, 2].as_slice()).unwrap();
        assert_eq!(v.as_slice(), &[1, 2]);
        let err = FixedVec::<i32, 3>::try_from([1, 2, 3, 4].as_slice()).unwrap_err();
        assert_eq!(err, CapacityError { requested: 4, capacity: 3 });
    }

    #[test]
    fn try_from_array_moves_the_elements_in() {
        let v = FixedVec::<i32, 4>::try_from([1, 2, 3]).unwrap();
        assert_eq!(v.as_slice(), &[1, 2, 3]);
        assert!(FixedVec::<i32, 2>::try_from([1, 2, 3]).is_err());
    }

    #[test]
    fn from_other_converts_across_capacities() {
        let small = FixedVec::<i32, 3>::try_from([1, 2, 3]).unwrap();
        let big = FixedVec::<i32, 8>::from_other(&small).unwrap();
        assert_eq!(big, small);

        let narrowed = FixedVec::<i32, 3>::from_other(&big).unwrap();
        assert_eq!(narrowed, small);

        let err = FixedVec::<i32, 2>::from_other(&small).unwrap_err();
        assert_eq!(err, CapacityError { requested: 3, capacity: 2 });
    }

    #[test]
    fn equality_ignores_declared_capacity() {
        let a = FixedVec::<i32, 4>::try_from([1, 2]).unwrap();
        let b = FixedVec::<i32, 9>::try_from([1, 2]).unwrap();
        let c = FixedVec::<i32, 4>::try_from([1, 3]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, FixedVec::<i32, 4>::new());
    }

    #[test]
    fn accessors_agree_with_the_slice() {
        let mut v = FixedVec::<i32, 4>::try_from([10, 20, 30]).unwrap();
        assert_eq!(v.get(1), Some(&20));
        assert_eq!(v.get(3), None);
        assert_eq!(v.first(), Some(&10));
        assert_eq!(v.last(), Some(&30));
        *v.get_mut(1).unwrap() = 21;
        *v.last_mut().unwrap() = 31;
        assert_eq!(v.as_slice(), &[10, 21, 31]);
    }

    #[test]
    fn unchecked_view_reads_without_bounds_checks() {
        let v = FixedVec::<i32, 4>::try_from([5, 6, 7]).unwrap();
        let view = v.unchecked();
        assert_eq!(view.len(), 3);
        assert_eq!(unsafe { view.at(2) }, &7);
        assert_eq!(view.as_slice(), &[5, 6, 7]);
        assert_eq!(view.iter().copied().sum::<i32>(), 18);
    }

    #[test]
    fn unchecked_view_mut_writes_in_place() {
        let mut v = FixedVec::<i32, 4>::try_from([5, 6, 7]).unwrap();
        let mut view = v.unchecked_mut();
        unsafe { *view.at_mut(0) = 50 };
        view.as_mut_slice()[2] = 70;
        assert_eq!(v.as_slice(), &[50, 6, 70]);
    }

    #[test]
    fn view_accessors_share_one_convention() {
        let mut v = FixedVec::<i32, 4>::try_from([5, 6, 7]).unwrap();
        let shared = v.unchecked();
        let first = unsafe { shared.at(0) };
        let last = unsafe { shared.at(2) };
        assert_eq!((first, last), (&5, &7));
        drop(shared);

        let mut exclusive = v.unchecked_mut();
        assert_eq!(unsafe { exclusive.at(0) }, &5);
        unsafe { *exclusive.at_mut(0) += 1 };
        assert_eq!(exclusive.as_slice(), &[6, 6, 7]);
    }

    #[test]
    fn debug_output_lists_the_elements() {
        let v = FixedVec::<i32, 4>::try_from([1, 2]).unwrap();
        assert_eq!(format!("{v:?}"), "[1, 2]");
    }

    #[test]
    fn layout_report_is_stable_per_type_and_capacity() {
        let a = FixedVec::<u64, 4>::layout_report();
        let b = FixedVec::<u64, 4>::layout_report();
        assert_eq!(a, b);
        assert_eq!(a.capacity, 4);
        assert_eq!(a.element_size, 8);
        assert_eq!(a.len_width, 8);
        assert_eq!(a.len_offset, 32);
        assert_ne!(a, FixedVec::<u64, 5>::layout_report());
    }

    #[test]
    fn iteration_visits_elements_in_order() {
        let mut v = FixedVec::<i32, 4>::try_from([1, 2, 3]).unwrap();
        let collected: Vec<i32> = (&v).into_iter().copied().collect();
        assert_eq!(collected, [1, 2, 3]);
        for item in &mut v {
            *item *= 10;
        }
        assert_eq!(v.as_slice(), &[10, 20, 30]);
    }
}
