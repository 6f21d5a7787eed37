//! Layout introspection for cross-process ABI verification.
//!
//! A container placed in shared memory is read by processes that may have
//! been compiled independently. Before exchanging data, each side can
//! describe the container's in-memory shape as a [`LayoutReport`] and check
//! the other side's report against its own through a [`LayoutCatalog`].
//! Disagreement means the two binaries would interpret the same bytes
//! differently and must not share the region.

use std::fmt;

use indexmap::IndexMap;

use crate::error::LayoutError;

/// The in-memory shape of a fixed-capacity container type.
///
/// All values are in bytes. Two processes agree on a container's ABI iff
/// their reports for it are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutReport {
    /// Size of the whole container.
    pub total_size: usize,
    /// Alignment of the whole container.
    pub total_align: usize,
    /// Size of one element.
    pub element_size: usize,
    /// Alignment of one element.
    pub element_align: usize,
    /// Compile-time capacity, in elements.
    pub capacity: usize,
    /// Byte offset of the length counter within the container.
    pub len_offset: usize,
    /// Width of the length counter in bytes.
    pub len_width: usize,
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ size {}/align {}, element {}/align {}, capacity {}, len @{}+{} }}",
            self.total_size,
            self.total_align,
            self.element_size,
            self.element_align,
            self.capacity,
            self.len_offset,
            self.len_width
        )
    }
}

/// An insertion-ordered registry of container layouts, keyed by type name.
///
/// A producer registers the layout of every container type it publishes; a
/// consumer verifies its own layouts against the producer's catalog at the
/// boundary (for example during a handshake, or against a serialized dump of
/// the catalog). Iteration order is registration order, so a dump of the
/// catalog is deterministic.
#[derive(Debug, Default)]
pub struct LayoutCatalog {
    entries: IndexMap<&'static str, LayoutReport>,
}

impl LayoutCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type's layout.
    ///
    /// Re-registering the same name with an identical report is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Conflict`] if the name is already registered
    /// with a different report.
    pub fn register(
        &mut self,
        type_name: &'static str,
        report: LayoutReport,
    ) -> Result<(), LayoutError> {
        match self.entries.get(type_name) {
            Some(existing) if *existing != report => Err(LayoutError::Conflict {
                type_name,
                registered: *existing,
                offered: report,
            }),
            Some(_) => Ok(()),
            None => {
                self.entries.insert(type_name, report);
                Ok(())
            }
        }
    }

    /// Check a report against the registered layout for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Unknown`] if the name was never registered, or
    /// [`LayoutError::Conflict`] if the registered layout differs.
    pub fn verify(
        &self,
        type_name: &'static str,
        report: LayoutReport,
    ) -> Result<(), LayoutError> {
        match self.entries.get(type_name) {
            None => Err(LayoutError::Unknown { type_name }),
            Some(existing) if *existing != report => Err(LayoutError::Conflict {
                type_name,
                registered: *existing,
                offered: report,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Look up the registered layout for a type name.
    pub fn get(&self, type_name: &str) -> Option<&LayoutReport> {
        self.entries.get(type_name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(type_name, report)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &LayoutReport)> {
        self.entries.iter().map(|(name, report)| (*name, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(total_size: usize) -> LayoutReport {
        LayoutReport {
            total_size,
            total_align: 8,
            element_size: 8,
            element_align: 8,
            capacity: (total_size - 8) / 8,
            len_offset: total_size - 8,
            len_width: 8,
        }
    }

    #[test]
    fn register_then_verify_roundtrip() {
        let mut catalog = LayoutCatalog::new();
        catalog.register("Pose", report(88)).unwrap();
        assert!(catalog.verify("Pose", report(88)).is_ok());
    }

    #[test]
    fn register_same_layout_twice_is_noop() {
        let mut catalog = LayoutCatalog::new();
        catalog.register("Pose", report(88)).unwrap();
        catalog.register("Pose", report(88)).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn conflicting_registration_is_rejected() {
        let mut catalog = LayoutCatalog::new();
        catalog.register("Pose", report(88)).unwrap();
        let err = catalog.register("Pose", report(168)).unwrap_err();
        assert!(matches!(err, LayoutError::Conflict { type_name: "Pose", .. }));
    }

    #[test]
    fn verify_unknown_type_fails() {
        let catalog = LayoutCatalog::new();
        let err = catalog.verify("Twist", report(88)).unwrap_err();
        assert_eq!(err, LayoutError::Unknown { type_name: "Twist" });
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let mut catalog = LayoutCatalog::new();
        catalog.register("B", report(88)).unwrap();
        catalog.register("A", report(168)).unwrap();
        let names: Vec<_> = catalog.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["B", "A"]);
    }
}
