//! Public wrapper fixing the universe width and policing its boundary.

use thiserror::Error;

use crate::split;
use crate::veb::node::VebNode;

/// Errors reported by [`VebSet`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VebError {
    /// The value lies outside [0, 2^num_bits). Rejected at the public API
    /// boundary, before any recursion.
    #[error("value {value} is outside the universe [0, 2^{num_bits})")]
    OutOfRange {
        /// The offending value.
        value: u64,
        /// Universe width of the set that rejected it.
        num_bits: u32,
    },
}

/// Ordered integer set over a fixed universe [0, 2^num_bits).
///
/// A van Emde Boas tree: each level caches its minimum and maximum directly
/// and splits the remaining values into 2^(bits/2)-sized clusters, with an
/// auxiliary recursive set tracking which clusters are occupied. Recursion
/// depth halves the width per level.
///
/// # Performance
/// - Insert / remove / contains: O(log log U), U = 2^num_bits
/// - Min / max / len: O(1) from cached fields
/// - Memory: dense child arrays of 2^(width/2) slots are allocated lazily per
///   touched node; widths above ~32 are accepted but impractical
///
/// # Concurrency
/// Single-threaded by design: one mutation touches a node, one cluster and
/// the auxiliary index as an atomic unit. External callers that share a set
/// must hold one exclusive lock per instance around each operation.
///
/// # Example
/// ```rust
/// use veb_set::VebSet;
///
/// let mut set = VebSet::new(8);
/// assert_eq!(set.insert(42), Ok(true));
/// assert_eq!(set.insert(42), Ok(false));
/// assert_eq!(set.contains(42), Ok(true));
/// assert_eq!(set.min(), Some(42));
/// assert!(set.insert(256).is_err());
/// ```
#[derive(Debug)]
pub struct VebSet {
    root: VebNode,
    num_bits: u32,
}

impl VebSet {
    /// Create an empty set over [0, 2^num_bits).
    ///
    /// # Panics
    /// Panics if `num_bits` is 0 or exceeds 64 — a construction-site bug, not
    /// bad data.
    ///
    /// # Example
    /// ```rust
    /// use veb_set::VebSet;
    ///
    /// let set = VebSet::new(16);
    /// assert!(set.is_empty());
    /// assert_eq!(set.num_bits(), 16);
    /// ```
    pub fn new(num_bits: u32) -> Self {
        assert!(
            (1..=64).contains(&num_bits),
            "universe width must be in 1..=64, got {num_bits}"
        );
        VebSet {
            root: VebNode::new(num_bits),
            num_bits,
        }
    }

    /// Universe width this set was constructed with.
    #[inline]
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Number of elements currently in the set.
    ///
    /// # Performance
    /// O(1) - returns the root's cached count
    #[inline]
    pub fn len(&self) -> u64 {
        self.root.len()
    }

    /// Check if the set holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Smallest element, or `None` if the set is empty.
    ///
    /// # Performance
    /// O(1) - hoisted at the root, never searched
    #[inline]
    pub fn min(&self) -> Option<u64> {
        (!self.is_empty()).then(|| self.root.min())
    }

    /// Largest element, or `None` if the set is empty.
    ///
    /// # Performance
    /// O(1) - hoisted at the root, never searched
    #[inline]
    pub fn max(&self) -> Option<u64> {
        (!self.is_empty()).then(|| self.root.max())
    }

    /// Membership test.
    ///
    /// # Errors
    /// [`VebError::OutOfRange`] if `x` does not lie in [0, 2^num_bits).
    ///
    /// # Performance
    /// O(log log U) - descends into at most one cluster per level
    pub fn contains(&self, x: u64) -> Result<bool, VebError> {
        self.check_range(x)?;
        Ok(self.root.contains(x))
    }

    /// Insert `x`. Returns `Ok(true)` iff it was newly added; inserting a
    /// value already present is not an error.
    ///
    /// # Errors
    /// [`VebError::OutOfRange`] if `x` does not lie in [0, 2^num_bits).
    ///
    /// # Performance
    /// O(log log U)
    pub fn insert(&mut self, x: u64) -> Result<bool, VebError> {
        self.check_range(x)?;
        Ok(self.root.insert(x))
    }

    /// Remove `x`. Returns `Ok(true)` iff it was present; removing an absent
    /// value is not an error.
    ///
    /// # Errors
    /// [`VebError::OutOfRange`] if `x` does not lie in [0, 2^num_bits).
    ///
    /// # Performance
    /// O(log log U)
    pub fn remove(&mut self, x: u64) -> Result<bool, VebError> {
        self.check_range(x)?;
        Ok(self.root.remove(x))
    }

    #[inline]
    fn check_range(&self, x: u64) -> Result<(), VebError> {
        if split::fits(x, self.num_bits) {
            Ok(())
        } else {
            Err(VebError::OutOfRange {
                value: x,
                num_bits: self.num_bits,
            })
        }
    }
}

impl Default for VebSet {
    /// A set over the 32-bit universe, the typical domain.
    fn default() -> Self {
        Self::new(32)
    }
}
