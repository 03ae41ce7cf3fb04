//! Recursive node of the universe-splitting tree.
//!
//! Each node covers [0, 2^num_bits) and hoists its current minimum and maximum
//! into dedicated fields; clusters store only the elements strictly between
//! them. An auxiliary node over cluster indices records which clusters are
//! non-empty, so min/max promotion on delete never scans the child array.
//!
//! # Invariants
//! 1. len == 0: min/max are meaningless; aux and children (if allocated) are empty.
//! 2. len == 1: min == max; aux and children hold nothing.
//! 3. len >= 2: min < max, and children/aux together hold exactly the len - 2
//!    elements strictly between them. The extrema are never duplicated below.
//! 4. Cluster i is a member of aux iff children[i] is non-empty.
//!
//! Violations are programming errors, checked by debug assertions at the
//! mutation sites and by the recursive walker used in tests.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::split;

/// Sentinel extrema for the empty state (min > max never holds otherwise).
const EMPTY_MIN: u64 = u64::MAX;
const EMPTY_MAX: u64 = 0;

/// One level of the recursive set.
///
/// # Memory Layout
/// - `aux`: recursive set over cluster indices, width `num_bits - half_bits`
/// - `children`: `1 << (num_bits - half_bits)` lazily filled slots, each a
///   node of width `half_bits`
///
/// Both are allocated on first structural need and kept for the node's
/// lifetime; emptiness is tracked through `len`, not deallocation.
#[derive(Debug)]
pub(crate) struct VebNode {
    /// Universe width for this node; immutable after construction.
    num_bits: u32,

    /// `num_bits / 2` (floor), cached. Offset width of every child.
    half_bits: u32,

    /// Hoisted extrema. Meaningful iff `len > 0`.
    min: u64,
    max: u64,

    /// Count of elements represented at or below this node.
    len: u64,

    /// Which clusters are non-empty, as a same-kind recursive set.
    aux: Option<Box<VebNode>>,

    /// Dense cluster array, one slot per cluster index:
    /// length `1 << (num_bits - half_bits)`.
    children: Option<Box<[Option<Box<VebNode>>]>>,
}

impl VebNode {
    /// Create an empty node covering [0, 2^num_bits).
    ///
    /// Width 0 never occurs: the public wrapper rejects it, and recursion
    /// bottoms out at width 1 (half of 2 or 3) whose aux is width 1 as well.
    pub(crate) fn new(num_bits: u32) -> Self {
        debug_assert!(num_bits >= 1, "zero-width node");
        VebNode {
            num_bits,
            half_bits: split::half_bits(num_bits),
            min: EMPTY_MIN,
            max: EMPTY_MAX,
            len: 0,
            aux: None,
            children: None,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cached minimum. Callers must check emptiness first.
    #[inline]
    pub(crate) fn min(&self) -> u64 {
        debug_assert!(self.len > 0, "min of empty node");
        self.min
    }

    /// Cached maximum. Callers must check emptiness first.
    #[inline]
    pub(crate) fn max(&self) -> u64 {
        debug_assert!(self.len > 0, "max of empty node");
        self.max
    }

    /// Membership test, recursing into at most one cluster per level.
    pub(crate) fn contains(&self, x: u64) -> bool {
        debug_assert!(split::fits(x, self.num_bits), "value escaped the node universe");

        if self.len == 0 {
            return false;
        }
        if x == self.min || x == self.max {
            return true;
        }
        if x < self.min || x > self.max {
            return false;
        }

        // Strictly interior: resolve through the cluster, if it exists.
        let Some(children) = self.children.as_ref() else {
            return false;
        };
        match children[split::high(x, self.half_bits) as usize].as_ref() {
            Some(child) => child.contains(split::low(x, self.half_bits)),
            None => false,
        }
    }

    /// Insert `x`, returning true iff it was newly added.
    ///
    /// The two extrema live on the node itself, so sets of size <= 2 never
    /// allocate structure. From size 2 on, a new boundary value displaces the
    /// old extremum, which becomes the value pushed into its cluster.
    pub(crate) fn insert(&mut self, mut x: u64) -> bool {
        debug_assert!(split::fits(x, self.num_bits), "value escaped the node universe");

        if self.len == 0 {
            self.min = x;
            self.max = x;
            self.len = 1;
            return true;
        }
        if x == self.min || x == self.max {
            return false;
        }
        if self.len == 1 {
            if x < self.min {
                self.min = x;
            } else {
                self.max = x;
            }
            self.len = 2;
            return true;
        }

        // Hoist: a value below min (above max) becomes the new extremum and
        // the displaced extremum is what descends into the clusters.
        if x < self.min {
            core::mem::swap(&mut x, &mut self.min);
        } else if x > self.max {
            core::mem::swap(&mut x, &mut self.max);
        }

        // Width <= 1 saturates at {0, 1}; a third distinct value cannot exist,
        // so reaching this point means the node is wide enough to split.
        debug_assert!(self.num_bits >= 2, "narrow node asked to split");

        let h = split::high(x, self.half_bits) as usize;
        let l = split::low(x, self.half_bits);

        let half_bits = self.half_bits;
        let cluster_count = 1usize << (self.num_bits - half_bits);
        let children = self.children.get_or_insert_with(|| {
            let mut slots: Vec<Option<Box<VebNode>>> = Vec::new();
            slots.resize_with(cluster_count, || None);
            slots.into_boxed_slice()
        });
        let child = children[h].get_or_insert_with(|| Box::new(VebNode::new(half_bits)));

        // Whether the cluster was empty decides aux membership afterwards.
        let was_empty = child.is_empty();
        if !child.insert(l) {
            // Duplicate strictly between min and max.
            return false;
        }
        if was_empty {
            let aux_bits = self.num_bits - half_bits;
            self.aux
                .get_or_insert_with(|| Box::new(VebNode::new(aux_bits)))
                .insert(h as u64);
        }
        self.len += 1;
        true
    }

    /// Remove `x`, returning true iff it was present.
    ///
    /// Removing an extremum promotes the nearest interior element (found
    /// through aux in O(1) per level) into the hoisted slot; when the last
    /// interior element of a cluster leaves, the cluster index is withdrawn
    /// from aux to keep invariant 4.
    pub(crate) fn remove(&mut self, x: u64) -> bool {
        debug_assert!(split::fits(x, self.num_bits), "value escaped the node universe");

        if self.len == 0 || x < self.min || x > self.max {
            return false;
        }

        if self.len == 1 {
            // min == max and x lies within [min, max], so x is the element.
            debug_assert_eq!(self.min, self.max);
            self.min = EMPTY_MIN;
            self.max = EMPTY_MAX;
            self.len = 0;
            return true;
        }

        if x == self.min {
            if !self.aux_occupied() {
                // No interior elements: the set is exactly {min, max}.
                debug_assert_eq!(self.len, 2, "interior elements without aux entries");
                self.min = self.max;
                self.len = 1;
                return true;
            }

            // Promote the smallest interior element to be the new min.
            let i = self.aux.as_ref().expect("aux is occupied").min();
            let (off, emptied) = self.take_cluster_min(i);
            self.min = split::join(i, off, self.half_bits);
            if emptied {
                self.aux.as_mut().expect("aux is occupied").remove(i);
            }
            self.len -= 1;
            return true;
        }

        if x == self.max {
            if !self.aux_occupied() {
                debug_assert_eq!(self.len, 2, "interior elements without aux entries");
                self.max = self.min;
                self.len = 1;
                return true;
            }

            // Promote the largest interior element to be the new max.
            let i = self.aux.as_ref().expect("aux is occupied").max();
            let (off, emptied) = self.take_cluster_max(i);
            self.max = split::join(i, off, self.half_bits);
            if emptied {
                self.aux.as_mut().expect("aux is occupied").remove(i);
            }
            self.len -= 1;
            return true;
        }

        // Strictly interior value.
        let h = split::high(x, self.half_bits) as usize;
        let l = split::low(x, self.half_bits);
        let Some(children) = self.children.as_mut() else {
            return false;
        };
        let Some(child) = children[h].as_mut() else {
            return false;
        };
        if !child.remove(l) {
            // Cluster exists but holds other offsets only.
            return false;
        }
        if child.is_empty() {
            self.aux
                .as_mut()
                .expect("non-empty cluster was not indexed in aux")
                .remove(h as u64);
        }
        self.len -= 1;
        true
    }

    /// True if any cluster currently holds interior elements.
    #[inline]
    fn aux_occupied(&self) -> bool {
        self.aux.as_ref().is_some_and(|aux| !aux.is_empty())
    }

    /// Remove the minimum offset of cluster `i`, returning it together with
    /// whether the cluster emptied. The cluster must be tracked by aux.
    fn take_cluster_min(&mut self, i: u64) -> (u64, bool) {
        let child = self
            .children
            .as_mut()
            .expect("occupied aux without a child array")[i as usize]
            .as_mut()
            .expect("aux tracks a missing cluster");
        let off = child.min();
        let removed = child.remove(off);
        debug_assert!(removed, "cluster lost its own minimum");
        (off, child.is_empty())
    }

    /// Mirror of [`take_cluster_min`] for the maximum offset.
    fn take_cluster_max(&mut self, i: u64) -> (u64, bool) {
        let child = self
            .children
            .as_mut()
            .expect("occupied aux without a child array")[i as usize]
            .as_mut()
            .expect("aux tracks a missing cluster");
        let off = child.max();
        let removed = child.remove(off);
        debug_assert!(removed, "cluster lost its own maximum");
        (off, child.is_empty())
    }

    /// Recursively audit invariants 1-4. Test builds only.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        if self.len == 0 {
            if let Some(aux) = self.aux.as_ref() {
                assert!(aux.is_empty(), "empty node with occupied aux");
            }
            if let Some(children) = self.children.as_ref() {
                for (i, slot) in children.iter().enumerate() {
                    if let Some(child) = slot {
                        assert!(child.is_empty(), "empty node with occupied cluster {i}");
                    }
                }
            }
            return;
        }

        if self.len == 1 {
            assert_eq!(self.min, self.max, "singleton with distinct extrema");
        } else {
            assert!(self.min < self.max, "multi node with min >= max");
        }

        let mut interior = 0u64;
        if let Some(children) = self.children.as_ref() {
            assert_eq!(children.len(), 1usize << (self.num_bits - self.half_bits));
            for (i, slot) in children.iter().enumerate() {
                let Some(child) = slot.as_ref() else {
                    assert!(!self.aux_contains(i as u64), "aux tracks an unallocated cluster");
                    continue;
                };
                child.assert_invariants();
                assert_eq!(
                    self.aux_contains(i as u64),
                    !child.is_empty(),
                    "aux out of sync with cluster {i}"
                );
                if !child.is_empty() {
                    let lo = split::join(i as u64, child.min(), self.half_bits);
                    let hi = split::join(i as u64, child.max(), self.half_bits);
                    assert!(
                        self.min < lo && hi < self.max,
                        "cluster {i} escapes the open (min, max) interval"
                    );
                }
                interior += child.len();
            }
        }
        if let Some(aux) = self.aux.as_ref() {
            aux.assert_invariants();
        }
        assert_eq!(
            interior,
            self.len.saturating_sub(2),
            "interior element count does not match len"
        );
    }

    #[cfg(test)]
    fn aux_contains(&self, i: u64) -> bool {
        self.aux.as_ref().is_some_and(|aux| aux.contains(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(num_bits: u32) -> VebNode {
        VebNode::new(num_bits)
    }

    #[test]
    fn test_empty_to_singleton_to_pair() {
        let mut n = node(8);
        assert!(n.is_empty());

        assert!(n.insert(42));
        assert_eq!(n.len(), 1);
        assert_eq!((n.min(), n.max()), (42, 42));
        n.assert_invariants();

        assert!(n.insert(7));
        assert_eq!(n.len(), 2);
        assert_eq!((n.min(), n.max()), (7, 42));
        // Two elements fit entirely in the hoisted slots.
        assert!(n.children.is_none());
        assert!(n.aux.is_none());
        n.assert_invariants();
    }

    #[test]
    fn test_third_element_descends() {
        let mut n = node(8);
        assert!(n.insert(7));
        assert!(n.insert(42));
        assert!(n.insert(20));
        assert_eq!(n.len(), 3);
        assert_eq!((n.min(), n.max()), (7, 42));
        assert!(n.contains(20));
        assert!(n.aux_occupied());
        n.assert_invariants();
    }

    #[test]
    fn test_boundary_hoist_on_insert() {
        let mut n = node(8);
        for x in [50, 100, 75] {
            assert!(n.insert(x));
        }
        // A value below min displaces it; the old min becomes interior.
        assert!(n.insert(10));
        assert_eq!(n.min(), 10);
        assert!(n.contains(50));
        n.assert_invariants();

        // Symmetric at the top.
        assert!(n.insert(200));
        assert_eq!(n.max(), 200);
        assert!(n.contains(100));
        n.assert_invariants();
    }

    #[test]
    fn test_duplicate_extremum_rejected() {
        let mut n = node(8);
        assert!(n.insert(3));
        assert!(!n.insert(3));
        assert_eq!(n.len(), 1);

        assert!(n.insert(9));
        assert!(!n.insert(3));
        assert!(!n.insert(9));
        assert_eq!(n.len(), 2);
        n.assert_invariants();
    }

    #[test]
    fn test_duplicate_interior_rejected() {
        // The duplicate sits strictly between min and max, so the rejection
        // must come back out of the cluster recursion with len untouched.
        let mut n = node(8);
        for x in [0, 9, 5] {
            assert!(n.insert(x));
        }
        assert!(!n.insert(5));
        assert_eq!(n.len(), 3);
        n.assert_invariants();
    }

    #[test]
    fn test_remove_lone_element() {
        let mut n = node(8);
        assert!(n.insert(42));
        assert!(n.remove(42));
        assert!(n.is_empty());
        assert!(!n.remove(42));
        n.assert_invariants();
    }

    #[test]
    fn test_remove_min_collapses_pair() {
        let mut n = node(8);
        assert!(n.insert(7));
        assert!(n.insert(42));
        assert!(n.remove(7));
        assert_eq!(n.len(), 1);
        assert_eq!((n.min(), n.max()), (42, 42));
        n.assert_invariants();
    }

    #[test]
    fn test_remove_min_promotes_interior() {
        let mut n = node(8);
        for x in [7, 42, 20, 30] {
            assert!(n.insert(x));
        }
        assert!(n.remove(7));
        assert_eq!(n.min(), 20);
        assert!(!n.contains(7));
        assert!(n.contains(30));
        n.assert_invariants();
    }

    #[test]
    fn test_remove_max_promotes_interior() {
        let mut n = node(8);
        for x in [7, 42, 20, 30] {
            assert!(n.insert(x));
        }
        assert!(n.remove(42));
        assert_eq!(n.max(), 30);
        assert!(n.contains(20));
        n.assert_invariants();
    }

    #[test]
    fn test_aux_collapses_when_cluster_empties() {
        let mut n = node(8);
        // 20 is the only interior element, alone in its cluster.
        for x in [7, 42, 20] {
            assert!(n.insert(x));
        }
        assert!(n.remove(20));
        assert!(!n.aux_occupied());
        assert_eq!(n.len(), 2);
        n.assert_invariants();

        // The structure stays allocated but empty, and keeps working.
        assert!(n.insert(25));
        assert!(n.contains(25));
        n.assert_invariants();
    }

    #[test]
    fn test_remove_interior_miss_with_occupied_cluster() {
        // 5 and 6 share the high nibble; only 5 is present. Removing 6 must
        // fail without corrupting len.
        let mut n = node(8);
        for x in [0, 9, 5] {
            assert!(n.insert(x));
        }
        assert!(!n.remove(6));
        assert_eq!(n.len(), 3);
        assert!(n.contains(5));
        n.assert_invariants();
    }

    #[test]
    fn test_narrow_node_width_one() {
        let mut n = node(1);
        assert!(n.insert(0));
        assert!(n.insert(1));
        assert!(!n.insert(0));
        assert_eq!(n.len(), 2);
        assert!(n.children.is_none());

        assert!(n.remove(0));
        assert_eq!((n.min(), n.max()), (1, 1));
        assert!(n.remove(1));
        assert!(n.is_empty());
        n.assert_invariants();
    }

    #[test]
    fn test_odd_width_universe() {
        // Width 9: clusters are 5 bits of index over 4 bits of offset.
        let mut n = node(9);
        for x in [0, 511, 256, 255, 17] {
            assert!(n.insert(x));
            n.assert_invariants();
        }
        assert_eq!((n.min(), n.max()), (0, 511));
        for x in [0, 511, 256, 255, 17] {
            assert!(n.contains(x));
        }
        assert!(!n.contains(16));

        for x in [256, 0, 511, 17, 255] {
            assert!(n.remove(x));
            n.assert_invariants();
        }
        assert!(n.is_empty());
    }

    #[test]
    fn test_full_universe_drain() {
        let mut n = node(8);
        for x in 0..256u64 {
            assert!(n.insert(x));
        }
        assert_eq!(n.len(), 256);
        n.assert_invariants();

        for x in 0..256u64 {
            assert!(n.contains(x));
            assert!(n.remove(x));
        }
        assert!(n.is_empty());
        n.assert_invariants();
    }
}
