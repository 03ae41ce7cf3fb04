//! Stateless slice utilities for generating and verifying test data.
//!
//! Companions of the set structures rather than part of them: shuffles feed
//! randomized insert/remove orders, the sorts double as oracles for
//! value-range-bounded data, and the permutation helpers enumerate small
//! exhaustive cases.

use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

/// Shuffle a slice in place with the Fisher-Yates walk.
///
/// Unbiased: every permutation is equally likely for an unbiased `rng`.
///
/// Time: O(n), Space: O(1).
pub fn fisher_yates_shuffle<T, R: Rng + ?Sized>(nums: &mut [T], rng: &mut R) {
    for i in (1..nums.len()).rev() {
        let j = rng.random_range(0..=i);
        nums.swap(i, j);
    }
}

/// Sort by counting occurrences per value.
///
/// Only sensible when the value range is small: allocates one counter per
/// distinct possible value between the slice minimum and maximum.
///
/// Time: O(k + n), Space: O(k + n), k = max − min + 1.
///
/// # Panics
/// Panics if the value range does not fit in addressable memory — this is a
/// test-data utility, not a general sort.
pub fn counting_sort(nums: &[u64]) -> Vec<u64> {
    let Some(&first) = nums.first() else {
        return Vec::new();
    };
    let (mut min, mut max) = (first, first);
    for &x in nums {
        min = min.min(x);
        max = max.max(x);
    }

    let span = (max - min)
        .checked_add(1)
        .and_then(|s| usize::try_from(s).ok())
        .expect("value range too large for counting sort");
    let mut counts = vec![0usize; span];
    for &x in nums {
        counts[(x - min) as usize] += 1;
    }

    let mut sorted = Vec::with_capacity(nums.len());
    for (offset, &count) in counts.iter().enumerate() {
        for _ in 0..count {
            sorted.push(min + offset as u64);
        }
    }
    sorted
}

/// Sort by stable least-significant-bit partition passes.
///
/// Time: O(64 n), Space: O(n).
pub fn lsd_radix_sort(nums: &[u64]) -> Vec<u64> {
    let mut nums = nums.to_vec();
    let mut split = Vec::with_capacity(nums.len());
    for bit in 0..u64::BITS {
        let mask = 1u64 << bit;
        split.clear();
        // Zeros keep their relative order ahead of ones: stability is what
        // makes the per-bit passes compose into a full sort.
        split.extend(nums.iter().copied().filter(|x| x & mask == 0));
        split.extend(nums.iter().copied().filter(|x| x & mask != 0));
        core::mem::swap(&mut nums, &mut split);
    }
    nums
}

/// Advance the slice to the next permutation in lexicographic order.
///
/// Returns false and leaves the slice unchanged when it is already the last
/// (descending) permutation.
///
/// Time: O(n), Space: O(1).
pub fn next_permutation<T: Ord>(nums: &mut [T]) -> bool {
    let n = nums.len();
    if n < 2 {
        return false;
    }
    // Rightmost ascent; no ascent means the sequence is fully descending.
    let Some(pivot) = (0..n - 1).rev().find(|&i| nums[i] < nums[i + 1]) else {
        return false;
    };
    // Smallest element right of the pivot that still exceeds it.
    let swap_with = (pivot + 1..n)
        .rev()
        .find(|&j| nums[pivot] < nums[j])
        .expect("suffix of an ascent holds a larger element");
    nums.swap(pivot, swap_with);
    reverse(&mut nums[pivot + 1..]);
    true
}

/// Reverse a slice in place with a two-pointer walk.
///
/// Time: O(n), Space: O(1).
pub fn reverse<T>(nums: &mut [T]) {
    if nums.is_empty() {
        return;
    }
    let mut i = 0;
    let mut j = nums.len() - 1;
    while i < j {
        nums.swap(i, j);
        i += 1;
        j -= 1;
    }
}
