//! Pure bit-splitting functions for universe-splitting recursion.
//!
//! Every node of the tree covers a universe [0, 2^num_bits) and splits each
//! value into high-order "cluster" bits and low-order "offset" bits around
//! `half_bits = num_bits / 2`. These helpers are the only place the bit layout
//! is encoded.

/// Width of the low-order (offset) half for a node of the given width.
///
/// Floor division: a node of odd width gives the extra bit to the cluster
/// side, so the auxiliary index is `num_bits - half_bits` wide.
///
/// Base case: `num_bits <= 1` yields 0. Such a node never splits — it
/// represents {}, {0} or {0, 1} directly via its cached min/max.
///
/// # Performance
/// O(1) - single shift, always inlined
#[inline(always)]
pub fn half_bits(num_bits: u32) -> u32 {
    num_bits >> 1
}

/// Extract the high-order (cluster index) bits of `x`.
///
/// Range: [0, 2^(num_bits - half_bits)).
///
/// # Performance
/// O(1) - single shift, always inlined
#[inline(always)]
pub fn high(x: u64, half_bits: u32) -> u64 {
    x >> half_bits
}

/// Extract the low-order (offset within cluster) bits of `x`.
///
/// Range: [0, 2^half_bits).
///
/// # Performance
/// O(1) - single mask, always inlined
#[inline(always)]
pub fn low(x: u64, half_bits: u32) -> u64 {
    x & ((1u64 << half_bits) - 1)
}

/// Recombine cluster index and offset into a value of the full universe.
///
/// Round-trip law: `join(high(x, hb), low(x, hb), hb) == x` for every x in
/// [0, 2^num_bits).
///
/// # Performance
/// O(1) - shift and or, always inlined
#[inline(always)]
pub fn join(high: u64, low: u64, half_bits: u32) -> u64 {
    (high << half_bits) | low
}

/// Check that `x` lies inside the universe [0, 2^num_bits).
///
/// Correct for the full-width case: `num_bits == 64` admits every u64
/// without shifting by the type width.
///
/// # Performance
/// O(1) - single shift and compare, always inlined
#[inline(always)]
pub fn fits(x: u64, num_bits: u32) -> bool {
    num_bits >= u64::BITS || (x >> num_bits) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_bits() {
        assert_eq!(half_bits(32), 16);
        assert_eq!(half_bits(16), 8);
        assert_eq!(half_bits(9), 4);
        assert_eq!(half_bits(2), 1);
        assert_eq!(half_bits(1), 0);
        assert_eq!(half_bits(0), 0);
    }

    #[test]
    fn test_high_low() {
        // num_bits = 8, half_bits = 4: nibble split
        assert_eq!(high(0xAB, 4), 0xA);
        assert_eq!(low(0xAB, 4), 0xB);

        // num_bits = 9, half_bits = 4: cluster side is 5 bits wide
        assert_eq!(high(0x1FF, 4), 0x1F);
        assert_eq!(low(0x1FF, 4), 0xF);
    }

    #[test]
    fn test_join() {
        assert_eq!(join(0xA, 0xB, 4), 0xAB);
        assert_eq!(join(0, 0, 4), 0);
        assert_eq!(join(0xF, 0xF, 4), 0xFF);
    }

    #[test]
    fn test_round_trip_full_8_bit_universe() {
        let hb = half_bits(8);
        for x in 0u64..256 {
            assert_eq!(join(high(x, hb), low(x, hb), hb), x);
        }
    }

    #[test]
    fn test_round_trip_sampled_wide_universes() {
        for num_bits in [9, 16, 17, 32, 63, 64] {
            let hb = half_bits(num_bits);
            let top = if num_bits == 64 {
                u64::MAX
            } else {
                (1u64 << num_bits) - 1
            };
            for x in [0, 1, top / 3, top / 2, top - 1, top] {
                assert_eq!(join(high(x, hb), low(x, hb), hb), x, "num_bits={num_bits}");
            }
        }
    }

    #[test]
    fn test_ranges() {
        let hb = half_bits(8);
        for x in 0u64..256 {
            assert!(high(x, hb) < 16);
            assert!(low(x, hb) < 16);
        }
    }

    #[test]
    fn test_base_case_width_one() {
        // half_bits = 0: high is the value itself, low is always 0
        let hb = half_bits(1);
        assert_eq!(hb, 0);
        assert_eq!(high(1, hb), 1);
        assert_eq!(low(1, hb), 0);
    }

    #[test]
    fn test_fits() {
        assert!(fits(0, 1));
        assert!(fits(1, 1));
        assert!(!fits(2, 1));

        assert!(fits(255, 8));
        assert!(!fits(256, 8));

        assert!(fits(u32::MAX as u64, 32));
        assert!(!fits(u32::MAX as u64 + 1, 32));

        // full-width universe admits everything
        assert!(fits(u64::MAX, 64));
    }
}
