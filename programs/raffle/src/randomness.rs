//! Winner selection from on-chain entropy.
//!
//! The SlotHashes sysvar is laid out as an 8-byte vector length followed by
//! `(slot: u64, hash: [u8; 32])` pairs, newest first. Bytes 12..20 and 20..28
//! therefore sit inside the most recent slot hash.

use arrayref::array_ref;

use crate::error::RaffleError;

const PRIMARY_CHUNK_OFFSET: usize = 12;
const SECONDARY_CHUNK_OFFSET: usize = 20;

/// Rejection sampling retries before settling for a plain modulo.
const MAX_ATTEMPTS: u8 = 3;

/// Derives a 64-bit seed from raw SlotHashes data and the clock timestamp.
pub fn seed_from_slot_hashes(data: &[u8], timestamp: i64) -> Result<u64, RaffleError> {
    if data.len() < PRIMARY_CHUNK_OFFSET + 8 {
        return Err(RaffleError::InvalidSlotHashesAccount);
    }

    let chunk1 = array_ref![data, PRIMARY_CHUNK_OFFSET, 8];
    let chunk2 = if data.len() >= SECONDARY_CHUNK_OFFSET + 8 {
        array_ref![data, SECONDARY_CHUNK_OFFSET, 8]
    } else {
        chunk1
    };

    let hash_value1 = u64::from_le_bytes(*chunk1);
    let hash_value2 = u64::from_le_bytes(*chunk2);

    let mixed = mix(hash_value1, timestamp as u64);
    Ok(mix(mixed, hash_value2))
}

/// splitmix64 finalizer over the sum of both inputs.
pub fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Maps `x` into `[0, range)`.
///
/// Powers of two are masked, small ranges use a plain modulo and everything
/// else goes through bounded rejection sampling.
pub fn unbiased_range(x: u64, range: u64) -> Result<u64, RaffleError> {
    if range == 0 {
        return Err(RaffleError::NoEntries);
    }

    if range.is_power_of_two() {
        return Ok(x & (range - 1));
    }

    if range <= 256 {
        return Ok(x % range);
    }

    let threshold = u64::MAX - (u64::MAX % range);
    let mut value = x;

    for i in 0..MAX_ATTEMPTS {
        if value < threshold {
            return Ok(value % range);
        }
        value = mix(value, value.wrapping_add(i as u64 + 1));
    }

    Ok(value % range)
}

/// Picks the winning ticket index for a raffle holding `total_entries` tickets.
pub fn draw_ticket(slot_hashes: &[u8], timestamp: i64, total_entries: u64) -> Result<u64, RaffleError> {
    let seed = seed_from_slot_hashes(slot_hashes, timestamp)?;
    unbiased_range(seed, total_entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_hashes(fill: u8, len: usize) -> Vec<u8> {
        let mut data = vec![0u8; len];
        data[..8].copy_from_slice(&1u64.to_le_bytes());
        for (i, byte) in data.iter_mut().enumerate().skip(8) {
            *byte = fill.wrapping_add(i as u8);
        }
        data
    }

    #[test]
    fn mix_is_deterministic_and_spreads_bits() {
        assert_eq!(mix(1, 2), mix(1, 2));
        assert_ne!(mix(1, 2), mix(1, 3));
        assert_ne!(mix(0, 0), mix(0, 1));
    }

    #[test]
    fn range_mapping_stays_in_bounds() {
        for range in [1u64, 2, 3, 7, 64, 255, 256, 257, 1_000, 1_000_003] {
            for x in [0u64, 1, 12_345, u64::MAX / 3, u64::MAX - 1, u64::MAX] {
                let ticket = unbiased_range(x, range).unwrap();
                assert!(ticket < range, "{ticket} >= {range}");
            }
        }
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(matches!(unbiased_range(42, 0), Err(RaffleError::NoEntries)));
    }

    #[test]
    fn power_of_two_ranges_use_the_low_bits() {
        assert_eq!(unbiased_range(0b1011_0110, 16).unwrap(), 0b0110);
    }

    #[test]
    fn short_slot_hash_data_is_rejected() {
        assert!(matches!(
            seed_from_slot_hashes(&[0u8; 10], 0),
            Err(RaffleError::InvalidSlotHashesAccount)
        ));
    }

    #[test]
    fn short_data_reuses_the_first_chunk() {
        let data = slot_hashes(7, 24);
        let chunk = u64::from_le_bytes(*array_ref![data, 12, 8]);
        let expected = mix(mix(chunk, 99), chunk);
        assert_eq!(seed_from_slot_hashes(&data, 99).unwrap(), expected);
    }

    #[test]
    fn seed_depends_on_hash_and_timestamp() {
        let data = slot_hashes(3, 48);
        let base = seed_from_slot_hashes(&data, 1_700_000_000).unwrap();
        assert_ne!(base, seed_from_slot_hashes(&data, 1_700_000_001).unwrap());
        assert_ne!(base, seed_from_slot_hashes(&slot_hashes(4, 48), 1_700_000_000).unwrap());
    }

    #[test]
    fn drawn_ticket_is_below_total_entries() {
        let data = slot_hashes(11, 48);
        for total in 1..50u64 {
            assert!(draw_ticket(&data, 1_700_000_000 + total as i64, total).unwrap() < total);
        }
    }
}
