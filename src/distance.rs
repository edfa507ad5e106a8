//! Distance ring buffer and distance-symbol decoding.

use crate::bitreader::BitReader;
use crate::error::DecodeResult;

/// Ring-relative slot selector, counted backward from the current pointer.
const BACK: [u8; 16] = [0, 1, 2, 3, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1];
/// Small signed offset added to the selected ring slot.
const DELTA: [i32; 16] = [0, 0, 0, 0, -1, 1, -2, 2, -3, 3, -1, 1, -2, 2, -3, 3];

/// The 4-entry distance ring and its pointer. Initialized exactly once per
/// stream and never reset at meta-block boundaries.
pub struct DistanceRing {
    ring: [u32; 4],
    /// Names the "most recent" slot.
    ptr: u8,
}

impl DistanceRing {
    pub fn new() -> Self {
        DistanceRing {
            ring: [16, 15, 11, 4],
            ptr: 3,
        }
    }

    /// The most recently used distance, reused verbatim when an
    /// insert-and-copy symbol signals an implicit distance.
    pub fn most_recent(&self) -> u32 {
        self.ring[self.ptr as usize]
    }

    /// Push a newly computed distance as the new most-recent entry. Callers
    /// must only invoke this when the ring's update rule fires: the distance
    /// symbol was non-zero and the resulting distance was
    /// `<= max = min(got, wsize)`.
    pub fn push(&mut self, dist: u32) {
        self.ptr = (self.ptr + 1) & 3;
        self.ring[self.ptr as usize] = dist;
    }

    /// Decode a distance symbol (`0..16 + direct + (48 << postfix)`) into an
    /// absolute distance. Does not mutate the ring — the caller applies
    /// [`Self::push`] separately once it knows whether the update rule
    /// fires.
    pub fn decode(&self, br: &mut BitReader, sym: u32, postfix: u32, direct: u32) -> DecodeResult<u32> {
        if sym < 16 {
            let back = BACK[sym as usize] as u8;
            let slot = self.ring[((self.ptr as i32 - back as i32).rem_euclid(4)) as usize];
            let delta = DELTA[sym as usize];
            return Ok((slot as i64 + delta as i64) as u32);
        }
        if sym < 16 + direct {
            return Ok(sym - 15);
        }
        let n = sym - direct - 16;
        let x = 1 + (n >> (postfix + 1));
        let off = ((2 + ((n >> postfix) & 1)) << x) - 4;
        let e = br.read_bits(x)?;
        Ok(((off + e) << postfix) + (n & ((1 << postfix) - 1)) + direct + 1)
    }
}

impl Default for DistanceRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_ring_has_the_fixed_startup_distances() {
        let ring = DistanceRing::new();
        assert_eq!(ring.most_recent(), 4);
    }

    #[test]
    fn sym_zero_reuses_the_most_recent_slot_unchanged() {
        let ring = DistanceRing::new();
        let mut br = BitReader::new(&[]);
        let dist = ring.decode(&mut br, 0, 0, 0).unwrap();
        assert_eq!(dist, ring.most_recent());
    }

    #[test]
    fn direct_distance_is_sym_minus_fifteen() {
        let ring = DistanceRing::new();
        let mut br = BitReader::new(&[]);
        // direct=10: symbols 16..26 are direct, value = sym - 15.
        assert_eq!(ring.decode(&mut br, 20, 0, 10).unwrap(), 5);
    }

    #[test]
    fn push_rotates_the_pointer_forward() {
        let mut ring = DistanceRing::new();
        ring.push(99);
        assert_eq!(ring.most_recent(), 99);
    }
}
