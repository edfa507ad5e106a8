//! Prefix-code subsystem: canonical decode tables, simple and complex code
//! descriptors.
//!
//! Every prefix code the decoder ever builds — literal, insert-and-copy,
//! distance, block-type, block-length, context-map — funnels through
//! [`PrefixTable`] and the canonical-table builders in this module.

mod complex;
mod simple;

pub use complex::read_complex_code;
pub use simple::read_simple_code;

use crate::bitreader::BitReader;
use crate::error::{DecodeError, DecodeResult};

/// Maximum prefix codeword length allowed for the main (non-code-length)
/// alphabet codes: codes longer than 15 bits never appear.
pub const MAX_CODE_LEN: u32 = 15;

/// A canonical prefix-code decode table.
///
/// `count[len]` is the number of codewords of length `len` (`len` in
/// `0..16`); `symbol` holds the alphabet symbols in canonical order — by
/// length ascending, by symbol value ascending within a length.
/// `count[0] == 1` is the degenerate zero-length single-symbol case: no bits
/// are consumed and `symbol[0]` is always returned.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    count: [u16; 16],
    symbol: Vec<u16>,
}

impl PrefixTable {
    /// The degenerate zero-length code: a single symbol, no bits consumed.
    pub fn single_symbol(sym: u16) -> Self {
        let mut count = [0u16; 16];
        count[0] = 1;
        PrefixTable {
            count,
            symbol: vec![sym],
        }
    }

    /// Build a canonical table from `(symbol, length)` pairs with all
    /// lengths in `1..=max_len`. `pairs` need not be sorted. Rejects
    /// over-/under-subscribed codes: the Kraft sum over a `max_len`-bit
    /// domain must equal exactly `1 << max_len`.
    ///
    /// A single pair collapses to the degenerate zero-length case regardless
    /// of its nominal length, since one symbol needs no bits to identify.
    pub fn build_canonical(mut pairs: Vec<(u16, u8)>, max_len: u32) -> DecodeResult<Self> {
        if pairs.is_empty() {
            return Err(DecodeError::invalid("empty prefix code"));
        }
        if pairs.len() == 1 {
            return Ok(Self::single_symbol(pairs[0].0));
        }
        pairs.sort_unstable_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

        let mut count = [0u16; 16];
        for &(_, len) in &pairs {
            if len == 0 || u32::from(len) > max_len {
                return Err(DecodeError::invalid("code length out of range"));
            }
            count[len as usize] += 1;
        }

        let mut kraft: u32 = 0;
        for len in 1..=max_len {
            kraft += (count[len as usize] as u32) << (max_len - len);
        }
        if kraft != (1u32 << max_len) {
            return Err(DecodeError::invalid("oversubscribed or incomplete prefix code"));
        }

        let symbol = pairs.into_iter().map(|(s, _)| s).collect();
        Ok(PrefixTable { count, symbol })
    }

    /// Build a canonical table from a dense per-symbol length array (`0`
    /// meaning the symbol is unused), as produced by the complex-code
    /// alphabet-length reader.
    pub fn build_from_lengths(lengths: &[u8], max_len: u32) -> DecodeResult<Self> {
        let pairs: Vec<(u16, u8)> = lengths
            .iter()
            .enumerate()
            .filter(|&(_, &len)| len != 0)
            .map(|(sym, &len)| (sym as u16, len))
            .collect();
        Self::build_canonical(pairs, max_len)
    }

    /// Decode one symbol, reading bits one at a time.
    pub fn decode_symbol(&self, br: &mut BitReader) -> DecodeResult<u16> {
        if self.count[0] == 1 {
            return Ok(self.symbol[0]);
        }
        let mut first: u32 = 0;
        let mut index: usize = 0;
        let mut code: u32 = 0;
        for len in 1..16u32 {
            code = (code << 1) | u32::from(br.read_bit()?);
            let c = u32::from(self.count[len as usize]);
            if code < first + c {
                return Ok(self.symbol[index + (code - first) as usize]);
            }
            first = (first + c) << 1;
            index += c as usize;
        }
        Err(DecodeError::invalid("prefix code decode exceeded max length"))
    }
}

/// `ceil(log2(n))` for `n >= 1`. Used to size the fixed-width symbol fields
/// of a simple prefix-code descriptor.
pub(crate) fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        (usize::BITS) - (n - 1).leading_zeros()
    }
}

/// Read one prefix-code descriptor (simple or complex) for an alphabet of
/// `alphabet_size` symbols, dispatching on the 2-bit `HSKIP` field.
pub fn read_prefix_code(br: &mut BitReader, alphabet_size: usize) -> DecodeResult<PrefixTable> {
    let hskip = br.read_bits(2)?;
    if hskip == 1 {
        read_simple_code(br, alphabet_size)
    } else {
        read_complex_code(br, alphabet_size, hskip)
    }
}
