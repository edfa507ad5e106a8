//! Block-type and block-length codes, and the per-category block-switching
//! state machine shared by the literal, insert-and-copy, and distance
//! streams.

use crate::bitreader::BitReader;
use crate::error::{DecodeError, DecodeResult};
use crate::prefix::{read_prefix_code, PrefixTable};

/// Base value and extra-bit count for each of the 26 block-length symbols.
const BLOCK_LENGTH_BASE: [u32; 26] = [
    1, 5, 9, 13, 17, 25, 33, 41, 49, 65, 81, 97, 113, 145, 177, 209, 241, 305, 369, 497, 753, 1265,
    2289, 4337, 8433, 16625,
];
const BLOCK_LENGTH_EXTRA: [u32; 26] = [
    2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 7, 8, 9, 10, 11, 12, 13, 24,
];

/// Number of block types for one category. Returns a value in `1..=256`.
pub fn read_block_type_count(br: &mut BitReader) -> DecodeResult<u32> {
    if !br.read_bit()? {
        return Ok(1);
    }
    let k = br.read_bits(3)?;
    Ok(1 + (1 << k) + br.read_bits(k)?)
}

/// Decode one block-length value from the 26-symbol block-length prefix
/// code.
fn read_block_length(br: &mut BitReader, table: &PrefixTable) -> DecodeResult<u32> {
    let sym = table.decode_symbol(br)? as usize;
    let base = *BLOCK_LENGTH_BASE
        .get(sym)
        .ok_or_else(|| DecodeError::invalid("block length symbol out of range"))?;
    let extra = BLOCK_LENGTH_EXTRA[sym];
    Ok(base + br.read_bits(extra)?)
}

/// The block-switching descriptors and running state for one category
/// (literal, insert-and-copy, or distance).
pub struct BlockTypeState {
    pub num_types: u32,
    pub current_type: u32,
    pub previous_type: u32,
    pub block_len_remaining: u32,
    type_code: Option<PrefixTable>,
    length_code: Option<PrefixTable>,
}

impl BlockTypeState {
    /// Read the `NBLTYPES` descriptor and, if more than one type exists, the
    /// type-change and block-length prefix codes plus the initial block
    /// length.
    pub fn read(br: &mut BitReader) -> DecodeResult<Self> {
        let num_types = read_block_type_count(br)?;
        let (type_code, length_code, block_len_remaining) = if num_types > 1 {
            let type_code = read_prefix_code(br, num_types as usize + 2)?;
            let length_code = read_prefix_code(br, 26)?;
            let initial_len = read_block_length(br, &length_code)?;
            (Some(type_code), Some(length_code), initial_len)
        } else {
            // A single block type never switches; treat its length as
            // unbounded by using u32::MAX as a sentinel that is never
            // exhausted within one meta-block.
            (None, None, u32::MAX)
        };
        Ok(BlockTypeState {
            num_types,
            current_type: 0,
            previous_type: 1,
            block_len_remaining,
            type_code,
            length_code,
        })
    }

    /// `true` once the current block's length counter has run out and a
    /// type change is mandatory before the next symbol of this category.
    pub fn needs_type_change(&self) -> bool {
        self.block_len_remaining == 0
    }

    /// Perform a mandatory type change: decode a type-change symbol, update
    /// `current_type`/`previous_type`, and read a fresh block length. Only
    /// valid when `num_types > 1` (a single-type category never needs this —
    /// its counter never reaches zero within a meta-block).
    pub fn switch_type(&mut self, br: &mut BitReader) -> DecodeResult<()> {
        let type_code = self
            .type_code
            .as_ref()
            .expect("switch_type called with a single block type");
        let length_code = self.length_code.as_ref().expect("paired with type_code");

        let n = type_code.decode_symbol(br)?;
        let new_type = if n > 1 {
            u32::from(n) - 2
        } else if n == 1 {
            (self.current_type + 1) % self.num_types
        } else {
            self.previous_type
        };
        self.previous_type = self.current_type;
        self.current_type = new_type;

        let len = read_block_length(br, length_code)?;
        if len == 0 {
            return Err(DecodeError::invalid("block length must be positive"));
        }
        self.block_len_remaining = len;
        Ok(())
    }

    /// Consume one symbol from the current block, performing a type change
    /// first if the previous block is exhausted.
    pub fn consume(&mut self, br: &mut BitReader) -> DecodeResult<()> {
        if self.needs_type_change() {
            self.switch_type(br)?;
        }
        self.block_len_remaining -= 1;
        Ok(())
    }
}
