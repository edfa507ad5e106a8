//! Simple prefix-code descriptor: 1..4 symbols with a fixed length pattern.

use super::{ceil_log2, PrefixTable};
use crate::bitreader::BitReader;
use crate::error::{DecodeError, DecodeResult};

/// Read a simple prefix-code descriptor. The 2-bit `HSKIP == 1` selector that
/// routes here has already been consumed by the caller.
pub fn read_simple_code(br: &mut BitReader, alphabet_size: usize) -> DecodeResult<PrefixTable> {
    let nsym = br.read_bits(2)? as usize + 1; // 1..=4
    let sym_bits = ceil_log2(alphabet_size);

    let mut symbols = Vec::with_capacity(nsym);
    for _ in 0..nsym {
        let s = br.read_bits(sym_bits)? as usize;
        if s >= alphabet_size {
            return Err(DecodeError::invalid("simple code symbol out of range"));
        }
        symbols.push(s as u16);
    }

    if nsym == 1 {
        return Ok(PrefixTable::single_symbol(symbols[0]));
    }

    let lengths: [u8; 4] = match nsym {
        2 => [1, 1, 0, 0],
        3 => [1, 2, 2, 0],
        4 => {
            let asymmetric = br.read_bit()?;
            if asymmetric {
                [1, 2, 3, 3]
            } else {
                [2, 2, 2, 2]
            }
        }
        _ => unreachable!("nsym is 2 bits + 1, so 1..=4"),
    };

    let pairs: Vec<(u16, u8)> = symbols
        .iter()
        .zip(lengths.iter())
        .map(|(&s, &l)| (s, l))
        .collect();
    PrefixTable::build_canonical(pairs, super::MAX_CODE_LEN)
}
