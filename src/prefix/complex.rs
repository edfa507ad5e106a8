//! Complex prefix-code descriptor: lengths expressed through a nested
//! "code length code".

use super::PrefixTable;
use crate::bitreader::BitReader;
use crate::error::{DecodeError, DecodeResult};

/// Order in which the 18 code-length-code lengths are transmitted.
/// Symbols `0..=15` are literal alphabet code lengths; `16` is the
/// repeat-last instruction, `17` is the run-of-zeros instruction.
const CODE_LENGTH_ORDER: [u8; 18] = [1, 2, 3, 4, 0, 5, 17, 6, 16, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Fixed (non-adaptive) lengths of the tiny prefix code used to read each
/// code-length-code length itself. Values `0..=5` are the possible lengths
/// a code-length-code entry can take; the code admits at most 5 bits per
/// entry, hence the Kraft sum below is tracked over a 5-bit domain (total
/// space 32).
const CODE_LENGTH_PREFIX_LENGTHS: [u8; 6] = [2, 4, 3, 2, 2, 4];

/// Maximum bit width of a code-length-code entry: the Kraft sum below is
/// tracked over a 5-bit domain.
const CODE_LENGTH_MAX_LEN: u32 = 5;

fn fixed_code_length_table() -> DecodeResult<PrefixTable> {
    let pairs: Vec<(u16, u8)> = CODE_LENGTH_PREFIX_LENGTHS
        .iter()
        .enumerate()
        .map(|(sym, &len)| (sym as u16, len))
        .collect();
    PrefixTable::build_canonical(pairs, CODE_LENGTH_MAX_LEN)
}

/// Read a complex prefix-code descriptor for an alphabet of `alphabet_size`
/// symbols. `hskip` (the `HSKIP` field, already consumed by the caller) is
/// the number of leading entries of [`CODE_LENGTH_ORDER`] to force to zero.
pub fn read_complex_code(
    br: &mut BitReader,
    alphabet_size: usize,
    hskip: u32,
) -> DecodeResult<PrefixTable> {
    let clc_table = fixed_code_length_table()?;
    let mut cl_lengths = [0u8; 18];

    // Kraft sum over the 5-bit domain: each nonzero entry of length `len`
    // contributes `32 >> len`. Reading stops once the sum reaches 32.
    let mut space: u32 = 32;
    let mut any_nonzero = false;
    for (i, &sym) in CODE_LENGTH_ORDER.iter().enumerate() {
        if (i as u32) < hskip {
            continue; // forced zero, not read
        }
        if space == 0 {
            break;
        }
        let len = clc_table.decode_symbol(br)? as u8;
        cl_lengths[sym as usize] = len;
        if len != 0 {
            any_nonzero = true;
            let weight = 32u32 >> len;
            if weight > space {
                return Err(DecodeError::invalid("code length code oversubscribed"));
            }
            space -= weight;
        }
    }
    if !any_nonzero {
        return Err(DecodeError::invalid("code length code is empty"));
    }

    let code_length_code = PrefixTable::build_from_lengths(&cl_lengths, CODE_LENGTH_MAX_LEN)
        .or_else(|_| {
            // Exactly one non-zero entry: degenerate zero-bit code, valid
            // regardless of whether its nominal Kraft weight reached 32.
            let nonzero: Vec<(u16, u8)> = cl_lengths
                .iter()
                .enumerate()
                .filter(|&(_, &l)| l != 0)
                .map(|(sym, &l)| (sym as u16, l))
                .collect();
            if nonzero.len() == 1 {
                Ok(PrefixTable::single_symbol(nonzero[0].0))
            } else {
                Err(DecodeError::invalid("code length code oversubscribed or incomplete"))
            }
        })?;

    read_alphabet_lengths(br, &code_length_code, alphabet_size)
}

/// Decode the main alphabet's code lengths using the nested code-length
/// code, applying the run-length rules for symbols 16 (repeat-last) and 17
/// (run-of-zeros).
fn read_alphabet_lengths(
    br: &mut BitReader,
    code_length_code: &PrefixTable,
    alphabet_size: usize,
) -> DecodeResult<PrefixTable> {
    let mut lengths = vec![0u8; alphabet_size];
    let mut filled = 0usize;
    let mut last_nonzero: u8 = 8;
    // Some(repeat_count) iff the previous symbol processed was also a 16/17
    // run, so the next run of the same kind extends geometrically.
    let mut prev_repeat: Option<u32> = None;
    let mut prev_zero_run: Option<u32> = None;

    while filled < alphabet_size {
        let sym = code_length_code.decode_symbol(br)?;
        match sym {
            0..=15 => {
                let len = sym as u8;
                lengths[filled] = len;
                filled += 1;
                if len != 0 {
                    last_nonzero = len;
                }
                prev_repeat = None;
                prev_zero_run = None;
            }
            16 => {
                let extra = br.read_bits(2)?;
                let base = match prev_repeat {
                    Some(p) => ((p.saturating_sub(2)) << 2) + 3 + extra,
                    None => 3 + extra,
                };
                prev_repeat = Some(base);
                prev_zero_run = None;
                if filled + base as usize > alphabet_size {
                    return Err(DecodeError::invalid("too many symbols"));
                }
                for _ in 0..base {
                    lengths[filled] = last_nonzero;
                    filled += 1;
                }
            }
            17 => {
                let extra = br.read_bits(3)?;
                let base = match prev_zero_run {
                    Some(p) => ((p.saturating_sub(2)) << 3) + 3 + extra,
                    None => 3 + extra,
                };
                prev_zero_run = Some(base);
                prev_repeat = None;
                if filled + base as usize > alphabet_size {
                    return Err(DecodeError::invalid("too many symbols"));
                }
                for _ in 0..base {
                    lengths[filled] = 0;
                    filled += 1;
                }
            }
            _ => return Err(DecodeError::invalid("code length code symbol out of range")),
        }
    }

    PrefixTable::build_from_lengths(&lengths, super::MAX_CODE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_code_length_table_is_complete() {
        assert!(fixed_code_length_table().is_ok());
    }
}
