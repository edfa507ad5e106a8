//! Meta-block orchestrator: header parsing and the insert-and-copy command
//! loop, the single largest component, tying every other module together.

use crate::blocktype::BlockTypeState;
use crate::context::{distance_context, read_context_map, ContextMode};
use crate::dictionary;
use crate::distance::DistanceRing;
use crate::error::{DecodeError, DecodeResult};
use crate::insertcopy;
use crate::prefix::read_prefix_code;
use crate::state::{CodeBanks, DecoderState, DistanceParams, LiteralContext, Output};

/// Drive the full meta-block sequence: header, command loop, repeat until a
/// meta-block with `ISLAST` set finishes.
pub fn run(state: &mut DecoderState) -> DecodeResult<()> {
    loop {
        if decode_one(state)? {
            return Ok(());
        }
    }
}

/// Decode one meta-block. Returns `true` once the stream has terminated
/// (an empty last meta-block, or a non-empty last meta-block whose command
/// loop has run to completion).
fn decode_one(state: &mut DecoderState) -> DecodeResult<bool> {
    // Step 1: ISLAST / ISLASTEMPTY.
    let is_last = state.br.read_bit()?;
    if is_last && state.br.read_bit()? {
        return Ok(true);
    }

    // Step 2: MNIBBLES - 4, with the metadata escape value 3.
    let mnibbles_code = state.br.read_bits(2)?;
    if mnibbles_code == 3 {
        if state.br.read_bit()? {
            return Err(DecodeError::invalid("reserved bit set in meta-data block"));
        }
        let mskipbytes = state.br.read_bits(2)?;
        let skip_len = if mskipbytes == 0 {
            1
        } else {
            state.br.read_bits(mskipbytes * 8)? as usize + 1
        };
        state.br.align_to_byte()?;
        state.br.skip_aligned_bytes(skip_len)?;
        return Ok(is_last);
    }

    // Step 3: MLEN, encoded in `4 + mnibbles_code` nibbles, value = MLEN - 1.
    let nibble_count = 4 + mnibbles_code;
    let mut mlen_minus_one: u32 = 0;
    let mut last_nibble = 0u32;
    for i in 0..nibble_count {
        last_nibble = state.br.read_bits(4)?;
        mlen_minus_one |= last_nibble << (4 * i);
    }
    if nibble_count > 4 && last_nibble == 0 {
        return Err(DecodeError::invalid("MNIBBLES padding nibble must be non-zero"));
    }
    let mlen = mlen_minus_one + 1;

    // Step 4: uncompressed meta-block escape. Only read for non-final
    // meta-blocks; a final meta-block's payload is always compressed.
    if !is_last && state.br.read_bit()? {
        state.br.align_to_byte()?;
        let bytes = state.br.read_aligned_bytes(mlen as usize)?;
        match &mut state.output {
            Output::Collect(buf) => buf.extend_from_slice(bytes),
            Output::Compare { .. } => {
                for &b in bytes {
                    state.output.push(b)?;
                }
            }
        }
        return Ok(is_last);
    }

    // Steps 5-8: block-switch descriptors, distance params, context modes
    // and maps, and the three code banks.
    let mut literal_block = BlockTypeState::read(&mut state.br)?;
    let mut insert_copy_block = BlockTypeState::read(&mut state.br)?;
    let mut distance_block = BlockTypeState::read(&mut state.br)?;

    let postfix = state.br.read_bits(2)?;
    let ndirect_nibble = state.br.read_bits(4)?;
    let dist_params = DistanceParams {
        postfix,
        direct: ndirect_nibble << postfix,
    };

    let lit_num = literal_block.num_types as usize;
    let dist_num = distance_block.num_types as usize;

    let mut modes = Vec::with_capacity(lit_num);
    for _ in 0..lit_num {
        modes.push(ContextMode::from_bits(state.br.read_bits(2)?));
    }

    let ntreesl = crate::blocktype::read_block_type_count(&mut state.br)?;
    let lit_map = if ntreesl > 1 {
        read_context_map(&mut state.br, lit_num * 64, ntreesl as usize)?
    } else {
        vec![0u8; lit_num * 64]
    };

    let ntreesd = crate::blocktype::read_block_type_count(&mut state.br)?;
    let dist_map = if ntreesd > 1 {
        read_context_map(&mut state.br, dist_num * 4, ntreesd as usize)?
    } else {
        vec![0u8; dist_num * 4]
    };

    let literal_ctx = LiteralContext { modes, lit_map, dist_map };

    let mut literal_codes = Vec::with_capacity(ntreesl as usize);
    for _ in 0..ntreesl {
        literal_codes.push(read_prefix_code(&mut state.br, 256)?);
    }
    let iac_num = insert_copy_block.num_types;
    let mut iac_codes = Vec::with_capacity(iac_num as usize);
    for _ in 0..iac_num {
        iac_codes.push(read_prefix_code(&mut state.br, insertcopy::IAC_ALPHABET_SIZE)?);
    }
    let mut distance_codes = Vec::with_capacity(ntreesd as usize);
    for _ in 0..ntreesd {
        distance_codes.push(read_prefix_code(&mut state.br, dist_params.alphabet_size())?);
    }
    let banks = CodeBanks {
        literal: literal_codes,
        insert_copy: iac_codes,
        distance: distance_codes,
    };

    run_command_loop(
        state,
        mlen,
        &mut literal_block,
        &mut insert_copy_block,
        &mut distance_block,
        &dist_params,
        &literal_ctx,
        &banks,
    )?;

    Ok(is_last)
}

/// Step 9: the insert-and-copy command loop, run until `mlen` bytes have
/// been produced by this meta-block.
#[allow(clippy::too_many_arguments)]
fn run_command_loop(
    state: &mut DecoderState,
    mlen: u32,
    literal_block: &mut BlockTypeState,
    insert_copy_block: &mut BlockTypeState,
    distance_block: &mut BlockTypeState,
    dist_params: &DistanceParams,
    literal_ctx: &LiteralContext,
    banks: &CodeBanks,
) -> DecodeResult<()> {
    let mut remaining = mlen;

    while remaining > 0 {
        insert_copy_block.consume(&mut state.br)?;
        let table = &banks.insert_copy[insert_copy_block.current_type as usize];
        let sym = table.decode_symbol(&mut state.br)?;
        let lengths = insertcopy::split(&mut state.br, sym)?;

        for _ in 0..lengths.insert_len {
            if remaining == 0 {
                return Err(DecodeError::invalid("mlen exceeded by insert length"));
            }
            literal_block.consume(&mut state.br)?;
            let (p1, p2) = last_two_bytes(&state.output);
            let tree = literal_ctx.literal_tree(literal_block.current_type, p1, p2);
            let byte = banks.literal[tree].decode_symbol(&mut state.br)? as u8;
            state.output.push(byte)?;
            remaining -= 1;
        }

        if remaining == 0 {
            break;
        }

        let max = state.window_max();
        let dist = if lengths.implicit_distance {
            state.ring.most_recent()
        } else {
            distance_block.consume(&mut state.br)?;
            let dctx = distance_context(lengths.copy_len);
            let tree = literal_ctx.distance_tree(distance_block.current_type, dctx);
            let sym = banks.distance[tree].decode_symbol(&mut state.br)? as u32;
            let dist = state
                .ring
                .decode(&mut state.br, sym, dist_params.postfix, dist_params.direct)?;
            if sym != 0 && dist <= max {
                state.ring.push(dist);
            }
            dist
        };

        if dist > max {
            let id = (dist - max - 1) as usize;
            let word = dictionary::resolve(id, lengths.copy_len)?;
            if word.len() as u32 > remaining {
                return Err(DecodeError::invalid("mlen exceeded by dictionary copy"));
            }
            for &b in &word {
                state.output.push(b)?;
            }
            remaining -= word.len() as u32;
        } else {
            if lengths.copy_len as u32 > remaining {
                return Err(DecodeError::invalid("mlen exceeded by copy length"));
            }
            for _ in 0..lengths.copy_len {
                let src = state.output.len() - dist as usize;
                let byte = state.output.byte_at(src);
                state.output.push(byte)?;
            }
            remaining -= lengths.copy_len as u32;
        }
    }

    Ok(())
}

/// The last two output bytes (`p1` most recent, `p2` second-most-recent),
/// defaulting to zero before enough output exists.
fn last_two_bytes(output: &Output) -> (u8, u8) {
    let len = output.len();
    let p1 = if len >= 1 { output.byte_at(len - 1) } else { 0 };
    let p2 = if len >= 2 { output.byte_at(len - 2) } else { 0 };
    (p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitreader::BitReader;
    use crate::distance::DistanceRing;

    fn empty_stream_state(bytes: &'static [u8]) -> DecoderState<'static> {
        DecoderState {
            br: BitReader::new(bytes),
            wbits: 16,
            wsize: (1 << 16) - 16,
            output: Output::Collect(Vec::new()),
            ring: DistanceRing::new(),
        }
    }

    #[test]
    fn empty_last_meta_block_terminates_immediately() {
        // ISLAST=1, ISLASTEMPTY=1 -> 0b11 in the first two LSB-first bits.
        let mut state = empty_stream_state(&[0b0000_0011]);
        run(&mut state).unwrap();
        assert!(state.output.len() == 0);
    }
}
