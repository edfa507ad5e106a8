//! Top-level decode entry point.
//!
//! The one operation this library exposes: take a complete in-memory
//! compressed buffer (and, optionally, a complete expected buffer for
//! compare mode) and produce a complete decompressed buffer plus a result
//! discriminant. No incremental pull API, no callbacks — a single call in, a
//! single value out.

use crate::bitreader::BitReader;
use crate::distance::DistanceRing;
use crate::error::DecodeError;
use crate::metablock;
use crate::state::{DecoderState, Output};

/// The outcome of one [`decode`] call.
#[derive(Debug)]
pub struct DecodeOutcome {
    /// The decompressed bytes. Empty in compare mode (the expected buffer
    /// already holds the canonical bytes; see [`Self::result`] for whether
    /// they matched).
    pub output: Vec<u8>,
    /// Number of bytes consumed from `compressed`, letting callers detect
    /// trailing input.
    pub consumed_input_bytes: usize,
    /// `Ok(())` on success, or the error that stopped decoding.
    pub result: Result<(), DecodeError>,
}

/// Decode a complete Brotli compressed stream.
///
/// When `expected` is `Some`, the decoder runs in compare mode: it never
/// materializes the full output, comparing generated bytes against
/// `expected` as they are produced, and stops at the first divergence with
/// `CompareMismatch`.
pub fn decode(compressed: &[u8], expected: Option<&[u8]>) -> DecodeOutcome {
    match run(compressed, expected) {
        Ok((output, consumed)) => DecodeOutcome {
            output,
            consumed_input_bytes: consumed,
            result: Ok(()),
        },
        Err((err, consumed, produced)) => DecodeOutcome {
            output: produced,
            consumed_input_bytes: consumed,
            result: Err(err),
        },
    }
}

#[allow(clippy::type_complexity)]
fn run(
    compressed: &[u8],
    expected: Option<&[u8]>,
) -> Result<(Vec<u8>, usize), (DecodeError, usize, Vec<u8>)> {
    let mut br = BitReader::new(compressed);
    let wbits = match read_wbits(&mut br) {
        Ok(w) => w,
        Err(e) => return Err((e, br.bytes_consumed(), Vec::new())),
    };
    let wsize = (1u32 << wbits) - 16;

    let output = match expected {
        Some(buf) => Output::Compare { expected: buf, got: 0 },
        None => Output::Collect(Vec::new()),
    };

    let mut state = DecoderState {
        br,
        wbits,
        wsize,
        output,
        ring: DistanceRing::new(),
    };

    match metablock::run(&mut state) {
        Ok(()) => {
            if !state.br.residual_is_zero() {
                let consumed = state.br.bytes_consumed();
                let err = DecodeError::invalid("nonzero bits discarded after the last meta-block");
                return Err((err, consumed, state.output.into_vec()));
            }
            let consumed = state.br.bytes_consumed();
            Ok((state.output.into_vec(), consumed))
        }
        Err(e) => {
            let consumed = state.br.bytes_consumed();
            Err((e, consumed, state.output.into_vec()))
        }
    }
}

/// Read the stream-level `WBITS` field: a variable-length code at the very
/// start of the stream, preceding the first meta-block (RFC 7932 §9.2).
///
/// Bit 0 selects the default, 16. Otherwise 3 more bits `n`: `1..=7` gives
/// `17+n` (18..24 directly). `n == 0` escapes further: one bit must be 1
/// (0 is a reserved code point), then 3 bits `p`: `0` gives 17 (a second,
/// non-minimal encoding of the same value the fast path also reaches),
/// `1` is a reserved code point (a window size of 9 is not representable),
/// and `2..=7` gives `8+p` (10..15).
fn read_wbits(br: &mut BitReader) -> Result<u32, DecodeError> {
    if !br.read_bit()? {
        return Ok(16);
    }
    let n = br.read_bits(3)?;
    if n != 0 {
        return Ok(17 + n);
    }
    if !br.read_bit()? {
        return Err(DecodeError::invalid("reserved wbits code point"));
    }
    let p = br.read_bits(3)?;
    match p {
        0 => Ok(17),
        1 => Err(DecodeError::invalid("wbits of 9 is an unused code point")),
        _ => Ok(8 + p),
    }
}
