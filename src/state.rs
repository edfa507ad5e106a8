//! The single mutable decoder state record.
//!
//! One `DecoderState` is created at the start of a stream and lives for the
//! whole `decode` call; every module above this one borrows it exclusively
//! rather than carrying its own copy of any of these fields.

use crate::bitreader::BitReader;
use crate::context::ContextMode;
use crate::distance::DistanceRing;
use crate::error::{DecodeError, DecodeResult};
use crate::prefix::PrefixTable;

/// Output sink: either a plain growing buffer, or compare mode against a
/// caller-supplied expected buffer. A two-branch conditional at each output
/// write, not a type-level abstraction — the two modes share almost nothing.
pub enum Output<'a> {
    Collect(Vec<u8>),
    Compare { expected: &'a [u8], got: usize },
}

impl<'a> Output<'a> {
    /// Current number of bytes produced.
    pub fn len(&self) -> usize {
        match self {
            Output::Collect(buf) => buf.len(),
            Output::Compare { got, .. } => *got,
        }
    }

    /// Append one byte, checking it against the expected buffer in compare
    /// mode. `back` is the distance to read a byte from for a ring copy;
    /// `None` means the caller is supplying a literal byte directly.
    pub fn push(&mut self, byte: u8) -> DecodeResult<()> {
        match self {
            Output::Collect(buf) => {
                buf.push(byte);
                Ok(())
            }
            Output::Compare { expected, got } => {
                if *got >= expected.len() || expected[*got] != byte {
                    return Err(DecodeError::CompareMismatch { got: *got });
                }
                *got += 1;
                Ok(())
            }
        }
    }

    /// Read the byte `dist` positions back from the current end, for a
    /// ring (within-window) copy. Only valid in `Collect` mode for plain
    /// byte-by-byte self-overlapping copies — compare mode tracks the same
    /// logical history by re-deriving it from `expected`.
    pub fn byte_at(&self, pos: usize) -> u8 {
        match self {
            Output::Collect(buf) => buf[pos],
            Output::Compare { expected, .. } => expected[pos],
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        match self {
            Output::Collect(buf) => buf,
            Output::Compare { got, expected } => expected[..got].to_vec(),
        }
    }
}

/// Distance-alphabet parameters read once per meta-block.
#[derive(Debug, Clone, Copy)]
pub struct DistanceParams {
    pub postfix: u32,
    pub direct: u32,
}

impl DistanceParams {
    /// Total distance-alphabet size, `16 + direct + (48 << postfix)`.
    pub fn alphabet_size(&self) -> usize {
        16 + self.direct as usize + (48usize << self.postfix)
    }
}

/// Per-literal-type context mode plus the two context maps. Populated once
/// per meta-block.
pub struct LiteralContext {
    pub modes: Vec<ContextMode>,
    pub lit_map: Vec<u8>,
    pub dist_map: Vec<u8>,
}

impl LiteralContext {
    /// Resolve a literal's code-bank index from its block type and the last
    /// two output bytes: `lit_map[(lit_type << 6) + context_id]`.
    pub fn literal_tree(&self, lit_type: u32, p1: u8, p2: u8) -> usize {
        let context_id = self.modes[lit_type as usize].context_id(p1, p2);
        self.lit_map[(lit_type as usize) << 6 | context_id as usize] as usize
    }

    /// Resolve a distance's code-bank index:
    /// `dist_map[(dist_type << 2) + dist_context]`.
    pub fn distance_tree(&self, dist_type: u32, dist_context: u8) -> usize {
        self.dist_map[(dist_type as usize) << 2 | dist_context as usize] as usize
    }
}

/// The three code banks read per meta-block: one prefix table per distinct
/// literal/insert-copy/distance tree.
pub struct CodeBanks {
    pub literal: Vec<PrefixTable>,
    pub insert_copy: Vec<PrefixTable>,
    pub distance: Vec<PrefixTable>,
}

/// The part of the decoder state that persists across meta-blocks: the
/// input cursor, window parameters, output sink, and the distance ring
/// (never reset at a meta-block boundary). The three block-switch states,
/// the distance params, the literal context, and the code banks are all
/// read fresh at the start of each meta-block and so live as local
/// variables in the orchestrator rather than here.
pub struct DecoderState<'a> {
    pub br: BitReader<'a>,
    pub wbits: u32,
    pub wsize: u32,
    pub output: Output<'a>,
    pub ring: DistanceRing,
}

impl<'a> DecoderState<'a> {
    /// `max = min(got, wsize)`, the window upper bound for distance
    /// validity.
    pub fn window_max(&self) -> u32 {
        (self.output.len() as u32).min(self.wsize)
    }
}
