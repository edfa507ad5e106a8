//! Static-dictionary engine: the 122,784-byte word table and the 121
//! elementary transforms.
//!
//! The word corpus itself (`words.bin`) is a compiled-in, deterministically
//! generated stand-in for the real Brotli dictionary — see `DESIGN.md` for
//! why: this environment has no network access to fetch the literal RFC 7932
//! corpus. The addressing scheme (lengths, per-length counts, offsets) and
//! the transform engine follow RFC 7932 exactly.

mod transforms;

pub use transforms::{apply_transform, Transform, TRANSFORMS};

use crate::error::{DecodeError, DecodeResult};

/// Raw dictionary bytes, one contiguous run per word length, shortest first.
static WORDS: &[u8] = include_bytes!("words.bin");

/// Total dictionary size.
pub const DICTIONARY_SIZE: usize = 122_784;

/// Shortest and longest word lengths the dictionary indexes.
pub const MIN_WORD_LEN: usize = 4;
pub const MAX_WORD_LEN: usize = 24;

/// `log2(word count)` for each length `4..=24`, indexed by `length - 4`.
const NDBITS: [u32; 21] = [
    10, 10, 11, 11, 10, 10, 10, 10, 10, 9, 9, 8, 7, 7, 8, 7, 7, 6, 6, 5, 5,
];

/// Byte offset of the first word of each length within [`WORDS`], indexed by
/// `length - 4`. Computed once from [`NDBITS`] (each length contributes
/// `(1 << ndbits) * length` bytes).
fn word_table_offset(length: usize) -> usize {
    let mut offset = 0usize;
    for l in MIN_WORD_LEN..length {
        let count = 1usize << NDBITS[l - MIN_WORD_LEN];
        offset += count * l;
    }
    offset
}

/// Number of words of length `length` in the dictionary.
pub fn word_count(length: usize) -> DecodeResult<usize> {
    if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&length) {
        return Err(DecodeError::invalid("dictionary word length out of range"));
    }
    Ok(1usize << NDBITS[length - MIN_WORD_LEN])
}

/// Look up dictionary word `index` of length `length`.
pub fn word(length: usize, index: usize) -> DecodeResult<&'static [u8]> {
    let count = word_count(length)?;
    if index >= count {
        return Err(DecodeError::invalid("dictionary word index out of range"));
    }
    let offset = word_table_offset(length) + index * length;
    Ok(&WORDS[offset..offset + length])
}

/// Decode a static-dictionary reference: `dist` exceeded the window bound by
/// `id = dist - max - 1`; the copy length names the word length. Returns the
/// fully transformed bytes to append to the output.
pub fn resolve(id: usize, copy_len: usize) -> DecodeResult<Vec<u8>> {
    if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&copy_len) {
        return Err(DecodeError::invalid("dictionary copy length out of range"));
    }
    let bits = NDBITS[copy_len - MIN_WORD_LEN];
    let mask = (1usize << bits) - 1;
    let index = id & mask;
    let xform = id >> bits;
    if xform >= TRANSFORMS.len() {
        return Err(DecodeError::invalid("dictionary transform index out of range"));
    }
    let raw = word(copy_len, index)?;
    Ok(apply_transform(raw, &TRANSFORMS[xform]))
}
