//! Insert-and-copy length split: the 704-symbol alphabet that jointly
//! encodes how many literals to insert and how long a subsequent copy is.

use crate::bitreader::BitReader;
use crate::error::{DecodeError, DecodeResult};

/// Size of the insert-and-copy alphabet.
pub const IAC_ALPHABET_SIZE: usize = 704;

const INSERT_MAP: [u32; 11] = [0, 0, 0, 0, 8, 8, 0, 16, 8, 16, 16];
const COPY_MAP: [u32; 11] = [0, 8, 0, 8, 0, 8, 16, 0, 16, 8, 16];

const INSERT_BASE: [u32; 24] = [
    0, 1, 2, 3, 4, 5, 6, 8, 10, 14, 18, 26, 34, 50, 66, 98, 130, 194, 322, 578, 1090, 2114, 6210,
    22594,
];
const INSERT_EXTRA: [u32; 24] = [
    0, 0, 0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 7, 8, 9, 10, 12, 14, 24,
];
const COPY_BASE: [u32; 24] = [
    2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 14, 18, 22, 30, 38, 54, 70, 102, 134, 198, 326, 582, 1094, 2118,
];
const COPY_EXTRA: [u32; 24] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 7, 8, 9, 10, 24,
];

/// The insert length, copy length, and implicit-distance flag decoded from
/// one insert-and-copy symbol.
pub struct InsertCopyLengths {
    pub insert_len: usize,
    pub copy_len: usize,
    /// `true` when `sym < 128`: the distance stream is not consulted and the
    /// most-recent ring distance is reused without advancing the ring.
    pub implicit_distance: bool,
}

/// Split a decoded insert-and-copy symbol (`0..704`) into insert length,
/// copy length, and the implicit-distance flag, reading any extra bits the
/// two length codes require.
pub fn split(br: &mut BitReader, sym: u16) -> DecodeResult<InsertCopyLengths> {
    let sym = sym as u32;
    if sym as usize >= IAC_ALPHABET_SIZE {
        return Err(DecodeError::invalid("insert-and-copy symbol out of range"));
    }
    let row = (sym >> 6) as usize;
    let hi = (sym >> 3) & 7;
    let lo = sym & 7;

    let insert_index = (INSERT_MAP[row] + hi) as usize;
    let copy_index = (COPY_MAP[row] + lo) as usize;

    let insert_len =
        INSERT_BASE[insert_index] as usize + br.read_bits(INSERT_EXTRA[insert_index])? as usize;
    let copy_len = COPY_BASE[copy_index] as usize + br.read_bits(COPY_EXTRA[copy_index])? as usize;

    Ok(InsertCopyLengths {
        insert_len,
        copy_len,
        implicit_distance: sym < 128,
    })
}
