//! Boundary cases: the window-size edge and the static-dictionary length
//! constraint.

mod support;

use brotli_decoder::decode;
use brotli_decoder::error::DecodeError;
use support::{mlen_nibbles, BitWriter};

/// `WBITS = 10`, the minimum window: `wsize = (1 << 10) - 16 = 1008`. Fill
/// exactly `wsize` bytes via an uncompressed meta-block, then reference
/// `dist == wsize` from a second meta-block — the largest distance still
/// inside the window, so it must succeed as a ring copy, not a dictionary
/// reference.
#[test]
fn distance_equal_to_window_size_is_a_valid_ring_copy() {
    const WSIZE: u32 = (1 << 10) - 16;

    let mut w = BitWriter::new();
    // WBITS = 10: bit=1, 3 bits=0 (escape), continuation bit=1, 3 bits=2.
    w.bit(true).bits(0, 3).bit(true).bits(2, 3);

    // Meta-block 1: uncompressed, ISLAST = 0, fills the whole window with
    // the byte 'A'.
    w.bit(false); // ISLAST = 0
    w.bits(0, 2); // MNIBBLES - 4 = 0
    mlen_nibbles(&mut w, WSIZE, 4);
    w.bit(true); // ISUNCOMPRESSED = 1
    w.raw_bytes(&vec![b'A'; WSIZE as usize]);

    // Meta-block 2: compressed, ISLAST = 1, one command: insert 0, copy 4
    // bytes at distance WSIZE (exactly at the window boundary).
    w.bit(true); // ISLAST = 1
    w.bit(false); // ISLASTEMPTY = 0
    w.bits(0, 2); // MNIBBLES - 4 = 0
    mlen_nibbles(&mut w, 4, 4);

    w.bit(false).bit(false).bit(false); // three NBLTYPES = 1
    w.bits(0, 2); // postfix = 0
    w.bits(0, 4); // ndirect nibble = 0 -> direct = 0
    w.bits(0, 2); // literal context mode LSB6
    w.bit(false); // NTREESL = 1
    w.bit(false); // NTREESD = 1

    w.bits(1, 2).bits(0, 2).bits(0, 8); // literal code: unused single symbol
    // Insert-copy code: single symbol 130 (row 2, hi 0, lo 2) -> insert_len
    // 0, copy_len 4, non-implicit distance.
    w.bits(1, 2).bits(0, 2).bits(130, 10);
    // Distance code: single symbol 31, alphabet size 64.
    w.bits(1, 2).bits(0, 2).bits(31, 6);
    // sym=31, postfix=0, direct=0: n=15, x=8 extra bits, off=764.
    // dist = off + e + 1 = WSIZE requires e = WSIZE - 764 - 1.
    let e = WSIZE - 764 - 1;
    w.bits(e, 8);

    let stream = w.finish();
    let outcome = decode(&stream, None);
    assert!(outcome.result.is_ok(), "{:?}", outcome.result);
    assert_eq!(outcome.output.len(), WSIZE as usize + 4);
    assert!(outcome.output.iter().all(|&b| b == b'A'));
}

/// A dictionary reference whose copy length is outside `4..=24` is invalid,
/// regardless of how far past the window the distance falls.
#[test]
fn dictionary_copy_length_out_of_range_is_invalid() {
    let mut w = BitWriter::new();
    w.bit(false); // WBITS default (16)
    w.bit(true); // ISLAST = 1
    w.bit(false); // ISLASTEMPTY = 0
    w.bits(0, 2); // MNIBBLES - 4 = 0
    mlen_nibbles(&mut w, 2, 4); // MLEN = 2 (the invalid copy length)

    w.bit(false).bit(false).bit(false); // three NBLTYPES = 1
    w.bits(0, 2); // postfix = 0
    w.bits(0, 4); // ndirect nibble = 0
    w.bits(0, 2); // literal context mode LSB6
    w.bit(false); // NTREESL = 1
    w.bit(false); // NTREESD = 1

    w.bits(1, 2).bits(0, 2).bits(0, 8); // literal code: unused
    // Insert-copy code: single symbol 128 (row 2, hi 0, lo 0) -> insert_len
    // 0, copy_len 2, non-implicit distance.
    w.bits(1, 2).bits(0, 2).bits(128, 10);
    // Distance code: single symbol 16, alphabet size 64.
    w.bits(1, 2).bits(0, 2).bits(16, 6);
    // sym=16, postfix=0, direct=0: n=0, x=1 extra bit, off=0; e=0 -> dist=1.
    w.bits(0, 1);

    let stream = w.finish();
    let outcome = decode(&stream, None);
    match outcome.result {
        Err(DecodeError::Invalid(_)) => {}
        other => panic!("expected Invalid, got {other:?}"),
    }
}
