//! A reference decoder for the Brotli compressed stream format (RFC 7932).
//!
//! The library's only operation is [`decode`]: given a complete in-memory
//! compressed buffer (and, optionally, a complete expected buffer for
//! compare mode), it produces a complete decompressed buffer plus a result
//! discriminant. There is no compressor, no progressive streaming API, and
//! no byte-at-a-time input model — the whole stream is consumed in one call.
//!
//! # Layout
//!
//! Five cooperating layers, leaves first:
//!
//! 1. [`bitreader`] — the little-endian bit source.
//! 2. [`prefix`] — simple and complex prefix-code descriptors, canonical
//!    decode tables.
//! 3. [`blocktype`], [`context`], [`insertcopy`], [`distance`] — the
//!    auxiliary decoders the meta-block orchestrator drives.
//! 4. [`dictionary`] — the static word table and its 121 transforms.
//! 5. [`metablock`] — the meta-block header parser and command loop, tying
//!    everything above together; [`state`] holds the one mutable record it
//!    and every module above it share.
//!
//! [`decode`] (in the [`decode`] module, re-exported here) is the only
//! public entry point into that machinery.

pub mod bitreader;
pub mod blocktype;
pub mod cli;
pub mod config;
pub mod context;
pub mod decode;
pub mod dictionary;
pub mod distance;
pub mod error;
pub mod insertcopy;
pub mod metablock;
pub mod prefix;
pub mod state;

pub use decode::{decode, DecodeOutcome};
pub use error::{DecodeError, DecodeResult};
