#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes through the decoder directly as a compressed
    // stream. Err results are expected and fine; what we verify is no
    // panics or unbounded memory growth.
    let outcome = brotli_decoder::decode(data, None);
    let _ = outcome.result;
});
