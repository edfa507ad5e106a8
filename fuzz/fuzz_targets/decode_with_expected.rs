#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Exercise compare mode: split the fuzzer's input at its first byte to
    // get an (expected, compressed) pair, so the streaming comparison path
    // (which never materializes the output buffer) gets covered too.
    if data.is_empty() {
        return;
    }
    let rest = &data[1..];
    let split = (data[0] as usize) % (rest.len() + 1);
    let (expected, compressed) = rest.split_at(split);
    let outcome = brotli_decoder::decode(compressed, Some(expected));
    let _ = outcome.result;
});
