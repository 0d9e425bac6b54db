#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode must never panic
    let _ = zenpnm::decode_header(data);
    let _ = zenpnm::decode(data, enough::Unstoppable);
});
