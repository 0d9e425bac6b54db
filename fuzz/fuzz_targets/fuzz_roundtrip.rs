#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpnm::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding in the same variant and decoding again
    // must produce identical samples
    let Ok(info) = decode_header(data) else {
        return;
    };
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = encode(&decoded, Some(info.magic), enough::Unstoppable) else {
        panic!("decoded grid failed to encode as {}", info.magic);
    };
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
});
