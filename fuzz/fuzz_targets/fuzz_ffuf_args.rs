#![no_main]

use libfuzzer_sys::fuzz_target;
use ffuf_mcp::{FfufCommandBuilder, validate_target_url};

fuzz_target!(|input: (String, Vec<String>)| {
    let (url, args) = input;

    // Validation never panics; rejected URLs are never spawned
    if validate_target_url(&url).is_err() {
        return;
    }

    let argv = FfufCommandBuilder::build_args(&url, &args);

    // Invariants that must always hold:
    // 1. The target flag and URL come first, untouched
    assert_eq!(argv[0], "-u");
    assert_eq!(argv[1], url);

    // 2. Caller arguments follow in their original order
    assert_eq!(&argv[2..], &args[..]);
});
