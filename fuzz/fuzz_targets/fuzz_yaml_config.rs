#![no_main]

use libfuzzer_sys::fuzz_target;
use ffuf_mcp::Config;

fuzz_target!(|data: &str| {
    let Ok(config) = serde_saphyr::from_str::<Config>(data) else {
        return;
    };

    // The binary path only ever comes from the command line
    assert!(config.binary.as_os_str().is_empty());
});
