#![no_main]

use libfuzzer_sys::fuzz_target;
use ffuf_mcp::JsonRpcRequest;

fuzz_target!(|data: &[u8]| {
    // The server reads one request per line; every line must parse or fail cleanly
    for line in data.split(|&b| b == b'\n') {
        if let Ok(request) = serde_json::from_slice::<JsonRpcRequest>(line) {
            // A request without an id is a notification
            assert_eq!(request.is_notification(), request.id.is_none());
        }
    }
});
