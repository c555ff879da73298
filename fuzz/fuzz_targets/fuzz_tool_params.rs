#![no_main]

use libfuzzer_sys::fuzz_target;
use ffuf_mcp::{DoFfufArgs, ToolCallParams};

fuzz_target!(|data: &[u8]| {
    // Malformed tools/call params from a client must only ever produce Err
    let Ok(params) = serde_json::from_slice::<ToolCallParams>(data) else {
        return;
    };

    // The do-ffuf handler parses `arguments` the same way
    if let Some(arguments) = params.arguments {
        let _result: Result<DoFfufArgs, _> = serde_json::from_value(arguments);
    }
});
