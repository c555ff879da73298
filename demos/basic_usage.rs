//! Basic usage example for ffuf-mcp
//!
//! This example demonstrates how to:
//! - Resolve configuration from the default path
//! - Validate target URLs and build the ffuf argument vector
//! - Run one fuzz job through the same use case the MCP tool uses
//!
//! Run with: `cargo run --example basic_usage -- /path/to/ffuf`

use std::path::PathBuf;
use std::sync::Arc;

use ffuf_mcp::config::{default_config_path, resolve_config};
use ffuf_mcp::domain::{FfufCommandBuilder, FuzzJob, RunFuzzJobUseCase, validate_target_url};
use ffuf_mcp::process::LocalProcessRunner;

#[tokio::main]
async fn main() {
    println!("Config path: {}", default_config_path().display());

    let config = match resolve_config(None) {
        Ok(config) => config,
        Err(e) => {
            println!("Could not load config: {e}");
            return;
        }
    };

    println!("\n=== Spawn Settings ===");
    println!("  Working dir: {:?}", config.ffuf.working_dir);
    println!("  Extra env vars: {}", config.ffuf.env.len());
    println!(
        "  Output on failure: {}",
        config.output.include_output_on_failure
    );

    println!("\n=== URL Validation ===");
    for url in [
        "https://target.test/FUZZ",
        "http://10.0.0.5:8080/api/FUZZ",
        "target.test/FUZZ",
        "not-a-url",
    ] {
        let status = if validate_target_url(url).is_ok() {
            "VALID"
        } else {
            "REJECTED"
        };
        println!("  {url} -> {status}");
    }

    let args: Vec<String> = ["-w", "words.txt", "-mc", "200"]
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("\n=== Argument Vector ===");
    println!(
        "  {:?}",
        FfufCommandBuilder::build_args("https://target.test/FUZZ", &args)
    );

    let Some(binary) = std::env::args().nth(1).map(PathBuf::from) else {
        println!("\nPass the path of an ffuf binary to run `ffuf -V`.");
        return;
    };

    println!("\n=== Running {} ===", binary.display());
    let config = config.with_binary(binary);
    let use_case = RunFuzzJobUseCase::new(Arc::new(LocalProcessRunner::new()), &config);

    let job = match FuzzJob::new("https://target.test/FUZZ", vec!["-V".to_string()]) {
        Ok(job) => job,
        Err(e) => {
            println!("  {e}");
            return;
        }
    };

    match use_case.run(&job).await {
        Ok(text) => println!("{text}"),
        Err(e) => println!("  Failed: {e}"),
    }
}
