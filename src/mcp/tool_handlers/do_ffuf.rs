//! ffuf Tool Handler
//!
//! Runs ffuf against a target URL with caller-supplied flags and returns
//! the combined stdout/stderr once the process exits.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::domain::{FuzzJob, RunFuzzJobUseCase};
use crate::error::{BridgeError, Result};
use crate::mcp::protocol::ToolCallResult;
use crate::ports::{ToolContext, ToolHandler, ToolSchema};

#[derive(Debug, Deserialize)]
pub struct DoFfufArgs {
    url: String,
    #[serde(alias = "args")]
    ffuf_args: Vec<String>,
}

pub struct DoFfufHandler;

impl DoFfufHandler {
    const NAME: &'static str = "do-ffuf";

    const DESCRIPTION: &'static str = "Run ffuf with specified URL";

    const SCHEMA: &'static str = r#"{
        "type": "object",
        "properties": {
            "url": {
                "type": "string",
                "format": "uri",
                "description": "Target URL to fuzz"
            },
            "ffuf_args": {
                "type": "array",
                "items": {"type": "string"},
                "description": "Additional ffuf arguments, passed verbatim after -u <url>\n\nHTTP OPTIONS:\n  -H                  Header 'Name: Value', separated by colon. Multiple -H flags are accepted.\n  -X                  HTTP method to use\n  -b                  Cookie data 'NAME1=VALUE1; NAME2=VALUE2' for copy as curl functionality.\n  -cc                 Client cert for authentication. Client key needs to be defined as well for this to work\n  -ck                 Client key for authentication. Client certificate needs to be defined as well for this to work\n  -d                  POST data\n  -http2              Use HTTP2 protocol (default: false)\n  -ignore-body        Do not fetch the response content. (default: false)\n  -r                  Follow redirects (default: false)\n  -raw                Do not encode URI (default: false)\n  -recursion          Scan recursively. Only FUZZ keyword is supported, and URL (-u) has to end in it. (default: false)\n  -recursion-depth    Maximum recursion depth. (default: 0)\n  -recursion-strategy Recursion strategy: 'default' for a redirect based, and 'greedy' to recurse on all matches (default: default)\n  -replay-proxy       Replay matched requests using this proxy.\n  -sni                Target TLS SNI, does not support FUZZ keyword\n  -timeout            HTTP request timeout in seconds. (default: 10)\n  -u                  Target URL\n  -x                  Proxy URL (SOCKS5 or HTTP). For example: http://127.0.0.1:8080 or socks5://127.0.0.1:8080\n\nGENERAL OPTIONS:\n  -V                  Show version information. (default: false)\n  -ac                 Automatically calibrate filtering options (default: false)\n  -acc                Custom auto-calibration string. Can be used multiple times. Implies -ac\n  -ach                Per host autocalibration (default: false)\n  -ack                Autocalibration keyword (default: FUZZ)\n  -acs                Custom auto-calibration strategies. Can be used multiple times. Implies -ac\n  -c                  Colorize output. (default: false)\n  -config             Load configuration from a file\n  -json               JSON output, printing newline-delimited JSON records (default: false)\n  -maxtime            Maximum running time in seconds for entire process. (default: 0)\n  -maxtime-job        Maximum running time in seconds per job. (default: 0)\n  -noninteractive     Disable the interactive console functionality (default: false)\n  -p                  Seconds of delay between requests, or a range of random delay. For example '0.1' or '0.1-2.0'\n  -rate               Rate of requests per second (default: 0)\n  -s                  Do not print additional information (silent mode) (default: false)\n  -sa                 Stop on all error cases. Implies -sf and -se. (default: false)\n  -scraperfile        Custom scraper file path\n  -scrapers           Active scraper groups (default: all)\n  -se                 Stop on spurious errors (default: false)\n  -search             Search for a FFUFHASH payload from ffuf history\n  -sf                 Stop when > 95% of responses return 403 Forbidden (default: false)\n  -t                  Number of concurrent threads. (default: 40)\n  -v                  Verbose output, printing full URL and redirect location (if any) with the results. (default: false)\n\nMATCHER OPTIONS:\n  -mc                 Match HTTP status codes, or 'all' for everything. (default: 200-299,301,302,307,401,403,405,500)\n  -ml                 Match amount of lines in response\n  -mmode              Matcher set operator. Either of: and, or (default: or)\n  -mr                 Match regexp\n  -ms                 Match HTTP response size\n  -mt                 Match how many milliseconds to the first response byte, either greater or less than. EG: >100 or <100\n  -mw                 Match amount of words in response\n\nFILTER OPTIONS:\n  -fc                 Filter HTTP status codes from response. Comma separated list of codes and ranges\n  -fl                 Filter by amount of lines in response. Comma separated list of line counts and ranges\n  -fmode              Filter set operator. Either of: and, or (default: or)\n  -fr                 Filter regexp\n  -fs                 Filter HTTP response size. Comma separated list of sizes and ranges\n  -ft                 Filter by number of milliseconds to the first response byte, either greater or less than. EG: >100 or <100\n  -fw                 Filter by amount of words in response. Comma separated list of word counts and ranges\n\nINPUT OPTIONS:\n  -D                  DirSearch wordlist compatibility mode. Used in conjunction with -e flag. (default: false)\n  -e                  Comma separated list of extensions. Extends FUZZ keyword.\n  -enc                Encoders for keywords, eg. 'FUZZ:urlencode b64encode'\n  -ic                 Ignore wordlist comments (default: false)\n  -input-cmd          Command producing the input. --input-num is required when using this input method. Overrides -w.\n  -input-num          Number of inputs to test. Used in conjunction with --input-cmd. (default: 100)\n  -input-shell        Shell to be used for running command\n  -mode               Multi-wordlist operation mode. Available modes: clusterbomb, pitchfork, sniper (default: clusterbomb)\n  -request            File containing the raw http request\n  -request-proto      Protocol to use along with raw request (default: https)\n  -w                  Wordlist file path and (optional) keyword separated by colon. eg. '/path/to/wordlist:KEYWORD'\n\nOUTPUT OPTIONS:\n  -debug-log          Write all of the internal logging to the specified file.\n  -o                  Write output to file\n  -od                 Directory path to store matched results to.\n  -of                 Output file format. Available formats: json, ejson, html, md, csv, ecsv (or, 'all' for all formats) (default: json)\n  -or                 Don't create the output file if we don't have results (default: false)"
            }
        },
        "required": ["url", "ffuf_args"]
    }"#;
}

#[async_trait]
impl ToolHandler for DoFfufHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME,
            description: Self::DESCRIPTION,
            input_schema: Self::SCHEMA,
        }
    }

    async fn execute(&self, args: Option<Value>, ctx: &ToolContext) -> Result<ToolCallResult> {
        let Some(v) = args else {
            return Err(BridgeError::McpMissingParam {
                param: "arguments".to_string(),
            });
        };
        let args: DoFfufArgs =
            serde_json::from_value(v).map_err(|e| BridgeError::McpInvalidRequest(e.to_string()))?;

        // Rejected here, before anything is spawned
        let job = FuzzJob::new(args.url, args.ffuf_args)?;

        info!(tool = Self::NAME, url = %job.url, "Executing tool");

        let use_case = RunFuzzJobUseCase::new(Arc::clone(&ctx.runner), &ctx.config);
        let text = use_case.run(&job).await?;

        Ok(ToolCallResult::text(text))
    }
}
