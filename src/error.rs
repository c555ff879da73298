use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid { field: String, reason: String },

    // Input validation errors
    #[error("Invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // Process errors
    #[error("Failed to start ffuf: {reason}")]
    LaunchFailed { binary: String, reason: String },

    #[error("ffuf exited with code {code}{}", trailing_output(.output.as_deref()))]
    ProcessExit { code: i32, output: Option<String> },

    #[error(
        "ffuf terminated by signal {}{}",
        signal_name(.signal.as_ref()),
        trailing_output(.output.as_deref())
    )]
    ProcessSignaled {
        signal: Option<i32>,
        output: Option<String>,
    },

    // MCP protocol errors
    #[error("MCP invalid request: {0}")]
    McpInvalidRequest(String),

    #[error("MCP missing parameter: {param}")]
    McpMissingParam { param: String },

    #[error("MCP unknown tool: {tool}")]
    McpUnknownTool { tool: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // YAML errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

impl BridgeError {
    /// Whether this error means the caller sent bad tool parameters.
    ///
    /// These are reported as JSON-RPC `invalid params` errors instead of
    /// a failed tool result, and are always raised before anything is spawned.
    #[must_use]
    pub const fn is_invalid_params(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. }
                | Self::McpInvalidRequest(_)
                | Self::McpMissingParam { .. }
                | Self::McpUnknownTool { .. }
        )
    }
}

fn signal_name(signal: Option<&i32>) -> String {
    signal.map_or_else(|| "unknown".to_string(), ToString::to_string)
}

fn trailing_output(output: Option<&str>) -> String {
    match output {
        Some(out) if !out.is_empty() => format!("\n{out}"),
        _ => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ============== Configuration Errors ==============

    #[test]
    fn test_config_not_found_display() {
        let err = BridgeError::ConfigNotFound {
            path: "/path/to/config.yaml".to_string(),
        };
        assert!(format!("{err}").contains("/path/to/config.yaml"));
    }

    #[test]
    fn test_config_invalid_display() {
        let err = BridgeError::ConfigInvalid {
            field: "ffuf.working_dir".to_string(),
            reason: "not a directory".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("ffuf.working_dir"));
        assert!(msg.contains("not a directory"));
    }

    // ============== Process Errors ==============

    #[test]
    fn test_launch_failed_display() {
        let err = BridgeError::LaunchFailed {
            binary: "/opt/ffuf".to_string(),
            reason: "No such file or directory (os error 2)".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Failed to start ffuf: No such file or directory (os error 2)"
        );
    }

    #[test]
    fn test_process_exit_display() {
        let err = BridgeError::ProcessExit {
            code: 2,
            output: None,
        };
        assert_eq!(format!("{err}"), "ffuf exited with code 2");
    }

    #[test]
    fn test_process_exit_display_with_output() {
        let err = BridgeError::ProcessExit {
            code: 1,
            output: Some("Encountered error(s): wordlist missing".to_string()),
        };
        assert_eq!(
            format!("{err}"),
            "ffuf exited with code 1\nEncountered error(s): wordlist missing"
        );
    }

    #[test]
    fn test_process_exit_display_empty_output_omitted() {
        let err = BridgeError::ProcessExit {
            code: 3,
            output: Some(String::new()),
        };
        assert_eq!(format!("{err}"), "ffuf exited with code 3");
    }

    #[test]
    fn test_process_signaled_display() {
        let err = BridgeError::ProcessSignaled {
            signal: Some(9),
            output: None,
        };
        assert_eq!(format!("{err}"), "ffuf terminated by signal 9");

        let err = BridgeError::ProcessSignaled {
            signal: None,
            output: None,
        };
        assert!(format!("{err}").contains("unknown"));
    }

    #[test]
    fn test_invalid_url_display() {
        let err = BridgeError::InvalidUrl {
            url: "not-a-url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("not-a-url"));
        assert!(msg.contains("relative URL without a base"));
    }

    // ============== MCP Errors ==============

    #[test]
    fn test_mcp_missing_param_display() {
        let err = BridgeError::McpMissingParam {
            param: "url".to_string(),
        };
        assert!(format!("{err}").contains("url"));
    }

    #[test]
    fn test_mcp_unknown_tool_display() {
        let err = BridgeError::McpUnknownTool {
            tool: "nonexistent_tool".to_string(),
        };
        assert!(format!("{err}").contains("nonexistent_tool"));
    }

    // ============== Classification ==============

    #[test]
    fn test_validation_errors_are_invalid_params() {
        assert!(
            BridgeError::InvalidUrl {
                url: "x".to_string(),
                reason: "y".to_string(),
            }
            .is_invalid_params()
        );
        assert!(BridgeError::McpInvalidRequest("bad".to_string()).is_invalid_params());
        assert!(
            BridgeError::McpMissingParam {
                param: "arguments".to_string(),
            }
            .is_invalid_params()
        );
        assert!(
            BridgeError::McpUnknownTool {
                tool: "nope".to_string(),
            }
            .is_invalid_params()
        );
    }

    #[test]
    fn test_execution_errors_are_not_invalid_params() {
        assert!(
            !BridgeError::LaunchFailed {
                binary: "ffuf".to_string(),
                reason: "denied".to_string(),
            }
            .is_invalid_params()
        );
        assert!(
            !BridgeError::ProcessExit {
                code: 1,
                output: None,
            }
            .is_invalid_params()
        );
        assert!(
            !BridgeError::ProcessSignaled {
                signal: Some(15),
                output: None,
            }
            .is_invalid_params()
        );
    }

    // ============== From Implementations ==============

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let bridge_err: BridgeError = io_err.into();
        assert!(format!("{bridge_err}").contains("file not found"));
    }

    // ============== Debug Trait ==============

    #[test]
    fn test_error_debug() {
        let err = BridgeError::ConfigNotFound {
            path: "test".to_string(),
        };
        let debug = format!("{err:?}");
        assert!(debug.contains("Config"));
        assert!(debug.contains("test"));
    }

    #[test]
    fn test_result_type_alias() {
        let ok_result: Result<i32> = Ok(42);
        let err_result: Result<i32> = Err(BridgeError::ConfigNotFound {
            path: "test".to_string(),
        });

        assert!(ok_result.is_ok());
        assert!(err_result.is_err());
    }
}
