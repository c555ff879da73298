//! Domain module - Core business logic
//!
//! This module contains the use cases that represent the core
//! business logic of the ffuf MCP server.

pub mod use_cases;

pub use use_cases::ffuf::{
    COMPLETION_MARKER, FfufCommandBuilder, FuzzJob, RunFuzzJobUseCase, TARGET_URL_FLAG,
    validate_target_url,
};
