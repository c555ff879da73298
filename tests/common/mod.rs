//! Shared helpers for integration tests
//!
//! Stub "ffuf" binaries are small `/bin/sh` scripts written into a
//! temporary directory, so every test sees a real spawned process.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

/// An executable stub and the directory that keeps it alive
pub struct StubBinary {
    _dir: TempDir,
    pub path: PathBuf,
}

/// Write `body` as an executable `/bin/sh` script named `ffuf`
pub fn stub_ffuf(body: &str) -> StubBinary {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ffuf");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    StubBinary { _dir: dir, path }
}

/// Stub that prints each argument on its own line as `[arg]`
pub fn argv_echo_stub() -> StubBinary {
    stub_ffuf(r#"for a in "$@"; do printf '[%s]\n' "$a"; done"#)
}
