// SPDX-License-Identifier: MIT

//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};

use tempfile::TempDir;

/// A plugd invocation that runs to completion (`--check` or a failing
/// bootstrap).
pub fn plugd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("plugd").unwrap()
}

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Write `text` as `plugd.conf` inside `dir`.
pub fn write_config(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("plugd.conf");
    std::fs::write(&path, text).expect("failed to write config file");
    path
}

/// Run `plugd --check` against an inline configuration.
pub fn check(config: &str) -> assert_cmd::assert::Assert {
    let dir = temp_dir();
    let path = write_config(&dir, config);
    plugd().arg("--check").arg("-C").arg(&path).assert()
}

/// Run a real bootstrap against an inline configuration, expecting it to
/// fail and exit.
pub fn bootstrap_failure(config: &str) -> assert_cmd::assert::Assert {
    let dir = temp_dir();
    let path = write_config(&dir, config);
    plugd().arg("-f").arg("-C").arg(&path).assert()
}

/// A daemon spawned in the foreground; killed on drop.
pub struct RunningDaemon {
    child: Child,
}

impl RunningDaemon {
    /// Spawn `plugd -f -C config_path` with captured stdio.
    pub fn spawn(config_path: &Path) -> Self {
        let child = std::process::Command::new(assert_cmd::cargo::cargo_bin("plugd"))
            .arg("-f")
            .arg("-C")
            .arg(config_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn plugd");
        Self { child }
    }

    /// Wait for the readiness marker on stdout. Returns false if the
    /// process closed stdout without printing it (i.e. bootstrap failed).
    pub fn wait_for_ready(&mut self) -> bool {
        let stdout = self.child.stdout.take().expect("stdout not captured");
        let mut lines = BufReader::new(stdout).lines();
        for line in lines.by_ref() {
            let Ok(line) = line else { break };
            if line.trim() == "READY" {
                return true;
            }
        }
        false
    }
}

impl Drop for RunningDaemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
