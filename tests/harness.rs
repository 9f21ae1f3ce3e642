//! Test harness for twig integration tests

// Each test target uses a different subset of these helpers.
#![allow(dead_code, unused_imports)]

use std::path::Path;
use std::process::Command;

pub use twig::test_utils::{TestDir, running_as_root};

/// Run the binary in `dir` with colors off. Returns (stdout, stderr, success).
pub fn run_twig(dir: &Path, args: &[&str]) -> (String, String, bool) {
    run_twig_with_color(dir, "never", args)
}

/// Run the binary in `dir` with `--color=<when>`.
pub fn run_twig_with_color(dir: &Path, when: &str, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_twig");
    let output = Command::new(binary)
        .arg(format!("--color={}", when))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run twig");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let dir = TestDir::new();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let dir = TestDir::new();
        let file_path = dir.add_file("nested/test.txt", "hello");
        assert!(file_path.exists());
    }
}
