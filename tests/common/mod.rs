//! Common test utilities for distsweep CLI tests.
//!
//! Provides `TestEnv`, an isolated project in a temp directory with helpers
//! to lay out source/output trees and run the distsweep binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use tempfile::TempDir;

/// Result of running the distsweep CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test project with its own temp directory.
pub struct TestEnv {
    pub project_root: TempDir,
}

impl TestEnv {
    /// Create an empty project.
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project temp dir"),
        }
    }

    /// Create a project with a `tsconfig.json` mapping `src` to `dist`,
    /// both directories created.
    pub fn with_default_config() -> Self {
        let env = Self::new();
        env.write_file(
            "tsconfig.json",
            r#"{
  // distsweep test project
  "compilerOptions": {
    "rootDir": "src",
    "outDir": "dist",
  },
}
"#,
        );
        std::fs::create_dir_all(env.path("src")).unwrap();
        std::fs::create_dir_all(env.path("dist")).unwrap();
        env
    }

    /// Get a path relative to the project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file under the project root, creating parent directories
    pub fn write_file(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Remove a file under the project root
    pub fn remove_file(&self, relative: &str) {
        std::fs::remove_file(self.path(relative)).expect("Failed to remove file");
    }

    /// Run distsweep from the project root and wait for it
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute distsweep");
        output_to_result(output)
    }

    /// Spawn distsweep from the project root without waiting (watch mode)
    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start distsweep")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_distsweep"));
        cmd.current_dir(self.project_root.path()).args(args);
        cmd
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Kill a spawned watcher and collect its captured output.
pub fn stop_and_collect(mut child: Child) -> TestResult {
    let _ = child.kill();
    let output = child.wait_with_output().expect("Failed to get output");
    output_to_result(output)
}

/// Sleep helper for watch tests.
pub fn wait_millis(millis: u64) {
    std::thread::sleep(std::time::Duration::from_millis(millis));
}
