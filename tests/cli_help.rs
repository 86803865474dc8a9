//! E2E tests for the CLI surface itself.

mod common;

use common::TestEnv;

#[test]
fn help_lists_all_options() {
    let env = TestEnv::new();

    let result = env.run(&["--help"]);

    assert!(result.success, "--help should succeed");
    for option in ["--project", "--watch", "--debounce", "--verbose", "--silent"] {
        assert!(
            result.stdout.contains(option),
            "help should mention {option}:\n{}",
            result.stdout
        );
    }
}

#[test]
fn version_flag_prints_version() {
    let env = TestEnv::new();

    let result = env.run(&["--version"]);

    assert!(result.success);
    assert!(
        result.stdout.contains(env!("CARGO_PKG_VERSION")),
        "expected the crate version:\n{}",
        result.stdout
    );
}

#[test]
fn help_does_not_require_a_config_file() {
    let env = TestEnv::new(); // no tsconfig.json at all

    let result = env.run(&["-h"]);

    assert!(result.success);
}
