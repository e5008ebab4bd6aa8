//! Integration Test: Async-Only I/O
//!
//! **Policy**: The view-model, the service client, and the TUI event loop all
//! run on a single `current_thread` runtime. Anything that blocks that thread
//! freezes both the UI and every in-flight request.
//!
//! Startup code in `main.rs` and config loading run before the runtime
//! exists and are not checked.

use architectural_enforcement::{assert_no_violations, find_violations};

const RUNTIME_CODE: &[&str] = &[
    "client/core/src/service",
    "client/core/src/view_model.rs",
    "client/core/src/updates.rs",
    "client/core/src/state.rs",
    "tui/src/app.rs",
    "tui/src/widgets",
    "tui/src/display.rs",
];

#[test]
fn test_no_blocking_http() {
    let violations = find_violations(RUNTIME_CODE, &["reqwest::blocking"]);
    assert_no_violations("Blocking HTTP client on the runtime thread", &violations);
}

#[test]
fn test_no_thread_sleep() {
    let violations = find_violations(RUNTIME_CODE, &["std::thread::sleep", "thread::sleep("]);
    assert_no_violations("std::thread::sleep on the runtime thread", &violations);
}

#[test]
fn test_no_blocking_fs_or_net() {
    let violations = find_violations(RUNTIME_CODE, &["std::fs", "std::net"]);
    assert_no_violations("Blocking std::fs / std::net on the runtime thread", &violations);
}

#[test]
fn test_no_nested_runtimes() {
    let violations = find_violations(
        &["client/core/src", "tui/src/app.rs"],
        &["block_on(", "Runtime::new", "runtime::Builder"],
    );
    assert_no_violations("Nested runtime / block_on outside main", &violations);
}
