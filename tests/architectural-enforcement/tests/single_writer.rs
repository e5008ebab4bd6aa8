//! Integration Test: Single Writer and Thin Client
//!
//! **Policy**: `SessionState` is mutated only by the view-model. Spawned
//! service tasks report through the update channel and never hold the state.
//! The TUI renders and forwards keys; it has no HTTP client of its own.

use std::fs;

use architectural_enforcement::{
    assert_no_violations, production_lines, rust_files, workspace_root, SourceLine,
};

const STATE_MUTATORS: &[&str] = &[
    ".replace_conversations(",
    ".start_new_chat(",
    ".begin_selecting(",
    ".finish_loading(",
    ".fail_loading(",
    ".push_message(",
    ".set_input(",
    ".take_trimmed_input(",
    ".adopt_created(",
    ".remove_conversation(",
];

const STATE_WRITERS: &[&str] = &["state.rs", "view_model.rs"];

#[test]
fn test_only_view_model_mutates_state() {
    let violations: Vec<SourceLine> = ["client/core/src", "tui/src"]
        .iter()
        .flat_map(|dir| rust_files(dir))
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            !(path.starts_with(workspace_root().join("client/core/src"))
                && STATE_WRITERS.contains(&name))
        })
        .flat_map(|path| production_lines(&path))
        .filter(|line| STATE_MUTATORS.iter().any(|m| line.code.contains(m)))
        .collect();

    assert_no_violations("SessionState mutated outside the view-model", &violations);
}

#[test]
fn test_spawned_tasks_do_not_capture_state() {
    let path = workspace_root().join("client/core/src/view_model.rs");
    let lines = production_lines(&path);

    // Inside an `async move` block nothing may reach for `self.state`
    let mut violations = Vec::new();
    let mut depth: Option<i32> = None;
    for line in lines {
        if depth.is_none() && line.code.contains("async move") {
            depth = Some(0);
        }
        if let Some(d) = depth.as_mut() {
            if line.code.contains("self.state") || line.code.contains("self.vm") {
                violations.push(line);
                continue;
            }
            *d += line.code.matches('{').count() as i32;
            *d -= line.code.matches('}').count() as i32;
            if *d <= 0 {
                depth = None;
            }
        }
    }

    assert_no_violations("Spawned task touches session state", &violations);
}

#[test]
fn test_tui_has_no_http_client() {
    let manifest = fs::read_to_string(workspace_root().join("tui/Cargo.toml"))
        .expect("tui/Cargo.toml should exist");
    assert!(
        !manifest.lines().any(|l| l.trim_start().starts_with("reqwest")),
        "The TUI must reach the service through chatdeck-core, not its own HTTP client"
    );
}
