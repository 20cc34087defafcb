//! Hygiene: source-level checks for the canvas crate.
//!
//! Each test scans production files under `src/` (sibling `*_test.rs` files
//! are skipped) for a pattern with a fixed budget. Budgets only go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    note: &'static str,
}

// Panics abort the host's event loop.
const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, note: "propagate or handle the error" };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, note: "propagate or handle the error" };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, note: "return an error instead" };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, note: "make the state unrepresentable" };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, note: "no stubs in shipped code" };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, note: "no stubs in shipped code" };

// Silent loss.
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, note: "inspect or log the value" };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 0, note: "match on the error and log it" };

// Output goes through `tracing`, never straight to the terminal.
const PRINTLN: Budget = Budget { pattern: "println!(", max: 0, note: "use tracing" };
const DBG: Budget = Budget { pattern: "dbg!(", max: 0, note: "remove debugging output" };

const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, note: "delete unused code" };

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn check(budget: &Budget) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the canvas crate root");

    let hits: Vec<(String, usize)> = files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(budget.pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let count: usize = hits.iter().map(|(_, n)| n).sum();
    let listing = hits
        .iter()
        .map(|(path, n)| format!("  {path}: {n}"))
        .collect::<Vec<_>>()
        .join("\n");

    assert!(
        count <= budget.max,
        "`{}` budget exceeded: found {count}, max {} ({}).\n{listing}",
        budget.pattern,
        budget.max,
        budget.note
    );
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn println_budget() {
    check(&PRINTLN);
}

#[test]
fn dbg_budget() {
    check(&DBG);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}
