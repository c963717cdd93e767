//! Hygiene: enforces coding standards at test time.
//!
//! Scans the production sources of every workspace crate for antipatterns.
//! Each pattern has a budget per crate (ideally zero). If you must add one,
//! fix an existing one first; the budget never grows.
//!
//! The client crate talks to JS APIs whose errors are often only worth a
//! `.ok()`, so silent-discard budgets apply to `canvas` and `protocol` only.

use std::fs;
use std::path::{Path, PathBuf};

struct Rule {
    pattern: &'static str,
    /// Per-crate budget, or `None` where the rule does not apply.
    budgets: [(&'static str, Option<usize>); 3],
}

const RULES: &[Rule] = &[
    // Panics: these crash the page.
    Rule { pattern: ".unwrap()", budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", Some(0))] },
    Rule { pattern: ".expect(", budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", Some(0))] },
    Rule { pattern: "panic!(", budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", Some(0))] },
    Rule { pattern: "unreachable!(", budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", Some(0))] },
    Rule { pattern: "todo!(", budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", Some(0))] },
    Rule { pattern: "unimplemented!(", budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", Some(0))] },
    // Silent loss: discards errors without inspecting.
    Rule { pattern: "let _ =", budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", None)] },
    Rule { pattern: ".ok()", budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", None)] },
    // Style / structure.
    Rule {
        pattern: "#[allow(dead_code)]",
        budgets: [("canvas", Some(0)), ("protocol", Some(0)), ("src", Some(0))],
    },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_root(name: &str) -> PathBuf {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    if name == "src" { root.join("src") } else { root.join(name).join("src") }
}

/// Production `.rs` files under `dir`, excluding `*_test.rs`.
fn source_files(dir: &Path) -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(dir, &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn every_crate_has_sources() {
    for name in ["canvas", "protocol", "src"] {
        assert!(!source_files(&source_root(name)).is_empty(), "no sources found for {name}");
    }
}

#[test]
fn pattern_budgets() {
    let mut failures = Vec::new();
    for rule in RULES {
        for (name, budget) in rule.budgets {
            let Some(max) = budget else {
                continue;
            };
            let files = source_files(&source_root(name));
            let hits = count_in_source(&files, rule.pattern);
            let count: usize = hits.iter().map(|(_, c)| c).sum();
            if count > max {
                failures.push(format!(
                    "{} budget exceeded in {name}: found {count}, max {max}.\n{}",
                    rule.pattern,
                    format_hits(&hits)
                ));
            }
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
