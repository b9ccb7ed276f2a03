use std::fs;
use std::path::PathBuf;

use camber::styles::registry::{LoadError, StyleRegistry};

const SRC: &str = "\
% test palette
\\tikzstyle{white dot}=[fill=white, draw=black, shape=circle]
\\tikzstyle{red dot}=[fill=red, draw=black, shape=circle]
\\tikzstyle{simple}=[-, draw=black]
\\tikzstyle{arrow}=[->, draw=black]
";

fn temp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("camber-registry-{}-{}", std::process::id(), name));
    p
}

#[test]
fn load_from_file() {
    let path = temp_path("good.tikzstyles");
    fs::write(&path, SRC).unwrap();
    let reg = StyleRegistry::load(&path).unwrap();
    fs::remove_file(&path).ok();

    let nodes: Vec<&str> = reg.node_styles().iter().map(|s| s.name()).collect();
    assert_eq!(nodes, vec!["white dot", "red dot"]);
    let edges: Vec<&str> = reg.edge_styles().iter().map(|s| s.name()).collect();
    assert_eq!(edges, vec!["simple", "arrow"]);
}

#[test]
fn missing_file_reports_path() {
    let path = temp_path("does-not-exist.tikzstyles");
    let err = StyleRegistry::load(&path).unwrap_err();
    match err {
        LoadError::Read { path: p, .. } => assert!(p.contains("does-not-exist")),
        other => panic!("expected read error, got {:?}", other),
    }
    // The message is human-readable and names the file.
    let msg = StyleRegistry::load(&path).unwrap_err().to_string();
    assert!(msg.contains("does-not-exist"));
}

#[test]
fn failed_reload_keeps_previous_registry() {
    let good = temp_path("keep-good.tikzstyles");
    fs::write(&good, SRC).unwrap();
    let mut current = StyleRegistry::load(&good).unwrap();
    fs::remove_file(&good).ok();

    let bad = temp_path("keep-bad.tikzstyles");
    fs::write(&bad, "\\tikzstyle{broken\n").unwrap();

    // The caller's swap-on-success discipline: a failed load never touches
    // the registry already in hand.
    match StyleRegistry::load(&bad) {
        Ok(next) => current = next,
        Err(_) => {}
    }
    fs::remove_file(&bad).ok();

    assert_eq!(current.node_styles().len(), 2);
    assert!(current.node_style("white dot").is_some());
}

#[test]
fn lookups_never_panic() {
    let reg = StyleRegistry::parse(SRC, "test").unwrap();
    assert!(reg.node_style("none").is_none());
    assert!(reg.edge_style("none").is_none());
    assert!(reg.node_style("nonexistent").is_none());
    assert!(reg.edge_style("nonexistent").is_none());
    assert!(reg.node_style("").is_none());
}

#[test]
fn malformed_sources_fail_with_line_numbers() {
    let cases = [
        ("\\tikzstyle{a}=[fill=red]\nnot a style line\n", 2),
        ("\\tikzstyle{}=[fill=red]\n", 1),
        ("\\tikzstyle{a}=fill=red\n", 1),
        ("\\tikzstyle{a}=[fill={red]\n", 1),
    ];
    for (src, want_line) in cases {
        match StyleRegistry::parse(src, "t").unwrap_err() {
            LoadError::Parse { line, .. } => assert_eq!(line, want_line, "src: {:?}", src),
            other => panic!("expected parse error for {:?}, got {:?}", src, other),
        }
    }
}

#[test]
fn braced_values_parse() {
    let src = "\\tikzstyle{a}=[label={a, b}, fill=red]\n";
    let reg = StyleRegistry::parse(src, "t").unwrap();
    let s = reg.node_style("a").unwrap();
    assert_eq!(s.data().property("label"), Some("a, b"));
    assert_eq!(s.data().property("fill"), Some("red"));
}
