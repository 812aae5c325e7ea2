//! Integration tests for the Waypoint CLI
//!
//! Tests end-to-end command behavior using the CLI binary.
//! Uses tempfile for isolated test directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Get the path to the waypoint binary (built by cargo)
fn waypoint_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_waypoint"))
}

/// Run waypoint with the given args in the specified directory
fn run_waypoint(dir: &Path, args: &[&str]) -> Output {
    waypoint_binary()
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute waypoint command")
}

/// Get stdout as string
fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as string
fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Undirected triangle where A -> C is cheaper through B, plus an island.
fn setup_triangle(dir: &Path) {
    write_file(
        dir,
        "triangle.toml",
        r#"
name = "Triangle"
nodes = ["Island"]

[[edges]]
from = "A"
to = "B"
weight = 10

[[edges]]
from = "B"
to = "C"
weight = 6

[[edges]]
from = "A"
to = "C"
weight = 20
"#,
    );
}

/// Path to a sample graph shipped in the repository's data directory.
fn sample(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("data")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn parse_json(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout(output)).expect("stdout should be valid JSON")
}

// ============================================================================
// Route
// ============================================================================

#[test]
fn test_route_prefers_cheaper_detour() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(
        temp.path(),
        &["route", "triangle.toml", "A", "C", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = parse_json(&output);
    assert_eq!(json["cost"], 16.0);
    assert_eq!(json["path"], serde_json::json!(["A", "B", "C"]));
    assert_eq!(json["hops"], 2);
    assert_eq!(json["weights"]["mode"], "static");
}

#[test]
fn test_route_unreachable_is_success() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(
        temp.path(),
        &["route", "triangle.toml", "A", "Island", "--format", "json"],
    );
    assert!(output.status.success());

    let json = parse_json(&output);
    assert!(json["cost"].is_null());
    assert_eq!(json["path"], serde_json::json!([]));
}

#[test]
fn test_route_unknown_node_fails() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(temp.path(), &["route", "triangle.toml", "A", "Nowhere"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Nowhere"));
}

#[test]
fn test_seeded_traffic_route_is_reproducible() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());
    let args = [
        "route",
        "triangle.toml",
        "A",
        "C",
        "--traffic",
        "--seed",
        "42",
        "--format",
        "json",
    ];

    let first = run_waypoint(temp.path(), &args);
    let second = run_waypoint(temp.path(), &args);
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert_eq!(stdout(&first), stdout(&second));

    let json = parse_json(&first);
    assert_eq!(json["weights"]["mode"], "traffic");
    assert_eq!(json["weights"]["seed"], 42);
    let cost = json["cost"].as_f64().unwrap();
    assert!((16.0..=60.0).contains(&cost));
}

#[test]
fn test_invalid_factor_range_fails() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(
        temp.path(),
        &[
            "route",
            "triangle.toml",
            "A",
            "C",
            "--traffic",
            "--min-factor",
            "3",
            "--max-factor",
            "1",
        ],
    );
    assert!(!output.status.success());
}

// ============================================================================
// Routes / Matrix / Inspect
// ============================================================================

#[test]
fn test_routes_from_delivery_sample() {
    let temp = TempDir::new().unwrap();
    let graph = sample("delivery.toml");

    let output = run_waypoint(
        temp.path(),
        &["routes", &graph, "--from", "Centro", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = parse_json(&output);
    let routes = json["routes"].as_array().unwrap();
    assert_eq!(routes.len(), 8);

    let find = |name: &str| {
        routes
            .iter()
            .find(|r| r["destination"] == name)
            .unwrap_or_else(|| panic!("missing route to {}", name))
    };
    assert_eq!(find("Etzatlan")["cost"], 30.0);
    assert_eq!(
        find("Etzatlan")["path"],
        serde_json::json!(["Centro", "Zapopan", "Etzatlan"])
    );
    assert_eq!(find("Ajijic")["cost"], 60.0);
    assert_eq!(find("Ajijic")["via"], "Chapala");
}

#[test]
fn test_routes_csv_output() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(
        temp.path(),
        &["routes", "triangle.toml", "--from", "A", "--format", "csv"],
    );
    assert!(output.status.success());

    let out = stdout(&output);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "source,destination,cost,path");
    assert!(lines.contains(&"A,C,16,A B C"));
    assert!(lines.contains(&"A,Island,,"));
}

#[test]
fn test_matrix_selected_sources() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(
        temp.path(),
        &["matrix", "triangle.toml", "--from", "A,C", "--format", "json"],
    );
    assert!(output.status.success());

    let json = parse_json(&output);
    assert_eq!(json["sources"], serde_json::json!(["A", "C"]));
    assert_eq!(json["nodes"], serde_json::json!(["Island", "A", "B", "C"]));
    assert_eq!(
        json["rows"],
        serde_json::json!([[null, 0.0, 10.0, 16.0], [null, 16.0, 6.0, 0.0]])
    );
}

#[test]
fn test_inspect_reports_isolated_nodes() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(temp.path(), &["inspect", "triangle.toml", "--format", "json"]);
    assert!(output.status.success());

    let json = parse_json(&output);
    assert_eq!(json["graph"], "Triangle");
    assert_eq!(json["nodes"], 4);
    assert_eq!(json["edges"], 6);
    assert_eq!(json["total_weight"], 36.0);
    assert_eq!(json["isolated"], serde_json::json!(["Island"]));
}

// ============================================================================
// Spanning tree
// ============================================================================

#[test]
fn test_tree_on_task_sample() {
    let temp = TempDir::new().unwrap();
    let graph = sample("tasks.toml");

    let output = run_waypoint(
        temp.path(),
        &["tree", &graph, "--start", "Design", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = parse_json(&output);
    assert_eq!(json["total_weight"], 28.0);
    assert_eq!(json["edges"].as_array().unwrap().len(), 14);
    assert_eq!(json["edges"][0]["parent"], "Design");
}

#[test]
fn test_tree_dot_output() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(temp.path(), &["tree", "triangle.toml", "--start", "A", "--dot"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("graph \"Triangle\" {"));
    assert!(out.contains("\"A\" -- \"B\" [label=\"10\"];"));
    assert!(out.contains("\"B\" -- \"C\" [label=\"6\"];"));
}

#[test]
fn test_tree_unknown_start_fails() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(temp.path(), &["tree", "triangle.toml", "--start", "Z"]);
    assert!(!output.status.success());
}

// ============================================================================
// Config and errors
// ============================================================================

#[test]
fn test_config_sets_default_format() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());
    write_file(temp.path(), ".waypointrc.toml", "[output]\nformat = \"csv\"\n");

    let output = run_waypoint(temp.path(), &["tree", "triangle.toml", "--start", "A"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("step,parent,child,weight"));
}

#[test]
fn test_compact_flag_prints_single_line_json() {
    let temp = TempDir::new().unwrap();
    setup_triangle(temp.path());

    let output = run_waypoint(
        temp.path(),
        &["inspect", "triangle.toml", "--format", "json", "--compact"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end().lines().count(), 1);
    assert_eq!(parse_json(&output)["total_weight"], 36.0);
}

#[test]
fn test_negative_weight_rejected() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "bad.toml",
        "[[edges]]\nfrom = \"A\"\nto = \"B\"\nweight = -1\n",
    );

    let output = run_waypoint(temp.path(), &["inspect", "bad.toml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid weight"));
}

#[test]
fn test_missing_graph_file_fails() {
    let temp = TempDir::new().unwrap();

    let output = run_waypoint(temp.path(), &["inspect", "missing.toml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing.toml"));
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();

    let output = run_waypoint(temp.path(), &["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("waypoint"));
}
