#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn json_output(args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("graphsim")
        .args(["--format", "json"])
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("json output")
}

#[test]
fn sssp_prints_distances_as_json() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write(dir.path(), "chain.txt", "# chain\n0 1\n1 2\n2 3\n");
    let json = json_output(&["sssp", "--edges", edges.to_str().unwrap(), "--source", "0"]);
    assert_eq!(json["report"]["outcome"], "converged");
    assert_eq!(json["values"], serde_json::json!([1, 2, 3, 4]));
}

#[test]
fn components_writes_csv() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write(dir.path(), "triangles.txt", "0 1\n1 2\n2 0\n3 4\n4 5\n5 3\n");
    let out = dir.path().join("components.csv");
    cargo_bin_cmd!("graphsim")
        .arg("components")
        .arg("--edges")
        .arg(&edges)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    let text = fs::read_to_string(&out).expect("read csv");
    assert_eq!(
        text,
        "vertex,component\n0,0\n1,0\n2,0\n3,3\n4,3\n5,3\n"
    );
}

#[test]
fn coloring_text_output_lists_every_vertex() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write(dir.path(), "cycle.txt", "0 1\n1 2\n2 3\n3 0\n");
    let output = cargo_bin_cmd!("graphsim")
        .args(["coloring", "--edges"])
        .arg(&edges)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf8");
    assert!(text.starts_with("outcome=Converged"));
    assert!(text.contains("vertex color"));
    assert_eq!(text.lines().count(), 2 + 4);
}

#[test]
fn simulate_with_label_file_and_verification() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write(dir.path(), "edge.txt", "0 1\n1 2\n");
    let pattern = write(dir.path(), "pattern.txt", "v 0 1\nv 1 2\ne 0 1\n");
    let labels = write(dir.path(), "labels.txt", "0 1\n1 2\n2 2\n");
    let matches = dir.path().join("matches.csv");
    let json = json_output(&[
        "simulate",
        "--edges",
        edges.to_str().unwrap(),
        "--pattern",
        pattern.to_str().unwrap(),
        "--labels",
        labels.to_str().unwrap(),
        "--verify",
        "full",
        "--recheck",
        "--out",
        matches.to_str().unwrap(),
    ]);
    assert_eq!(json["report"]["outcome"], "converged");
    assert_eq!(json["verify"]["success"], true);
    assert_eq!(json["recheck_prunes"], 0);
    assert_eq!(json["matches"]["0"], serde_json::json!([0]));
    assert_eq!(json["matches"]["1"], serde_json::json!([1]));
    assert_eq!(json["matches"]["2"], serde_json::json!([1]));
    assert_eq!(json["stats"]["candidates"]["candidate_pairs"], 3);
    let csv = fs::read_to_string(&matches).expect("matches csv");
    assert_eq!(csv, "vertex,pattern\n0,0\n1,1\n2,1\n");
}

#[test]
fn config_file_sets_iteration_ceiling() {
    let dir = TempDir::new().expect("tempdir");
    let mut pairs = String::new();
    for v in 1..40 {
        pairs.push_str(&format!("{} {}\n", v + 1, v));
    }
    pairs.push_str("0 40\n");
    let edges = write(dir.path(), "path.txt", &pairs);
    let config = write(dir.path(), "run.toml", "[engine]\nmax_iterations = 3\n");
    let json = json_output(&[
        "components",
        "--edges",
        edges.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(json["report"]["outcome"], "iteration_limit");
    assert_eq!(json["report"]["iterations"], 3);

    // the flag wins over the file
    let json = json_output(&[
        "components",
        "--edges",
        edges.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--max-iterations",
        "200",
    ]);
    assert_eq!(json["report"]["outcome"], "converged");
}

#[test]
fn malformed_edge_list_fails_with_line_number() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write(dir.path(), "bad.txt", "0 1\nzero 2\n");
    let output = cargo_bin_cmd!("graphsim")
        .args(["sssp", "--edges"])
        .arg(&edges)
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains(":2:"), "{stderr}");
}

#[test]
fn stray_huge_vertex_id_fails_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write(dir.path(), "stray.txt", "0 1\n0 4000000000\n");
    let output = cargo_bin_cmd!("graphsim")
        .args(["components", "--edges"])
        .arg(&edges)
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8");
    assert!(stderr.contains("invalid graph"), "{stderr}");
}

#[test]
fn sssp_source_outside_graph_fails() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write(dir.path(), "edge.txt", "0 1\n");
    cargo_bin_cmd!("graphsim")
        .args(["sssp", "--source", "9", "--edges"])
        .arg(&edges)
        .assert()
        .failure();
}
