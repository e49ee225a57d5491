use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn movies_fixture() -> PathBuf {
    let fixture = repo_root().join("fixtures").join("movies.json");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());
    fixture
}

#[test]
fn cli_summary_reports_title_and_categories() {
    let exe = assert_cmd::cargo_bin!("marquee-cli");
    let output = Command::new(exe)
        .args(["summary", movies_fixture().to_string_lossy().as_ref()])
        .output()
        .expect("run summary");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains(r#""title":"Movies""#), "{stdout}");
    assert!(stdout.contains(r#""item_count":6"#), "{stdout}");
    assert!(
        stdout.contains(r#""categories":["Action","Drama","Animation"]"#),
        "{stdout}"
    );
    assert!(
        stdout.contains("Top 6 grossing movies at the US box office by genre"),
        "{stdout}"
    );
}

#[test]
fn cli_renders_svg_to_stdout() {
    let exe = assert_cmd::cargo_bin!("marquee-cli");
    let output = Command::new(exe)
        .args(["render", movies_fixture().to_string_lossy().as_ref()])
        .output()
        .expect("run render");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.starts_with("<svg"), "not an SVG document");
    assert!(stdout.contains(r#"data-name="Avatar""#));
    assert!(stdout.contains("<script"));
}

#[test]
fn cli_static_render_has_no_script() {
    let exe = assert_cmd::cargo_bin!("marquee-cli");
    let output = Command::new(exe)
        .args([
            "render",
            "--static",
            movies_fixture().to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run render --static");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.starts_with("<svg"));
    assert!(!stdout.contains("<script"));
}

#[test]
fn cli_reads_the_dataset_from_stdin() {
    let json = fs::read_to_string(movies_fixture()).expect("read fixture");
    let assert = assert_cmd::Command::new(assert_cmd::cargo_bin!("marquee-cli"))
        .args(["layout", "-"])
        .write_stdin(json)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    assert!(stdout.contains(r#""title":"Movies""#), "{stdout}");
}

#[test]
fn cli_rejects_malformed_dataset_json() {
    assert_cmd::Command::new(assert_cmd::cargo_bin!("marquee-cli"))
        .args(["summary", "-"])
        .write_stdin("{not json")
        .assert()
        .failure();
}

#[test]
fn cli_rejects_unknown_flags_with_usage() {
    let exe = assert_cmd::cargo_bin!("marquee-cli");
    let output = Command::new(exe)
        .args(["--frobnicate"])
        .output()
        .expect("run with unknown flag");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_renders_png_smoke() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.png");

    let exe = assert_cmd::cargo_bin!("marquee-cli");
    Command::new(exe)
        .args([
            "render",
            "--format",
            "png",
            "--out",
            out.to_string_lossy().as_ref(),
            movies_fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn cli_renders_png_with_default_out_path_for_file_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tmp_fixture = tmp.path().join("movies.json");
    fs::copy(movies_fixture(), &tmp_fixture).expect("copy fixture");

    let expected_out = tmp_fixture.with_extension("png");

    let exe = assert_cmd::cargo_bin!("marquee-cli");
    Command::new(exe)
        .args([
            "render",
            "--format",
            "png",
            tmp_fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&expected_out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}
