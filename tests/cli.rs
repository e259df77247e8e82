//! Runs the `svgpdtools` binary against temporary files.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <path fill="none" d="m 0,0 h 10.123456789 v 10 z"/>
</svg>
"#;

fn svgpdtools() -> Command {
    Command::new(env!("CARGO_BIN_EXE_svgpdtools"))
}

fn write_input(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("input.svg");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_normalize_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SVG);

    let output = svgpdtools()
        .arg("-f")
        .arg(&input)
        .args(["-p", "2", "normalize", "--collapse-hv-lineto"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains(r#"<path fill="none" d="M 0,0 L 10.12,0 10.12,10 Z"/>"#),
        "{stdout}"
    );
}

#[test]
fn test_normalize_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SVG);
    let out_path = dir.path().join("out.svg");

    let status = svgpdtools()
        .arg("normalize")
        .arg("--repr-relative")
        .arg("--file")
        .arg(&input)
        .arg("--output")
        .arg(&out_path)
        .status()
        .unwrap();
    assert!(status.success());
    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains(r#"d="m 0,0 h 10.123457 v 10 z""#), "{written}");
}

#[test]
fn test_view() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SVG);

    let output = svgpdtools()
        .arg("-f")
        .arg(&input)
        .args(["view", "--columns", "20"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "@ 2\n<path\n    fill=\"none\"\n    d=\"m 0,0\n       h 10.123457\n       v 10\n       z\"/>\n"
    );
}

#[test]
fn test_invalid_path_data_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, r#"<svg><path d="M 0,0 L 1"/></svg>"#);

    let output = svgpdtools()
        .arg("-f")
        .arg(&input)
        .arg("normalize")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("L 1"), "{stderr}");
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = svgpdtools()
        .arg("-f")
        .arg(dir.path().join("missing.svg"))
        .arg("view")
        .output()
        .unwrap();
    assert!(!output.status.success());
}
