use std::fs;
use std::process::{Command, Output};

use tempfile::tempdir;

const IDENTITY_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/identity.onnx");

fn write_white_image(path: &std::path::Path) {
    image::RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]))
        .save(path)
        .unwrap();
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rawinfer"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn no_arguments_is_a_usage_error() {
    let output = run_cli(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_height_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.raw");

    let output = run_cli(&[
        "model.onnx",
        "image.png",
        out_path.to_str().unwrap(),
        "224",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("HEIGHT"));
    assert!(!out_path.exists());
}

#[test]
fn zero_width_is_rejected() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.raw");

    let output = run_cli(&[
        "model.onnx",
        "image.png",
        out_path.to_str().unwrap(),
        "0",
        "224",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!out_path.exists());
}

#[test]
fn non_numeric_height_is_rejected() {
    let output = run_cli(&["model.onnx", "image.png", "out.raw", "224", "tall"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn help_exits_successfully() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<MODEL> <IMAGE> <OUTPUT> <WIDTH> <HEIGHT>"));
}

#[test]
fn missing_model_fails_without_writing() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("white.png");
    let out_path = dir.path().join("out.raw");
    write_white_image(&image_path);

    let output = run_cli(&[
        dir.path().join("absent.onnx").to_str().unwrap(),
        image_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        "4",
        "4",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to initialize model"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    assert!(!out_path.exists());
}

#[test]
fn extra_argument_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.raw");

    let output = run_cli(&[
        "model.onnx",
        "image.png",
        out_path.to_str().unwrap(),
        "224",
        "224",
        "extra",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert!(!out_path.exists());
}

#[test]
fn huge_dimensions_fail_cleanly() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("white.png");
    let out_path = dir.path().join("out.raw");
    write_white_image(&image_path);

    let output = run_cli(&[
        IDENTITY_MODEL,
        image_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        "4294967295",
        "4294967295",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid target dimensions"), "stderr: {stderr}");
    assert!(!out_path.exists());
}

#[test]
fn bad_image_is_reported_before_bad_model() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.raw");

    let output = run_cli(&[
        dir.path().join("absent.onnx").to_str().unwrap(),
        dir.path().join("absent.png").to_str().unwrap(),
        out_path.to_str().unwrap(),
        "4",
        "4",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load image"), "stderr: {stderr}");
    assert!(!stderr.contains("Failed to initialize model"));
}

#[test]
fn white_image_through_identity_model() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("white.png");
    let out_path = dir.path().join("out.raw");
    write_white_image(&image_path);

    let args = [
        IDENTITY_MODEL,
        image_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        "4",
        "4",
    ];
    let output = run_cli(&args);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "Input Name: pixels",
            "Output Name: scores",
            "Output Shape: [1, 3, 4, 4]",
        ]
    );

    let raw = fs::read(&out_path).unwrap();
    assert_eq!(raw.len(), 3 * 4 * 4 * 4);
    let values: Vec<f32> = raw
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(values.len(), 48);
    assert!(values.iter().all(|&v| v == 1.0));

    let rerun = run_cli(&args);
    assert!(rerun.status.success());
    assert_eq!(fs::read(&out_path).unwrap(), raw);
}
