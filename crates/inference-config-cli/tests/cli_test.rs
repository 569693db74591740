//! Integration tests for the inference-config binary
//!
//! Tests execute the real CLI binary against fixture files in a temp
//! directory and check exit codes and output.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

const EXIT_SUCCESS: i32 = 0;
const EXIT_WARNING: i32 = 1;
const EXIT_BLOCKING: i32 = 2;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_inference-config"))
        .args(args)
        .env_remove("INFERENCE_CONFIG_FILE")
        .env_remove("INFERENCE_CONFIG_PLATFORM")
        .env_remove("INFERENCE_CONFIG_DEVICES_FILE")
        .output()
        .expect("failed to run inference-config")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON: {}\nstdout: {}\nstderr: {}",
            e,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

fn snapdragon_devices(dir: &TempDir) -> PathBuf {
    write(
        dir,
        "devices.json",
        &json!([
            { "deviceName": "CPU", "type": "cpu" },
            { "deviceName": "GPUOpenCL", "type": "gpu" },
            { "deviceName": "HTP0", "type": "npu" }
        ])
        .to_string(),
    )
}

#[test]
fn test_migrate_legacy_blob() {
    let dir = TempDir::new().unwrap();
    let blob = write(
        &dir,
        "params.json",
        &json!({ "n_context": 1024, "use_mmap": false, "no_gpu_devices": true }).to_string(),
    );

    let output = run(&["--platform", "ios", "migrate", path_str(&blob)]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let params = stdout_json(&output);
    assert_eq!(params["version"], "2.0");
    assert_eq!(params["n_ctx"], 2048);
    assert_eq!(params["use_mmap"], "false");
    assert_eq!(params["n_gpu_layers"], 0);
    assert_eq!(params["no_gpu_devices"], true);
    assert_eq!(params["flash_attn_type"], "auto");
}

#[test]
fn test_migrate_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let blob = write(&dir, "params.json", r#"{"version":"1.0","n_ctx":4096}"#);
    let out = dir.path().join("migrated.json");

    let output = run(&["migrate", path_str(&blob), "--output", path_str(&out)]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let params: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(params["n_ctx"], 4096);
    // Android default without a configured platform.
    assert_eq!(params["flash_attn_type"], "off");
}

#[test]
fn test_migrate_malformed_falls_back_unless_strict() {
    let dir = TempDir::new().unwrap();
    let blob = write(&dir, "params.json", r#"{"n_ctx":"big"}"#);

    let output = run(&["migrate", path_str(&blob)]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    assert_eq!(stdout_json(&output)["n_ctx"], 2048);

    let output = run(&["migrate", "--strict", path_str(&blob)]);
    assert_eq!(output.status.code(), Some(EXIT_BLOCKING));
}

#[test]
fn test_migrate_truncated_file_falls_back_unless_strict() {
    let dir = TempDir::new().unwrap();
    let blob = write(&dir, "params.json", "{ truncated");

    let output = run(&["--platform", "ios", "migrate", path_str(&blob)]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    let params = stdout_json(&output);
    assert_eq!(params["version"], "2.0");
    assert_eq!(params["n_ctx"], 2048);
    assert_eq!(params["flash_attn_type"], "auto");

    let output = run(&["migrate", "--strict", path_str(&blob)]);
    assert_eq!(output.status.code(), Some(EXIT_BLOCKING));
}

#[test]
fn test_migrate_missing_file_warns() {
    let output = run(&["migrate", "/nonexistent/params.json"]);
    assert_eq!(output.status.code(), Some(EXIT_WARNING));
}

#[test]
fn test_validate_exit_codes() {
    let dir = TempDir::new().unwrap();
    let devices = snapdragon_devices(&dir);

    let legacy = write(&dir, "legacy.json", r#"{"n_context":2048}"#);
    let output = run(&["validate", path_str(&legacy)]);
    assert_eq!(output.status.code(), Some(EXIT_BLOCKING));

    // Migrate, then the result validates cleanly.
    let current = dir.path().join("current.json");
    let output = run(&["migrate", path_str(&legacy), "-o", path_str(&current)]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    let output = run(&[
        "--devices-file",
        path_str(&devices),
        "validate",
        "--format",
        "json",
        path_str(&current),
    ]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    let report = stdout_json(&output);
    assert_eq!(report["valid"], true);
    assert_eq!(report["needs_migration"], false);

    // Quantized V cache on auto-selected OpenCL is flagged, not rejected.
    let mut params: Value = serde_json::from_str(&fs::read_to_string(&current).unwrap()).unwrap();
    params["cache_type_v"] = json!("q8_0");
    params["flash_attn_type"] = json!("auto");
    let unsafe_params = write(&dir, "unsafe.json", &params.to_string());
    let output = run(&[
        "--devices-file",
        path_str(&devices),
        "validate",
        "--format",
        "json",
        path_str(&unsafe_params),
    ]);
    assert_eq!(output.status.code(), Some(EXIT_WARNING));
    let report = stdout_json(&output);
    assert_eq!(report["backend"], "opencl");
    assert!(report["cache_warning"].is_string());
}

#[test]
fn test_devices_android_with_fixture() {
    let dir = TempDir::new().unwrap();
    let devices = snapdragon_devices(&dir);

    let output = run(&[
        "--platform",
        "android",
        "--devices-file",
        path_str(&devices),
        "devices",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let response = stdout_json(&output);
    assert_eq!(response["platform"], "android");
    assert_eq!(response["gpu_support"]["isSupported"], true);
    let ids: Vec<&str> = response["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["cpu", "gpu", "hexagon"]);
}

#[test]
fn test_devices_missing_fixture_degrades_to_cpu() {
    let output = run(&[
        "--platform",
        "android",
        "--devices-file",
        "/nonexistent/devices.json",
        "devices",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    let response = stdout_json(&output);
    assert_eq!(response["options"].as_array().unwrap().len(), 1);
    assert_eq!(response["gpu_support"]["isSupported"], false);
    assert_eq!(response["gpu_support"]["reason"], "unknown");
}

#[test]
fn test_devices_ios_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "engine.toml", "platform = \"ios\"\n");

    let output = run(&["--config", path_str(&config), "devices", "--format", "json"]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    assert_eq!(stdout_json(&output)["options"].as_array().unwrap().len(), 3);
}

#[test]
fn test_devices_reports_configured_gpu_support() {
    let dir = TempDir::new().unwrap();
    let devices = snapdragon_devices(&dir);
    let config = write(
        &dir,
        "engine.toml",
        "platform = \"android\"\n\n[probe]\ngpu_supported = false\n",
    );

    let output = run(&[
        "--config",
        path_str(&config),
        "--devices-file",
        path_str(&devices),
        "devices",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    let response = stdout_json(&output);
    assert_eq!(response["gpu_support"]["isSupported"], false);
    // The device list itself still comes from the fixture.
    assert_eq!(response["options"].as_array().unwrap().len(), 3);

    let output = run(&[
        "--config",
        path_str(&config),
        "--devices-file",
        path_str(&devices),
        "devices",
    ]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    assert!(String::from_utf8_lossy(&output.stdout).contains("GPU support: no (unknown)"));
}

#[test]
fn test_bad_config_file_warns() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "engine.toml", "platform = \"windows\"\n");

    let output = run(&["--config", path_str(&config), "devices"]);
    assert_eq!(output.status.code(), Some(EXIT_WARNING));
}

#[test]
fn test_check_verdicts() {
    let output = run(&[
        "check",
        "--cache-type-v",
        "q8_0",
        "--flash-attn",
        "on",
        "--backend",
        "metal",
    ]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let output = run(&[
        "check",
        "--cache-type-v",
        "q4_0",
        "--flash-attn",
        "on",
        "--backend",
        "opencl",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(EXIT_WARNING));
    let verdict = stdout_json(&output);
    assert_eq!(verdict["v"]["safe"], false);
    assert_eq!(
        verdict["v"]["reason"],
        "OpenCL does not support flash attention"
    );
}

#[test]
fn test_options_lists_every_cache_type() {
    let output = run(&[
        "options",
        "--flash-attn",
        "off",
        "--backend",
        "cpu",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let options = stdout_json(&output);
    let v = options["v"].as_array().unwrap();
    assert_eq!(v.len(), 8);
    assert!(v
        .iter()
        .filter(|o| o["value"] != "f16" && o["value"] != "f32")
        .all(|o| o["disabled"] == true));
    assert!(options["k"]
        .as_array()
        .unwrap()
        .iter()
        .all(|o| o["disabled"] == false));
}
