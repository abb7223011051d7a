use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const REQUEST_STATUS: [u8; 7] = [0xff, 0x55, 0x03, 0x04, 0x00, 0x1c, 0xdd];
const VENDOR_QUERY: [u8; 6] = [0xff, 0xa9, 0x02, 0x00, 0x03, 0xfb];
const UNKNOWN_OPCODE: [u8; 6] = [0xff, 0x55, 0x02, 0x00, 0x7f, 0x7f];

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("lingoscope"))
}

fn write_capture(dir: &Path, name: &str, frames: &[&[u8]], obfuscate: bool) -> PathBuf {
    let mut bytes: Vec<u8> = frames.concat();
    if obfuscate {
        bytes.iter_mut().for_each(|b| *b ^= 0x31);
    }
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write capture");
    path
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("monitor").and(contains("decode")));
    cmd().arg("monitor").arg("--help").assert().success();
}

#[test]
fn decode_prints_text_entries() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(
        temp.path(),
        "session.bin",
        &[&REQUEST_STATUS, &UNKNOWN_OPCODE],
        false,
    );

    cmd()
        .arg("decode")
        .arg(input)
        .arg("--label")
        .arg("1")
        .assert()
        .success()
        .stdout(
            contains("[1|        -] Request time and status info\n")
                .and(contains(" 0xff 0x55 0x03 0x04 0x00 0x1c 0xdd"))
                .and(contains("[1|        -] 0xff 0x55 0x02 0x00 0x7f 0x7f")),
        )
        .stderr(contains("2 frames, 0 checksum errors, 1 unrecognized"));
}

#[test]
fn decode_obfuscated_capture() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(temp.path(), "dock.bin", &[&VENDOR_QUERY], true);

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("--obfuscated")
        .assert()
        .success()
        .stdout(contains("Denon periodic status query"));

    cmd()
        .arg("decode")
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Denon").not());
}

#[test]
fn decode_flags_checksum_errors() {
    let temp = TempDir::new().expect("tempdir");
    let mut corrupted = VENDOR_QUERY;
    corrupted[5] ^= 0x01;
    let input = write_capture(temp.path(), "bad.bin", &[&corrupted], false);

    cmd()
        .arg("decode")
        .arg(input)
        .assert()
        .success()
        .stdout(contains("Denon periodic status query [checksum error]"));
}

#[test]
fn decode_json_to_stdout() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(
        temp.path(),
        "session.bin",
        &[&REQUEST_STATUS, &VENDOR_QUERY],
        false,
    );

    let assert = cmd()
        .arg("decode")
        .arg(input)
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["summary"]["frames_total"], 2);
    assert_eq!(value["frames"][1]["raw"], "ff a9 02 00 03 fb");
    assert_eq!(value["frames"][0]["decoded"], "Request time and status info");
}

#[test]
fn decode_writes_report_file() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(temp.path(), "session.bin", &[&VENDOR_QUERY], false);
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("decode")
        .arg(input)
        .arg("-o")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("OK: report written"));
    let text = fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["tool"]["name"], "lingoscope");
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(temp.path(), "session.bin", &[&VENDOR_QUERY], false);

    cmd()
        .arg("decode")
        .arg(input)
        .arg("-o")
        .arg(temp.path().join("report.json"))
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn report_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(temp.path(), "session.bin", &[&VENDOR_QUERY], false);

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input").and(contains("hint:")));
}

#[test]
fn trailing_partial_frame_is_not_an_error() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(
        temp.path(),
        "cut.bin",
        &[&VENDOR_QUERY, &[0xff, 0x55, 0x04, 0x00]],
        false,
    );

    let assert = cmd().arg("decode").arg(input).arg("--json").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["summary"]["frames_total"], 1);
    assert_eq!(value["summary"]["trailing_bytes"], 4);
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");

    cmd()
        .arg("decode")
        .arg(temp.path().join("missing.bin"))
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn glob_with_multiple_matches_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    write_capture(temp.path(), "a.bin", &[&VENDOR_QUERY], false);
    write_capture(temp.path(), "b.bin", &[&VENDOR_QUERY], false);

    cmd()
        .arg("decode")
        .arg(temp.path().join("*.bin"))
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn json_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_capture(temp.path(), "session.bin", &[&VENDOR_QUERY], false);

    cmd()
        .arg("decode")
        .arg(input)
        .arg("--json")
        .arg("-o")
        .arg(temp.path().join("report.json"))
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn monitor_without_devices_fails_with_hint() {
    let temp = TempDir::new().expect("tempdir");

    cmd()
        .arg("monitor")
        .arg("--port")
        .arg(temp.path().join("no-such-tty"))
        .assert()
        .failure()
        .code(2)
        .stderr(contains("no serial source could be opened").and(contains("hint:")));
}

#[test]
fn monitor_rejects_bad_config() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("lingoscope.toml");
    fs::write(&config, "baud_rate = \"fast\"\n").expect("write config");

    cmd()
        .arg("monitor")
        .arg("--config")
        .arg(config)
        .assert()
        .failure()
        .stderr(contains("Failed to parse config file"));
}
