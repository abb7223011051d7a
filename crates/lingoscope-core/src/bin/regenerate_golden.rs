use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lingoscope_core::analyze_capture;

/// Golden directories with this suffix hold XOR-obfuscated captures.
const OBFUSCATED_SUFFIX: &str = "_obfuscated";

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.bin");
        if !input.exists() {
            continue;
        }
        let obfuscated = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(OBFUSCATED_SUFFIX));
        let output = path.join("expected_report.json");
        regenerate_one(&input, obfuscated, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, obfuscated: bool, output: &Path) -> Result<(), String> {
    let mut report = analyze_capture(input, obfuscated, "0")
        .map_err(|err| format!("decode failed for {}: {}", input.display(), err))?;
    report.input.path = "input.bin".to_string();
    let json = serde_json::to_string(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
