// CLI integration tests for build/read/check flows.
use std::path::Path;
use std::process::Command;

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_monsterbuf");
    Command::new(exe)
}

fn parse_json(output: &[u8]) -> Value {
    let text = std::str::from_utf8(output).expect("utf8");
    serde_json::from_str(text.trim()).expect("valid json")
}

// stderr may carry log lines ahead of the error envelope.
fn parse_error_json(stderr: &[u8]) -> Value {
    let text = String::from_utf8_lossy(stderr);
    let line = text.lines().last().expect("error line");
    serde_json::from_str(line).expect("valid json")
}

fn build_to(path: &Path, extra: &[&str]) {
    let build = cmd()
        .args(["build", "--out", path.to_str().unwrap()])
        .args(extra)
        .output()
        .expect("build");
    assert!(build.status.success(), "{}", String::from_utf8_lossy(&build.stderr));
}

#[test]
fn demo_prints_summary_and_success_line() {
    let demo = cmd().arg("demo").output().expect("demo");
    assert!(demo.status.success());
    let stdout = String::from_utf8_lossy(&demo.stdout);
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "hp: 80",
            "mana: 150",
            "name: MyMonster",
            "pos: 1, 2, 3",
            "The FlatBuffer was successfully created and verified!",
        ]
    );
}

#[test]
fn demo_json_reports_every_check_passing() {
    let demo = cmd().args(["demo", "--json"]).output().expect("demo");
    assert!(demo.status.success());
    let json = parse_json(&demo.stdout);
    assert_eq!(json["report"]["status"], "ok");
    assert_eq!(json["monster"]["name"], "MyMonster");
    assert_eq!(json["monster"]["color"], "Red");
    assert_eq!(json["monster"]["equipped"]["name"], "Axe");
    assert_eq!(json["buffer"]["framing"], "plain");
}

#[test]
fn build_read_check_flow() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("orc.bin");

    let build = cmd()
        .args(["build", "--out", path.to_str().unwrap()])
        .output()
        .expect("build");
    assert!(build.status.success());
    let build_json = parse_json(&build.stdout);
    let len = build_json["buffer"]["len"].as_u64().expect("len");
    assert_eq!(std::fs::metadata(&path).expect("metadata").len(), len);
    assert_eq!(build_json["buffer"]["sha256"].as_str().expect("sha").len(), 64);

    let read = cmd()
        .args(["read", path.to_str().unwrap()])
        .output()
        .expect("read");
    assert!(read.status.success());
    let read_json = parse_json(&read.stdout);
    assert_eq!(read_json["buffer"]["sha256"], build_json["buffer"]["sha256"]);
    let monster = &read_json["monster"];
    assert_eq!(monster["hp"], 80);
    assert_eq!(monster["mana"], 150);
    assert_eq!(monster["inventory"][9], 9);
    assert_eq!(monster["weapons"][0]["name"], "Sword");
    assert_eq!(monster["weapons"][1]["damage"], 5);
    assert_eq!(monster["pos"]["z"], 3.0);

    let check = cmd()
        .args(["check", path.to_str().unwrap()])
        .output()
        .expect("check");
    assert!(check.status.success());
    assert_eq!(parse_json(&check.stdout)["report"]["status"], "ok");
}

#[test]
fn check_fails_for_a_different_monster() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("imp.json");
    let path = temp.path().join("imp.bin");
    std::fs::write(&input, r#"{"name": "Imp", "hp": 12, "color": "Green"}"#).expect("write");

    build_to(&path, &["--input", input.to_str().unwrap()]);

    let check = cmd()
        .args(["check", path.to_str().unwrap()])
        .output()
        .expect("check");
    assert_eq!(check.status.code().unwrap(), 7);
    let report = parse_json(&check.stdout);
    assert_eq!(report["report"]["status"], "mismatch");
    let failed = report["report"]["issues"]
        .as_array()
        .expect("issues")
        .iter()
        .map(|issue| issue["check"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert!(failed.contains(&"hp".to_string()));
    assert!(failed.contains(&"name".to_string()));

    let err = parse_error_json(&check.stderr);
    assert_eq!(err["error"]["kind"], "Corrupt");
}

#[test]
fn size_prefixed_buffers_need_the_flag_to_read() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("orc.bin");
    build_to(&path, &["--size-prefixed"]);

    let read = cmd()
        .args(["read", path.to_str().unwrap(), "--size-prefixed"])
        .output()
        .expect("read");
    assert!(read.status.success());
    let json = parse_json(&read.stdout);
    assert_eq!(json["buffer"]["framing"], "size-prefixed");
    assert_eq!(json["monster"]["name"], "MyMonster");
}

#[test]
fn garbage_file_is_corrupt() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("junk.bin");
    std::fs::write(&path, [0xFFu8; 32]).expect("write");

    let read = cmd()
        .args(["read", path.to_str().unwrap()])
        .output()
        .expect("read");
    assert_eq!(read.status.code().unwrap(), 7);
    let err = parse_error_json(&read.stderr);
    assert_eq!(err["error"]["kind"], "Corrupt");
    assert!(err["error"]["hint"].as_str().is_some());
    assert!(err["error"]["path"].as_str().unwrap().ends_with("junk.bin"));
}

#[test]
fn missing_file_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("nope.bin");

    let read = cmd()
        .args(["read", path.to_str().unwrap()])
        .output()
        .expect("read");
    assert_eq!(read.status.code().unwrap(), 3);
}

#[test]
fn usage_exit_code() {
    let read = cmd().arg("read").output().expect("read");
    assert_eq!(read.status.code().unwrap(), 2);

    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("bad.json");
    std::fs::write(&input, "{\"hp\": \"lots\"}").expect("write");
    let build = cmd()
        .args(["build", "--input", input.to_str().unwrap()])
        .output()
        .expect("build");
    assert_eq!(build.status.code().unwrap(), 2);
}

#[test]
fn version_reports_name_and_version_as_json() {
    let version = cmd().arg("version").output().expect("version");
    assert!(version.status.success());
    let json = parse_json(&version.stdout);
    assert_eq!(json["name"], "monsterbuf");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn completion_prints_a_bash_script() {
    let completion = cmd().args(["completion", "bash"]).output().expect("completion");
    assert!(completion.status.success());
    let script = String::from_utf8_lossy(&completion.stdout);
    assert!(!script.trim().is_empty());
    assert!(script.contains("monsterbuf"));
}
