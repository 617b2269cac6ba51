//! Integration tests for the fob-minify binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(
        src.join("file1.js"),
        "function test1() {\n  var asdf = 3;\n}\n",
    )
    .unwrap();
    fs::write(
        src.join("file2.js"),
        "function test2(qwerty) {\n  return qwerty + 1;\n}\n",
    )
    .unwrap();
    temp
}

fn fob_minify(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fob-minify").unwrap();
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_minifies_a_directory_into_one_file() {
    let temp = project();
    fob_minify(temp.path())
        .args(["-o", "app.min.js", "src"])
        .assert()
        .success();

    let code = fs::read_to_string(temp.path().join("dist/app.min.js")).unwrap();
    assert!(code.contains("test1"));
    assert!(code.contains("test2"));
    assert!(!code.contains("asdf"));
    assert!(!code.contains("qwerty"));
}

#[test]
fn test_default_output_name_follows_first_input() {
    let temp = project();
    fob_minify(temp.path())
        .args(["src/file2.js", "src/file1.js"])
        .assert()
        .success();

    assert!(temp.path().join("dist/file2.js").exists());
    assert!(!temp.path().join("dist/file1.js").exists());
}

#[test]
fn test_source_map_is_written_next_to_the_output() {
    let temp = project();
    fob_minify(temp.path())
        .args(["--source-map", "--base-path", "src", "-o", "app.js", "src"])
        .assert()
        .success();

    let code = fs::read_to_string(temp.path().join("dist/app.js")).unwrap();
    assert!(code.ends_with("\r\n//# sourceMappingURL=app.js.map"));

    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("dist/app.js.map")).unwrap())
            .unwrap();
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "app.js.map");
    assert_eq!(map["sources"], serde_json::json!(["file1.js", "file2.js"]));
}

#[test]
fn test_stdout_prints_the_code() {
    let temp = project();
    fob_minify(temp.path())
        .args(["--stdout", "--no-mangle", "--no-compress", "src/file2.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qwerty"));

    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_config_file_is_honored() {
    let temp = project();
    fs::write(
        temp.path().join("fob-minify.json"),
        r#"{ "filename": "bundle.js", "outDir": "public", "mangle": false }"#,
    )
    .unwrap();

    fob_minify(temp.path()).arg("src").assert().success();

    let code = fs::read_to_string(temp.path().join("public/bundle.js")).unwrap();
    assert!(code.contains("qwerty"));
}

#[test]
fn test_environment_overrides_config_file() {
    let temp = project();
    fs::write(
        temp.path().join("fob-minify.json"),
        r#"{ "filename": "bundle.js" }"#,
    )
    .unwrap();

    fob_minify(temp.path())
        .env("FOB_MINIFY_OUT_DIR", "from-env")
        .arg("src")
        .assert()
        .success();

    assert!(temp.path().join("from-env/bundle.js").exists());
}

#[test]
fn test_wrap_with_export_all() {
    let temp = project();
    fob_minify(temp.path())
        .args(["--stdout", "--wrap", "testExport", "--export-all", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("testExport"));
}

#[test]
fn test_syntax_error_fails_with_the_file_name() {
    let temp = project();
    fs::write(temp.path().join("src/broken.js"), "function ( {").unwrap();

    fob_minify(temp.path())
        .arg("src")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.js"));

    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_missing_input_fails() {
    let temp = project();
    fob_minify(temp.path())
        .arg("nope.js")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_requires_an_input() {
    let temp = project();
    fob_minify(temp.path()).assert().failure();
}
