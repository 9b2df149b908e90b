//! 命令行集成测试
//!
//! 仅覆盖离线子命令（remove / check / languages），不触网。

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use assert_cmd::prelude::*;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("translayer-cli-tests");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_languages_lists_known_codes() {
    let mut cmd = Command::cargo_bin("translayer").unwrap();
    let assert = cmd.arg("languages").assert().success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.contains("zh-Hans"));
    assert!(output.contains("ja"));
    assert!(output.contains("English"));
}

#[test]
fn test_check_reports_false_for_clean_document() {
    let input = temp_file(
        "clean.html",
        "<html><body><p>Nothing translated</p></body></html>",
    );

    let mut cmd = Command::cargo_bin("translayer").unwrap();
    cmd.arg("check").arg(&input).assert().success().stdout("false\n");
}

#[test]
fn test_check_reports_true_for_marked_document() {
    let input = temp_file(
        "marked.html",
        "<html><body><p data-translated=\"true\">Done<span data-translated=\"true\" \
         data-translation-added=\"true\">完成</span></p></body></html>",
    );

    let mut cmd = Command::cargo_bin("translayer").unwrap();
    cmd.arg("check").arg(&input).assert().success().stdout("true\n");
}

#[test]
fn test_remove_strips_artifacts() {
    let input = temp_file(
        "translated.html",
        "<html><body><p data-translated=\"true\">Original<span data-translated=\"true\" \
         data-translation-added=\"true\" style=\"display: block\">译文</span></p></body></html>",
    );
    let output = std::env::temp_dir()
        .join("translayer-cli-tests")
        .join("restored.html");

    let mut cmd = Command::cargo_bin("translayer").unwrap();
    cmd.arg("remove")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let restored = fs::read_to_string(&output).unwrap();
    assert!(restored.contains("Original"));
    assert!(!restored.contains("译文"), "Synthetic span removed: {}", restored);
    assert!(!restored.contains("data-translated"), "Markers stripped: {}", restored);

    // 清除后的文档再次检查应为 false
    let mut cmd = Command::cargo_bin("translayer").unwrap();
    cmd.arg("check").arg(&output).assert().success().stdout("false\n");
}
