//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("lexis")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn dictionary() -> String {
    get_fixture_path("dictionaries")
}

fn write_input(tmp: &TempDir, contents: &str) -> String {
    let path = tmp.path().join("Input.csv");
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

fn stdout_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

#[test]
fn test_cli_text_file() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("note.txt");
    std::fs::write(&input, "We think the outlook is excellent. I worry.").unwrap();

    let assert = cmd()
        .args(["text", "-d", &dictionary(), input.to_str().unwrap()])
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["POSITIVE SCORE"], 1);
    assert_eq!(value["NEGATIVE SCORE"], 1);
    assert_eq!(value["POLARITY SCORE"], 0.0);
    assert_eq!(value["WORD COUNT"], 8);
    assert_eq!(value["PERSONAL PRONOUNS"], 2);
    assert_eq!(value["AVG SENTENCE LENGTH"], 4.0);
}

#[test]
fn test_cli_text_stdin() {
    let assert = cmd()
        .args(["text", "-d", &dictionary(), "-"])
        .write_stdin("Great news. Great results!")
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["POSITIVE SCORE"], 2);
    assert_eq!(value["WORD COUNT"], 4);
}

#[test]
fn test_cli_text_empty_input_is_zero() {
    let assert = cmd()
        .args(["text", "-d", &dictionary(), "-"])
        .write_stdin("   \n")
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["WORD COUNT"], 0);
    assert_eq!(value["FOG INDEX"], 0.0);
}

#[test]
fn test_cli_text_html() {
    let assert = cmd()
        .args(["text", "--html", "-d", &dictionary(), &get_fixture_path("article.html")])
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["POSITIVE SCORE"], 3);
    assert_eq!(value["NEGATIVE SCORE"], 3);
    assert_eq!(value["WORD COUNT"], 31);
}

#[test]
fn test_cli_text_invalid_file() {
    cmd()
        .args(["text", "-d", &dictionary(), "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_missing_dictionary() {
    cmd()
        .args(["text", "-d", "/nonexistent/dictionaries", "-"])
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to locate dictionaries"));
}

#[test]
fn test_cli_batch_failures_become_zero_rows() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "URL_ID,URL\n1,not-a-url\n2,ftp://example.com/file\n");
    let output = tmp.path().join("Output.csv");

    cmd()
        .args(["batch", &input, "-d", &dictionary(), "--delay-ms", "0"])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("starting batch run"))
        .stderr(predicate::str::contains("results written"))
        .stderr(predicate::str::contains("Articles processed"))
        .stderr(predicate::str::contains("Mean=0.0000, Range=(0.0000-0.0000)"));

    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "URL_ID,URL,POSITIVE SCORE,NEGATIVE SCORE,POLARITY SCORE,SUBJECTIVITY SCORE,AVG SENTENCE LENGTH,\
         PERCENTAGE OF COMPLEX WORDS,FOG INDEX,AVG NUMBER OF WORDS PER SENTENCE,COMPLEX WORD COUNT,WORD COUNT,\
         SYLLABLE PER WORD,PERSONAL PRONOUNS,AVG WORD LENGTH"
    );
    assert_eq!(lines[1], "1,not-a-url,0,0,0,0,0,0,0,0,0,0,0,0,0");
    assert_eq!(lines[2], "2,ftp://example.com/file,0,0,0,0,0,0,0,0,0,0,0,0,0");
}

#[test]
fn test_cli_batch_json_output() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "URL_ID,URL\nA,not-a-url\n");
    let output = tmp.path().join("results").join("output.json");

    cmd()
        .args(["batch", &input, "-d", &dictionary(), "--delay-ms", "0"])
        .args(["-o", output.to_str().unwrap()])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value[0]["URL_ID"], "A");
    assert_eq!(value[0]["URL"], "not-a-url");
    assert_eq!(value[0]["WORD COUNT"], 0);
}

#[test]
fn test_cli_batch_checkpoints() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "URL_ID,URL\n1,not-a-url\n2,not-a-url\n3,not-a-url\n");
    let checkpoints = tmp.path().join("checkpoints");

    cmd()
        .args(["batch", &input, "-d", &dictionary(), "--delay-ms", "0"])
        .args(["-o", tmp.path().join("Output.csv").to_str().unwrap()])
        .args(["--checkpoint-every", "2", "--checkpoint-dir", checkpoints.to_str().unwrap()])
        .assert()
        .success();

    assert!(checkpoints.join("intermediate_results_batch_1.csv").exists());
    assert!(!checkpoints.join("intermediate_results_batch_2.csv").exists());
}

#[test]
fn test_cli_batch_missing_column() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(&tmp, "ID,LINK\n1,https://example.com\n");

    cmd()
        .args(["batch", &input, "-d", &dictionary()])
        .args(["-o", tmp.path().join("Output.csv").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input table"));
}

#[test]
fn test_cli_batch_invalid_input_file() {
    cmd()
        .args(["batch", "nonexistent.csv", "-d", &dictionary()])
        .assert()
        .failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "text", "-d", &dictionary(), "-"])
        .write_stdin("Hello there.")
        .assert()
        .success()
        .stderr(predicate::str::contains("Lexis"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lexis"));
}

#[test]
fn test_cli_requires_subcommand() {
    cmd().assert().failure();
}
