//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("cleanreader")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn article() -> String {
    get_fixture_path("article.html")
}

#[test]
fn test_cli_file_input() {
    cmd()
        .arg(article())
        .assert()
        .success()
        .stdout(predicate::str::contains("clean-reader-container"))
        .stdout(predicate::str::contains("Field Notes on Tide Pools"));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(article()).unwrap();
    cmd()
        .arg("-")
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("reader-toc"));
}

#[test]
fn test_cli_html_format() {
    cmd()
        .args(["-f", "html", &article()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<h1 id=\"heading-0\">"))
        .stdout(predicate::str::contains("Popular posts").not());
}

#[test]
fn test_cli_markdown_format() {
    cmd()
        .args(["-f", "markdown", &article()])
        .assert()
        .success()
        .stdout(predicate::str::contains("## What lives there"));
}

#[test]
fn test_cli_frontmatter() {
    cmd()
        .args(["-f", "markdown", "--frontmatter", &article()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("+++"))
        .stdout(predicate::str::contains("title = \"Field Notes on Tide Pools\""));
}

#[test]
fn test_cli_text_format() {
    cmd()
        .args(["-f", "text", &article()])
        .assert()
        .success()
        .stdout(predicate::str::contains("What lives there"))
        .stdout(predicate::str::contains("<p>").not());
}

#[test]
fn test_cli_json_format() {
    let output = cmd().args(["-f", "json", "--pretty", &article()]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["metadata"]["title"], "Field Notes on Tide Pools");
    assert_eq!(value["headings"].as_array().unwrap().len(), 3);
    assert_eq!(value["toc"][2]["indent"], 40);
}

#[test]
fn test_cli_invalid_format() {
    cmd().args(["-f", "pdf", &article()]).assert().failure();
}

#[test]
fn test_cli_toc_only() {
    cmd()
        .args(["--toc", &article()])
        .assert()
        .success()
        .stdout(predicate::str::contains("(#heading-0)"))
        .stdout(predicate::str::contains("(#heading-2)"));
}

#[test]
fn test_cli_stats() {
    cmd()
        .args(["--stats", "-f", "html", &article()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Reading Stats"))
        .stderr(predicate::str::contains("Headings:"));
}

#[test]
fn test_cli_roundtrip() {
    cmd()
        .args(["--roundtrip", &article()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Round trip restored the original page"));
}

#[test]
fn test_cli_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("reader.html");

    cmd()
        .args(["-f", "html", "-o", output_path.to_str().unwrap(), &article()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Output written to"));

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert!(written.contains("heading-1"));
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .arg("nonexistent.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_base_url_resolves_links() {
    cmd()
        .args(["-f", "html", "--base-url", "https://coastal.example.com/posts/", &article()])
        .assert()
        .success()
        .stdout(predicate::str::contains("href=\"https://coastal.example.com/guides/tides\""));
}

#[test]
fn test_cli_invalid_base_url() {
    cmd().args(["--base-url", "not a url", &article()]).assert().failure();
}

#[test]
fn test_cli_custom_selector() {
    cmd()
        .args(["-f", "html", "--selector", "#story", &get_fixture_path("no_selectors.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("teaser").not());
}

#[test]
fn test_cli_empty_content_warns() {
    cmd()
        .args(["-f", "html", &get_fixture_path("empty_content.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("No readable content found"));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "-f", "html", &article()])
        .assert()
        .success()
        .stderr(predicate::str::contains("cleanreader"))
        .stderr(predicate::str::contains("updateIcon"));
}
