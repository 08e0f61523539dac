mod common;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use common::write_pdf;

const QUOTE_PAGES: &[&str] = &["apple = 4\nprice = Rs 10", "banana = 2\nprice = Rs 5"];

fn pdfquote(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pdfquote").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .current_dir(home);
    cmd
}

#[test]
fn process_prints_total_breakdown_and_word_count() {
    let dir = TempDir::new().unwrap();
    let pdf = write_pdf(dir.path(), "quote.pdf", QUOTE_PAGES);

    pdfquote(dir.path())
        .arg("process")
        .arg(&pdf)
        .args(["--breakdown", "--word-count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Quotation: Rs 50"))
        .stdout(predicate::str::contains("Apple: 4 units at Rs 10 each, Total: Rs 40"))
        .stdout(predicate::str::contains("Banana: 2 units at Rs 5 each, Total: Rs 10"))
        .stdout(predicate::str::contains("Word Count: "));
}

#[test]
fn process_page_range_limits_quotation() {
    let dir = TempDir::new().unwrap();
    let pdf = write_pdf(dir.path(), "quote.pdf", QUOTE_PAGES);

    pdfquote(dir.path())
        .arg("process")
        .arg(&pdf)
        .args(["--start", "2", "--end", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Quotation: Rs 10"))
        .stdout(predicate::str::contains("apple").not());
}

#[test]
fn process_corrupt_pdf_reports_malformed() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("broken.pdf");
    std::fs::write(&pdf, b"%PDF-1.4\nthis is not really a pdf").unwrap();

    pdfquote(dir.path())
        .arg("process")
        .arg(&pdf)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Error reading the PDF file. It might be corrupted or improperly formatted.",
        ));
}

#[test]
fn process_end_past_last_page_reports_unexpected_error() {
    let dir = TempDir::new().unwrap();
    let pdf = write_pdf(dir.path(), "quote.pdf", QUOTE_PAGES);

    pdfquote(dir.path())
        .arg("process")
        .arg(&pdf)
        .args(["--pages", "1-5"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("An unexpected error occurred: "));
}

#[test]
fn process_mismatch_still_counts_words() {
    let dir = TempDir::new().unwrap();
    let pdf = write_pdf(dir.path(), "header.pdf", &["x = 3\nprice = Rs 9", "page = 2"]);

    pdfquote(dir.path())
        .arg("process")
        .arg(&pdf)
        .arg("--word-count")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Mismatch between the number of items/quantities and prices.",
        ))
        .stdout(predicate::str::contains("Word Count: "))
        .stdout(predicate::str::contains("Total Quotation").not());
}

#[test]
fn process_json_and_saved_text_agree() {
    let dir = TempDir::new().unwrap();
    let pdf = write_pdf(dir.path(), "quote.pdf", QUOTE_PAGES);

    let output = pdfquote(dir.path())
        .arg("process")
        .arg(&pdf)
        .args(["--format", "json", "--save"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let model: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(model["quotation"]["total"], 50);
    assert_eq!(model["download"]["file_name"], "extracted_text.txt");

    let saved = std::fs::read(dir.path().join("extracted_text.txt")).unwrap();
    let shown = model["extracted_text"].as_str().unwrap();
    assert_eq!(saved, shown.as_bytes());
}

#[test]
fn process_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    pdfquote(dir.path())
        .args(["process", "nope.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn interactive_keeps_running_after_errors() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "quote.pdf", QUOTE_PAGES);
    std::fs::write(dir.path().join("bad.pdf"), b"garbage").unwrap();

    let script = "\
open bad.pdf
pages 1 9
frobnicate
open quote.pdf
pages all
breakdown on
wordcount on
save
quit
";

    pdfquote(dir.path())
        .arg("interactive")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Please upload a PDF file to extract text."))
        .stdout(predicate::str::contains("Error reading the PDF file."))
        .stdout(predicate::str::contains("Total Quotation: Rs 50"))
        .stdout(predicate::str::contains("Apple: 4 units at Rs 10 each, Total: Rs 40"))
        .stderr(predicate::str::contains("unknown command 'frobnicate'"));

    assert!(dir.path().join("extracted_text.txt").exists());
}

#[test]
fn batch_writes_summary_and_continues() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    std::fs::create_dir(&inputs).unwrap();
    write_pdf(&inputs, "a.pdf", QUOTE_PAGES);
    write_pdf(&inputs, "b.pdf", &["bolts = 10\nprice = Rs 3"]);
    std::fs::write(inputs.join("c.pdf"), b"broken").unwrap();
    let out = dir.path().join("out");

    pdfquote(dir.path())
        .arg("batch")
        .arg(format!("{}/*.pdf", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2 successful, 1 failed"));

    let summary = std::fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("a.pdf,2,"));
    assert!(lines[1].contains(",2,50,success,"));
    assert!(lines[2].contains(",1,30,success,"));
    assert!(lines[3].starts_with("c.pdf,,,,,error,"));
    assert!(out.join("a.txt").exists());
    assert!(out.join("c.json").exists());
    assert!(!out.join("c.txt").exists());
}

#[test]
fn batch_stops_on_first_error_by_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"broken").unwrap();

    pdfquote(dir.path())
        .arg("batch")
        .arg(format!("{}/*.pdf", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    pdfquote(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "output.download_file_name", "quote.txt"])
        .assert()
        .success();

    pdfquote(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "output.download_file_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"quote.txt\""));

    let pdf = write_pdf(dir.path(), "quote.pdf", QUOTE_PAGES);
    pdfquote(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("process")
        .arg(&pdf)
        .arg("--save")
        .assert()
        .success();
    assert!(dir.path().join("quote.txt").exists());
}
