//! Fixture helpers for the CLI tests.

use std::path::{Path, PathBuf};

use pdfquote_core::test_support::build_pdf;

/// Write a fixture PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages)).unwrap();
    path
}
