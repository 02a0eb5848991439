//! Annotated fixture support
//!
//!     Regression fixtures are plain C++ files whose comments carry the expected label of
//!     the line they sit on:
//!
//!         int hoge(
//!             int x, // <- arglist-intro
//!             int y  // <- arglist-cont
//!             )      // <- arglist-close
//!
//!     An annotation inside a block comment refers to the comment line it appears on, so a
//!     multi-line comment can annotate its own continuation lines (`* <- c`).
//!
//!     Annotations are found with the scanner, never by text search, so a `<-` inside a
//!     string literal is not mistaken for one.
//!
//! Module Organization
//!
//!     - [fixtures]: loading fixture files by name from `tests/fixtures`
//!
//! Usage
//!
//!     ```rust,ignore
//!     use cxxstyle::cxx::testing::{assert_annotations, fixtures::Fixture};
//!
//!     let source = Fixture::named("format.cpp").source()?;
//!     assert_annotations(&source);
//!     ```

pub mod fixtures;

use crate::cxx::classifying::Label;
use crate::cxx::lexing::{LexError, Scanner};
use crate::cxx::report::{classify, Classification, ClassifyError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<-\s*([a-z][a-z-]*)").expect("annotation pattern is valid"));

/// An expected label for one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub line: usize,
    pub label: Label,
}

/// An annotation whose label was not produced on its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: Annotation,
    pub actual: Vec<Label>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actual: Vec<&str> = self.actual.iter().map(|label| label.as_str()).collect();
        write!(
            f,
            "line {}: expected {}, got [{}]",
            self.expected.line,
            self.expected.label,
            actual.join(", ")
        )
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("unknown label `{name}` annotated on line {line}")]
    UnknownLabel { line: usize, name: String },
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Collect every `<- label` annotation from the comments of `source`.
pub fn parse_annotations(source: &str) -> Result<Vec<Annotation>, FixtureError> {
    let mut annotations = Vec::new();
    for token in Scanner::new(source) {
        let token = token?;
        if !token.is_comment() {
            continue;
        }
        for (offset, text) in token.text.split('\n').enumerate() {
            let line = token.line + offset;
            for captures in ANNOTATION.captures_iter(text) {
                let name = &captures[1];
                let label = name.parse().map_err(|_| FixtureError::UnknownLabel {
                    line,
                    name: name.to_string(),
                })?;
                annotations.push(Annotation { line, label });
            }
        }
    }
    Ok(annotations)
}

/// Annotations not matched by a record on their line.
pub fn mismatches(annotations: &[Annotation], classification: &Classification) -> Vec<Mismatch> {
    annotations
        .iter()
        .filter_map(|annotation| {
            let actual = classification.labels_on_line(annotation.line);
            (!actual.contains(&annotation.label)).then(|| Mismatch {
                expected: *annotation,
                actual,
            })
        })
        .collect()
}

/// Classify `source` and compare against its own annotations.
pub fn check_annotations(source: &str) -> Result<Vec<Mismatch>, FixtureError> {
    let annotations = parse_annotations(source)?;
    let classification = classify(source)?;
    Ok(mismatches(&annotations, &classification))
}

/// Assert that every annotation in `source` holds.
///
/// # Panics
///
/// Panics listing every mismatched line, or if the fixture fails to scan.
pub fn assert_annotations(source: &str) {
    let mismatches = match check_annotations(source) {
        Ok(mismatches) => mismatches,
        Err(err) => panic!("fixture could not be checked: {err}"),
    };
    if mismatches.is_empty() {
        return;
    }
    let report: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
    panic!(
        "{} annotation(s) did not hold:\n  {}",
        mismatches.len(),
        report.join("\n  ")
    );
}
