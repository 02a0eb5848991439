//! Classification output
//!
//! [classify] runs a [Classifier] to completion and flattens its tokens into
//! [LabelRecord]s, the `(line, column, len, label)` tuples external tools consume. The
//! call is atomic: a lexical error anywhere returns `Err` and no records.

use crate::cxx::classifying::{ClassifiedToken, Classifier, Label};
use crate::cxx::diagnostics::Diagnostic;
use crate::cxx::lexing::LexError;
use crate::cxx::options::ClassifierOptions;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// One labelled span. `len` counts characters on the record's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub line: usize,
    pub column: usize,
    pub len: usize,
    pub label: Option<Label>,
}

impl LabelRecord {
    /// Records for one classified token: the token itself, then one per continuation
    /// line of a multi-line token.
    pub fn from_classified(
        classified: &ClassifiedToken<'_>,
        options: &ClassifierOptions,
    ) -> Vec<LabelRecord> {
        let token = &classified.token;
        if token.is_trivia() {
            return Vec::new();
        }
        let mut records = Vec::new();
        if classified.label.is_some() || options.include_unlabeled {
            let first = token.text.split('\n').next().unwrap_or_default();
            records.push(LabelRecord {
                line: token.line,
                column: token.column,
                len: first.trim_end_matches('\r').chars().count(),
                label: classified.label,
            });
        }
        if let Some(continuation) = classified.continuation {
            records.extend(classified.continuation_lines().map(|(line, text)| LabelRecord {
                line,
                column: 1,
                len: text.chars().count(),
                label: Some(continuation),
            }));
        }
        records
    }
}

/// How a [Classification] is rendered for consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `line:column label`, one labelled record per line
    #[default]
    Records,
    /// Records and diagnostics as pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub records: Vec<LabelRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification {
    /// Labels of every record on a line, in column order.
    pub fn labels_on_line(&self, line: usize) -> Vec<Label> {
        self.records
            .iter()
            .filter(|record| record.line == line)
            .filter_map(|record| record.label)
            .collect()
    }

    /// Labelled records as `line:column label` lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            if let Some(label) = record.label {
                let _ = writeln!(out, "{}:{} {}", record.line, record.column, label);
            }
        }
        out.truncate(out.trim_end().len());
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_as(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Records => Ok(self.render()),
            OutputFormat::Json => self.to_json(),
        }
    }
}

/// Classify a whole buffer with default options.
pub fn classify(source: &str) -> Result<Classification, ClassifyError> {
    classify_with(source, &ClassifierOptions::default())
}

pub fn classify_with(
    source: &str,
    options: &ClassifierOptions,
) -> Result<Classification, ClassifyError> {
    let mut classifier = Classifier::with_options(source, options.clone());
    let mut records = Vec::new();
    for item in classifier.by_ref() {
        let classified = item?;
        records.extend(LabelRecord::from_classified(&classified, options));
    }
    Ok(Classification {
        records,
        diagnostics: classifier.into_diagnostics(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cxx::location::Position;

    #[test]
    fn test_unterminated_comment_yields_no_records() {
        let err = classify("int x;\n/* comment").expect_err("should fail");
        assert_eq!(
            err,
            ClassifyError::Lex(LexError::UnterminatedComment {
                position: Position::new(2, 1)
            })
        );
        assert_eq!(err.to_string(), "unterminated block comment starting at 2:1");
    }

    #[test]
    fn test_continuation_records() {
        let classification = classify("/*\n * x\n */\nint y;\n").expect("classify");
        assert_eq!(classification.labels_on_line(1), vec![Label::CommentIntro]);
        assert_eq!(classification.labels_on_line(2), vec![Label::C]);
        assert_eq!(
            classification.records[1],
            LabelRecord {
                line: 2,
                column: 1,
                len: 4,
                label: Some(Label::C)
            }
        );
        assert_eq!(classification.labels_on_line(4), vec![Label::TopmostIntro]);
    }

    #[test]
    fn test_unlabelled_records_can_be_dropped() {
        let options = ClassifierOptions::labelled_only();
        let classification = classify_with("int x;\n", &options).expect("classify");
        assert_eq!(classification.records.len(), 1);

        let classification = classify("int x;\n").expect("classify");
        assert_eq!(classification.records.len(), 3);
        assert_eq!(classification.records[1].label, None);
    }

    #[test]
    fn test_continuation_labels_can_be_disabled() {
        let options = ClassifierOptions {
            continuation_labels: false,
            ..ClassifierOptions::default()
        };
        let classification = classify_with("#define A \\\n  1\n", &options).expect("classify");
        assert_eq!(classification.labels_on_line(2), Vec::<Label>::new());
    }

    #[test]
    fn test_render_as_selects_format() {
        let classification = classify("int x;").expect("classify");
        let records = classification
            .render_as(OutputFormat::Records)
            .expect("render");
        assert_eq!(records, "1:1 topmost-intro");
        let json = classification.render_as(OutputFormat::Json).expect("render");
        assert_eq!(json, classification.to_json().expect("json"));
    }

    #[test]
    fn test_json_output() {
        let classification = classify("int x;").expect("classify");
        let json = classification.to_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["records"][0]["label"], "topmost-intro");
        assert_eq!(value["records"][0]["len"], 3);
        assert!(value["records"][1]["label"].is_null());
    }
}
