//! # cxxstyle
//!
//! A lexical-structure classifier for C++ source.
//!
//! The crate scans raw C++ text and tags line-initial and construct-boundary tokens with
//! the syntactic role they play (`class-open`, `arglist-intro`, `case-label`, ...), the
//! same vocabulary editors use to drive indentation. It tracks just enough nesting to
//! disambiguate identical punctuation and never builds an AST.
//!
//! File Layout
//!
//! src/cxx
//!   ├── location       1-based line:column positions
//!   ├── token          Token model and the lossless detokenizer
//!   ├── lexing         logos base tokenization and the pull scanner
//!   ├── classifying    Context stack, transition tables and the label classifier
//!   ├── diagnostics    Non-fatal recovery warnings
//!   ├── options        Classifier knobs (loaded by the cxxstyle-config crate)
//!   ├── report         Flattened (line, column, len, label) records
//!   └── testing        Annotated fixture support for regression tests
//!
//! For the fixture conventions, see the [testing module](cxx::testing).

pub mod cxx;

pub use cxx::classifying::{Classifier, Label};
pub use cxx::report::{
    classify, classify_with, Classification, ClassifyError, LabelRecord, OutputFormat,
};
