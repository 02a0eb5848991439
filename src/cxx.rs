//! Main module for cxxstyle library functionality
//!
//! The pipeline is pull based: the [report](report) layer drives a
//! [Classifier](classifying::Classifier), which pulls one token at a time from the
//! [Scanner](lexing::Scanner). Nothing is materialized up front besides the source text.

pub mod classifying;
pub mod diagnostics;
pub mod lexing;
pub mod location;
pub mod options;
pub mod report;
pub mod testing;
pub mod token;
