//! Classifying
//!
//!     Assigns syntactic-role labels to the token stream.
//!
//!     - [label]: the closed label vocabulary
//!     - [context]: the stack of nested syntactic regions
//!     - [statement]: per-container statement state
//!     - [transitions]: pure decision tables (what a brace opens, which label a line gets)
//!     - [classifier]: the pull-based driver tying scanner, stack and tables together

pub mod classifier;
pub mod context;
pub mod label;
pub mod statement;
pub mod transitions;

pub use classifier::{ClassifiedToken, Classifier};
pub use context::{ContextFrame, ContextKind, ContextStack, ListState, StackUnderflow};
pub use label::{Label, UnknownLabel};
pub use statement::{After, Pending, StatementState};
