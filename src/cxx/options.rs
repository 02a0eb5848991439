//! Classifier options
//!
//! Plain values consumed by the classifier. Loading them from files is the job of the
//! `cxxstyle-config` crate; the core never touches the filesystem.

use serde::{Deserialize, Serialize};

/// Default number of significant tokens inspected when deciding whether `<` opens a
/// template argument list.
pub const DEFAULT_TEMPLATE_LOOKAHEAD: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Emit `c`, `string` and `cpp-macro-cont` records for the inner lines of multi-line
    /// tokens.
    pub continuation_labels: bool,
    /// Keep records whose label is none.
    pub include_unlabeled: bool,
    /// Lookahead window for the template `<` heuristic. Zero disables it, so only
    /// `template <` opens template arguments.
    pub template_lookahead: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            continuation_labels: true,
            include_unlabeled: true,
            template_lookahead: DEFAULT_TEMPLATE_LOOKAHEAD,
        }
    }
}

impl ClassifierOptions {
    pub fn labelled_only() -> Self {
        Self {
            include_unlabeled: false,
            ..Self::default()
        }
    }
}
