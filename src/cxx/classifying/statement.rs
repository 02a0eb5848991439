//! Per-container statement state
//!
//! Each container frame tracks the statement currently being read: how many significant
//! tokens it has seen, what construct its leading tokens announced ([Pending]), which
//! control statements are waiting for their substatement to finish, and what the
//! previous completed statement allows next ([After]).

use crate::cxx::token::Keyword;

/// Construct announced by the tokens read so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    #[default]
    None,
    /// `class`/`struct`/`union` seen, waiting for `{`, `:` or `;`
    ClassHead(Keyword),
    EnumHead,
    NamespaceHead,
    /// `extern` seen; a string literal turns it into a linkage specification
    ExternKeyword,
    /// `extern "C"` waiting for `{`
    ExternHead,
    /// `template` waiting for `<`
    TemplateHead,
    /// A parameter list closed in declaration scope
    Declarator,
    /// Control keyword waiting for its parenthesized condition
    Condition(Keyword),
    /// Condition (or `do`/`else`/`try`) complete, substatement expected
    AfterCondition(Keyword),
    /// `while` closing a `do` loop
    DoWhileTail,
    /// `=` seen; a `{` opens a brace list
    Assignment,
    /// Inside an initializer expression; parameter lists here are calls
    Initializer,
    CaseLabel,
    AccessLabel,
    GotoLabel,
}

/// What a just-completed statement permits as the next statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum After {
    #[default]
    Nothing,
    /// An `if` substatement finished
    ElseAllowed,
    /// A `do` substatement finished
    WhileAllowed,
    /// A `try` block or `catch` handler finished
    CatchAllowed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementState {
    pub tokens_seen: usize,
    pub pending: Pending,
    pub after: After,
    /// Control statements whose substatement is in progress, outermost first
    pub owners: Vec<Keyword>,
    /// Line-initial `<<`/`>>` operators seen in this statement
    pub stream_ops: usize,
    /// Open `?` awaiting their `:`
    pub ternary: usize,
    /// A case label just ended; the next line introduces the case body
    pub after_case_label: bool,
}

impl StatementState {
    /// No token of the current (sub)statement has been read yet.
    pub fn at_start(&self) -> bool {
        self.tokens_seen == 0 && self.pending == Pending::None
    }

    /// Start the substatement of a control keyword. The owners chain survives.
    pub fn begin_substatement(&mut self, owner: Keyword) {
        self.owners.push(owner);
        self.tokens_seen = 0;
        self.pending = Pending::None;
        self.stream_ops = 0;
        self.ternary = 0;
    }

    /// End the current statement, including any control statements it was the body of.
    pub fn complete(&mut self) {
        self.after = self
            .owners
            .iter()
            .rev()
            .find_map(|owner| match owner {
                Keyword::If => Some(After::ElseAllowed),
                Keyword::Do => Some(After::WhileAllowed),
                Keyword::Try | Keyword::Catch => Some(After::CatchAllowed),
                _ => None,
            })
            .unwrap_or(After::Nothing);
        self.owners.clear();
        self.tokens_seen = 0;
        self.pending = Pending::None;
        self.stream_ops = 0;
        self.ternary = 0;
    }

    /// Restart after a label (`case x:`, `public:`, `again:`) without touching `after`.
    pub fn restart(&mut self) {
        self.tokens_seen = 0;
        self.pending = Pending::None;
        self.stream_ops = 0;
        self.ternary = 0;
    }

    /// Consume the permission left by the previous statement.
    pub fn take_after(&mut self) -> After {
        std::mem::take(&mut self.after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_after_if_allows_else() {
        let mut state = StatementState::default();
        state.tokens_seen = 3;
        state.begin_substatement(Keyword::If);
        assert!(state.at_start());
        state.tokens_seen = 2;
        state.complete();
        assert_eq!(state.after, After::ElseAllowed);
        assert!(state.owners.is_empty());
        assert_eq!(state.take_after(), After::ElseAllowed);
        assert_eq!(state.after, After::Nothing);
    }

    #[test]
    fn test_innermost_relevant_owner_wins() {
        let mut state = StatementState::default();
        state.begin_substatement(Keyword::If);
        state.begin_substatement(Keyword::While);
        state.complete();
        assert_eq!(state.after, After::ElseAllowed);

        state.begin_substatement(Keyword::Do);
        state.complete();
        assert_eq!(state.after, After::WhileAllowed);
    }

    #[test]
    fn test_plain_statement_allows_nothing() {
        let mut state = StatementState {
            after: After::CatchAllowed,
            ..StatementState::default()
        };
        state.tokens_seen = 4;
        state.complete();
        assert_eq!(state.after, After::Nothing);
    }
}
