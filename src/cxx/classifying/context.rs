//! Context stack
//!
//!     Nested syntactic regions (namespace bodies, class bodies, argument lists, brace
//!     initializers...) are tracked as a stack of [ContextFrame]s. The innermost frame
//!     decides how a token is read.
//!
//!     Frames come in two families. Containers hold statements or declarations and carry a
//!     [StatementState]. Lists hold comma-separated entries and carry entry bookkeeping in
//!     [ListState]. Each frame has both; only one is ever consulted for a given kind.
//!
//!     The synthetic global frame sits at the base and is never popped: [ContextStack::pop]
//!     refuses with [StackUnderflow] instead.

use super::label::Label;
use super::statement::StatementState;
use crate::cxx::token::{Keyword, Punct};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextKind {
    Global,
    Namespace,
    Class,
    Struct,
    Enum,
    FunctionBody,
    InlineBody,
    ArgumentList,
    Paren,
    Bracket,
    InitializerList,
    BraceList,
    SwitchBody,
    CaseBlock,
    TemplateArgs,
    TryBlock,
    Block,
    CatchClause,
    ExternLangBlock,
    MemberInitList,
    InheritanceList,
}

impl ContextKind {
    /// Frames whose contents are statements or declarations.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ContextKind::Global
                | ContextKind::Namespace
                | ContextKind::Class
                | ContextKind::Struct
                | ContextKind::FunctionBody
                | ContextKind::InlineBody
                | ContextKind::SwitchBody
                | ContextKind::CaseBlock
                | ContextKind::TryBlock
                | ContextKind::Block
                | ContextKind::ExternLangBlock
        )
    }

    /// Containers holding declarations rather than executable statements.
    pub fn is_declaration_scope(self) -> bool {
        matches!(
            self,
            ContextKind::Global
                | ContextKind::Namespace
                | ContextKind::Class
                | ContextKind::Struct
                | ContextKind::ExternLangBlock
        )
    }

    pub fn is_class_body(self) -> bool {
        matches!(self, ContextKind::Class | ContextKind::Struct)
    }

    /// Containers holding executable statements.
    pub fn is_body(self) -> bool {
        self.is_container() && !self.is_declaration_scope()
    }

    /// Brace-delimited entry lists.
    pub fn is_brace_list(self) -> bool {
        matches!(
            self,
            ContextKind::BraceList | ContextKind::InitializerList | ContextKind::Enum
        )
    }

    /// Parenthesized lists.
    pub fn is_paren_list(self) -> bool {
        matches!(
            self,
            ContextKind::ArgumentList | ContextKind::Paren | ContextKind::CatchClause
        )
    }

    /// Frames opened by a `:` that end implicitly at the next `{` or `;`.
    pub fn is_implicit(self) -> bool {
        matches!(
            self,
            ContextKind::MemberInitList | ContextKind::InheritanceList
        )
    }

    /// Punctuation that closes this frame, `None` for global and implicit frames.
    pub fn closer(self) -> Option<Punct> {
        match self {
            ContextKind::Global | ContextKind::MemberInitList | ContextKind::InheritanceList => {
                None
            }
            ContextKind::ArgumentList | ContextKind::Paren | ContextKind::CatchClause => {
                Some(Punct::RParen)
            }
            ContextKind::Bracket => Some(Punct::RBracket),
            ContextKind::TemplateArgs => Some(Punct::Greater),
            _ => Some(Punct::RBrace),
        }
    }

    /// Label carried by the closing brace of this frame.
    pub fn close_label(self) -> Option<Label> {
        match self {
            ContextKind::Class | ContextKind::Struct => Some(Label::ClassClose),
            ContextKind::Namespace => Some(Label::NamespaceClose),
            ContextKind::ExternLangBlock => Some(Label::ExternLangClose),
            ContextKind::FunctionBody => Some(Label::DefunClose),
            ContextKind::InlineBody => Some(Label::InlineClose),
            ContextKind::BraceList | ContextKind::InitializerList | ContextKind::Enum => {
                Some(Label::BraceListClose)
            }
            ContextKind::Block
            | ContextKind::SwitchBody
            | ContextKind::TryBlock
            | ContextKind::CaseBlock => Some(Label::BlockClose),
            _ => None,
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextKind::Global => "global",
            ContextKind::Namespace => "namespace",
            ContextKind::Class => "class",
            ContextKind::Struct => "struct",
            ContextKind::Enum => "enum",
            ContextKind::FunctionBody => "function-body",
            ContextKind::InlineBody => "inline-body",
            ContextKind::ArgumentList => "argument-list",
            ContextKind::Paren => "paren",
            ContextKind::Bracket => "bracket",
            ContextKind::InitializerList => "initializer-list",
            ContextKind::BraceList => "brace-list",
            ContextKind::SwitchBody => "switch-body",
            ContextKind::CaseBlock => "case-block",
            ContextKind::TemplateArgs => "template-args",
            ContextKind::TryBlock => "try-block",
            ContextKind::Block => "block",
            ContextKind::CatchClause => "catch-clause",
            ContextKind::ExternLangBlock => "extern-lang-block",
            ContextKind::MemberInitList => "member-init-list",
            ContextKind::InheritanceList => "inheritance-list",
        };
        f.write_str(name)
    }
}

/// Entry bookkeeping for list frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    /// Next significant token starts an entry
    pub expect_entry: bool,
    pub entries: usize,
    /// First entry sat on the opener's line
    pub intro_on_open_line: bool,
    /// Parenthesized suffix of a completed declarator, e.g. `throw ( )`
    pub decl_suffix: bool,
}

/// One open syntactic region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFrame {
    pub kind: ContextKind,
    /// Index of the opening token in the token stream
    pub opened_at: usize,
    pub line: usize,
    pub column: usize,
    /// Control keyword owning this frame (`if` for an if-body, `switch` for a condition...)
    pub owner: Option<Keyword>,
    /// Closing this frame finishes the enclosing statement
    pub completes_statement: bool,
    /// Next statement-start line is the first in this body
    pub first_line_pending: bool,
    pub statement: StatementState,
    pub list: ListState,
}

impl ContextFrame {
    pub fn new(kind: ContextKind, opened_at: usize, line: usize, column: usize) -> Self {
        Self {
            kind,
            opened_at,
            line,
            column,
            owner: None,
            completes_statement: false,
            first_line_pending: matches!(
                kind,
                ContextKind::FunctionBody
                    | ContextKind::InlineBody
                    | ContextKind::Block
                    | ContextKind::TryBlock
                    | ContextKind::CaseBlock
            ),
            statement: StatementState::default(),
            list: ListState {
                expect_entry: true,
                ..ListState::default()
            },
        }
    }

    pub fn global() -> Self {
        Self::new(ContextKind::Global, 0, 1, 1)
    }

    pub fn with_owner(mut self, owner: Keyword) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn completing_statement(mut self) -> Self {
        self.completes_statement = true;
        self
    }

    pub fn as_decl_suffix(mut self) -> Self {
        self.list.decl_suffix = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot pop the global context")]
pub struct StackUnderflow;

/// Stack of open frames with the global frame at the base.
#[derive(Debug, Clone)]
pub struct ContextStack {
    global: ContextFrame,
    frames: Vec<ContextFrame>,
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStack {
    pub fn new() -> Self {
        Self {
            global: ContextFrame::global(),
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: ContextFrame) {
        tracing::trace!(kind = %frame.kind, line = frame.line, depth = self.depth(), "push");
        self.frames.push(frame);
    }

    /// Pop the innermost frame. The global frame stays.
    pub fn pop(&mut self) -> Result<ContextFrame, StackUnderflow> {
        let frame = self.frames.pop().ok_or(StackUnderflow)?;
        tracing::trace!(kind = %frame.kind, depth = self.depth(), "pop");
        Ok(frame)
    }

    pub fn top(&self) -> &ContextFrame {
        self.frames.last().unwrap_or(&self.global)
    }

    pub fn top_mut(&mut self) -> &mut ContextFrame {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => &mut self.global,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len() + 1
    }

    /// Only the global frame is open.
    pub fn is_balanced(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from the base outwards, global first.
    pub fn frames(&self) -> impl DoubleEndedIterator<Item = &ContextFrame> {
        std::iter::once(&self.global).chain(self.frames.iter())
    }

    /// Innermost statement container.
    pub fn container(&self) -> &ContextFrame {
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.kind.is_container())
            .unwrap_or(&self.global)
    }

    pub fn container_mut(&mut self) -> &mut ContextFrame {
        match self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.kind.is_container())
        {
            Some(frame) => frame,
            None => &mut self.global,
        }
    }

    /// Any open frame of the given kind.
    pub fn contains(&self, kind: ContextKind) -> bool {
        self.frames().any(|frame| frame.kind == kind)
    }

    /// Distance from the top to the nearest frame closed by `closer`, if any.
    pub fn find_closable(&self, closer: Punct) -> Option<usize> {
        self.frames
            .iter()
            .rev()
            .position(|frame| frame.kind.closer() == Some(closer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_frame_cannot_be_popped() {
        let mut stack = ContextStack::new();
        assert_eq!(stack.pop(), Err(StackUnderflow));
        assert_eq!(stack.top().kind, ContextKind::Global);
        assert!(stack.is_balanced());
    }

    #[test]
    fn test_push_pop_and_container_lookup() {
        let mut stack = ContextStack::new();
        stack.push(ContextFrame::new(ContextKind::FunctionBody, 3, 2, 1));
        stack.push(ContextFrame::new(ContextKind::ArgumentList, 7, 3, 8));
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.container().kind, ContextKind::FunctionBody);
        assert_eq!(stack.find_closable(Punct::RParen), Some(0));
        assert_eq!(stack.find_closable(Punct::RBrace), Some(1));
        assert_eq!(stack.find_closable(Punct::RBracket), None);

        let popped = stack.pop().expect("pop");
        assert_eq!(popped.kind, ContextKind::ArgumentList);
        assert_eq!(popped.opened_at, 7);
    }

    #[test]
    fn test_first_line_pending_only_for_bodies() {
        assert!(ContextFrame::new(ContextKind::Block, 0, 1, 1).first_line_pending);
        assert!(!ContextFrame::new(ContextKind::Class, 0, 1, 1).first_line_pending);
        assert!(!ContextFrame::new(ContextKind::SwitchBody, 0, 1, 1).first_line_pending);
    }

    #[test]
    fn test_kind_families() {
        assert!(ContextKind::Namespace.is_declaration_scope());
        assert!(ContextKind::CaseBlock.is_body());
        assert!(!ContextKind::Class.is_body());
        assert!(ContextKind::Enum.is_brace_list());
        assert_eq!(ContextKind::MemberInitList.closer(), None);
        assert_eq!(ContextKind::TemplateArgs.closer(), Some(Punct::Greater));
        assert_eq!(ContextKind::SwitchBody.close_label(), Some(Label::BlockClose));
    }
}
