//! Transition and label tables
//!
//!     Pure functions from context state to a decision. The classifier driver feeds them
//!     the innermost frame and the statement state, then applies the result to the stack.
//!     Keeping the tables apart from the driver keeps every label decision in one place
//!     and testable without a token stream.

use super::context::{ContextFrame, ContextKind, ListState};
use super::label::Label;
use super::statement::Pending;
use crate::cxx::token::Keyword;

/// Frame to push for a `{` read in the middle of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceOpening {
    pub kind: ContextKind,
    pub label: Option<Label>,
    pub completes_statement: bool,
}

impl BraceOpening {
    const fn new(kind: ContextKind, label: Option<Label>, completes_statement: bool) -> Self {
        Self {
            kind,
            label,
            completes_statement,
        }
    }
}

/// Decide what a mid-statement `{` opens.
///
/// `after_parameters` is true when the previous significant token closed a parameter list
/// (or was `mutable`), which makes a brace with no other announcement a lambda body.
pub fn brace_in_statement(
    scope: ContextKind,
    pending: Pending,
    after_parameters: bool,
) -> BraceOpening {
    use ContextKind::*;
    match pending {
        Pending::ClassHead(Keyword::Struct) => BraceOpening::new(Struct, Some(Label::ClassOpen), false),
        Pending::ClassHead(_) => BraceOpening::new(Class, Some(Label::ClassOpen), false),
        Pending::NamespaceHead => BraceOpening::new(Namespace, Some(Label::NamespaceOpen), true),
        Pending::ExternHead => BraceOpening::new(ExternLangBlock, Some(Label::ExternLangOpen), true),
        Pending::EnumHead => BraceOpening::new(Enum, Some(Label::BraceListOpen), false),
        Pending::Declarator if scope.is_class_body() => {
            BraceOpening::new(InlineBody, Some(Label::InlineOpen), true)
        }
        Pending::Declarator if scope.is_declaration_scope() => {
            BraceOpening::new(FunctionBody, Some(Label::DefunOpen), true)
        }
        Pending::Assignment => BraceOpening::new(BraceList, Some(Label::BraceListOpen), false),
        _ if after_parameters => BraceOpening::new(Block, None, false),
        _ => BraceOpening::new(InitializerList, Some(Label::BraceListOpen), false),
    }
}

/// Frame and label for the `{` of a control statement's compound substatement.
pub fn substatement_brace(owner: Keyword, scope: ContextKind) -> (ContextKind, Option<Label>) {
    match owner {
        Keyword::Switch => (ContextKind::SwitchBody, Some(Label::SubstatementOpen)),
        // Function-try-blocks at namespace scope carry no label
        Keyword::Try if scope.is_declaration_scope() => (ContextKind::TryBlock, None),
        Keyword::Try => (ContextKind::TryBlock, Some(Label::SubstatementOpen)),
        _ => (ContextKind::Block, Some(Label::SubstatementOpen)),
    }
}

/// Label for the first line of a statement, by container.
pub fn statement_start_label(frame: &ContextFrame, keyword: Option<Keyword>) -> Label {
    use ContextKind::*;
    match frame.kind {
        Global => Label::TopmostIntro,
        Namespace => Label::Innamespace,
        ExternLangBlock => Label::InexternLang,
        Class | Struct => match keyword {
            Some(keyword) if keyword.is_access_specifier() => Label::AccessLabel,
            Some(Keyword::Friend) => Label::Friend,
            _ => Label::Inclass,
        },
        _ if frame.statement.after_case_label => Label::StatementCaseIntro,
        FunctionBody | InlineBody if frame.first_line_pending => Label::DefunBlockIntro,
        Block | TryBlock | CaseBlock if frame.first_line_pending => Label::StatementBlockIntro,
        _ => Label::Statement,
    }
}

/// Label for a line that continues an unfinished statement.
pub fn continuation_label(scope: ContextKind, pending: Pending) -> Label {
    match pending {
        Pending::Declarator => Label::FuncDeclCont,
        _ if scope.is_declaration_scope() => Label::TopmostIntroCont,
        _ => Label::StatementCont,
    }
}

/// Label for a token inside a list frame.
///
/// `entry_start` marks the first token of an entry; `list.entries` already counts it.
pub fn list_label(
    kind: ContextKind,
    list: &ListState,
    entry_start: bool,
    line_initial: bool,
    opens_brace: bool,
) -> Option<Label> {
    match kind {
        k if k.is_paren_list() => line_initial.then(|| {
            if entry_start && list.entries == 1 {
                Label::ArglistIntro
            } else if list.intro_on_open_line {
                Label::ArglistContNonempty
            } else {
                Label::ArglistCont
            }
        }),
        k if k.is_brace_list() => (entry_start && line_initial).then(|| {
            if list.entries == 1 {
                Label::BraceListIntro
            } else if opens_brace {
                Label::BraceEntryOpen
            } else {
                Label::BraceListEntry
            }
        }),
        ContextKind::MemberInitList => entry_start.then(|| {
            if list.entries == 1 {
                Label::MemberInitIntro
            } else {
                Label::MemberInitCont
            }
        }),
        ContextKind::InheritanceList => entry_start.then(|| {
            if list.entries == 1 {
                Label::InherIntro
            } else {
                Label::InherCont
            }
        }),
        ContextKind::TemplateArgs => line_initial.then_some(Label::TemplateArgsCont),
        _ => None,
    }
}

/// Label for the token closing `frame`.
///
/// `alone_on_line` means nothing but whitespace or comments shares the closer's line;
/// a `)` is `arglist-close` only then.
pub fn close_label(frame: &ContextFrame, line_initial: bool, alone_on_line: bool) -> Option<Label> {
    match frame.kind {
        k if k.is_paren_list() && frame.list.decl_suffix => {
            line_initial.then_some(Label::FuncDeclCont)
        }
        k if k.is_paren_list() => alone_on_line.then_some(Label::ArglistClose),
        ContextKind::TemplateArgs => line_initial.then_some(Label::TemplateArgsCont),
        k => k.close_label(),
    }
}
