//! Syntactic-role labels
//!
//! The closed vocabulary a token span can be tagged with. Spellings follow the
//! conventional C/C++ indentation-engine names, so fixtures annotated for an editor's
//! indenter can be checked against this classifier directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Label {
    AccessLabel,
    ArglistIntro,
    ArglistCont,
    ArglistContNonempty,
    ArglistClose,
    BlockClose,
    BraceEntryOpen,
    BraceListOpen,
    BraceListClose,
    BraceListIntro,
    BraceListEntry,
    /// Inner line of a block comment
    C,
    CaseLabel,
    CatchClause,
    ClassOpen,
    ClassClose,
    CommentIntro,
    CppMacro,
    CppMacroCont,
    DefunOpen,
    DefunClose,
    DefunBlockIntro,
    DoWhileClosure,
    ElseClause,
    ExternLangOpen,
    ExternLangClose,
    Friend,
    FuncDeclCont,
    Inclass,
    InexternLang,
    InherIntro,
    InherCont,
    InlineOpen,
    InlineClose,
    Innamespace,
    /// Goto label
    Label,
    MemberInitIntro,
    MemberInitCont,
    NamespaceOpen,
    NamespaceClose,
    Statement,
    StatementBlockIntro,
    StatementCaseIntro,
    StatementCaseOpen,
    StatementCont,
    StreamOp,
    /// Inner line of a multi-line string literal
    String,
    Substatement,
    SubstatementOpen,
    TemplateArgsCont,
    TopmostIntro,
    TopmostIntroCont,
}

impl Label {
    pub const ALL: [Label; 52] = [
        Label::AccessLabel,
        Label::ArglistIntro,
        Label::ArglistCont,
        Label::ArglistContNonempty,
        Label::ArglistClose,
        Label::BlockClose,
        Label::BraceEntryOpen,
        Label::BraceListOpen,
        Label::BraceListClose,
        Label::BraceListIntro,
        Label::BraceListEntry,
        Label::C,
        Label::CaseLabel,
        Label::CatchClause,
        Label::ClassOpen,
        Label::ClassClose,
        Label::CommentIntro,
        Label::CppMacro,
        Label::CppMacroCont,
        Label::DefunOpen,
        Label::DefunClose,
        Label::DefunBlockIntro,
        Label::DoWhileClosure,
        Label::ElseClause,
        Label::ExternLangOpen,
        Label::ExternLangClose,
        Label::Friend,
        Label::FuncDeclCont,
        Label::Inclass,
        Label::InexternLang,
        Label::InherIntro,
        Label::InherCont,
        Label::InlineOpen,
        Label::InlineClose,
        Label::Innamespace,
        Label::Label,
        Label::MemberInitIntro,
        Label::MemberInitCont,
        Label::NamespaceOpen,
        Label::NamespaceClose,
        Label::Statement,
        Label::StatementBlockIntro,
        Label::StatementCaseIntro,
        Label::StatementCaseOpen,
        Label::StatementCont,
        Label::StreamOp,
        Label::String,
        Label::Substatement,
        Label::SubstatementOpen,
        Label::TemplateArgsCont,
        Label::TopmostIntro,
        Label::TopmostIntroCont,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::AccessLabel => "access-label",
            Label::ArglistIntro => "arglist-intro",
            Label::ArglistCont => "arglist-cont",
            Label::ArglistContNonempty => "arglist-cont-nonempty",
            Label::ArglistClose => "arglist-close",
            Label::BlockClose => "block-close",
            Label::BraceEntryOpen => "brace-entry-open",
            Label::BraceListOpen => "brace-list-open",
            Label::BraceListClose => "brace-list-close",
            Label::BraceListIntro => "brace-list-intro",
            Label::BraceListEntry => "brace-list-entry",
            Label::C => "c",
            Label::CaseLabel => "case-label",
            Label::CatchClause => "catch-clause",
            Label::ClassOpen => "class-open",
            Label::ClassClose => "class-close",
            Label::CommentIntro => "comment-intro",
            Label::CppMacro => "cpp-macro",
            Label::CppMacroCont => "cpp-macro-cont",
            Label::DefunOpen => "defun-open",
            Label::DefunClose => "defun-close",
            Label::DefunBlockIntro => "defun-block-intro",
            Label::DoWhileClosure => "do-while-closure",
            Label::ElseClause => "else-clause",
            Label::ExternLangOpen => "extern-lang-open",
            Label::ExternLangClose => "extern-lang-close",
            Label::Friend => "friend",
            Label::FuncDeclCont => "func-decl-cont",
            Label::Inclass => "inclass",
            Label::InexternLang => "inextern-lang",
            Label::InherIntro => "inher-intro",
            Label::InherCont => "inher-cont",
            Label::InlineOpen => "inline-open",
            Label::InlineClose => "inline-close",
            Label::Innamespace => "innamespace",
            Label::Label => "label",
            Label::MemberInitIntro => "member-init-intro",
            Label::MemberInitCont => "member-init-cont",
            Label::NamespaceOpen => "namespace-open",
            Label::NamespaceClose => "namespace-close",
            Label::Statement => "statement",
            Label::StatementBlockIntro => "statement-block-intro",
            Label::StatementCaseIntro => "statement-case-intro",
            Label::StatementCaseOpen => "statement-case-open",
            Label::StatementCont => "statement-cont",
            Label::StreamOp => "stream-op",
            Label::String => "string",
            Label::Substatement => "substatement",
            Label::SubstatementOpen => "substatement-open",
            Label::TemplateArgsCont => "template-args-cont",
            Label::TopmostIntro => "topmost-intro",
            Label::TopmostIntroCont => "topmost-intro-cont",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label `{0}`")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_parses_back() {
        for label in Label::ALL {
            assert_eq!(label.as_str().parse::<Label>(), Ok(label));
        }
    }

    #[test]
    fn test_serde_spelling_matches_display() {
        for label in Label::ALL {
            let json = serde_json::to_string(&label).expect("serialize");
            assert_eq!(json, format!("\"{}\"", label));
        }
    }

    #[test]
    fn test_unknown_label() {
        let err = "arglist".parse::<Label>().expect_err("should fail");
        assert_eq!(err.to_string(), "unknown label `arglist`");
    }
}
