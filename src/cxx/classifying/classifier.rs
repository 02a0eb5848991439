//! Label classifier
//!
//!     The classifier pulls tokens from the [Scanner] one at a time, updates the
//!     [ContextStack] on every brace, paren, bracket and keyword transition, and attaches
//!     at most one [Label] to each token. It is forward-only: once a token has been
//!     returned its label never changes.
//!
//!     A few decisions need to see past the current token: whether code follows a function
//!     body's `{` on the same line, whether an identifier at statement start is a goto
//!     label, and whether `<` opens template arguments. Those peek into a small lookahead
//!     buffer filled from the scanner; buffered tokens are then handed out in order.
//!
//!     Malformed structure never stops classification. Closers with no opener are
//!     ignored, frames skipped over by a closer are popped, and keywords missing their
//!     context are left unlabelled; each case records a [Diagnostic]. Only lexical errors
//!     end the stream.

use super::context::{ContextFrame, ContextKind, ContextStack};
use super::label::Label;
use super::statement::{After, Pending};
use super::transitions;
use crate::cxx::diagnostics::{Diagnostic, DiagnosticKind};
use crate::cxx::lexing::{LexError, Scanner};
use crate::cxx::location::Position;
use crate::cxx::options::ClassifierOptions;
use crate::cxx::report::ClassifyError;
use crate::cxx::token::{Keyword, Punct, Token, TokenKind};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// A token with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedToken<'a> {
    pub token: Token<'a>,
    pub label: Option<Label>,
    /// Label for each inner line of a multi-line token
    pub continuation: Option<Label>,
}

impl<'a> ClassifiedToken<'a> {
    /// Physical lines after the first one covered by this token, with their text.
    pub fn continuation_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        let first_line = self.token.line;
        self.token
            .text
            .split('\n')
            .enumerate()
            .skip(1)
            .map(move |(offset, text)| (first_line + offset, text.trim_end_matches('\r')))
    }
}

pub struct Classifier<'a> {
    scanner: Scanner<'a>,
    lookahead: VecDeque<Result<Token<'a>, LexError>>,
    options: ClassifierOptions,
    stack: ContextStack,
    diagnostics: Vec<Diagnostic>,
    /// Kinds of the last two significant tokens, most recent first
    prev: Option<TokenKind>,
    prev2: Option<TokenKind>,
    index: usize,
    labelled: usize,
    finished: bool,
}

impl<'a> Classifier<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ClassifierOptions::default())
    }

    pub fn with_options(source: &'a str, options: ClassifierOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            lookahead: VecDeque::new(),
            options,
            stack: ContextStack::new(),
            diagnostics: Vec::new(),
            prev: None,
            prev2: None,
            index: 0,
            labelled: 0,
            finished: false,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn stack(&self) -> &ContextStack {
        &self.stack
    }

    fn pull(&mut self) -> Option<Result<Token<'a>, LexError>> {
        self.lookahead
            .pop_front()
            .or_else(|| self.scanner.next_token())
    }

    /// Feed upcoming tokens to `visit` until it returns false, input ends or a lexical
    /// error is reached. Tokens stay buffered for later pulls.
    fn scan_ahead(&mut self, mut visit: impl FnMut(&Token<'a>) -> bool) {
        let mut index = 0;
        loop {
            if index == self.lookahead.len() {
                match self.scanner.next_token() {
                    Some(item) => self.lookahead.push_back(item),
                    None => return,
                }
            }
            match &self.lookahead[index] {
                Ok(token) => {
                    if !visit(token) {
                        return;
                    }
                }
                Err(_) => return,
            }
            index += 1;
        }
    }

    fn classify(&mut self, token: Token<'a>) -> ClassifiedToken<'a> {
        let continuation = self.continuation_for(&token);
        let mut label = match token.kind {
            TokenKind::Whitespace | TokenKind::Newline => None,
            TokenKind::Directive => Some(Label::CppMacro),
            TokenKind::Comment(_) => self.comment(&token),
            _ => self.significant(&token),
        };
        if token.is_significant() {
            // Concatenated literals are one unit; only the first is labelled
            if token.is_string_like()
                && matches!(
                    self.prev,
                    Some(TokenKind::StringLiteral | TokenKind::RawString)
                )
            {
                label = None;
            }
            self.prev2 = self.prev;
            self.prev = Some(token.kind);
        }
        if label.is_some() {
            self.labelled += 1;
        }
        ClassifiedToken {
            token,
            label,
            continuation,
        }
    }

    fn continuation_for(&self, token: &Token<'a>) -> Option<Label> {
        if !self.options.continuation_labels || token.end_line() == token.line {
            return None;
        }
        match token.kind {
            TokenKind::Comment(_) => Some(Label::C),
            TokenKind::StringLiteral | TokenKind::RawString | TokenKind::CharLiteral => {
                Some(Label::String)
            }
            TokenKind::Directive => Some(Label::CppMacroCont),
            _ => None,
        }
    }

    /// Comment-only lines take the position label of the statement they precede.
    fn comment(&mut self, token: &Token<'a>) -> Option<Label> {
        if !token.line_initial {
            return None;
        }
        let frame = self.stack.top_mut();
        if !frame.kind.is_container() || !frame.statement.at_start() {
            return None;
        }
        let label = if frame.kind == ContextKind::Global {
            Label::CommentIntro
        } else {
            transitions::statement_start_label(frame, None)
        };
        frame.first_line_pending = false;
        frame.statement.after_case_label = false;
        Some(label)
    }

    fn significant(&mut self, token: &Token<'a>) -> Option<Label> {
        if self.stack.top().kind.is_container() {
            self.in_container(token)
        } else {
            self.in_list(token)
        }
    }

    // ----- lists -----

    fn in_list(&mut self, token: &Token<'a>) -> Option<Label> {
        let kind = self.stack.top().kind;
        match token.punct() {
            Some(Punct::RParen | Punct::RBracket | Punct::RBrace) => return self.close(token),
            Some(Punct::Greater) if kind == ContextKind::TemplateArgs => {
                return self.close(token)
            }
            Some(Punct::Shr) if kind == ContextKind::TemplateArgs => {
                return self.close_nested_templates(token)
            }
            Some(Punct::Semicolon) if kind.is_implicit() => {
                self.end_implicit();
                return self.significant(token);
            }
            Some(Punct::LBrace) if kind.is_implicit() && self.brace_ends_list(kind) => {
                self.end_implicit();
                return self.significant(token);
            }
            _ => {}
        }
        let label = self.list_entry(token);
        self.open_in_list(token);
        label
    }

    fn brace_ends_list(&self, kind: ContextKind) -> bool {
        match kind {
            ContextKind::InheritanceList => true,
            ContextKind::MemberInitList => {
                !self.stack.top().list.expect_entry
                    && matches!(
                        self.prev,
                        Some(TokenKind::Punctuation(Punct::RParen | Punct::RBrace))
                    )
            }
            _ => false,
        }
    }

    fn end_implicit(&mut self) {
        if let Ok(frame) = self.stack.pop() {
            self.finish(&frame);
        }
    }

    fn list_entry(&mut self, token: &Token<'a>) -> Option<Label> {
        let is_comma = token.is_punct(Punct::Comma);
        let frame = self.stack.top_mut();
        let kind = frame.kind;
        let opened_line = frame.line;
        let list = &mut frame.list;
        let entry_start = list.expect_entry && !is_comma;
        if is_comma {
            list.expect_entry = true;
        }
        if entry_start {
            if list.entries == 0 {
                list.intro_on_open_line = token.line == opened_line;
            }
            list.entries += 1;
            list.expect_entry = false;
        }
        transitions::list_label(
            kind,
            list,
            entry_start,
            token.line_initial,
            token.is_punct(Punct::LBrace),
        )
    }

    fn open_in_list(&mut self, token: &Token<'a>) {
        match token.punct() {
            Some(Punct::LParen) => {
                let kind = if self.prev_ends_name() {
                    ContextKind::ArgumentList
                } else {
                    ContextKind::Paren
                };
                self.push(ContextFrame::new(kind, self.index, token.line, token.column));
            }
            Some(Punct::LBracket) => {
                self.push(ContextFrame::new(
                    ContextKind::Bracket,
                    self.index,
                    token.line,
                    token.column,
                ));
            }
            Some(Punct::LBrace) => {
                let kind = if self.prev_closes_parameters() {
                    ContextKind::Block
                } else if self.stack.top().kind.is_brace_list() {
                    ContextKind::BraceList
                } else {
                    ContextKind::InitializerList
                };
                self.push(ContextFrame::new(kind, self.index, token.line, token.column));
            }
            Some(Punct::Less) if self.prev_is_name() && self.template_closes_ahead() => {
                self.push(ContextFrame::new(
                    ContextKind::TemplateArgs,
                    self.index,
                    token.line,
                    token.column,
                ));
            }
            _ => {}
        }
    }

    // ----- statements -----

    fn in_container(&mut self, token: &Token<'a>) -> Option<Label> {
        if matches!(
            token.punct(),
            Some(Punct::RBrace | Punct::RParen | Punct::RBracket)
        ) {
            return self.close(token);
        }
        let mut substatement = false;
        let pending = self.stack.top().statement.pending;
        if let Pending::AfterCondition(owner) = pending {
            if token.is_punct(Punct::LBrace) {
                return self.open_substatement(token, owner);
            }
            self.stack.top_mut().statement.begin_substatement(owner);
            substatement = true;
        }
        if self.stack.top().statement.at_start() {
            self.statement_start(token, substatement)
        } else {
            let label = self.continuation_line(token);
            self.advance(token).or(label)
        }
    }

    /// First token of a statement or substatement.
    fn statement_start(&mut self, token: &Token<'a>, substatement: bool) -> Option<Label> {
        let keyword = token.keyword();
        let in_switch = self.stack.contains(ContextKind::SwitchBody);
        let frame = self.stack.top_mut();
        let scope = frame.kind;
        let after = frame.statement.take_after();
        let case_body = frame.statement.after_case_label;
        let positional = if substatement {
            Label::Substatement
        } else {
            transitions::statement_start_label(frame, keyword)
        };
        frame.first_line_pending = false;
        frame.statement.after_case_label = false;
        let label = token.line_initial.then_some(positional);

        match keyword {
            Some(Keyword::Else) => {
                let label = self.keyword_after(
                    token,
                    after == After::ElseAllowed,
                    Label::ElseClause,
                    "`else` without a preceding `if`",
                );
                self.begin(Pending::AfterCondition(Keyword::Else));
                return label;
            }
            Some(Keyword::Catch) => {
                let label = self.keyword_after(
                    token,
                    after == After::CatchAllowed,
                    Label::CatchClause,
                    "`catch` without a preceding `try` block",
                );
                self.begin(Pending::Condition(Keyword::Catch));
                return label;
            }
            Some(Keyword::While) if after == After::WhileAllowed => {
                self.begin(Pending::DoWhileTail);
                return token.line_initial.then_some(Label::DoWhileClosure);
            }
            Some(keyword @ (Keyword::If | Keyword::While | Keyword::For | Keyword::Switch)) => {
                self.begin(Pending::Condition(keyword));
                return label;
            }
            Some(keyword @ (Keyword::Do | Keyword::Try)) => {
                self.begin(Pending::AfterCondition(keyword));
                return label;
            }
            Some(Keyword::Case | Keyword::Default) if in_switch && scope.is_body() => {
                self.begin(Pending::CaseLabel);
                return token.line_initial.then_some(Label::CaseLabel);
            }
            Some(keyword @ (Keyword::Case | Keyword::Default)) => {
                let spelling = if keyword == Keyword::Case { "case" } else { "default" };
                self.diagnose(
                    DiagnosticKind::UnrecognizedContextTransition,
                    token,
                    format!("`{spelling}` label outside a switch body"),
                );
                self.begin(Pending::CaseLabel);
                return None;
            }
            Some(keyword) if keyword.is_access_specifier() && scope.is_class_body() => {
                self.begin(Pending::AccessLabel);
                return label;
            }
            _ => {}
        }

        if token.is_punct(Punct::LBrace) {
            let (kind, structural) = if case_body {
                (ContextKind::CaseBlock, Some(Label::StatementCaseOpen))
            } else {
                (ContextKind::Block, None)
            };
            self.stack.top_mut().statement.tokens_seen += 1;
            self.push(
                ContextFrame::new(kind, self.index, token.line, token.column)
                    .completing_statement(),
            );
            return structural.or(label);
        }

        if scope.is_body() && token.kind == TokenKind::Identifier && self.colon_follows() {
            self.begin(Pending::GotoLabel);
            return token.line_initial.then_some(Label::Label);
        }

        self.advance(token).or(label)
    }

    /// Label for a line-initial token inside an unfinished statement.
    fn continuation_line(&mut self, token: &Token<'a>) -> Option<Label> {
        if !token.line_initial {
            return None;
        }
        let frame = self.stack.top();
        let chained = frame.statement.stream_ops > 0;
        if chained && matches!(token.punct(), Some(Punct::Shl | Punct::Shr)) {
            return Some(Label::StreamOp);
        }
        Some(transitions::continuation_label(
            frame.kind,
            frame.statement.pending,
        ))
    }

    fn keyword_after(
        &mut self,
        token: &Token<'a>,
        allowed: bool,
        label: Label,
        message: &str,
    ) -> Option<Label> {
        if allowed {
            return token.line_initial.then_some(label);
        }
        self.diagnose(
            DiagnosticKind::UnrecognizedContextTransition,
            token,
            message,
        );
        None
    }

    fn begin(&mut self, pending: Pending) {
        let state = &mut self.stack.top_mut().statement;
        state.pending = pending;
        state.tokens_seen += 1;
    }

    /// Apply a token's effect on the current statement. Returns a structural label when
    /// the token opens a labelled region.
    fn advance(&mut self, token: &Token<'a>) -> Option<Label> {
        let state = &mut self.stack.top_mut().statement;
        state.tokens_seen += 1;
        let pending = state.pending;
        match token.kind {
            TokenKind::Keyword(keyword) if keyword.is_class_key() => {
                if pending != Pending::EnumHead {
                    state.pending = Pending::ClassHead(keyword);
                }
                None
            }
            TokenKind::Keyword(Keyword::Enum) => {
                state.pending = Pending::EnumHead;
                None
            }
            TokenKind::Keyword(Keyword::Namespace) => {
                state.pending = Pending::NamespaceHead;
                None
            }
            TokenKind::Keyword(Keyword::Extern) => {
                state.pending = Pending::ExternKeyword;
                None
            }
            TokenKind::Keyword(Keyword::Template) => {
                state.pending = Pending::TemplateHead;
                None
            }
            TokenKind::StringLiteral if pending == Pending::ExternKeyword => {
                state.pending = Pending::ExternHead;
                None
            }
            TokenKind::Punctuation(punct) => self.punctuation(token, punct, pending),
            _ => {
                state.pending = settle(pending);
                None
            }
        }
    }

    fn punctuation(&mut self, token: &Token<'a>, punct: Punct, pending: Pending) -> Option<Label> {
        let after_operator = self.prev == Some(TokenKind::Keyword(Keyword::Operator));
        match punct {
            Punct::Semicolon => {
                self.stack.top_mut().statement.complete();
                None
            }
            Punct::Assign if !after_operator => {
                self.stack.top_mut().statement.pending = Pending::Assignment;
                None
            }
            Punct::Question => {
                self.stack.top_mut().statement.ternary += 1;
                None
            }
            Punct::Shl | Punct::Shr => {
                let state = &mut self.stack.top_mut().statement;
                state.stream_ops += 1;
                state.pending = settle(pending);
                None
            }
            Punct::Colon => {
                self.colon(token, pending);
                None
            }
            Punct::LParen => {
                self.open_paren(token, pending);
                None
            }
            Punct::LBracket => {
                self.stack.top_mut().statement.pending = settle(pending);
                self.push(ContextFrame::new(
                    ContextKind::Bracket,
                    self.index,
                    token.line,
                    token.column,
                ));
                None
            }
            Punct::LBrace => self.open_brace(token, pending),
            Punct::Less if pending == Pending::TemplateHead => {
                self.stack.top_mut().statement.pending = Pending::None;
                self.push(ContextFrame::new(
                    ContextKind::TemplateArgs,
                    self.index,
                    token.line,
                    token.column,
                ));
                None
            }
            Punct::Less if self.prev_is_name() && self.template_closes_ahead() => {
                self.push(ContextFrame::new(
                    ContextKind::TemplateArgs,
                    self.index,
                    token.line,
                    token.column,
                ));
                None
            }
            _ => {
                self.stack.top_mut().statement.pending = settle(pending);
                None
            }
        }
    }

    fn colon(&mut self, token: &Token<'a>, pending: Pending) {
        let frame = self.stack.top_mut();
        let scope = frame.kind;
        let state = &mut frame.statement;
        if state.ternary > 0 {
            state.ternary -= 1;
            return;
        }
        let implicit = match pending {
            Pending::CaseLabel => {
                state.restart();
                state.after_case_label = true;
                None
            }
            Pending::AccessLabel | Pending::GotoLabel => {
                state.restart();
                None
            }
            Pending::ClassHead(_) => Some(ContextKind::InheritanceList),
            Pending::Declarator if scope.is_declaration_scope() => {
                Some(ContextKind::MemberInitList)
            }
            _ => None,
        };
        if let Some(kind) = implicit {
            self.push(ContextFrame::new(kind, self.index, token.line, token.column));
        }
    }

    fn open_paren(&mut self, token: &Token<'a>, pending: Pending) {
        let frame = ContextFrame::new(ContextKind::Paren, self.index, token.line, token.column);
        let frame = match pending {
            Pending::Condition(Keyword::Catch) => ContextFrame {
                kind: ContextKind::CatchClause,
                ..frame
            }
            .with_owner(Keyword::Catch),
            Pending::Condition(keyword) => frame.with_owner(keyword),
            Pending::Declarator => ContextFrame {
                kind: ContextKind::ArgumentList,
                ..frame
            }
            .as_decl_suffix(),
            _ if self.prev_ends_name() => ContextFrame {
                kind: ContextKind::ArgumentList,
                ..frame
            },
            _ => frame,
        };
        if pending == Pending::Assignment {
            self.stack.top_mut().statement.pending = Pending::Initializer;
        }
        self.push(frame);
    }

    fn open_brace(&mut self, token: &Token<'a>, pending: Pending) -> Option<Label> {
        let scope = self.stack.top().kind;
        let mut opening =
            transitions::brace_in_statement(scope, pending, self.prev_closes_parameters());
        if opening.kind == ContextKind::FunctionBody && self.code_follows_on_line() {
            opening.kind = ContextKind::InlineBody;
            opening.label = Some(Label::InlineOpen);
        }
        self.stack.top_mut().statement.pending = Pending::None;
        let mut frame = ContextFrame::new(opening.kind, self.index, token.line, token.column);
        frame.completes_statement = opening.completes_statement;
        self.push(frame);
        opening.label
    }

    fn open_substatement(&mut self, token: &Token<'a>, owner: Keyword) -> Option<Label> {
        let scope = self.stack.top().kind;
        let (kind, label) = transitions::substatement_brace(owner, scope);
        let state = &mut self.stack.top_mut().statement;
        state.begin_substatement(owner);
        state.tokens_seen = 1;
        self.push(
            ContextFrame::new(kind, self.index, token.line, token.column)
                .with_owner(owner)
                .completing_statement(),
        );
        label
    }

    // ----- closing -----

    fn close(&mut self, token: &Token<'a>) -> Option<Label> {
        let closer = match token.punct() {
            Some(Punct::Shr) => Punct::Greater,
            Some(punct) => punct,
            None => return None,
        };
        let Some(depth) = self.stack.find_closable(closer) else {
            self.diagnose(
                DiagnosticKind::UnbalancedDelimiter,
                token,
                format!("`{}` has no matching opener", token.text),
            );
            return None;
        };
        for _ in 0..depth {
            let Ok(frame) = self.stack.pop() else { break };
            if !frame.kind.is_implicit() {
                self.diagnose(
                    DiagnosticKind::UnbalancedDelimiter,
                    token,
                    format!(
                        "{} opened at {}:{} is closed by `{}`",
                        frame.kind, frame.line, frame.column, token.text
                    ),
                );
            }
            self.finish(&frame);
        }
        match self.stack.pop() {
            Ok(frame) => {
                let alone = token.line_initial
                    && frame.kind.is_paren_list()
                    && !self.code_follows_on_line();
                let label = transitions::close_label(&frame, token.line_initial, alone);
                self.finish(&frame);
                label
            }
            Err(_) => None,
        }
    }

    /// `>>` inside template arguments closes up to two levels.
    fn close_nested_templates(&mut self, token: &Token<'a>) -> Option<Label> {
        let label = self.close(token);
        if self.stack.top().kind == ContextKind::TemplateArgs {
            if let Ok(frame) = self.stack.pop() {
                self.finish(&frame);
            }
        }
        label
    }

    /// Propagate the effect of a popped frame to the container it was opened from.
    fn finish(&mut self, frame: &ContextFrame) {
        let parent = self.stack.top_mut();
        if !parent.kind.is_container() {
            return;
        }
        let scope = parent.kind;
        let state = &mut parent.statement;
        if let (Some(owner), true) = (frame.owner, frame.kind.is_paren_list()) {
            state.pending = Pending::AfterCondition(owner);
            return;
        }
        if frame.kind == ContextKind::ArgumentList
            && scope.is_declaration_scope()
            && matches!(
                state.pending,
                Pending::None | Pending::ClassHead(_) | Pending::Declarator
            )
        {
            state.pending = Pending::Declarator;
        }
        if frame.completes_statement {
            state.complete();
        }
    }

    fn close_all_at_eof(&mut self) {
        while let Ok(frame) = self.stack.pop() {
            let message = format!("{} is never closed", frame.kind);
            let position = Position::new(frame.line, frame.column);
            warn!(%position, %message, "unbalanced input");
            self.diagnostics.push(Diagnostic::warning(
                DiagnosticKind::UnbalancedDelimiter,
                position,
                message,
            ));
        }
    }

    // ----- lookahead and history -----

    fn prev_is_name(&self) -> bool {
        matches!(
            self.prev,
            Some(TokenKind::Identifier | TokenKind::Keyword(Keyword::Other))
        )
    }

    /// Previous token can end a callee or declarator name.
    fn prev_ends_name(&self) -> bool {
        match self.prev {
            Some(TokenKind::Identifier)
            | Some(TokenKind::Keyword(Keyword::Other | Keyword::Operator)) => true,
            Some(TokenKind::Punctuation(Punct::RParen | Punct::RBracket | Punct::Greater)) => {
                true
            }
            // Operator symbol in `operator==`
            Some(TokenKind::Punctuation(_)) => {
                self.prev2 == Some(TokenKind::Keyword(Keyword::Operator))
            }
            _ => false,
        }
    }

    fn prev_closes_parameters(&self) -> bool {
        matches!(
            self.prev,
            Some(TokenKind::Punctuation(Punct::RParen)) | Some(TokenKind::Keyword(Keyword::Mutable))
        )
    }

    fn code_follows_on_line(&mut self) -> bool {
        let mut found = false;
        self.scan_ahead(|token| match token.kind {
            TokenKind::Whitespace | TokenKind::Comment(_) => true,
            TokenKind::Newline => false,
            _ => {
                found = true;
                false
            }
        });
        found
    }

    fn colon_follows(&mut self) -> bool {
        let mut found = false;
        self.scan_ahead(|token| {
            if !token.is_significant() {
                return true;
            }
            found = token.is_punct(Punct::Colon);
            false
        });
        found
    }

    /// Whether a balanced `>` closes the `<` just read within the lookahead window.
    fn template_closes_ahead(&mut self) -> bool {
        let budget = self.options.template_lookahead;
        if budget == 0 {
            return false;
        }
        let mut depth = 1usize;
        let mut nesting = 0usize;
        let mut seen = 0usize;
        let mut closes = false;
        self.scan_ahead(|token| {
            if !token.is_significant() {
                return true;
            }
            seen += 1;
            if seen > budget {
                return false;
            }
            match token.punct() {
                Some(Punct::Less) if nesting == 0 => depth += 1,
                Some(Punct::Greater) if nesting == 0 => {
                    depth -= 1;
                    if depth == 0 {
                        closes = true;
                        return false;
                    }
                }
                Some(Punct::Shr) if nesting == 0 => {
                    if depth <= 2 {
                        closes = true;
                        return false;
                    }
                    depth -= 2;
                }
                Some(Punct::LParen | Punct::LBracket) => nesting += 1,
                Some(Punct::RParen | Punct::RBracket) => {
                    if nesting == 0 {
                        return false;
                    }
                    nesting -= 1;
                }
                Some(Punct::Semicolon | Punct::LBrace | Punct::RBrace) => return false,
                _ => {}
            }
            true
        });
        closes
    }

    fn push(&mut self, frame: ContextFrame) {
        self.stack.push(frame);
    }

    fn diagnose(&mut self, kind: DiagnosticKind, token: &Token<'a>, message: impl Into<String>) {
        let diagnostic = Diagnostic::warning(kind, token.position(), message);
        warn!(position = %diagnostic.position, kind = %kind, message = %diagnostic.message, "recovering");
        self.diagnostics.push(diagnostic);
    }
}

/// Pending states that only survive until the next ordinary token.
fn settle(pending: Pending) -> Pending {
    match pending {
        Pending::Assignment => Pending::Initializer,
        Pending::ExternKeyword | Pending::ExternHead | Pending::TemplateHead => Pending::None,
        other => other,
    }
}

impl<'a> Iterator for Classifier<'a> {
    type Item = Result<ClassifiedToken<'a>, ClassifyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.pull() {
            Some(Ok(token)) => {
                let classified = self.classify(token);
                self.index += 1;
                Some(Ok(classified))
            }
            Some(Err(err)) => {
                self.finished = true;
                warn!(%err, "lexical error, classification stopped");
                Some(Err(ClassifyError::from(err)))
            }
            None => {
                self.finished = true;
                self.close_all_at_eof();
                debug!(
                    tokens = self.index,
                    labelled = self.labelled,
                    diagnostics = self.diagnostics.len(),
                    "classification finished"
                );
                None
            }
        }
    }
}
