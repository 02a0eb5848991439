//! Line-level labelling scenarios
//!
//! Each case is a small, self-contained C++ fragment and the label expected on one of its
//! lines. Larger coverage lives in the annotated fixture regression test.

use cxxstyle::cxx::diagnostics::DiagnosticKind;
use cxxstyle::{classify, Classifier, Label};
use rstest::rstest;

fn labels_on(source: &str, line: usize) -> Vec<Label> {
    classify(source)
        .expect("classification failed")
        .labels_on_line(line)
}

const NAMESPACE: &str = "namespace n\n{\nint x;\n}\n";
const EXTERN_C: &str = "extern \"C\"\n{\nvoid f();\n}\n";
const INHERITANCE: &str = "class hoge: public fuga,\n            public piyo\n{\n};\n";
const MEMBER_INIT: &str = "hoge::hoge\n(\n):\n    fuga ( 1 ),\n    piyo ( 2 )\n{\n}\n";
const DO_WHILE: &str = "void f()\n{\n    do\n    {\n        x();\n    }\n    while (flag);\n}\n";
const IF_ELSE: &str = "void f()\n{\n    if (a)\n        x();\n    else\n        y();\n}\n";
const TRY_CATCH: &str = "void f()\n{\n    try\n    {\n    }\n    catch (int e)\n    {\n    }\n}\n";
const SWITCH: &str = "void f()\n{\n    switch (c)\n    {\n    case 1:\n        x();\n        break;\n    default:\n        {\n        }\n    }\n}\n";
const STREAM: &str = "void f()\n{\n    std::cout\n        << a\n        << b;\n}\n";
const BRACE_LIST: &str = "int a[] =\n{\n    1,\n    2,\n};\n";
const ARGLIST: &str = "int f(\n    int x,\n    int y\n    )\n{\n}\n";
const ARGLIST_NONEMPTY: &str = "int f( int x,\n       int y )\n{\n}\n";
const TEMPLATE: &str = "template\n<\n    class T\n    >\nvoid f();\n";
const INLINE: &str = "class A\n{\n    void f() { }\n};\n";
const FRIEND: &str = "class A\n{\n    friend class B;\n};\n";
const STREAM_AFTER_OPERAND: &str =
    "void f()\n{\n    std::cout << a\n        << b\n        << c;\n}\n";
const NESTED_BRACE_LIST: &str =
    "int a[][2] =\n{\n    {\n        1, 2\n    },\n    { 3, 4 }\n};\n";
const INIT_LIST: &str = "void f()\n{\n    std::vector<int> v{\n        1,\n        2};\n}\n";
const INIT_LIST_ARGUMENT: &str = "void f()\n{\n    g({\n        1,\n        2\n    });\n}\n";
const LOCAL_STRUCT: &str =
    "void f()\n{\n    struct S\n    {\n        int m;\n    };\n}\n";
const NESTED_TEMPLATE_PARAMETER: &str =
    "void f(std::vector<std::vector<int>> v,\n       int w)\n{\n}\n";

#[rstest]
#[case::namespace_open(NAMESPACE, 2, Label::NamespaceOpen)]
#[case::innamespace(NAMESPACE, 3, Label::Innamespace)]
#[case::namespace_close(NAMESPACE, 4, Label::NamespaceClose)]
#[case::extern_open(EXTERN_C, 2, Label::ExternLangOpen)]
#[case::inextern(EXTERN_C, 3, Label::InexternLang)]
#[case::extern_close(EXTERN_C, 4, Label::ExternLangClose)]
#[case::inher_intro(INHERITANCE, 1, Label::InherIntro)]
#[case::inher_cont(INHERITANCE, 2, Label::InherCont)]
#[case::class_open_after_bases(INHERITANCE, 3, Label::ClassOpen)]
#[case::member_init_intro(MEMBER_INIT, 4, Label::MemberInitIntro)]
#[case::member_init_cont(MEMBER_INIT, 5, Label::MemberInitCont)]
#[case::defun_open_after_inits(MEMBER_INIT, 6, Label::DefunOpen)]
#[case::do_block_open(DO_WHILE, 4, Label::SubstatementOpen)]
#[case::do_block_intro(DO_WHILE, 5, Label::StatementBlockIntro)]
#[case::do_block_close(DO_WHILE, 6, Label::BlockClose)]
#[case::do_while_closure(DO_WHILE, 7, Label::DoWhileClosure)]
#[case::if_substatement(IF_ELSE, 4, Label::Substatement)]
#[case::else_clause(IF_ELSE, 5, Label::ElseClause)]
#[case::else_substatement(IF_ELSE, 6, Label::Substatement)]
#[case::try_open(TRY_CATCH, 4, Label::SubstatementOpen)]
#[case::catch_clause(TRY_CATCH, 6, Label::CatchClause)]
#[case::catch_open(TRY_CATCH, 7, Label::SubstatementOpen)]
#[case::switch_open(SWITCH, 4, Label::SubstatementOpen)]
#[case::case_label(SWITCH, 5, Label::CaseLabel)]
#[case::case_intro(SWITCH, 6, Label::StatementCaseIntro)]
#[case::case_statement(SWITCH, 7, Label::Statement)]
#[case::default_label(SWITCH, 8, Label::CaseLabel)]
#[case::case_open(SWITCH, 9, Label::StatementCaseOpen)]
#[case::first_stream_op_is_cont(STREAM, 4, Label::StatementCont)]
#[case::stream_op(STREAM, 5, Label::StreamOp)]
#[case::brace_list_open(BRACE_LIST, 2, Label::BraceListOpen)]
#[case::brace_list_intro(BRACE_LIST, 3, Label::BraceListIntro)]
#[case::brace_list_entry(BRACE_LIST, 4, Label::BraceListEntry)]
#[case::brace_list_close(BRACE_LIST, 5, Label::BraceListClose)]
#[case::arglist_intro(ARGLIST, 2, Label::ArglistIntro)]
#[case::arglist_cont(ARGLIST, 3, Label::ArglistCont)]
#[case::arglist_close(ARGLIST, 4, Label::ArglistClose)]
#[case::defun_open(ARGLIST, 5, Label::DefunOpen)]
#[case::defun_close(ARGLIST, 6, Label::DefunClose)]
#[case::arglist_cont_nonempty(ARGLIST_NONEMPTY, 2, Label::ArglistContNonempty)]
#[case::template_head_cont(TEMPLATE, 2, Label::TopmostIntroCont)]
#[case::template_args_cont(TEMPLATE, 3, Label::TemplateArgsCont)]
#[case::template_args_close(TEMPLATE, 4, Label::TemplateArgsCont)]
#[case::inline_open(INLINE, 3, Label::InlineOpen)]
#[case::inline_close(INLINE, 3, Label::InlineClose)]
#[case::friend(FRIEND, 3, Label::Friend)]
#[case::stream_op_after_first_line_operand(STREAM_AFTER_OPERAND, 4, Label::StreamOp)]
#[case::stream_op_chained(STREAM_AFTER_OPERAND, 5, Label::StreamOp)]
#[case::nested_brace_list_intro(NESTED_BRACE_LIST, 3, Label::BraceListIntro)]
#[case::nested_brace_list_inner_intro(NESTED_BRACE_LIST, 4, Label::BraceListIntro)]
#[case::nested_brace_list_inner_close(NESTED_BRACE_LIST, 5, Label::BraceListClose)]
#[case::brace_entry_open(NESTED_BRACE_LIST, 6, Label::BraceEntryOpen)]
#[case::nested_brace_list_close(NESTED_BRACE_LIST, 7, Label::BraceListClose)]
#[case::initializer_list_open(INIT_LIST, 3, Label::BraceListOpen)]
#[case::initializer_list_intro(INIT_LIST, 4, Label::BraceListIntro)]
#[case::initializer_list_entry(INIT_LIST, 5, Label::BraceListEntry)]
#[case::initializer_argument_intro(INIT_LIST_ARGUMENT, 4, Label::BraceListIntro)]
#[case::initializer_argument_entry(INIT_LIST_ARGUMENT, 5, Label::BraceListEntry)]
#[case::initializer_argument_close(INIT_LIST_ARGUMENT, 6, Label::BraceListClose)]
#[case::local_struct_open(LOCAL_STRUCT, 4, Label::ClassOpen)]
#[case::local_struct_member(LOCAL_STRUCT, 5, Label::Inclass)]
#[case::local_struct_close(LOCAL_STRUCT, 6, Label::ClassClose)]
#[case::nested_template_parameter_cont(NESTED_TEMPLATE_PARAMETER, 2, Label::ArglistContNonempty)]
#[case::nested_template_parameter_body(NESTED_TEMPLATE_PARAMETER, 3, Label::DefunOpen)]
fn test_line_label(#[case] source: &str, #[case] line: usize, #[case] label: Label) {
    let labels = labels_on(source, line);
    assert!(
        labels.contains(&label),
        "line {line}: expected {label}, got {labels:?}"
    );
}

#[rstest]
#[case::comment_at_global("// hi\nint x;\n", 1, Label::CommentIntro)]
#[case::include("#include <cstdlib>\n", 1, Label::CppMacro)]
#[case::macro_continuation("#define A \\\n  1\n", 2, Label::CppMacroCont)]
#[case::block_comment_inner("/*\n * x\n */\n", 2, Label::C)]
#[case::raw_string_inner("auto s = R\"(a\nb)\";\n", 2, Label::String)]
#[case::bracket_raw_string_inner("auto s = R\"[a\nb]\";\n", 2, Label::String)]
fn test_multi_line_tokens(#[case] source: &str, #[case] line: usize, #[case] label: Label) {
    assert_eq!(labels_on(source, line), vec![label]);
}

#[rstest]
#[case::concatenated_literals_first(
    "void f()\n{\n    s =\n        \"a\"\n        \"b\";\n}\n",
    4,
    vec![Label::StatementCont]
)]
#[case::concatenated_literals_rest(
    "void f()\n{\n    s =\n        \"a\"\n        \"b\";\n}\n",
    5,
    vec![]
)]
#[case::close_paren_followed_by_code("int f(\n    int x\n    ) + 1;\n", 3, vec![])]
#[case::close_paren_followed_by_comment("int f(\n    int x\n    ) // done\n;\n", 3, vec![Label::ArglistClose])]
#[case::bracket_in_raw_delimiter("auto s = R\"x[(abc)x[\";\nint y;\n", 2, vec![Label::TopmostIntro])]
fn test_exact_line_labels(#[case] source: &str, #[case] line: usize, #[case] expected: Vec<Label>) {
    assert_eq!(labels_on(source, line), expected);
}

#[test]
fn test_nested_templates_close_together() {
    let mut classifier = Classifier::new(NESTED_TEMPLATE_PARAMETER);
    for item in classifier.by_ref() {
        item.expect("classification failed");
    }
    assert!(classifier.diagnostics().is_empty());
}

#[test]
fn test_double_closer_with_one_template_open() {
    let source = "void f()\n{\n    x = a<b>> c;\n    y();\n}\n";
    let classification = classify(source).expect("classification failed");
    assert!(classification.diagnostics.is_empty());
    assert_eq!(classification.labels_on_line(4), vec![Label::Statement]);
    assert_eq!(classification.labels_on_line(5), vec![Label::DefunClose]);
}

#[rstest]
#[case::case_at_namespace_scope("namespace n\n{\ncase 1:\nint x;\n}\n", 3)]
#[case::default_in_body_without_switch("void f()\n{\n    default:\n    x();\n}\n", 3)]
#[case::case_in_class("class A\n{\n    case 2:\n};\n", 3)]
fn test_stray_case_label_is_diagnosed(#[case] source: &str, #[case] line: usize) {
    let classification = classify(source).expect("classification failed");
    assert_eq!(classification.diagnostics.len(), 1);
    let diagnostic = &classification.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnrecognizedContextTransition);
    assert_eq!(diagnostic.position.line, line);
    assert!(!classification.labels_on_line(line).contains(&Label::CaseLabel));
}

#[test]
fn test_stray_closer_is_diagnosed() {
    let classification = classify("}\nint x;\n").expect("classification failed");
    assert_eq!(classification.diagnostics.len(), 1);
    assert_eq!(
        classification.diagnostics[0].kind,
        DiagnosticKind::UnbalancedDelimiter
    );
    assert_eq!(classification.labels_on_line(1), Vec::<Label>::new());
    assert_eq!(classification.labels_on_line(2), vec![Label::TopmostIntro]);
}

#[test]
fn test_unclosed_body_is_diagnosed_at_end() {
    let classification = classify("void f()\n{\n    x();\n").expect("classification failed");
    assert_eq!(classification.diagnostics.len(), 1);
    let diagnostic = &classification.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnbalancedDelimiter);
    assert_eq!((diagnostic.position.line, diagnostic.position.column), (2, 1));
    assert!(diagnostic.message.contains("never closed"));
}

#[test]
fn test_else_without_if_is_unlabelled() {
    let classification = classify("void f()\n{\n    else x();\n}\n").expect("classification failed");
    assert_eq!(classification.diagnostics.len(), 1);
    assert_eq!(
        classification.diagnostics[0].kind,
        DiagnosticKind::UnrecognizedContextTransition
    );
    assert!(!classification
        .labels_on_line(3)
        .contains(&Label::ElseClause));
}

#[test]
fn test_mismatched_closer_pops_skipped_frames() {
    let classification = classify("void f() { ( }\nint y;\n").expect("classification failed");
    assert_eq!(classification.diagnostics.len(), 1);
    assert!(classification.labels_on_line(1).contains(&Label::InlineClose));
    assert_eq!(classification.labels_on_line(2), vec![Label::TopmostIntro]);
}

#[test]
fn test_render_snapshot() {
    let classification =
        classify("class hoge\n{\npublic:\n    int x;\n};\n").expect("classification failed");
    insta::assert_snapshot!(classification.render(), @r"
    1:1 topmost-intro
    2:1 class-open
    3:1 access-label
    4:5 inclass
    5:1 class-close
    ");
}
