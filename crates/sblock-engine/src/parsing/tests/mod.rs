//! Tree-level tests for the block parser.
//!
//! Every parsed document is run through the structural invariant checks;
//! shapes are compared as indented outlines.

use rstest::rstest;
use xi_rope::Rope;

use crate::{
    error::{ParseError, ParseWarning},
    extension::ExtensionRegistry,
    parsing::{
        ParseOptions, ParsedDoc,
        blocks::{BlockNode, Node, Param},
        parse_document,
        rope::{slice_to_string, span::Span},
        snapshot::{invariants, normalize},
    },
};

fn parse_with(md: &str, options: &ParseOptions) -> Result<ParsedDoc, ParseError> {
    let rope = Rope::from(md);
    let doc = parse_document(&rope, &ExtensionRegistry::with_defaults(), options)?;
    invariants(&rope, &doc.nodes);
    Ok(doc)
}

fn parse(md: &str) -> ParsedDoc {
    parse_with(md, &ParseOptions::default()).unwrap()
}

fn outline(md: &str) -> String {
    let rope = Rope::from(md);
    let doc = parse(md);
    normalize(&rope, &doc).to_string()
}

fn only_block(doc: &ParsedDoc) -> &BlockNode {
    match doc.nodes.as_slice() {
        [Node::Block(b)] => b,
        other => panic!("expected a single block, got {other:?}"),
    }
}

#[test]
fn nested_blocks_outline() {
    let md = "Intro\n\n::card title=\"T\" bordered\nBody\n::info\nInner\n::end\n::end\n";
    insta::assert_snapshot!(outline(md), @r#"
    Markdown 0..7 "Intro\n\n"
    Block(card) 7..63 [title="T" "bordered"]
      Markdown 33..38 "Body\n"
      Block(info) 38..57
        Markdown 45..51 "Inner\n"
    "#);
}

#[test]
fn unterminated_blocks_outline() {
    let md = "::a\n::b\nx\n";
    insta::assert_snapshot!(outline(md), @r#"
    Block(a) 0..10 (unterminated)
      Block(b) 4..10 (unterminated)
        Markdown 8..10 "x\n"
    warning: Block 'b' opened on line 2 has no ::end; closed at end of document
    warning: Block 'a' opened on line 1 has no ::end; closed at end of document
    "#);
}

#[test]
fn spans_slice_back_to_source() {
    let md = "::card\nBody\n::end\nTail\n";
    let rope = Rope::from(md);
    let doc = parse(md);

    assert_eq!(doc.nodes.len(), 2);
    assert_eq!(slice_to_string(&rope, doc.nodes[0].span()), "::card\nBody\n::end\n");
    assert_eq!(slice_to_string(&rope, doc.nodes[1].span()), "Tail\n");

    let Node::Block(b) = &doc.nodes[0] else {
        panic!("expected a block");
    };
    assert_eq!(slice_to_string(&rope, b.content_span), "Body\n");
    assert!(b.terminated);
}

#[test]
fn params_are_kept_in_source_order() {
    let doc = parse("::btn primary size=lg \"[Go](/x)\"\n::end\n");
    let b = only_block(&doc);
    assert_eq!(b.block_type, "btn");
    assert_eq!(
        b.params,
        vec![
            Param::positional("primary"),
            Param::keyed("size", "lg"),
            Param::positional("[Go](/x)"),
        ]
    );
}

#[test]
fn block_type_is_lowercased_and_terminator_is_case_insensitive() {
    let doc = parse("::INFO\nx\n::END\n");
    let b = only_block(&doc);
    assert_eq!(b.block_type, "info");
    assert!(b.terminated);
    assert!(doc.warnings.is_empty());
}

#[test]
fn crlf_lines_are_handled() {
    let doc = parse("::info\r\nHi\r\n::end\r\n");
    let b = only_block(&doc);
    assert!(b.terminated);
    assert_eq!(b.children, vec![Node::Markdown(Span::new(8, 12))]);
}

#[rstest]
#[case::backticks("```\n::info\n```\n")]
#[case::tildes("~~~\n::info\nx\n::end\n~~~\n")]
#[case::long_fence("````\n```\n::info\n````\n")]
fn fenced_code_suppresses_block_starts(#[case] md: &str) {
    let doc = parse(md);
    assert_eq!(doc.nodes, vec![Node::Markdown(Span::new(0, md.len()))]);
}

#[test]
fn fence_must_close_with_same_kind() {
    let md = "~~~\n```\n::info\n~~~\n::info\nx\n::end\n";
    let doc = parse(md);
    assert_eq!(doc.nodes.len(), 2);
    assert_eq!(doc.nodes[0], Node::Markdown(Span::new(0, 19)));
    assert_eq!(doc.nodes[1].span(), Span::new(19, 34));
}

#[test]
fn terminator_closes_block_with_open_fence_inside() {
    let md = "::info\n```\ncode\n::end\nafter\n";
    let doc = parse(md);
    assert_eq!(doc.nodes.len(), 2);

    let Node::Block(b) = &doc.nodes[0] else {
        panic!("expected a block");
    };
    assert!(b.terminated);
    assert_eq!(b.children, vec![Node::Markdown(Span::new(7, 16))]);
    assert_eq!(doc.nodes[1], Node::Markdown(Span::new(22, 28)));
}

#[test]
fn fence_state_does_not_leak_out_of_a_block() {
    let md = "::info\n```\n::end\n::card\nx\n::end\n";
    let doc = parse(md);
    assert_eq!(doc.nodes.len(), 2);
    assert!(matches!(&doc.nodes[1], Node::Block(b) if b.block_type == "card"));
}

#[rstest]
#[case::alone("::end\n")]
#[case::after_text("text\n::end\n")]
#[case::after_block("::info\nx\n::end\n::end\n")]
fn stray_terminator_is_plain_text(#[case] md: &str) {
    let doc = parse(md);
    let last = doc.nodes.last().unwrap();
    assert!(matches!(last, Node::Markdown(sp) if sp.end == md.len()));
    assert!(doc.warnings.is_empty());
}

#[test]
fn unterminated_block_closes_at_end_of_input() {
    let doc = parse("::card\nText\n");
    let b = only_block(&doc);
    assert!(!b.terminated);
    assert_eq!(b.span, Span::new(0, 12));
    assert_eq!(
        doc.warnings,
        vec![ParseWarning::Unterminated {
            block_type: "card".into(),
            line: 1
        }]
    );
}

#[test]
fn indented_terminator_is_content() {
    let md = "::info\n    ::end\n::end\n";
    let doc = parse(md);
    let b = only_block(&doc);
    assert!(b.terminated);
    assert_eq!(b.children, vec![Node::Markdown(Span::new(7, 17))]);
}

#[test]
fn indented_start_inside_block_is_content() {
    let doc = parse("::card\n    ::info\n::end\n");
    let b = only_block(&doc);
    assert_eq!(b.children.len(), 1);
    assert!(matches!(b.children[0], Node::Markdown(_)));
}

#[test]
fn indented_start_at_top_level_is_content() {
    let md = "    ::info\n";
    assert_eq!(parse(md).nodes, vec![Node::Markdown(Span::new(0, md.len()))]);
}

#[test]
fn blockquoted_block_lines_stay_markdown() {
    let md = "> ::info\n> x\n> ::end\n";
    let doc = parse(md);
    assert_eq!(doc.nodes, vec![Node::Markdown(Span::new(0, md.len()))]);
    assert!(doc.warnings.is_empty());
}

#[test]
fn block_under_list_item_becomes_top_level_sibling() {
    let md = "- a\n  ::info\n  x\n  ::end\n";
    let doc = parse(md);
    assert_eq!(doc.nodes.len(), 2);
    assert_eq!(doc.nodes[0], Node::Markdown(Span::new(0, 4)));

    let Node::Block(b) = &doc.nodes[1] else {
        panic!("expected a block");
    };
    assert_eq!(b.block_type, "info");
    assert_eq!(b.span, Span::new(4, md.len()));
    assert!(b.terminated);
    assert_eq!(b.children, vec![Node::Markdown(Span::new(13, 17))]);
}

#[test]
fn blank_only_runs_are_dropped() {
    let doc = parse("::info\n\n\n::end\n\n");
    let b = only_block(&doc);
    assert!(b.children.is_empty());
    assert_eq!(doc.nodes.len(), 1);
}

#[test]
fn empty_document() {
    let doc = parse("");
    assert!(doc.nodes.is_empty());
    assert!(doc.warnings.is_empty());
}

#[test]
fn siblings_keep_source_order() {
    let doc = parse("::a\n::end\n::b\n::end\n::c\n::end\n");
    let types: Vec<_> = doc
        .nodes
        .iter()
        .map(|n| match n {
            Node::Block(b) => b.block_type.as_str(),
            Node::Markdown(_) => "md",
        })
        .collect();
    assert_eq!(types, vec!["a", "b", "c"]);
}

#[test]
fn nesting_limit_rejects_the_document() {
    let options = ParseOptions {
        max_nesting_depth: 2,
        ..ParseOptions::default()
    };
    assert!(parse_with("::a\n::b\n::end\n::end\n", &options).is_ok());

    let err = parse_with("::a\n::b\n::c\n::end\n::end\n::end\n", &options).unwrap_err();
    assert_eq!(err, ParseError::NestingTooDeep { limit: 2, line: 3 });
}

#[test]
fn input_limit_rejects_the_document() {
    let options = ParseOptions {
        max_input_bytes: 8,
        ..ParseOptions::default()
    };
    assert!(parse_with("12345678", &options).is_ok());
    assert_eq!(
        parse_with("123456789", &options).unwrap_err(),
        ParseError::InputTooLarge { len: 9, limit: 8 }
    );
}

#[rstest]
#[case("plain paragraph\n")]
#[case("::grid 3\n::card\nA\n::end\n::card\nB\n::end\n::end\n")]
#[case("- a\n- b\n\n::info\n> quote\n::end\n")]
#[case("::a\n::b\n::c\ndeep")]
#[case("::end\n::end\n::x\n")]
#[case("```\n::a\n```\n::b\n```\n::end\n")]
fn invariants_hold(#[case] md: &str) {
    // `parse` runs the invariant checks
    parse(md);
}
