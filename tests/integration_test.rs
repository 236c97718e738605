//! Integration tests for fcst
//!
//! These tests drive the public API end to end: source text through the
//! lexer, line assembler, classifier and block tree builder.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use fcst::process::inspect_source;
use fcst::{
    assemble, build_cst, classify, tokenize, BlockTree, BlockTreeBuilder, Config, DumpFormat,
    LogicalLine, NodeKind, TokenKind,
};
use proptest::prelude::*;

fn kinds(src: &str) -> Vec<NodeKind> {
    let lines = assemble(&tokenize(src));
    build_cst(&lines, None).iter().map(|n| n.kind).collect()
}

fn with_tree<F: FnOnce(&BlockTree<'_>)>(src: &str, check: F) {
    let lines = assemble(&tokenize(src));
    let mut builder = BlockTreeBuilder::new();
    let _ = build_cst(&lines, Some(&mut builder));
    check(builder.tree());
}

fn begin_end(tree: &BlockTree<'_>, id: fcst::BlockId) -> (Option<NodeKind>, Option<NodeKind>) {
    let node = &tree[id];
    (node.begin.map(|n| n.kind), node.end.map(|n| n.kind))
}

#[test]
fn test_continuation_collapsing() {
    let src = "x = a &\n& + b\n";
    let tokens = tokenize(src);
    let continuations = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Continuation)
        .count();
    assert_eq!(continuations, 2);

    let lines = assemble(&tokens);
    assert_eq!(lines.len(), 2);
    let texts: Vec<&str> = lines[0]
        .tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Continuation && t.kind != TokenKind::Newline)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["x", "=", "a", "+", "b"]);
    assert!(lines[0].tokens.iter().all(|t| t.kind != TokenKind::Whitespace));
    let newlines = lines[0]
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Newline)
        .count();
    assert_eq!(newlines, 1, "only the terminating newline remains");
}

#[test]
fn test_sign_merge() {
    let tokens = tokenize("x = 4 * (-5)");
    assert!(tokens
        .iter()
        .any(|t| t.kind == TokenKind::Number && t.text == "-5"));

    let tokens = tokenize("1 - -1");
    let texts: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();
    assert_eq!(
        texts,
        vec![
            (TokenKind::Number, "1"),
            (TokenKind::Operator, "-"),
            (TokenKind::Number, "-1"),
            (TokenKind::EndOfFile, ""),
        ]
    );
}

#[test]
fn test_empty_line_is_blank() {
    assert_eq!(classify(&LogicalLine::default()), NodeKind::Blank);
}

#[test]
fn test_end_construct_table() {
    let cases = [
        ("endif", NodeKind::EndIf),
        ("enddo", NodeKind::EndDo),
        ("end if", NodeKind::EndIf),
        ("end do", NodeKind::EndDo),
        ("end program", NodeKind::EndProgram),
        ("end module", NodeKind::EndModule),
        ("end subroutine", NodeKind::EndSubroutine),
        ("end function", NodeKind::EndFunction),
        ("end interface", NodeKind::EndInterface),
        ("end select", NodeKind::EndSelect),
        ("end type", NodeKind::EndType),
        ("end", NodeKind::Unknown),
    ];
    for (src, expected) in cases {
        assert_eq!(kinds(src)[0], expected, "{src}");
    }
}

#[test]
fn test_type_definition_vs_usage() {
    assert_eq!(kinds("type :: foo\n")[0], NodeKind::Type);
    assert_ne!(kinds("type(foo) :: bar\n")[0], NodeKind::Type);
}

#[test]
fn test_block_tree_program_with_contained_subroutine() {
    let src = "program foo\ncontains\nsubroutine foo(a,b)\ninteger :: a, b\nend subroutine foo\nend program foo\n";
    with_tree(src, |tree| {
        let root = tree.root();
        assert_eq!(
            begin_end(tree, root),
            (Some(NodeKind::Program), Some(NodeKind::EndProgram))
        );
        let children: Vec<_> = tree[root].children.clone();
        assert_eq!(children.len(), 1);
        assert_eq!(
            begin_end(tree, children[0]),
            (Some(NodeKind::Subroutine), Some(NodeKind::EndSubroutine))
        );
    });
}

#[test]
fn test_block_tree_second_top_level_unit_becomes_child() {
    let src = "subroutine a\nend subroutine a\nsubroutine b\nend subroutine b\n";
    with_tree(src, |tree| {
        let root = tree.root_node();
        let first = root.begin.unwrap();
        assert_eq!(first.kind, NodeKind::Subroutine);
        assert_eq!(first.line.text(), "subroutine a");
        assert_eq!(root.end.map(|n| n.line.text()).as_deref(), Some("end subroutine a"));

        assert_eq!(root.children.len(), 1);
        let child = &tree[root.children[0]];
        assert_eq!(child.begin.map(|n| n.line.text()).as_deref(), Some("subroutine b"));
        assert_eq!(child.end.map(|n| n.kind), Some(NodeKind::EndSubroutine));
    });
}

#[test]
fn test_block_tree_type_definition() {
    with_tree("type :: my_type\ninteger :: x\nend type my_type\n", |tree| {
        assert_eq!(
            begin_end(tree, tree.root()),
            (Some(NodeKind::Type), Some(NodeKind::EndType))
        );
        assert!(tree.root_node().children.is_empty());
    });
}

#[test]
fn test_module_with_procedures() {
    let src = "\
module shapes
  implicit none
  type :: circle
    real :: r
  end type circle
contains
  pure function area(c) result(a)
    type(circle), intent(in) :: c
    real :: a
    a = 3.14159 * c%r**2
  end function area
  subroutine report(c)
    type(circle), intent(in) :: c
    if (c%r > 0.0) then
      print *, area(c)
    else
      call warn('empty')
    end if
  end subroutine report
end module shapes
";
    let found = kinds(src);
    assert_eq!(
        &found[..20],
        &[
            NodeKind::Module,
            NodeKind::Unknown,
            NodeKind::Type,
            NodeKind::Declaration,
            NodeKind::EndType,
            NodeKind::Unknown,
            NodeKind::Function,
            NodeKind::Unknown,
            NodeKind::Declaration,
            NodeKind::Assignment,
            NodeKind::EndFunction,
            NodeKind::Subroutine,
            NodeKind::Unknown,
            NodeKind::IfConstruct,
            NodeKind::Call,
            NodeKind::Else,
            NodeKind::Call,
            NodeKind::EndIf,
            NodeKind::EndSubroutine,
            NodeKind::EndModule,
        ]
    );

    let tree_dump = inspect_source(
        src,
        &Config {
            format: DumpFormat::Tree,
            ..Default::default()
        },
    );
    // A closed block keeps the cursor, so each following unit nests under
    // the previous one and `end module` lands on the function
    assert_eq!(
        tree_dump,
        "\
Module .. ?  (line 1)
  Type .. EndType  (line 3)
    Function .. EndModule  (line 7)
      Subroutine .. EndSubroutine  (line 12)
        IfConstruct .. EndIf  (line 14)
"
    );
}

#[test]
fn test_prev_kind_skips_blank_and_unknown() {
    let lines = assemble(&tokenize("integer :: x\n\nimplicit none\nx = 1\n"));
    let nodes = build_cst(&lines, None);
    assert_eq!(nodes[3].kind, NodeKind::Assignment);
    assert_eq!(nodes[3].prev_kind, NodeKind::Declaration);
}

fn fortranish() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 =&!()+*/,:;%<>.'\"\n-]{0,200}")
        .expect("valid regex")
}

proptest! {
    #[test]
    fn prop_tokenize_ends_with_single_eof(src in fortranish()) {
        let tokens = tokenize(&src);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFile));
        prop_assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::EndOfFile).count(),
            1
        );
    }

    #[test]
    fn prop_assemble_line_count(src in fortranish()) {
        let tokens = tokenize(&src);
        let lines = assemble(&tokens);
        prop_assert!(!lines.is_empty());

        let newlines = tokens.iter().filter(|t| t.kind == TokenKind::Newline).count();
        let collapsed = tokens
            .windows(2)
            .filter(|w| w[0].kind == TokenKind::Continuation && w[1].kind == TokenKind::Newline)
            .count();
        prop_assert_eq!(lines.len(), newlines - collapsed + 1);
    }

    #[test]
    fn prop_classification_is_total(src in ".{0,200}") {
        let lines = assemble(&tokenize(&src));
        let mut builder = BlockTreeBuilder::new();
        let nodes = build_cst(&lines, Some(&mut builder));
        prop_assert_eq!(nodes.len(), lines.len());

        let tree = builder.into_tree();
        prop_assert_eq!(tree.walk().count(), tree.len());
        for (_, id) in tree.walk() {
            for &child in &tree[id].children {
                prop_assert_eq!(tree.parent(child), Some(id));
            }
        }
    }
}
