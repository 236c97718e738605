/// `build_cst` - Single forward pass from logical lines to classified nodes
use crate::parser::LogicalLine;
use crate::scope::{classify, NodeKind};

/// A classified logical line
///
/// `prev_kind` is the kind of the nearest earlier node that was neither
/// `Blank` nor `Unknown` (`Unknown` when there is none).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CstNode<'a> {
    pub kind: NodeKind,
    pub prev_kind: NodeKind,
    pub line: &'a LogicalLine,
}

impl CstNode<'_> {
    /// Source line where this node starts
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        self.line.line_number()
    }
}

/// Observer driven by [`build_cst`], once per node and in source order
///
/// `build_cst` itself only calls `on_node`. `on_enter` and `on_exit` are
/// raised by a [`BlockTreeBuilder`](super::BlockTreeBuilder) for the visitor
/// it wraps, right after a block opens or a closing line is seen.
pub trait CstVisitor<'a> {
    fn on_enter(&mut self, _node: &CstNode<'a>) {}

    fn on_exit(&mut self, _node: &CstNode<'a>) {}

    fn on_node(&mut self, _node: &CstNode<'a>) {}
}

/// No-op visitor
impl CstVisitor<'_> for () {}

impl<'a, V: CstVisitor<'a> + ?Sized> CstVisitor<'a> for &mut V {
    fn on_enter(&mut self, node: &CstNode<'a>) {
        (**self).on_enter(node);
    }

    fn on_exit(&mut self, node: &CstNode<'a>) {
        (**self).on_exit(node);
    }

    fn on_node(&mut self, node: &CstNode<'a>) {
        (**self).on_node(node);
    }
}

/// Classify every line and notify `visitor` (if any) before each node is stored
#[must_use]
pub fn build_cst<'a>(
    lines: &'a [LogicalLine],
    mut visitor: Option<&mut dyn CstVisitor<'a>>,
) -> Vec<CstNode<'a>> {
    let mut nodes = Vec::with_capacity(lines.len());
    let mut last_real = NodeKind::Unknown;

    for line in lines {
        let kind = classify(line);
        let node = CstNode {
            kind,
            prev_kind: last_real,
            line,
        };

        if kind.is_significant() {
            last_real = kind;
        }

        if let Some(visitor) = visitor.as_deref_mut() {
            visitor.on_node(&node);
        }

        nodes.push(node);
    }

    nodes
}
