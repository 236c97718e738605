/// `BlockTreeBuilder` - Rebuilds begin/end nesting from the classified node stream
///
/// Blocks live in an arena (`BlockTree`) and refer to each other by
/// `BlockId`. A parent owns its children through its `children` list; the
/// `parent` link is only used to climb back out of a block.
///
/// The cursor starts on an empty root. The first opener fills the root
/// itself, so a second top-level construct is attached as a child of the root
/// rather than next to it. A closing line that would climb above the root is
/// dropped.
use std::ops::Index;

use tracing::debug;

use super::builder::{CstNode, CstVisitor};

/// Index of a block inside its `BlockTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

impl BlockId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One begin/end delimited block
#[derive(Debug, Clone, Default)]
pub struct BlockNode<'a> {
    pub begin: Option<CstNode<'a>>,
    pub end: Option<CstNode<'a>>,
    pub parent: Option<BlockId>,
    pub children: Vec<BlockId>,
}

/// Arena of blocks; index 0 is the root
#[derive(Debug, Clone)]
pub struct BlockTree<'a> {
    nodes: Vec<BlockNode<'a>>,
}

impl Default for BlockTree<'_> {
    fn default() -> Self {
        Self {
            nodes: vec![BlockNode::default()],
        }
    }
}

impl<'a> BlockTree<'a> {
    const ROOT: BlockId = BlockId(0);

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn root(&self) -> BlockId {
        Self::ROOT
    }

    #[must_use]
    pub fn root_node(&self) -> &BlockNode<'a> {
        &self[Self::ROOT]
    }

    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&BlockNode<'a>> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Child blocks of `id` in source order
    pub fn children(&self, id: BlockId) -> impl Iterator<Item = &BlockNode<'a>> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(move |node| node.children.iter().map(move |child| &self[*child]))
    }

    /// Number of blocks, the root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree that never saw an opener still holds its (empty) root
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].begin.is_none()
    }

    /// Pre-order walk yielding `(depth, id)`, root at depth 0
    #[must_use]
    pub fn walk(&self) -> Walk<'_, 'a> {
        Walk {
            tree: self,
            stack: vec![(0, Self::ROOT)],
        }
    }

    fn push_child(&mut self, parent: BlockId, begin: CstNode<'a>) -> BlockId {
        let id = BlockId(self.nodes.len());
        self.nodes.push(BlockNode {
            begin: Some(begin),
            end: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl<'a> Index<BlockId> for BlockTree<'a> {
    type Output = BlockNode<'a>;

    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    fn index(&self, id: BlockId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Iterator returned by [`BlockTree::walk`]
pub struct Walk<'t, 'a> {
    tree: &'t BlockTree<'a>,
    stack: Vec<(usize, BlockId)>,
}

impl Iterator for Walk<'_, '_> {
    type Item = (usize, BlockId);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        if let Some(node) = self.tree.get(id) {
            self.stack
                .extend(node.children.iter().rev().map(|child| (depth + 1, *child)));
        }
        Some((depth, id))
    }
}

/// Visitor that assembles a [`BlockTree`] while [`build_cst`](super::build_cst) runs
///
/// The wrapped visitor `V` sees every node, then `on_enter` for each opener
/// once the tree has descended and `on_exit` for each closing line (dropped
/// ones included) once the tree has been updated.
#[derive(Debug, Clone)]
pub struct BlockTreeBuilder<'a, V = ()> {
    tree: BlockTree<'a>,
    current: BlockId,
    inner: V,
}

impl<V: Default> Default for BlockTreeBuilder<'_, V> {
    fn default() -> Self {
        Self::with_visitor(V::default())
    }
}

impl BlockTreeBuilder<'_> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a, V> BlockTreeBuilder<'a, V> {
    /// Builder that forwards nodes and block boundaries to `inner`
    #[must_use]
    pub fn with_visitor(inner: V) -> Self {
        let tree = BlockTree::new();
        let current = tree.root();
        Self {
            tree,
            current,
            inner,
        }
    }

    #[must_use]
    pub fn tree(&self) -> &BlockTree<'a> {
        &self.tree
    }

    #[must_use]
    pub fn into_tree(self) -> BlockTree<'a> {
        self.tree
    }

    #[must_use]
    pub fn visitor(&self) -> &V {
        &self.inner
    }

    #[must_use]
    pub fn into_parts(self) -> (BlockTree<'a>, V) {
        (self.tree, self.inner)
    }

    #[must_use]
    pub fn root(&self) -> &BlockNode<'a> {
        self.tree.root_node()
    }

    /// Block the cursor currently sits on
    #[must_use]
    pub fn current(&self) -> BlockId {
        self.current
    }

    fn open(&mut self, node: &CstNode<'a>) {
        let current = &mut self.tree.nodes[self.current.0];
        if current.begin.is_none() {
            current.begin = Some(*node);
        } else {
            self.current = self.tree.push_child(self.current, *node);
        }
    }

    fn close(&mut self, node: &CstNode<'a>) {
        let current = &mut self.tree.nodes[self.current.0];
        if current.end.is_none() {
            current.end = Some(*node);
            return;
        }

        let parent = current.parent;
        match parent {
            Some(parent) => {
                self.current = parent;
                self.tree.nodes[parent.0].end = Some(*node);
            }
            None => debug!(
                line = ?node.line_number(),
                kind = %node.kind,
                "unbalanced block end dropped"
            ),
        }
    }
}

impl<'a, V: CstVisitor<'a>> CstVisitor<'a> for BlockTreeBuilder<'a, V> {
    fn on_node(&mut self, node: &CstNode<'a>) {
        self.inner.on_node(node);
        if node.kind.opens_block() {
            self.open(node);
            self.inner.on_enter(node);
        } else if node.kind.closes_block() {
            self.close(node);
            self.inner.on_exit(node);
        }
    }
}
