//! Classified node stream and block tree construction.
//!
//! This module runs the last two stages of the front-end:
//! - [`build_cst`]: Classifies every logical line once, in order, recording
//!   the last significant kind seen before each node
//! - [`CstVisitor`]: Observer notified with each node as it is produced
//! - [`BlockTreeBuilder`]: Visitor that rebuilds begin/end nesting into a
//!   [`BlockTree`] arena
//!
//! Neither stage fails: unbalanced `end` lines are dropped from the tree.

pub mod block_tree;
pub mod builder;

pub use block_tree::{BlockId, BlockNode, BlockTree, BlockTreeBuilder};
pub use builder::{build_cst, CstNode, CstVisitor};
