//! File processing pipeline.
//!
//! Each input goes through the same stages:
//!
//! - Tokenize the text and group tokens into logical lines
//! - Classify each logical line into a [`NodeKind`](crate::NodeKind)
//! - Rebuild block nesting with a [`BlockTreeBuilder`](crate::BlockTreeBuilder)
//!
//! The main entry point is [`inspect_file`] which processes a buffered reader
//! and writes the selected dump to any `Write` implementation.

pub mod pipeline;

pub use pipeline::{inspect_file, inspect_source};
