//! Fortran source tokenization and logical-line assembly.
//!
//! This module turns raw source text into the input of the classifier:
//! - [`tokenize`]: Converts text into [`Token`]s, merging unary signs into numbers
//! - [`assemble`]: Groups tokens into [`LogicalLine`]s, joining `&` continuations
//! - [`Tokens`]: Read-only query surface over one line's tokens
//! - [`patterns`]: Precompiled regex patterns and the keyword table
//!
//! Both stages are total: any input produces a token stream ending in one
//! `EndOfFile` token, and any token stream produces at least one line.

pub mod patterns;
pub mod stream;
pub mod tokenizer;
pub mod tokens;

pub use stream::{assemble, LogicalLine};
pub use tokenizer::{tokenize, Tokenizer};
pub use tokens::{Token, TokenKind, Tokens};
