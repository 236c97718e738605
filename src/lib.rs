//! fcst - Front-end of a formatter for modern Fortran source code
//!
//! Turns source text into classified logical lines and a nested block tree:
//! [`tokenize`] → [`assemble`] → [`build_cst`] (optionally driving a
//! [`BlockTreeBuilder`]).

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod cst;
pub mod error;
pub mod parser;
pub mod process;
pub mod scope;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::{Config, DumpFormat};
pub use cst::{build_cst, BlockId, BlockNode, BlockTree, BlockTreeBuilder, CstNode, CstVisitor};
pub use error::Result;
pub use parser::{assemble, tokenize, LogicalLine, Token, TokenKind, Tokens};
pub use scope::{classify, NodeKind};
