//! Line classification for Fortran constructs.
//!
//! This module decides what each logical line is:
//! - Block openers: PROGRAM, MODULE, SUBROUTINE, FUNCTION, INTERFACE, IF/THEN, DO, SELECT, TYPE
//! - Their `END ...` counterparts, including the `ENDIF`/`ENDDO` contractions
//! - Statements: USE, CALL/PRINT, declarations, assignments, ELSE/ELSE IF, CASE
//!
//! [`classify`] maps a [`LogicalLine`](crate::parser::LogicalLine) to a
//! [`NodeKind`]; anything it does not recognise becomes [`NodeKind::Unknown`].

pub mod classifier;
pub mod types;

pub use classifier::{classify, classify_end_construct};
pub use types::NodeKind;
