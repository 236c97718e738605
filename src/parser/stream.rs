/// Line assembler - Groups the token stream into logical Fortran lines
///
/// This module handles:
/// - Splitting the stream at `Newline` tokens
/// - Joining continuation lines (`&` directly followed by a newline)
/// - Dropping whitespace tokens that reach it from a raw token source
use super::tokens::{Token, TokenKind, Tokens};

/// One statement-equivalent token sequence, possibly spanning several
/// physical lines.
///
/// A line closed by a newline keeps that `Newline` token as its last token.
/// A continuation keeps its `&` token but loses the newline that followed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicalLine {
    pub tokens: Tokens,
}

impl LogicalLine {
    /// True when the line holds no tokens at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Source line of the first token, if any
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        self.tokens.first().map(|t| t.line)
    }

    /// Token texts joined by single spaces, newline and end-of-file tokens left out
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::EndOfFile))
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Assemble logical lines from a token stream.
///
/// Always returns at least one line. The final token (normally
/// `EndOfFile`) only takes part as the lookahead of the last pair, except
/// when the stream holds a single token, which then forms the only line.
#[must_use]
pub fn assemble(tokens: &[Token]) -> Vec<LogicalLine> {
    match tokens {
        [] => return vec![LogicalLine::default()],
        [only] => {
            let mut line = LogicalLine::default();
            line.tokens.push(only.clone());
            return vec![line];
        }
        _ => {}
    }

    let mut lines = Vec::new();
    let mut line = LogicalLine::default();
    let mut skip_newline = false;

    for pair in tokens.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        if skip_newline {
            skip_newline = false;
            if current.kind == TokenKind::Newline {
                continue;
            }
        }

        if is_continuation_pair(current, next) {
            line.tokens.push(current.clone());
            skip_newline = true;
            continue;
        }

        if current.kind != TokenKind::Whitespace {
            line.tokens.push(current.clone());
        }

        if current.kind == TokenKind::Newline {
            lines.push(std::mem::take(&mut line));
        }
    }

    lines.push(line);
    lines
}

fn is_continuation_pair(current: &Token, next: &Token) -> bool {
    current.kind == TokenKind::Continuation && next.kind == TokenKind::Newline
}
