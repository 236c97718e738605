/// `Tokenizer` - Converts Fortran source text into a flat token stream
///
/// This module handles:
/// - Dispatching on the next character to one token rule
/// - Case-insensitive keyword recognition (text keeps its original case)
/// - Folding a unary `+`/`-` into the following number literal
///
/// The tokenizer never fails: any character no rule claims becomes a
/// one-character `Unknown` token. Whitespace is dropped from the output and
/// the stream always ends with exactly one `EndOfFile` token.
use super::patterns::{is_keyword, IDENT_RE, NUMBER_RE, ONE_CHAR_OPERATORS, TWO_CHAR_OPERATORS};
use super::tokens::{Token, TokenKind};

/// Tokenize a whole source string
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).tokenize()
}

/// Single-use lexer over one source string
pub struct Tokenizer<'a> {
    source: &'a str,
    /// Byte offset of the next unread character
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Consume the tokenizer and produce the complete token stream
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut out = Vec::with_capacity(self.source.len() / 4 + 1);

        loop {
            let token = self.next_token();
            let at_end = token.kind == TokenKind::EndOfFile;

            if token.kind != TokenKind::Whitespace {
                push_merging_sign(&mut out, token);
            }

            if at_end {
                break;
            }
        }

        out
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Consume `len` bytes and return them, keeping line/column in step
    fn advance(&mut self, len: usize) -> &'a str {
        let text = &self.source[self.pos..self.pos + len];
        self.pos += len;
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        text
    }

    fn next_token(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let rest = self.rest();

        let Some(c) = rest.chars().next() else {
            return Token::new(TokenKind::EndOfFile, "", line, column);
        };

        let (kind, len) = match c {
            ' ' | '\t' => (
                TokenKind::Whitespace,
                rest.find(|ch: char| ch != ' ' && ch != '\t')
                    .unwrap_or(rest.len()),
            ),
            '\n' => (TokenKind::Newline, 1),
            '!' => (TokenKind::Comment, rest.find('\n').unwrap_or(rest.len())),
            '&' => (TokenKind::Continuation, 1),
            '\'' | '"' => (TokenKind::StringLiteral, string_literal_len(rest, c)),
            c if c.is_ascii_alphabetic() => {
                let len = IDENT_RE.find(rest).map_or(1, |m| m.end());
                let kind = if is_keyword(&rest[..len]) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                (kind, len)
            }
            c if c.is_ascii_digit() => (
                TokenKind::Number,
                NUMBER_RE.find(rest).map_or(1, |m| m.end()),
            ),
            ',' => (TokenKind::Comma, 1),
            ':' => (TokenKind::Colon, 1),
            ';' => (TokenKind::Semicolon, 1),
            '(' => (TokenKind::LParen, 1),
            ')' => (TokenKind::RParen, 1),
            '%' => (TokenKind::Percent, 1),
            c => operator_len(rest, c).map_or((TokenKind::Unknown, c.len_utf8()), |len| {
                (TokenKind::Operator, len)
            }),
        };

        let text = self.advance(len);
        Token::new(kind, text, line, column)
    }
}

/// Length of a quoted literal starting at `rest[0]`, closing quote included.
///
/// An unterminated literal runs to the end of input. No escape processing.
fn string_literal_len(rest: &str, quote: char) -> usize {
    rest[1..].find(quote).map_or(rest.len(), |i| i + 2)
}

fn operator_len(rest: &str, c: char) -> Option<usize> {
    if TWO_CHAR_OPERATORS.iter().any(|op| rest.starts_with(op)) {
        Some(2)
    } else if ONE_CHAR_OPERATORS.contains(&c) {
        Some(1)
    } else {
        None
    }
}

/// Append `token`, folding it into a preceding unary sign when appropriate
fn push_merging_sign(out: &mut Vec<Token>, token: Token) {
    if is_unary_sign_merge(out, &token) {
        if let Some(sign) = out.last_mut() {
            sign.kind = TokenKind::Number;
            sign.text.push_str(&token.text);
        }
    } else {
        out.push(token);
    }
}

/// A number directly after a lone `+`/`-` is signed unless the sign follows
/// an operand, in which case the sign is a binary operator (`1 - -1`).
fn is_unary_sign_merge(out: &[Token], current: &Token) -> bool {
    if current.kind != TokenKind::Number {
        return false;
    }

    let [.., prev, sign] = out else {
        return false;
    };

    let is_sign = sign.kind == TokenKind::Operator && (sign.text == "+" || sign.text == "-");
    is_sign && !matches!(prev.kind, TokenKind::Number | TokenKind::Identifier)
}
