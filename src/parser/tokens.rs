/// Token types and the read-only query surface over a token list
///
/// `Tokens` is what the classifier sees of a logical line. All text
/// queries compare token text only, never the token kind.
use std::fmt;
use std::ops::Deref;

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    Operator,
    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    Percent,
    StringLiteral,
    Comment,
    Continuation,
    Whitespace,
    Newline,
    EndOfFile,
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword => "Keyword",
            TokenKind::Number => "Number",
            TokenKind::Operator => "Operator",
            TokenKind::Comma => "Comma",
            TokenKind::Colon => "Colon",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::LParen => "LParen",
            TokenKind::RParen => "RParen",
            TokenKind::Percent => "Percent",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::Comment => "Comment",
            TokenKind::Continuation => "Continuation",
            TokenKind::Whitespace => "Whitespace",
            TokenKind::Newline => "Newline",
            TokenKind::EndOfFile => "EndOfFile",
            TokenKind::Unknown => "Unknown",
        };
        f.pad(name)
    }
}

/// A single lexical unit with its exact source text and 1-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source slice, case preserved
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// True when this is a `Keyword` token spelling `word` in any case
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(word)
    }
}

/// Ordered token list of one logical line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    data: Vec<Token>,
}

impl Tokens {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.data.push(token);
    }

    /// First token text equals `text` exactly
    #[must_use]
    pub fn first_token_is(&self, text: &str) -> bool {
        self.data.first().is_some_and(|t| t.text == text)
    }

    /// First token text equals any of `texts` exactly
    #[must_use]
    pub fn first_token_is_any(&self, texts: &[&str]) -> bool {
        self.data
            .first()
            .is_some_and(|t| texts.iter().any(|s| t.text == *s))
    }

    /// Any token has exactly this text
    #[must_use]
    pub fn contains_token(&self, text: &str) -> bool {
        self.data.iter().any(|t| t.text == text)
    }

    /// The texts in `seq` occur as an adjacent, ordered run somewhere in the line.
    ///
    /// An empty `seq` never matches.
    #[must_use]
    pub fn contains_token_sequence(&self, seq: &[&str]) -> bool {
        self.find_sequence(seq, |token, text| token == text)
    }

    /// Like [`Tokens::contains_token_sequence`] but ignoring ASCII case
    #[must_use]
    pub fn contains_token_sequence_ignore_case(&self, seq: &[&str]) -> bool {
        self.find_sequence(seq, str::eq_ignore_ascii_case)
    }

    /// Any token is the keyword `word` (case-insensitive)
    #[must_use]
    pub fn contains_keyword(&self, word: &str) -> bool {
        self.data.iter().any(|t| t.is_keyword(word))
    }

    fn find_sequence(&self, seq: &[&str], eq: impl Fn(&str, &str) -> bool) -> bool {
        if seq.is_empty() || seq.len() > self.data.len() {
            return false;
        }
        self.data.windows(seq.len()).any(|window| {
            window
                .iter()
                .zip(seq)
                .all(|(token, text)| eq(&token.text, text))
        })
    }
}

impl Deref for Tokens {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(data: Vec<Token>) -> Self {
        Self { data }
    }
}

impl FromIterator<Token> for Tokens {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
