/// `classify` - Assigns one `NodeKind` to each logical line
///
/// Rules are checked in a fixed order and the first match wins. The order is
/// significant: `end ...` forms are settled before anything else, `module
/// procedure` before the type-definition check, and the type-definition check
/// before the keyword dispatch (so `type, extends(t) :: u` never reaches it).
///
/// Keyword comparisons ignore ASCII case. Classification looks only at the
/// line itself, never at its neighbours.
use super::types::NodeKind;
use crate::parser::{LogicalLine, Token, TokenKind, Tokens};

/// Intrinsic type keywords that start a declaration statement
const DECLARATION_TYPE_KEYWORDS: [&str; 4] = ["integer", "real", "logical", "double"];

/// Classify one logical line. Total: unmatched lines are `Unknown`.
#[must_use]
pub fn classify(line: &LogicalLine) -> NodeKind {
    let tokens = &line.tokens;

    let Some(first) = tokens.first() else {
        return NodeKind::Blank;
    };

    if first.kind == TokenKind::Comment {
        return NodeKind::Comment;
    }

    if first.is_keyword("end") || first.is_keyword("endif") || first.is_keyword("enddo") {
        return classify_end_construct(tokens);
    }

    if tokens.contains_token_sequence_ignore_case(&["module", "procedure"]) {
        return NodeKind::Declaration;
    }

    if is_type_construct(tokens) {
        return NodeKind::Type;
    }

    if first.kind == TokenKind::Keyword {
        if let Some(kind) = classify_keyword_statement(first, tokens) {
            return kind;
        }
    }

    if is_declaration(first) {
        return NodeKind::Declaration;
    }

    if tokens.contains_token("=") {
        return NodeKind::Assignment;
    }

    NodeKind::Unknown
}

/// Resolve `end <construct>`, `endif` and `enddo`.
///
/// A bare `end`, or `end` followed by a word that names no block, is `Unknown`.
#[must_use]
pub fn classify_end_construct(tokens: &Tokens) -> NodeKind {
    let Some(first) = tokens.first() else {
        return NodeKind::Unknown;
    };

    if first.is_keyword("endif") {
        return NodeKind::EndIf;
    }
    if first.is_keyword("enddo") {
        return NodeKind::EndDo;
    }
    if !first.is_keyword("end") {
        return NodeKind::Unknown;
    }

    let Some(second) = tokens.get(1).filter(|t| t.kind == TokenKind::Keyword) else {
        return NodeKind::Unknown;
    };

    match second.text.to_ascii_lowercase().as_str() {
        "program" => NodeKind::EndProgram,
        "module" => NodeKind::EndModule,
        "subroutine" => NodeKind::EndSubroutine,
        "function" => NodeKind::EndFunction,
        "interface" => NodeKind::EndInterface,
        "select" => NodeKind::EndSelect,
        "do" => NodeKind::EndDo,
        "if" => NodeKind::EndIf,
        "type" => NodeKind::EndType,
        _ => NodeKind::Unknown,
    }
}

/// A derived-type definition mentions `type` but never as `type(`, which
/// would be a declaration of a variable of that type.
fn is_type_construct(tokens: &Tokens) -> bool {
    tokens.contains_keyword("type") && !tokens.contains_token_sequence_ignore_case(&["type", "("])
}

/// Dispatch on a leading keyword. `None` lets the caller fall through to the
/// declaration and assignment checks.
fn classify_keyword_statement(first: &Token, tokens: &Tokens) -> Option<NodeKind> {
    let second_is = |word: &str| tokens.get(1).is_some_and(|t| t.is_keyword(word));

    if first.is_keyword("abstract") && second_is("interface") {
        return Some(NodeKind::Interface);
    }

    let direct = match first.text.to_ascii_lowercase().as_str() {
        "program" => Some(NodeKind::Program),
        "module" => Some(NodeKind::Module),
        "use" => Some(NodeKind::Use),
        "call" => Some(NodeKind::Call),
        "select" => Some(NodeKind::SelectCase),
        "case" => Some(NodeKind::Case),
        "interface" => Some(NodeKind::Interface),
        "do" => Some(NodeKind::Do),
        // print is laid out like a call
        "print" => Some(NodeKind::Call),
        _ => None,
    };
    if direct.is_some() {
        return direct;
    }

    // Prefixes such as `pure`, `recursive` or a result type may come first
    if tokens.contains_keyword("function") {
        return Some(NodeKind::Function);
    }
    if tokens.contains_keyword("subroutine") {
        return Some(NodeKind::Subroutine);
    }

    if first.is_keyword("if") {
        return Some(if tokens.contains_keyword("then") {
            NodeKind::IfConstruct
        } else {
            NodeKind::If
        });
    }

    if first.is_keyword("else") {
        return Some(if second_is("if") {
            NodeKind::ElseIf
        } else {
            NodeKind::Else
        });
    }

    None
}

fn is_declaration(first: &Token) -> bool {
    first.kind == TokenKind::Keyword
        && DECLARATION_TYPE_KEYWORDS
            .iter()
            .any(|kw| first.text.eq_ignore_ascii_case(kw))
}
