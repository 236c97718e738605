//! Inspection pipeline
//!
//! Runs one source text through the whole front-end:
//! - Tokenize and assemble logical lines
//! - Classify every line, building the block tree on the way
//! - Render the stage selected by `Config::format`

use std::borrow::Cow;
use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::config::{Config, DumpFormat};
use crate::cst::{build_cst, BlockTree, BlockTreeBuilder, CstNode};
use crate::parser::{assemble, tokenize, LogicalLine, Token};
use crate::Result;

/// Column width that fits every `TokenKind` and `NodeKind` name
const KIND_WIDTH: usize = 13;

/// Placeholder for a missing block boundary or line number
const MISSING: &str = "?";

/// Run the front-end over `source` and render the dump selected by `config`
#[must_use]
pub fn inspect_source(source: &str, config: &Config) -> String {
    let source = normalize_line_endings(source);

    let tokens = tokenize(&source);
    if config.format == DumpFormat::Tokens {
        debug!(tokens = tokens.len(), "tokenized");
        return render_tokens(&tokens);
    }

    let lines = assemble(&tokens);
    debug!(tokens = tokens.len(), lines = lines.len(), "assembled");
    if config.format == DumpFormat::Lines {
        return render_lines(&lines);
    }

    let mut builder = BlockTreeBuilder::new();
    let nodes = build_cst(&lines, Some(&mut builder));
    let tree = builder.into_tree();
    debug!(nodes = nodes.len(), blocks = tree.len(), "classified");

    match config.format {
        DumpFormat::Tree => render_tree(&tree, config.tree_indent),
        _ => render_nodes(&nodes, config.show_prev_kind),
    }
}

/// Read a whole file, inspect it, and write the dump to `output`
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn inspect_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<()> {
    let mut buffer = Vec::new();
    input.read_to_end(&mut buffer)?;

    let source = match String::from_utf8(buffer) {
        Ok(source) => source,
        Err(e) => {
            warn!("{filename}: invalid UTF-8 at byte {}, replacing", e.utf8_error().valid_up_to());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    output.write_all(inspect_source(&source, config).as_bytes())?;
    Ok(())
}

/// Turn `\r\n` into `\n` so carriage returns never reach the lexer
fn normalize_line_endings(source: &str) -> Cow<'_, str> {
    if source.contains("\r\n") {
        Cow::Owned(source.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let position = format!("{}:{}", token.line, token.column);
        push_line(
            &mut out,
            &format!("{position:<8}  {:<KIND_WIDTH$}  {:?}", token.kind, token.text),
        );
    }
    out
}

fn render_lines(lines: &[LogicalLine]) -> String {
    let mut out = String::new();
    for (index, line) in lines.iter().enumerate() {
        push_line(&mut out, &format!("{index:>4}  {}", line.text()));
    }
    out
}

fn render_nodes(nodes: &[CstNode<'_>], show_prev_kind: bool) -> String {
    let mut out = String::new();
    for (index, node) in nodes.iter().enumerate() {
        let mut row = format!("{index:>4}  {:<KIND_WIDTH$}  ", node.kind);
        if show_prev_kind {
            row.push_str(&format!("prev {:<KIND_WIDTH$}  ", node.prev_kind));
        }
        row.push_str(&node.line.text());
        push_line(&mut out, &row);
    }
    out
}

fn render_tree(tree: &BlockTree<'_>, indent: usize) -> String {
    let mut out = String::new();
    for (depth, id) in tree.walk() {
        let block = &tree[id];
        // An untouched root holds nothing worth printing
        let Some(begin) = block.begin else {
            continue;
        };

        let end = block
            .end
            .map_or_else(|| MISSING.to_string(), |end| end.kind.to_string());
        let line = begin
            .line_number()
            .map_or_else(|| MISSING.to_string(), |n| n.to_string());

        push_line(
            &mut out,
            &format!("{:width$}{} .. {end}  (line {line})", "", begin.kind, width = depth * indent),
        );
    }
    out
}
