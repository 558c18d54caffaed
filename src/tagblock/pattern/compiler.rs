//! Pattern compiler
//!
//! Compilation runs in four steps:
//!
//! 1. Short-form programs are expanded into long-form text.
//! 2. The common indentation (the first line's) is stripped from every line.
//! 3. Lines are folded into a tree with an explicit indent stack.
//! 4. Node depths are renumbered to the canonical root-at-(-1) scheme.

use tracing::debug;

use crate::tagblock::error::CompileError;

use super::node::{Operator, PatternNode};

/// Indentation emitted for one nesting level when expanding short form
const INDENT_UNIT: &str = "  ";

/// Compile a pattern program, in either short or long form, into a pattern tree.
pub fn compile(program: &str) -> Result<PatternNode, CompileError> {
    let trimmed = program.trim();
    if trimmed.is_empty() {
        return Err(CompileError::Empty);
    }

    let is_long_form = trimmed.contains('\n');
    if is_long_form && trimmed.contains(',') {
        return Err(CompileError::MixedSyntax);
    }

    let long_form = if is_long_form {
        program.to_string()
    } else {
        expand_short_form(trimmed)?
    };

    let lines = dedent(split_lines(&long_form)?)?;
    let tree = build_tree(&lines)?.finalize();
    debug!(
        nodes = tree.node_count(),
        height = tree.height(),
        "compiled pattern program"
    );
    Ok(tree)
}

/// Expand a short-form program into the equivalent long-form text
pub fn expand_short_form(program: &str) -> Result<String, CompileError> {
    let mut lines = Vec::new();
    for (index, term) in program.split(',').enumerate() {
        expand_term(term, 0, index + 1, &mut lines)?;
    }
    Ok(lines.join("\n"))
}

fn expand_term(
    term: &str,
    depth: usize,
    position: usize,
    lines: &mut Vec<String>,
) -> Result<(), CompileError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(CompileError::EmptyTerm { position });
    }

    let indent = INDENT_UNIT.repeat(depth);
    if let Some(quantifier @ ('*' | '+')) = term.chars().next() {
        lines.push(format!("{indent}{quantifier}"));
        return expand_term(&term[1..], depth + 1, position, lines);
    }

    if term.contains('|') {
        lines.push(format!("{indent}|"));
        for alternative in term.split('|') {
            expand_term(alternative, depth + 1, position, lines)?;
        }
        return Ok(());
    }

    lines.push(format!("{indent}{term}"));
    Ok(())
}

/// One non-blank long-form line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Line<'a> {
    /// 1-based line number in the long-form text
    number: usize,
    indent: usize,
    text: &'a str,
}

fn split_lines(text: &str) -> Result<Vec<Line<'_>>, CompileError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let number = index + 1;
        let body = raw.trim_start_matches(' ');
        if body.starts_with(char::is_whitespace) {
            return Err(CompileError::NonSpaceIndentation { line: number });
        }
        lines.push(Line {
            number,
            indent: raw.len() - body.len(),
            text: body.trim_end(),
        });
    }
    Ok(lines)
}

/// Strip the first line's indentation from every line.
///
/// A line indented less than the first one leaves residual indentation on the first line
/// that cannot be stripped, which makes the program inconsistent.
fn dedent(mut lines: Vec<Line<'_>>) -> Result<Vec<Line<'_>>, CompileError> {
    let minimum = match lines.first() {
        Some(first) => first.indent,
        None => return Err(CompileError::Empty),
    };
    for line in &mut lines {
        if line.indent < minimum {
            return Err(CompileError::InconsistentIndent {
                line: line.number,
                found: line.indent,
                minimum,
            });
        }
        line.indent -= minimum;
    }
    Ok(lines)
}

/// A node under construction on the indent stack
struct Frame {
    /// Raw indentation of the line; `None` for the root
    indent: Option<usize>,
    /// Indentation shared by this node's children, fixed by the first child
    child_indent: Option<usize>,
    line: usize,
    operator: Operator,
    children: Vec<PatternNode>,
}

impl Frame {
    fn root() -> Self {
        Frame {
            indent: None,
            child_indent: None,
            line: 0,
            operator: Operator::Sequence,
            children: Vec::new(),
        }
    }

    fn into_node(self) -> Result<PatternNode, CompileError> {
        if self.operator.needs_operands() && self.children.is_empty() {
            return Err(CompileError::MissingOperand {
                line: self.line,
                operator: self.operator.to_string(),
            });
        }
        Ok(PatternNode::new(self.operator, self.children))
    }
}

fn build_tree(lines: &[Line<'_>]) -> Result<PatternNode, CompileError> {
    let mut stack = vec![Frame::root()];

    for line in lines {
        // Close every open node at or below this line's level; what remains on top is
        // the parent of the new node.
        while stack
            .last()
            .and_then(|frame| frame.indent)
            .is_some_and(|indent| indent >= line.indent)
        {
            close_top(&mut stack)?;
        }

        let operator = Operator::parse(line.text).map_err(|e| CompileError::UnknownTag {
            line: line.number,
            name: e.0,
        })?;

        let parent = stack.last_mut().ok_or(CompileError::Empty)?;
        match parent.child_indent {
            Some(expected) if expected != line.indent => {
                return Err(CompileError::UnalignedIndent {
                    line: line.number,
                    found: line.indent,
                    expected,
                });
            }
            Some(_) => {}
            None => parent.child_indent = Some(line.indent),
        }

        stack.push(Frame {
            indent: Some(line.indent),
            child_indent: None,
            line: line.number,
            operator,
            children: Vec::new(),
        });
    }

    while stack.len() > 1 {
        close_top(&mut stack)?;
    }
    stack.pop().ok_or(CompileError::Empty)?.into_node()
}

/// Pop the top frame and attach it to the frame below
fn close_top(stack: &mut Vec<Frame>) -> Result<(), CompileError> {
    let node = stack.pop().ok_or(CompileError::Empty)?.into_node()?;
    stack
        .last_mut()
        .ok_or(CompileError::Empty)?
        .children
        .push(node);
    Ok(())
}
