//! Resolving many independent operand lists at once.
//!
//! Batch files hold one operand list per line, types separated by commas,
//! with an optional `|` followed by the allowed targets:
//!
//! ```text
//! # mixed precision
//! i32, f16, u32
//! abstract-int, i32 | f32
//! ptr<f32>, f32
//! ```

use rayon::prelude::*;
use tracing::debug;

use crate::convert::{resolve_common, ConversionPlan};
use crate::diagnostic::Diagnostic;
use crate::span::Span;
use crate::types::Ty;

/// One operand list from a batch file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchLine {
    /// 1-based line number in the batch file.
    pub line: usize,
    pub span: Span,
    pub sources: Vec<Ty>,
    pub restrict_to: Option<Vec<Ty>>,
}

/// Parse a batch file. Blank lines and `#` comments are skipped.
pub fn parse_batch(content: &str) -> Result<Vec<BatchLine>, Diagnostic> {
    let mut lines = Vec::new();
    let mut offset = 0usize;
    for (index, raw) in content.split('\n').enumerate() {
        let start = offset;
        offset += raw.len() + 1;

        let text = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        if text.trim().is_empty() {
            continue;
        }
        let span = Span::new(start as u32, (start + raw.trim_end().len()) as u32);
        let (operands, restrict) = match text.split_once('|') {
            Some((operands, restrict)) => (operands, Some(restrict)),
            None => (text, None),
        };
        let sources = parse_type_list(operands, span)?;
        if sources.is_empty() {
            return Err(Diagnostic::error(
                format!("line {}: no operand types", index + 1),
                span,
            ));
        }
        let restrict_to = restrict
            .map(|restrict| parse_type_list(restrict, span))
            .transpose()?;
        lines.push(BatchLine {
            line: index + 1,
            span,
            sources,
            restrict_to,
        });
    }
    Ok(lines)
}

/// Resolve every line in parallel. Results are in input order.
pub fn resolve_batch(lines: &[BatchLine]) -> Vec<Option<ConversionPlan>> {
    debug!(count = lines.len(), "resolving batch");
    lines
        .par_iter()
        .map(|line| resolve_common(&line.sources, line.restrict_to.as_deref()))
        .collect()
}

fn parse_type_list(text: &str, span: Span) -> Result<Vec<Ty>, Diagnostic> {
    split_top_level(text)
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<Ty>()
                .map_err(|e| Diagnostic::error(e.to_string(), span))
        })
        .collect()
}

/// Split on commas outside `<...>`.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
