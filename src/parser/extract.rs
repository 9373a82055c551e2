//! Change block extraction.
//!
//! A block opens on a line starting with exactly two spaces, `#` and a space,
//! and closes on the first later line that is exactly four spaces and `}`.
//! Nested braces sit deeper than four spaces, so the scan tracks indentation
//! instead of counting braces. A header line naming another resource while a
//! block is still open means the open block never closed.

use tracing::trace;

use crate::error::ParseError;

use super::classify::split_address;

const BLOCK_HEADER: &str = "  # ";
const BLOCK_CLOSE: &str = "    }";
const CLOSE_INDENT: usize = 4;

/// One raw change block borrowed from its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Block text from the header line through the closing brace.
    pub text: &'a str,
    /// 1-based line within the segment where the block starts.
    pub line: usize,
}

/// Open block while scanning.
struct OpenBlock {
    start: usize,
    line: usize,
    lines: usize,
}

/// Returns every change block in `segment`, left to right.
///
/// # Errors
///
/// Returns [`ParseError::MalformedChangeBlock`] if a closing brace inside a
/// block is indented less than four spaces, or if a block never closes.
pub fn extract_blocks(segment: &str) -> Result<Vec<RawBlock<'_>>, ParseError> {
    let mut blocks = Vec::new();
    let mut open: Option<OpenBlock> = None;
    let mut offset = 0;

    for (idx, raw) in segment.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;
        let content = raw.trim_end_matches('\n').trim_end_matches('\r');

        match open.as_mut() {
            None => {
                if content.starts_with(BLOCK_HEADER) {
                    open = Some(OpenBlock {
                        start: offset,
                        line: line_no,
                        lines: 1,
                    });
                }
            }
            Some(block) => {
                block.lines += 1;
                if content == BLOCK_CLOSE {
                    let end = offset + content.len();
                    trace!(line = block.line, lines = block.lines, "Extracted change block");
                    blocks.push(RawBlock {
                        text: &segment[block.start..end],
                        line: block.line,
                    });
                    open = None;
                } else if starts_new_block(content) {
                    return Err(ParseError::malformed(
                        format!(
                            "block never closes before the next header on line {line_no}"
                        ),
                        0,
                        block.line,
                    ));
                } else if let Some(indent) = shallow_close_indent(content) {
                    return Err(ParseError::malformed(
                        format!(
                            "closing brace indented {indent} spaces, expected {CLOSE_INDENT}"
                        ),
                        0,
                        block.line,
                    ));
                }
            }
        }

        offset += raw.len();
    }

    if let Some(block) = open {
        return Err(ParseError::malformed(
            format!("block never closes after {} lines", block.lines),
            0,
            block.line,
        ));
    }

    Ok(blocks)
}

/// Returns true for a header line that names a resource address.
///
/// Secondary header lines are parenthesized prose, e.g.
/// `  # (config refers to values not yet known)`.
fn starts_new_block(content: &str) -> bool {
    content
        .strip_prefix(BLOCK_HEADER)
        .and_then(|rest| rest.split_whitespace().next())
        .is_some_and(|token| !token.starts_with('(') && split_address(token).is_some())
}

/// Indentation of a bare `}` line that is shallower than the block close.
fn shallow_close_indent(content: &str) -> Option<usize> {
    let trimmed = content.trim_start_matches(' ');
    let indent = content.len() - trimmed.len();
    (trimmed == "}" && indent < CLOSE_INDENT).then_some(indent)
}
