//! Comment block extraction for C-family sources (Go, Rust, TypeScript, ...).
//!
//! Produces one block per `//` comment line and one block per `/* */` comment, with
//! delimiters stripped and the position of the first character after the opening
//! delimiter. String and rune literals are skipped so `"http://x"` is not a comment.

use crate::core::extract::CommentBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    /// Inside a quoted literal closed by the given delimiter.
    Literal(char),
    LineComment,
    BlockComment,
}

struct Cursor {
    line: usize,
    column: usize,
}

pub fn extract_comment_blocks(source: &str) -> Vec<CommentBlock> {
    let mut blocks = Vec::new();
    let mut state = State::Code;
    let mut cursor = Cursor { line: 1, column: 1 };
    let mut current = String::new();
    let mut start = (1, 1);
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        advance(&mut cursor, c);

        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    advance(&mut cursor, '/');
                    chars.next();
                    state = State::LineComment;
                    start = (cursor.line, cursor.column);
                }
                '/' if chars.peek() == Some(&'*') => {
                    advance(&mut cursor, '*');
                    chars.next();
                    state = State::BlockComment;
                    start = (cursor.line, cursor.column);
                }
                '"' | '\'' | '`' => state = State::Literal(c),
                _ => {}
            },
            State::Literal(delimiter) => match c {
                // Backtick literals have no escapes
                '\\' if delimiter != '`' => {
                    if let Some(escaped) = chars.next() {
                        advance(&mut cursor, escaped);
                    }
                }
                // Unterminated single-line literal; resync at end of line
                '\n' if delimiter != '`' => state = State::Code,
                _ if c == delimiter => state = State::Code,
                _ => {}
            },
            State::LineComment => {
                if c == '\n' {
                    blocks.push(CommentBlock::new(std::mem::take(&mut current), start.0, start.1));
                    state = State::Code;
                } else if c != '\r' {
                    current.push(c);
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    advance(&mut cursor, '/');
                    chars.next();
                    blocks.push(CommentBlock::new(std::mem::take(&mut current), start.0, start.1));
                    state = State::Code;
                } else if c != '\r' {
                    current.push(c);
                }
            }
        }
    }

    // A comment running to end of input is still a comment
    if matches!(state, State::LineComment | State::BlockComment) {
        blocks.push(CommentBlock::new(current, start.0, start.1));
    }

    blocks
}

fn advance(cursor: &mut Cursor, c: char) {
    if c == '\n' {
        cursor.line += 1;
        cursor.column = 1;
    } else {
        cursor.column += 1;
    }
}
