//! Character-wise whitespace tokenizer.
//!
//! Skips whitespace, accumulates everything else until the next whitespace,
//! and records the line each token starts on for error reporting.  There is
//! no quoting and no comment syntax; whitespace is the only separator.

/// A borrowed token with the 1-based line it starts on.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub line: u32,
}

pub(crate) fn scan(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut line = 1u32;
    let mut start: Option<usize> = None;
    let mut start_line = 1u32;

    for (i, ch) in source.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token { text: &source[s..i], line: start_line });
            }
            if ch == '\n' {
                line += 1;
            }
        } else if start.is_none() {
            start = Some(i);
            start_line = line;
        }
    }
    if let Some(s) = start {
        tokens.push(Token { text: &source[s..], line: start_line });
    }
    tokens
}
