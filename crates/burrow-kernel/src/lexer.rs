//! Tokenizer for shell input lines.
//!
//! Splits a line into words with POSIX-ish quoting:
//!
//! - whitespace (space, tab, CR, LF) separates words
//! - `'single'` quotes copy everything verbatim
//! - `"double"` quotes honour `\"`, `\\`, `\$`, `` \` `` and backslash-newline;
//!   any other backslash is kept literally
//! - outside quotes a backslash escapes the next character
//! - adjacent quoted and unquoted runs join into one word
//!   (`"hello"'world'` is `helloworld`)
//!
//! Empty words are dropped, so `echo ""` yields just `echo`.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// Tokenizer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("out of memory")]
    OutOfMemory,
}

/// Characters that separate words.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"')
}

/// Characters a backslash may escape inside double quotes.
fn is_double_quote_escape(c: char) -> bool {
    matches!(c, '"' | '\\' | '$' | '`' | '\n')
}

/// A single pass over one input line.
///
/// Yields words in order. After the input is exhausted, or after the first
/// error, it yields nothing more; tokenizing again needs a fresh
/// `Tokenizer`.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            done: false,
        }
    }

    fn skip_blanks(&mut self) {
        while self.chars.next_if(|c| is_blank(*c)).is_some() {}
    }

    /// Consume a quoted run. The opening quote has already been read.
    fn quoted(&mut self, quote: char, word: &mut String) -> Result<(), LexError> {
        loop {
            let c = self.chars.next().ok_or(LexError::UnterminatedQuote)?;
            if c == quote {
                return Ok(());
            }
            if quote == '"' && c == '\\' {
                match self.chars.next_if(|n| is_double_quote_escape(*n)) {
                    Some(escaped) => push(word, escaped)?,
                    None => push(word, '\\')?,
                }
                continue;
            }
            push(word, c)?;
        }
    }

    /// Read one word, or `None` at end of input.
    fn word(&mut self) -> Result<Option<String>, LexError> {
        loop {
            self.skip_blanks();
            if self.chars.peek().is_none() {
                return Ok(None);
            }

            let mut word = String::new();
            while let Some(c) = self.chars.next_if(|c| !is_blank(*c)) {
                if is_quote(c) {
                    self.quoted(c, &mut word)?;
                } else if c == '\\' {
                    // A trailing backslash has nothing to escape; keep it.
                    push(&mut word, self.chars.next().unwrap_or('\\'))?;
                } else {
                    push(&mut word, c)?;
                }
            }

            if !word.is_empty() {
                return Ok(Some(word));
            }
        }
    }
}

fn push(word: &mut String, c: char) -> Result<(), LexError> {
    word.try_reserve(c.len_utf8())
        .map_err(|_| LexError::OutOfMemory)?;
    word.push(c);
    Ok(())
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<String, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.word() {
            Ok(Some(word)) => Some(Ok(word)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Tokenize a whole line.
pub fn tokenize(input: &str) -> Result<Vec<String>, LexError> {
    Tokenizer::new(input).collect()
}
