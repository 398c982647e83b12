//! Headless line lexer for the portfolio terminal.
//!
//! This crate intentionally implements only the small subset the terminal needs: word
//! tokenization, quoting/escaping, and splitting a line into pipeline stages. Command lookup and
//! execution live in `terminal_shell`.
//!
//! Quoting policy: single or double quotes group words and a backslash escapes the next
//! character. An unquoted `|` always separates stages, with or without surrounding whitespace;
//! a quoted or escaped `|` is literal text.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use terminal_contract::ShellError;

/// One command invocation within a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStage {
    /// Command name (first word).
    pub name: String,
    /// Remaining words.
    pub args: Vec<String>,
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedCommandLine {
    /// Stages in execution order. Empty when the line was blank.
    pub stages: Vec<ParsedStage>,
}

impl ParsedCommandLine {
    /// Returns whether the line contained no words.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Pipe,
    Word(String),
}

/// Parses `line` into pipeline stages.
///
/// # Errors
///
/// Returns a parse error for unterminated quotes, dangling escapes, and empty stages (leading,
/// trailing, or doubled `|`).
pub fn parse_command_line(line: &str) -> Result<ParsedCommandLine, ShellError> {
    let stages = split_pipeline_tokens(tokenize_line(line)?)?;
    Ok(ParsedCommandLine {
        stages: stages
            .into_iter()
            .filter_map(|mut words| {
                if words.is_empty() {
                    return None;
                }
                let name = words.remove(0);
                Some(ParsedStage { name, args: words })
            })
            .collect(),
    })
}

/// Splits `line` into words without pipeline handling; `|` is kept as ordinary text.
///
/// Used by completion, which only cares about the stage under the cursor.
///
/// # Errors
///
/// Returns a parse error for unterminated quotes and dangling escapes.
pub fn split_words(line: &str) -> Result<Vec<String>, ShellError> {
    Ok(tokenize_line(line)?
        .into_iter()
        .map(|token| match token {
            Token::Pipe => "|".to_string(),
            Token::Word(word) => word,
        })
        .collect())
}

fn tokenize_line(line: &str) -> Result<Vec<Token>, ShellError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Tracks `""` so an explicitly empty argument survives.
    let mut quoted_word = false;
    let mut chars = line.chars();
    let mut quote = None::<char>;

    while let Some(ch) = chars.next() {
        match quote {
            Some(active) if ch == active => quote = None,
            Some(_) if ch == '\\' => {
                let Some(next) = chars.next() else {
                    return Err(ShellError::parse("dangling escape sequence"));
                };
                current.push(next);
            }
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                quoted_word = true;
            }
            None if ch == '|' => {
                flush_word(&mut tokens, &mut current, &mut quoted_word);
                tokens.push(Token::Pipe);
            }
            None if ch.is_whitespace() => flush_word(&mut tokens, &mut current, &mut quoted_word),
            None if ch == '\\' => {
                let Some(next) = chars.next() else {
                    return Err(ShellError::parse("dangling escape sequence"));
                };
                current.push(next);
            }
            None => current.push(ch),
        }
    }

    if quote.is_some() {
        return Err(ShellError::parse("unterminated quoted string"));
    }

    flush_word(&mut tokens, &mut current, &mut quoted_word);
    Ok(tokens)
}

fn flush_word(tokens: &mut Vec<Token>, current: &mut String, quoted_word: &mut bool) {
    if !current.is_empty() || *quoted_word {
        tokens.push(Token::Word(std::mem::take(current)));
    }
    *quoted_word = false;
}

fn split_pipeline_tokens(tokens: Vec<Token>) -> Result<Vec<Vec<String>>, ShellError> {
    let mut stages = Vec::new();
    let mut current = Vec::new();
    for token in tokens {
        match token {
            Token::Pipe => {
                if current.is_empty() {
                    return Err(ShellError::parse("empty pipeline stage"));
                }
                stages.push(std::mem::take(&mut current));
            }
            Token::Word(word) => current.push(word),
        }
    }
    if current.is_empty() && !stages.is_empty() {
        return Err(ShellError::parse("pipeline cannot end with '|'"));
    }
    if !current.is_empty() {
        stages.push(current);
    }
    Ok(stages)
}
