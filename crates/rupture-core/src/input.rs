//! Plain-text input file scanning.
//!
//! Input files are divided into sections. A section starts at a line
//! equal to its marker (e.g. `[rupture.outputlist]`) and runs until the
//! first blank line or the end of the file. Text after `#` is a comment;
//! comment-only lines are skipped and do not end a section.

use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// An input file held in memory.
#[derive(Clone, Debug)]
pub struct InputFile {
    source: String,
    text: String,
}

impl InputFile {
    /// Read an input file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: path.display().to_string(),
            text,
        })
    }

    /// Wrap in-memory text. `source` names it in error messages.
    pub fn from_text(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Name used in error messages (usually the path).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether a line equal to `marker` exists.
    pub fn has_section(&self, marker: &str) -> bool {
        self.text.lines().any(|l| l.trim() == marker)
    }

    /// Locate a section by its marker line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if no line equals `marker`.
    pub fn section(&self, marker: &str) -> Result<Section<'_>, ConfigError> {
        let mut numbered = self.text.lines().enumerate();
        numbered
            .by_ref()
            .find(|(_, l)| l.trim() == marker)
            .ok_or_else(|| ConfigError::MissingSection {
                marker: marker.to_string(),
            })?;

        let mut lines = Vec::new();
        for (idx, raw) in numbered {
            if raw.trim().is_empty() {
                break;
            }
            let content = strip_comment(raw);
            if !content.is_empty() {
                lines.push((idx + 1, content));
            }
        }
        Ok(Section {
            source: &self.source,
            marker: marker.to_string(),
            lines,
            pos: 0,
        })
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(at) => line[..at].trim(),
        None => line.trim(),
    }
}

/// The body of one input section, consumed line by line.
#[derive(Clone, Debug)]
pub struct Section<'a> {
    source: &'a str,
    marker: String,
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Section<'a> {
    /// The marker this section was found under.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Name of the file the section came from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Whether every line has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Next non-comment line and its 1-based line number.
    pub fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }

    /// Next line, or [`ConfigError::UnexpectedEof`] if the section ended.
    pub fn expect_line(&mut self) -> Result<(usize, &'a str), ConfigError> {
        self.next_line().ok_or_else(|| ConfigError::UnexpectedEof {
            section: self.marker.clone(),
        })
    }

    /// A [`ConfigError::Parse`] located at `line`.
    pub fn error_at(&self, line: usize, reason: impl Into<String>) -> ConfigError {
        ConfigError::Parse {
            source: self.source.to_string(),
            line,
            reason: reason.into(),
        }
    }

    /// Parse every whitespace-separated token of `text` as `T`.
    ///
    /// If `expected` is given, the token count must match exactly.
    pub fn parse_tokens<T: FromStr>(
        &self,
        line: usize,
        text: &str,
        expected: Option<usize>,
    ) -> Result<Vec<T>, ConfigError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if let Some(n) = expected {
            if tokens.len() != n {
                return Err(self.error_at(
                    line,
                    format!("expected {n} values, found {}", tokens.len()),
                ));
            }
        }
        tokens
            .iter()
            .map(|t| {
                t.parse::<T>()
                    .map_err(|_| self.error_at(line, format!("cannot parse '{t}'")))
            })
            .collect()
    }
}
