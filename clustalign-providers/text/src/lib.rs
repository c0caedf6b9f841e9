//! Line-oriented label and cluster id columns.
//!
//! Each non-empty line holds the identifier of one item, in item order. The
//! same reader serves ground-truth label files and the cluster id files
//! written by a clustering run.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while reading a text column.
#[derive(Debug, Error)]
pub enum TextProviderError {
    /// The input holds no lines.
    #[error("text input contained no lines")]
    EmptyInput,
    /// A line is empty after trimming, so it names no item.
    #[error("line {line} is blank")]
    BlankLine {
        /// One-based line number.
        line: usize,
    },
    /// Reading the input failed.
    #[error("failed to read text input: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifiers of a column, typed by their content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdColumn {
    /// Every line parsed as a signed integer, so ids order numerically.
    Integers(Vec<i64>),
    /// At least one line is not an integer; ids order lexicographically.
    Strings(Vec<String>),
}

impl IdColumn {
    /// Returns the number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Integers(ids) => ids.len(),
            Self::Strings(ids) => ids.len(),
        }
    }

    /// Returns whether the column has no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered identifiers read from a UTF-8 text source.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use clustalign_providers_text::{IdColumn, TextProvider};
///
/// let provider = TextProvider::try_from_reader("kmeans", Cursor::new("3\n1\r\n3\n"))?;
/// assert_eq!(provider.lines(), &["3", "1", "3"]);
/// assert_eq!(provider.into_ids(), IdColumn::Integers(vec![3, 1, 3]));
/// # Ok::<(), clustalign_providers_text::TextProviderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TextProvider {
    name: String,
    lines: Vec<String>,
}

impl TextProvider {
    /// Wraps already split lines.
    ///
    /// # Errors
    /// Returns [`TextProviderError::EmptyInput`] when `lines` is empty and
    /// [`TextProviderError::BlankLine`] when a line is blank.
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Result<Self, TextProviderError> {
        if lines.is_empty() {
            return Err(TextProviderError::EmptyInput);
        }
        if let Some(index) = lines.iter().position(|line| line.trim().is_empty()) {
            return Err(TextProviderError::BlankLine { line: index + 1 });
        }
        Ok(Self {
            name: name.into(),
            lines,
        })
    }

    /// Reads one identifier per line, trimming surrounding whitespace and
    /// `\r\n` line endings.
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] when reading fails, plus every error
    /// of [`Self::new`].
    #[instrument(name = "providers.text.load", err, skip(name, reader))]
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextProviderError> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?.trim().to_owned());
        }
        debug!(lines = lines.len(), "read text column");
        Self::new(name, lines)
    }

    /// Reads the file at `path`; see [`Self::try_from_reader`].
    ///
    /// # Errors
    /// Returns [`TextProviderError::Io`] when the file cannot be opened, plus
    /// every error of [`Self::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextProviderError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Returns the name the column was loaded under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identifiers in item order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`: empty inputs are rejected on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consumes the provider and returns the raw lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Consumes the provider and types the identifiers.
    ///
    /// Integer ids such as `2` and `10` must order numerically, otherwise the
    /// contingency columns would follow `"10" < "2"`.
    #[must_use]
    pub fn into_ids(self) -> IdColumn {
        let integers: Option<Vec<i64>> = self
            .lines
            .iter()
            .map(|line| line.parse::<i64>().ok())
            .collect();
        integers.map_or(IdColumn::Strings(self.lines), IdColumn::Integers)
    }
}
