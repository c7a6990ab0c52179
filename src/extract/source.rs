use crate::foundation::error::{PolytraceError, PolytraceResult};
use std::path::{Path, PathBuf};

/// Capability that yields the ordered text blocks (paragraphs) of a document.
///
/// Implementations own all document-format awareness; the extractor only sees strings.
/// Failing to obtain the blocks must be reported as [`PolytraceError::SourceUnreadable`].
pub trait TextSource {
    /// Return every text block in document order.
    fn blocks(&mut self) -> PolytraceResult<Vec<String>>;
}

impl TextSource for Vec<String> {
    fn blocks(&mut self) -> PolytraceResult<Vec<String>> {
        Ok(self.clone())
    }
}

impl TextSource for &[&str] {
    fn blocks(&mut self) -> PolytraceResult<Vec<String>> {
        Ok(self.iter().map(|s| (*s).to_owned()).collect())
    }
}

/// UTF-8 text file where each line is one block.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    path: PathBuf,
}

impl PlainTextSource {
    /// Create a source reading `path` lazily on [`TextSource::blocks`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for PlainTextSource {
    fn blocks(&mut self) -> PolytraceResult<Vec<String>> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            PolytraceError::source_unreadable(format!(
                "failed to read '{}': {e}",
                self.path.display()
            ))
        })?;
        Ok(split_blocks(&text))
    }
}

pub(crate) fn split_blocks(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim_end_matches('\r').to_owned())
        .collect()
}
