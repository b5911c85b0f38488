use std::fs;
use std::io;
use std::path::Path;

use crate::error::SetupError;

/// The lines of the practice file, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PracticeText {
    lines: Vec<String>,
}

impl PracticeText {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SetupError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SetupError::Missing(path.to_path_buf()))
            }
            Err(source) => Err(SetupError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Split on newlines; CRLF endings are accepted.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Up to `n` lines immediately before `index`.
    pub fn context_before(&self, index: usize, n: usize) -> &[String] {
        let end = index.min(self.lines.len());
        &self.lines[end.saturating_sub(n)..end]
    }
}

#[cfg(test)]
impl<S: Into<String>> FromIterator<S> for PracticeText {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}
