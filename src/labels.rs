//! Class label table.
//!
//! Labels are loaded once per model, one per line, and addressed by the class
//! index the decoder selects.

use crate::util::{YoloPostError, YoloPostResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Ordered, immutable list of class names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Creates a table from an ordered list of names.
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parses one label per line, skipping blank lines.
    pub fn parse(text: &str) -> Self {
        let labels = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim_end_matches('\r').to_owned())
            .collect();
        Self { labels }
    }

    /// Reads labels line by line from `reader`, skipping blank lines.
    pub fn from_reader<R: BufRead>(reader: R) -> YoloPostResult<Self> {
        let mut labels = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|err| YoloPostError::LabelIo {
                reason: err.to_string(),
            })?;
            if !line.trim().is_empty() {
                labels.push(line.trim_end_matches('\r').to_owned());
            }
        }
        Ok(Self { labels })
    }

    /// Reads a labels file from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> YoloPostResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| YoloPostError::LabelIo {
            reason: format!("{}: {err}", path.display()),
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the table holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Iterates labels in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LabelTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}
