use std::path::PathBuf;

use crate::{error::Result, io::list_file_names};

/// An MMAX bundle directory.
///
/// Each document `<document>` is announced by a file `<document>.mmax`,
/// its tokens are stored in `Basedata/<document>_words.xml`
/// and its annotation levels in `markables/<document>_<level>_level.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    directory: PathBuf,
}

impl Bundle {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The names of all documents in this bundle, sorted.
    pub fn documents(&self) -> Result<Vec<String>> {
        Ok(list_file_names(&self.directory)?
            .into_iter()
            .filter_map(|(file_name, _)| file_name.strip_suffix(".mmax").map(str::to_string))
            .collect())
    }

    pub fn basedata_path(&self, document: &str) -> PathBuf {
        self.directory
            .join("Basedata")
            .join(format!("{document}_words.xml"))
    }

    pub fn markables_directory(&self) -> PathBuf {
        self.directory.join("markables")
    }

    /// The annotation level files of a document, as pairs of file name and path.
    ///
    /// Sentence levels are excluded.
    pub fn annotation_levels(&self, document: &str) -> Result<Vec<(String, PathBuf)>> {
        let prefix = format!("{document}_");
        Ok(list_file_names(&self.markables_directory())?
            .into_iter()
            .filter(|(file_name, _)| {
                file_name.starts_with(&prefix)
                    && file_name.ends_with("_level.xml")
                    && !file_name.ends_with("_sentence_level.xml")
            })
            .collect())
    }
}
