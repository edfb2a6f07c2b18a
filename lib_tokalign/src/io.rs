use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

pub fn translate_nom_error(error: nom::Err<nom::error::Error<&str>>) -> Error {
    match error {
        nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
        nom::Err::Error(error) | nom::Err::Failure(error) => Error::Parser {
            input: error.input.to_string(),
            kind: error.code,
        },
    }
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::FileIo {
        path: path.to_owned(),
        source,
    })
}

pub fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::FileIo {
        path: path.to_owned(),
        source,
    })
}

/// Lists the file names in a directory, sorted.
pub fn list_file_names(path: &Path) -> Result<Vec<(String, PathBuf)>> {
    let into_error = |source| Error::FileIo {
        path: path.to_owned(),
        source,
    };

    let mut file_names = Vec::new();
    for entry in fs::read_dir(path).map_err(into_error)? {
        let entry = entry.map_err(into_error)?;
        if let Some(file_name) = entry.file_name().to_str() {
            file_names.push((file_name.to_owned(), entry.path()));
        }
    }
    file_names.sort();
    Ok(file_names)
}
