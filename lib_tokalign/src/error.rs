use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}.")]
    Io(#[from] std::io::Error),

    #[error("Unable to access {path:?}: {source}.")]
    FileIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("An XML error occurred: {0}.")]
    Xml(#[from] quick_xml::Error),

    #[error("An XML attribute error occurred: {0}.")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("The rewritten XML is not valid UTF-8: {0}.")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("The cost table could not be parsed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("The {name} of {cost} exceeds the maximum operation cost of {maximum}.")]
    CostTooLarge { name: String, cost: u64, maximum: u64 },

    #[error("A parsing error of kind '{kind:?}' occurred when the remaining input was '{input}'.")]
    Parser {
        input: String,
        kind: nom::error::ErrorKind,
    },

    #[error("Parsing was unsuccessful due to incomplete input: {0:?}.")]
    ParserIncomplete(nom::Needed),

    #[error("A <{element}> element is missing the '{attribute}' attribute.")]
    MissingAttribute { element: String, attribute: String },

    #[error(
        "The documents of the target bundle are not a subset of the documents of the source bundle. Source: {source_documents:?}. Target: {target_documents:?}."
    )]
    BundleMismatch {
        source_documents: Vec<String>,
        target_documents: Vec<String>,
    },

    #[error("The tokens of document {document} could not be aligned: {reason}.")]
    AlignmentAborted { document: String, reason: String },
}
