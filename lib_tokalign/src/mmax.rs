//! Porting of MMAX annotations between two tokenisations of the same documents.
//!
//! The tokens of each document are aligned with [`align_with_config`](crate::token_aligner::align_with_config),
//! and the spans of all markables are translated through the linked token pairs.
//! Markables touching a token without counterpart are dropped.

use std::{fmt::Display, fs, ops::AddAssign, path::Path};

use log::info;
use quick_xml::events::BytesStart;

use crate::{
    error::{Error, Result},
    index_mapping::IndexMapping,
    token_aligner::{AlignmentConfig, align_with_config},
};

use basedata::Basedata;
use bundle::Bundle;
use markables::{LevelStatistics, SpanRemapper, convert_level};

pub mod basedata;
pub mod bundle;
pub mod markables;
pub mod span;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortStatistics {
    pub documents: usize,
    pub levels: usize,
    pub converted_markables: usize,
    pub discarded_markables: usize,
}

/// Ports the markables of all documents of the target bundle from the source bundle.
///
/// The converted level files are written into the `markables` directory of the target bundle,
/// replacing existing files of the same name.
/// Fails without writing anything if the target bundle contains a document that the source bundle lacks.
pub fn port_annotations(
    source: &Path,
    target: &Path,
    config: &AlignmentConfig,
) -> Result<PortStatistics> {
    let source = Bundle::new(source);
    let target = Bundle::new(target);

    let source_documents = source.documents()?;
    let target_documents = target.documents()?;
    if !target_documents
        .iter()
        .all(|document| source_documents.contains(document))
    {
        return Err(Error::BundleMismatch {
            source_documents,
            target_documents,
        });
    }

    let output_directory = target.markables_directory();
    fs::create_dir_all(&output_directory).map_err(|source| Error::FileIo {
        path: output_directory.clone(),
        source,
    })?;

    let mut statistics = PortStatistics::default();
    for document in &target_documents {
        info!("Reading document {document}");
        let source_basedata = Basedata::read(&source.basedata_path(document))?;
        let target_basedata = Basedata::read(&target.basedata_path(document))?;

        info!("Aligning document {document}");
        let result = align_with_config(source_basedata.tokens(), target_basedata.tokens(), config);
        let reason = result.statistics().result.to_string();
        let edges = result.into_edges().ok_or_else(|| Error::AlignmentAborted {
            document: document.clone(),
            reason,
        })?;

        let mapping = IndexMapping::from_edges(&edges);
        let remapper = SpanRemapper::new(&source_basedata, &target_basedata, &mapping);
        for (file_name, path) in source.annotation_levels(document)? {
            statistics += convert_level(&path, &output_directory.join(file_name), &remapper)?;
            statistics.levels += 1;
        }
        statistics.documents += 1;
    }

    info!("{statistics}");
    Ok(statistics)
}

/// Reads an attribute value with entities resolved.
fn attribute_value(element: &BytesStart, name: &str) -> Result<Option<String>> {
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == name.as_bytes() {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

impl AddAssign<LevelStatistics> for PortStatistics {
    fn add_assign(&mut self, rhs: LevelStatistics) {
        self.converted_markables += rhs.converted_markables;
        self.discarded_markables += rhs.discarded_markables;
    }
}

impl Display for PortStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ported {} documents with {} levels: {} markables converted, {} discarded",
            self.documents, self.levels, self.converted_markables, self.discarded_markables
        )
    }
}
