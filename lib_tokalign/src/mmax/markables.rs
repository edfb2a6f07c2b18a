use std::path::Path;

use log::{debug, info, warn};
use quick_xml::{
    Reader, Writer,
    events::{BytesStart, Event},
};

use crate::{
    error::{Error, Result},
    index_mapping::IndexMapping,
    io::{read_to_string, write},
};

use super::{attribute_value, basedata::Basedata, span::Span};

/// Translates markable spans from the token ids of the source basedata to the token ids of the target basedata.
#[derive(Debug, Clone, Copy)]
pub struct SpanRemapper<'a> {
    source: &'a Basedata,
    target: &'a Basedata,
    mapping: &'a IndexMapping,
}

/// The reason why a span cannot be translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unmapped {
    /// The id does not belong to any source token.
    UnknownToken(String),
    /// The source token with this id has no linked target token.
    Unaligned(String),
}

/// How many markables of one annotation level were converted or discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelStatistics {
    pub converted_markables: usize,
    pub discarded_markables: usize,
}

impl<'a> SpanRemapper<'a> {
    pub fn new(source: &'a Basedata, target: &'a Basedata, mapping: &'a IndexMapping) -> Self {
        Self {
            source,
            target,
            mapping,
        }
    }

    pub fn remap(&self, span: &Span) -> std::result::Result<Span, Unmapped> {
        span.try_map(|id| {
            let source_position = self
                .source
                .position(id)
                .ok_or_else(|| Unmapped::UnknownToken(id.clone()))?;
            self.mapping
                .get(source_position)
                .and_then(|target_position| self.target.id(target_position))
                .map(str::to_string)
                .ok_or_else(|| Unmapped::Unaligned(id.clone()))
        })
    }
}

/// Rewrites the markable level file at `input` into `output`, translating all spans.
pub fn convert_level(
    input: &Path,
    output: &Path,
    remapper: &SpanRemapper,
) -> Result<LevelStatistics> {
    info!(
        "Converting level {}",
        input
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    );

    let (xml, statistics) = convert_markables(&read_to_string(input)?, remapper)?;
    write(output, xml)?;
    Ok(statistics)
}

/// Translates the spans of all `<markable>` elements in `xml`.
///
/// Markables whose span cannot be translated are removed together with their content.
/// Everything else is copied verbatim.
pub fn convert_markables(
    xml: &str,
    remapper: &SpanRemapper,
) -> Result<(String, LevelStatistics)> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());
    let mut statistics = LevelStatistics::default();
    // Nesting depth inside a discarded markable.
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event()?;

        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(element) if is_markable(&element) => {
                match convert_markable(&element, remapper, &mut statistics)? {
                    Some(element) => writer.write_event(Event::Start(element))?,
                    None => skip_depth = 1,
                }
            }
            Event::Empty(element) if is_markable(&element) => {
                if let Some(element) = convert_markable(&element, remapper, &mut statistics)? {
                    writer.write_event(Event::Empty(element))?;
                }
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    Ok((String::from_utf8(writer.into_inner())?, statistics))
}

fn is_markable(element: &BytesStart) -> bool {
    element.name().as_ref() == b"markable"
}

/// Returns the markable with its span translated, or `None` if it has to be discarded.
fn convert_markable(
    element: &BytesStart,
    remapper: &SpanRemapper,
    statistics: &mut LevelStatistics,
) -> Result<Option<BytesStart<'static>>> {
    let id = attribute_value(element, "id")?.unwrap_or_default();
    let old_span = attribute_value(element, "span")?.ok_or_else(|| Error::MissingAttribute {
        element: "markable".to_string(),
        attribute: "span".to_string(),
    })?;

    let new_span = match remapper.remap(&Span::parse(&old_span)?) {
        Ok(new_span) => new_span.to_string(),
        Err(Unmapped::Unaligned(token)) => {
            warn!("Discarding unaligned markable {id} (token {token} has no counterpart)");
            statistics.discarded_markables += 1;
            return Ok(None);
        }
        Err(Unmapped::UnknownToken(token)) => {
            warn!("Discarding markable {id} with unknown token {token}");
            statistics.discarded_markables += 1;
            return Ok(None);
        }
    };
    debug!("Converted {old_span} to {new_span}");
    statistics.converted_markables += 1;

    let mut converted = BytesStart::new(String::from_utf8(element.name().as_ref().to_vec())?);
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == b"span" {
            converted.push_attribute(("span", new_span.as_str()));
        } else {
            converted.push_attribute(attribute);
        }
    }
    Ok(Some(converted))
}
