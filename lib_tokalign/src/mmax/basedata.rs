use std::path::Path;

use log::debug;
use quick_xml::{Reader, events::Event};
use rustc_hash::FxHashMap;

use crate::{
    error::{Error, Result},
    io::read_to_string,
};

use super::attribute_value;

/// The tokens of one document, as stored in `Basedata/<document>_words.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basedata {
    tokens: Vec<String>,
    ids: Vec<String>,
    positions: FxHashMap<String, usize>,
}

impl Basedata {
    pub fn read(path: &Path) -> Result<Self> {
        debug!("Reading basedata from {path:?}");
        Self::parse(&read_to_string(path)?)
    }

    /// Parses the `<word id="...">text</word>` elements of a basedata file in document order.
    ///
    /// The token text is trimmed. Words without text become empty tokens.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut basedata = Self::default();
        let mut current_word: Option<(String, String)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(element) if element.name().as_ref() == b"word" => {
                    let id = attribute_value(&element, "id")?.ok_or_else(missing_id)?;
                    current_word = Some((id, String::new()));
                }
                Event::Empty(element) if element.name().as_ref() == b"word" => {
                    let id = attribute_value(&element, "id")?.ok_or_else(missing_id)?;
                    basedata.push(id, String::new());
                }
                Event::Text(text) => {
                    if let Some((_, word)) = &mut current_word {
                        word.push_str(&text.unescape()?);
                    }
                }
                Event::CData(text) => {
                    if let Some((_, word)) = &mut current_word {
                        word.push_str(&String::from_utf8(text.into_inner().into_owned())?);
                    }
                }
                Event::End(element) if element.name().as_ref() == b"word" => {
                    if let Some((id, word)) = current_word.take() {
                        basedata.push(id, word.trim().to_string());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(basedata)
    }

    fn push(&mut self, id: String, token: String) {
        self.positions.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The position of the token with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// The id of the token at the given position.
    pub fn id(&self, position: usize) -> Option<&str> {
        self.ids.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn missing_id() -> Error {
    Error::MissingAttribute {
        element: "word".to_string(),
        attribute: "id".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::Basedata;

    #[test]
    fn parse_words() {
        let basedata = Basedata::parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE words SYSTEM "words.dtd">
<words>
<word id="word_1">Mr.</word>
<word id="word_2"> Smith </word>
<word id="word_3">&amp;</word>
<word id="word_4"/>
</words>
"#,
        )
        .unwrap();

        assert_eq!(basedata.tokens(), ["Mr.", "Smith", "&", ""]);
        assert_eq!(basedata.ids(), ["word_1", "word_2", "word_3", "word_4"]);
        assert_eq!(basedata.position("word_3"), Some(2));
        assert_eq!(basedata.position("word_5"), None);
        assert_eq!(basedata.id(1), Some("word_2"));
        assert_eq!(basedata.len(), 4);
    }

    #[test]
    fn word_without_id() {
        assert!(matches!(
            Basedata::parse("<words><word>a</word></words>"),
            Err(Error::MissingAttribute { .. })
        ));
    }
}
