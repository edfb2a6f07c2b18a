use std::{fs, path::Path};

use quick_xml::{Reader, events::Event};

use crate::{
    error::Error,
    index_mapping::IndexMapping,
    token_aligner::{AlignmentConfig, align},
};

use super::{
    attribute_value,
    basedata::Basedata,
    bundle::Bundle,
    markables::{LevelStatistics, SpanRemapper, Unmapped, convert_markables},
    port_annotations,
    span::Span,
};

const LEVEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE markables SYSTEM "markables.dtd">
<markables xmlns="www.eml.org/NameSpaces/np">
<!-- noun phrases -->
<markable id="markable_1" span="s_1..s_4" mmax_level="np"/>
<markable id="markable_2" span="s_4,s_5" mmax_level="np"/>
<markable id="markable_3" span="s_2" mmax_level="np"/>
<markable id="markable_4" span="s_1..s_3" mmax_level="np"/>
<markable id="markable_5" span="s_4..s_5" mmax_level="np"/>
</markables>
"#;

fn words_xml(id_prefix: &str, tokens: &[&str]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE words SYSTEM \"words.dtd\">\n<words>\n",
    );
    for (index, token) in tokens.iter().enumerate() {
        xml.push_str(&format!(
            "<word id=\"{id_prefix}_{}\">{token}</word>\n",
            index + 1
        ));
    }
    xml.push_str("</words>\n");
    xml
}

fn write_document(bundle: &Path, document: &str, id_prefix: &str, tokens: &[&str]) {
    fs::create_dir_all(bundle.join("Basedata")).unwrap();
    fs::write(bundle.join(format!("{document}.mmax")), "<mmax_project/>\n").unwrap();
    fs::write(
        bundle.join("Basedata").join(format!("{document}_words.xml")),
        words_xml(id_prefix, tokens),
    )
    .unwrap();
}

fn write_level(bundle: &Path, file_name: &str, contents: &str) {
    fs::create_dir_all(bundle.join("markables")).unwrap();
    fs::write(bundle.join("markables").join(file_name), contents).unwrap();
}

/// The id and span of every markable in `xml`.
fn markables(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    let mut markables = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(element) | Event::Empty(element)
                if element.name().as_ref() == b"markable" =>
            {
                markables.push((
                    attribute_value(&element, "id").unwrap().unwrap(),
                    attribute_value(&element, "span").unwrap().unwrap(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    markables
}

/// The token texts covered by the boundaries of a span.
fn boundary_tokens(span: &str, basedata: &Basedata) -> Vec<String> {
    Span::parse(span)
        .unwrap()
        .boundaries()
        .map(|id| basedata.tokens()[basedata.position(id).unwrap()].clone())
        .collect()
}

fn source_basedata() -> Basedata {
    Basedata::parse(&words_xml("s", &["the", "old", "big", "house", "stands"])).unwrap()
}

fn target_basedata() -> Basedata {
    Basedata::parse(&words_xml("t", &["the", "house", "stands"])).unwrap()
}

#[test]
fn remap_span() {
    let source = source_basedata();
    let target = target_basedata();
    let mapping = IndexMapping::from_edges(&align(source.tokens(), target.tokens()));
    let remapper = SpanRemapper::new(&source, &target, &mapping);

    let remap = |span: &str| {
        remapper
            .remap(&Span::parse(span).unwrap())
            .map(|span| span.to_string())
    };
    assert_eq!(remap("s_1..s_4"), Ok("t_1..t_2".to_string()));
    assert_eq!(remap("s_4,s_5"), Ok("t_2,t_3".to_string()));
    assert_eq!(remap("s_5"), Ok("t_3".to_string()));
    assert_eq!(remap("s_1..s_2"), Err(Unmapped::Unaligned("s_2".to_string())));
    assert_eq!(
        remap("s_1,s_9"),
        Err(Unmapped::UnknownToken("s_9".to_string()))
    );
}

#[test]
fn convert_level_markables() {
    let source = source_basedata();
    let target = target_basedata();
    let mapping = IndexMapping::from_edges(&align(source.tokens(), target.tokens()));
    let remapper = SpanRemapper::new(&source, &target, &mapping);

    let (xml, statistics) = convert_markables(LEVEL, &remapper).unwrap();

    assert_eq!(
        statistics,
        LevelStatistics {
            converted_markables: 3,
            discarded_markables: 2,
        }
    );
    assert_eq!(
        markables(&xml),
        [
            ("markable_1".to_string(), "t_1..t_2".to_string()),
            ("markable_2".to_string(), "t_2,t_3".to_string()),
            ("markable_5".to_string(), "t_2..t_3".to_string()),
        ]
    );
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<!DOCTYPE markables SYSTEM \"markables.dtd\">"));
    assert!(xml.contains("<markables xmlns=\"www.eml.org/NameSpaces/np\">"));
    assert!(xml.contains("<!-- noun phrases -->"));
    assert!(xml.contains("mmax_level=\"np\""));
}

#[test]
fn discarded_markables_lose_their_content() {
    let source = source_basedata();
    let target = target_basedata();
    let mapping = IndexMapping::from_edges(&align(source.tokens(), target.tokens()));
    let remapper = SpanRemapper::new(&source, &target, &mapping);

    let (xml, statistics) = convert_markables(
        "<markables><markable id=\"m_1\" span=\"s_2\"><note><b>old</b></note></markable><markable id=\"m_2\" span=\"s_5\">kept</markable></markables>",
        &remapper,
    )
    .unwrap();

    assert_eq!(statistics.discarded_markables, 1);
    assert_eq!(
        xml,
        "<markables><markable id=\"m_2\" span=\"t_3\">kept</markable></markables>"
    );
}

#[test]
fn markable_without_span() {
    let source = source_basedata();
    let target = target_basedata();
    let mapping = IndexMapping::default();
    let remapper = SpanRemapper::new(&source, &target, &mapping);

    assert!(matches!(
        convert_markables("<markables><markable id=\"m_1\"/></markables>", &remapper),
        Err(Error::MissingAttribute { .. })
    ));
}

#[test]
fn bundle_layout() {
    let directory = tempfile::tempdir().unwrap();
    write_document(directory.path(), "doc_b", "w", &["a"]);
    write_document(directory.path(), "doc_a", "w", &["a"]);
    write_level(directory.path(), "doc_a_np_level.xml", LEVEL);
    write_level(directory.path(), "doc_a_sentence_level.xml", LEVEL);
    write_level(directory.path(), "doc_b_np_level.xml", LEVEL);
    write_level(directory.path(), "doc_a_notes.txt", "");

    let bundle = Bundle::new(directory.path());
    assert_eq!(bundle.documents().unwrap(), ["doc_a", "doc_b"]);
    assert_eq!(
        bundle.basedata_path("doc_a"),
        directory.path().join("Basedata").join("doc_a_words.xml")
    );
    assert_eq!(
        bundle
            .annotation_levels("doc_a")
            .unwrap()
            .into_iter()
            .map(|(file_name, _)| file_name)
            .collect::<Vec<_>>(),
        ["doc_a_np_level.xml"]
    );
}

#[test]
fn port_bundle() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write_document(
        source.path(),
        "doc1",
        "s",
        &["the", "old", "big", "house", "stands"],
    );
    write_document(source.path(), "doc2", "s", &["unused"]);
    write_level(source.path(), "doc1_np_level.xml", LEVEL);
    write_level(source.path(), "doc1_sentence_level.xml", LEVEL);
    write_document(target.path(), "doc1", "t", &["the", "house", "stands"]);

    let statistics =
        port_annotations(source.path(), target.path(), &AlignmentConfig::default()).unwrap();

    assert_eq!(statistics.documents, 1);
    assert_eq!(statistics.levels, 1);
    assert_eq!(statistics.converted_markables, 3);
    assert_eq!(statistics.discarded_markables, 2);
    assert!(
        !target
            .path()
            .join("markables")
            .join("doc1_sentence_level.xml")
            .exists()
    );

    let ported = fs::read_to_string(target.path().join("markables").join("doc1_np_level.xml"))
        .unwrap();
    let ported = markables(&ported);
    let ids: Vec<_> = ported.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, ["markable_1", "markable_2", "markable_5"]);

    // Markables whose boundaries are all linked keep their content.
    let source_basedata = source_basedata();
    let target_basedata = target_basedata();
    let original = markables(LEVEL);
    for (id, span) in &ported {
        let (_, old_span) = original
            .iter()
            .find(|(original_id, _)| original_id == id)
            .unwrap();
        assert_eq!(
            boundary_tokens(span, &target_basedata),
            boundary_tokens(old_span, &source_basedata)
        );
    }
}

#[test]
fn mismatching_bundles() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write_document(source.path(), "doc1", "s", &["a"]);
    write_document(target.path(), "doc1", "t", &["a"]);
    write_document(target.path(), "doc2", "t", &["b"]);

    let error =
        port_annotations(source.path(), target.path(), &AlignmentConfig::default()).unwrap_err();

    match error {
        Error::BundleMismatch {
            source_documents,
            target_documents,
        } => {
            assert_eq!(source_documents, ["doc1"]);
            assert_eq!(target_documents, ["doc1", "doc2"]);
        }
        error => panic!("unexpected error: {error}"),
    }
    assert!(!target.path().join("markables").exists());
}

#[test]
fn cost_limit_aborts_porting() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write_document(source.path(), "doc1", "s", &["a", "b", "c"]);
    write_document(target.path(), "doc1", "t", &["x", "y", "z"]);
    write_level(source.path(), "doc1_np_level.xml", LEVEL);

    let config = AlignmentConfig {
        cost_limit: Some(1u64.into()),
        ..Default::default()
    };
    assert!(matches!(
        port_annotations(source.path(), target.path(), &config),
        Err(Error::AlignmentAborted { .. })
    ));
}
