use std::fs;

use anyhow::Result;
use util::{run_in_directory, write_document, write_file};

mod util;

const NP_LEVEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE markables SYSTEM "markables.dtd">
<markables xmlns="www.eml.org/NameSpaces/np">
<markable id="markable_1" span="s_1..s_2" mmax_level="np"/>
<markable id="markable_2" span="s_3..s_4" mmax_level="np"/>
<markable id="markable_3" span="s_6" mmax_level="np"/>
</markables>
"#;

#[test]
fn test_align_token_files() -> Result<()> {
    let directory = tempfile::tempdir()?;
    write_file(
        &directory.path().join("source.txt"),
        "Mr. Smith does n't like\nNew York .\n",
    )?;
    write_file(
        &directory.path().join("target.txt"),
        "Mr . Smith doesn't like New York .",
    )?;

    run_in_directory(
        directory.path(),
        "align {dir}/source.txt {dir}/target.txt -o {dir}/alignment.toml",
    )?;

    let output = fs::read_to_string(directory.path().join("alignment.toml"))?;
    assert!(output.contains("type = \"WithTarget\""), "{output}");
    assert!(output.contains("source_length = 8"), "{output}");
    assert!(output.contains("target_length = 8"), "{output}");
    Ok(())
}

#[test]
fn test_align_with_cost_table() -> Result<()> {
    let directory = tempfile::tempdir()?;
    write_file(&directory.path().join("source.txt"), "a b c")?;
    write_file(&directory.path().join("target.txt"), "a c")?;
    write_file(
        &directory.path().join("costs.toml"),
        "substitution_cost = 1\nskip_source_cost = 5\n",
    )?;

    run_in_directory(
        directory.path(),
        "align {dir}/source.txt {dir}/target.txt --costs {dir}/costs.toml --trace-search -o {dir}/alignment.toml",
    )?;

    let output = fs::read_to_string(directory.path().join("alignment.toml"))?;
    assert!(output.contains("skipped_source_tokens = 1"), "{output}");
    assert!(output.contains("cost = 5"), "{output}");
    Ok(())
}

#[test]
fn test_align_exceeding_cost_limit() -> Result<()> {
    let directory = tempfile::tempdir()?;
    write_file(&directory.path().join("source.txt"), "a b c")?;
    write_file(&directory.path().join("target.txt"), "x y z")?;

    let result = run_in_directory(
        directory.path(),
        "align {dir}/source.txt {dir}/target.txt --cost-limit 2 -o {dir}/alignment.toml",
    );

    assert!(result.is_err());
    let output = fs::read_to_string(directory.path().join("alignment.toml"))?;
    assert!(output.contains("type = \"WithoutTarget\""), "{output}");
    assert!(
        output.contains("astar_result_type = \"ExceededCostLimit\""),
        "{output}"
    );
    Ok(())
}

#[test]
fn test_align_missing_file() -> Result<()> {
    let directory = tempfile::tempdir()?;
    write_file(&directory.path().join("source.txt"), "a")?;

    assert!(run_in_directory(directory.path(), "align {dir}/source.txt {dir}/target.txt").is_err());
    Ok(())
}

#[test]
fn test_align_usage_error() -> Result<()> {
    let directory = tempfile::tempdir()?;

    assert!(run_in_directory(directory.path(), "align {dir}/source.txt").is_err());
    assert_eq!(tokalign::run(["tokalign", "align"]), 1);
    assert_eq!(tokalign::run(["tokalign", "realign", "a", "b"]), 1);
    assert_eq!(tokalign::run(["tokalign", "--help"]), 0);
    Ok(())
}

#[test]
fn test_exit_codes() -> Result<()> {
    let directory = tempfile::tempdir()?;
    write_file(&directory.path().join("source.txt"), "a b")?;
    write_file(&directory.path().join("target.txt"), "a c")?;
    let source = directory.path().join("source.txt");
    let target = directory.path().join("target.txt");
    let missing = directory.path().join("missing.txt");

    assert_eq!(
        tokalign::run([
            "tokalign".into(),
            "align".into(),
            source.clone().into_os_string(),
            target.into_os_string(),
        ]),
        0
    );
    assert_eq!(
        tokalign::run([
            "tokalign".into(),
            "align".into(),
            source.into_os_string(),
            missing.into_os_string(),
        ]),
        1
    );
    Ok(())
}

#[test]
fn test_align_oversized_costs() -> Result<()> {
    let directory = tempfile::tempdir()?;
    write_file(&directory.path().join("source.txt"), "a b")?;
    write_file(&directory.path().join("target.txt"), "")?;
    write_file(
        &directory.path().join("costs.toml"),
        "skip_source_cost = 9223372036854775807\n",
    )?;

    assert!(
        run_in_directory(
            directory.path(),
            "align {dir}/source.txt {dir}/target.txt --costs {dir}/costs.toml",
        )
        .is_err()
    );
    Ok(())
}

#[test]
fn test_port_bundle() -> Result<()> {
    let source = tempfile::tempdir()?;
    let target = tempfile::tempdir()?;
    write_document(
        source.path(),
        "doc1",
        "s",
        &["Mr.", "Smith", "left", "very", "early", "."],
    )?;
    write_document(
        target.path(),
        "doc1",
        "t",
        &["Mr.", "Smith", "left", "early", "."],
    )?;
    write_file(
        &source.path().join("markables").join("doc1_np_level.xml"),
        NP_LEVEL,
    )?;
    write_file(
        &source.path().join("markables").join("doc1_sentence_level.xml"),
        NP_LEVEL,
    )?;

    run_in_directory(
        source.path(),
        &format!("port {{dir}} {}", target.path().display()),
    )?;

    let ported = fs::read_to_string(target.path().join("markables").join("doc1_np_level.xml"))?;
    assert!(ported.contains("id=\"markable_1\""), "{ported}");
    assert!(!ported.contains("id=\"markable_2\""), "{ported}");
    assert!(ported.contains("span=\"t_5\""), "{ported}");
    assert!(
        !target
            .path()
            .join("markables")
            .join("doc1_sentence_level.xml")
            .exists()
    );
    Ok(())
}

#[test]
fn test_port_mismatching_bundles() -> Result<()> {
    let source = tempfile::tempdir()?;
    let target = tempfile::tempdir()?;
    write_document(source.path(), "doc1", "s", &["a"])?;
    write_document(target.path(), "doc2", "t", &["a"])?;

    assert!(
        run_in_directory(
            source.path(),
            &format!("port {{dir}} {}", target.path().display()),
        )
        .is_err()
    );
    Ok(())
}
