// End-to-end behavior of the dccat binary.
#[path = "support/common.rs"]
mod common;

use anyhow::{Context, Result};
use dublincore::vocabulary::{PROPERTY_IS_PART_OF, PROPERTY_TITLE, SERIES_FLAVOR};
use dublincore::{Format, read_str};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

use common::{populated_episode, run_dccat};

#[test]
fn convert_xml_to_json_from_stdin() -> Result<()> {
    let catalog = populated_episode();
    let input = Format::Xml.write(&catalog, &Default::default())?;
    let output = run_dccat(&["convert", "--to", "json"], Some(&input))?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout)?;
    let parsed: Value = serde_json::from_str(&stdout).context("convert should emit JSON")?;
    assert_eq!(parsed["flavor"], "dublincore/episode");
    assert_eq!(read_str(&stdout)?, catalog);
    Ok(())
}

#[test]
fn convert_json_file_to_compact_xml() -> Result<()> {
    let catalog = populated_episode();
    let dir = TempDir::new()?;
    let path = dir.path().join("episode.json");
    fs::write(&path, Format::Json.write(&catalog, &Default::default())?)?;

    let path_arg = path.to_string_lossy().into_owned();
    let output = run_dccat(&["convert", "--file", &path_arg, "--compact"], None)?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(!stdout.contains("\n  <dcterms:"), "compact xml: {stdout}");
    assert_eq!(read_str(&stdout)?, catalog);
    Ok(())
}

#[test]
fn new_series_with_values() -> Result<()> {
    let output = run_dccat(
        &[
            "new",
            "series",
            "--id",
            "s-1",
            "--add",
            "dcterms:title=Analytical Engines",
            "--to",
            "json",
        ],
        None,
    )?;
    assert!(output.status.success());
    let catalog = read_str(&String::from_utf8(output.stdout)?)?;
    assert_eq!(catalog.flavor(), Some(&SERIES_FLAVOR));
    assert_eq!(catalog.identifier(), Some("s-1"));
    assert_eq!(catalog.first(&PROPERTY_TITLE), Some("Analytical Engines"));
    Ok(())
}

#[test]
fn new_episode_generates_identifier() -> Result<()> {
    let output = run_dccat(&["new", "episode", "--generate-id", "--series", "s-1"], None)?;
    assert!(output.status.success());
    let catalog = read_str(&String::from_utf8(output.stdout)?)?;
    let id = catalog.identifier().context("identifier missing")?;
    uuid::Uuid::parse_str(id)?;
    assert_eq!(catalog.first(&PROPERTY_IS_PART_OF), Some("s-1"));
    Ok(())
}

#[test]
fn show_lists_values() -> Result<()> {
    let input = r#"{"flavor": "dublincore/episode",
        "namespaces": [{"prefix": "dcterms", "uri": "http://purl.org/dc/terms/"}],
        "properties": [{"namespace": "http://purl.org/dc/terms/", "name": "title",
                        "values": [{"value": "Lecture", "lang": "en"}]}]}"#;
    let output = run_dccat(&["show"], Some(input))?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("flavor: dublincore/episode"), "{stdout}");
    assert!(stdout.contains("xmlns dcterms = http://purl.org/dc/terms/"));
    assert!(stdout.contains("dcterms:title [en]: Lecture"));
    Ok(())
}

#[test]
fn malformed_input_exits_with_error_chain() -> Result<()> {
    let output = run_dccat(&["convert"], Some("{ broken"))?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reading catalog from stdin"), "{stderr}");
    assert!(stderr.contains("JSON parsing failed"), "{stderr}");
    Ok(())
}

#[test]
fn rejects_unknown_property_names() -> Result<()> {
    let output = run_dccat(&["new", "episode", "--add", "nope:title=x"], None)?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown property name 'nope:title'"), "{stderr}");
    Ok(())
}
