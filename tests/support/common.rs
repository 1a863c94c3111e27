#![allow(dead_code)]

use anyhow::{Context, Result};
use dublincore::vocabulary::{
    OC_PROPERTY_NS_URI, PROPERTY_LANGUAGE, PROPERTY_SUBJECT, PROPERTY_TITLE,
};
use dublincore::{
    DublinCoreCatalog, DublinCoreValue, EName, NamespaceBinding, OpencastDcterms, factory,
};
use std::path::PathBuf;
use std::process::{Command, Output};

/// Episode with every kind of value the codecs have to carry: languages,
/// encoding schemes, repeated values, special characters, an unbound
/// namespace and an empty value.
pub fn populated_episode() -> DublinCoreCatalog {
    let episode = factory::make_episode_catalog(Some("episode-1"), Some("series-9"));
    episode.set_created(Some("2024-03-01T10:00:00Z"));
    episode.set_temporal(Some(
        "start=2024-03-01T10:00:00Z; end=2024-03-01T11:30:00Z; scheme=W3C-DTF;",
    ));
    episode.set_extent(Some("PT1H30M"));
    episode.add_creator("Ada Lovelace");
    episode.add_creator("Grace Hopper");
    episode.add_subject("analysis & engines");
    episode.add_subject("<compilers>");
    episode.set_description(Some("line one\nline two\r\n  indented"));
    episode.set_agent_timezone(Some("Europe/Zurich"));
    episode.set_duration(Some(5_400_000));
    episode.set_promoted(Some(false));

    let shared = episode.catalog();
    let mut catalog = shared.borrow_mut();
    catalog.add(&PROPERTY_TITLE, DublinCoreValue::new("Lecture 1").with_language("en"));
    catalog.add(&PROPERTY_TITLE, DublinCoreValue::new("Vorlesung 1").with_language("de"));
    catalog.add(&PROPERTY_LANGUAGE, "");
    catalog.add(&EName::new("urn:example:custom", "room"), "HG F 1");
    catalog.clone()
}

/// Series with a binding beyond the Opencast defaults.
pub fn populated_series() -> DublinCoreCatalog {
    let series = factory::make_series_catalog(Some("series-9"));
    series.set_title(Some("Analytical Engines"));
    series.set_advertised(Some(true));
    series.add_subject("history");
    let shared = series.catalog();
    let mut catalog = shared.borrow_mut();
    catalog.add_binding(NamespaceBinding::new("ex", "urn:example:custom"));
    catalog.add(&EName::new(OC_PROPERTY_NS_URI, "annotation"), "true");
    catalog.add(&PROPERTY_SUBJECT, DublinCoreValue::new("Geschichte").with_language("de"));
    catalog.clone()
}

pub fn dccat_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dccat"))
}

/// Run `dccat` with `args`, feeding `stdin` and clearing the `DCCAT_*` defaults.
pub fn run_dccat(args: &[&str], stdin: Option<&str>) -> Result<Output> {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(dccat_binary())
        .args(args)
        .env_remove("DCCAT_FORMAT")
        .env_remove("DCCAT_PRETTY")
        .env_remove("DCCAT_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to spawn dccat")?;
    {
        let mut input = child.stdin.take().context("dccat stdin unavailable")?;
        if let Some(text) = stdin {
            input
                .write_all(text.as_bytes())
                .context("failed to write dccat stdin")?;
        }
    }
    child.wait_with_output().context("failed to wait for dccat")
}
