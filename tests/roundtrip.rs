// Serialization round trips through both codecs and the detecting reader.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use dublincore::codec::{json, xml};
use dublincore::{DublinCoreCatalog, Format, OpencastDcterms, WriteOptions, factory, read_str};

use common::{populated_episode, populated_series};

fn factory_catalogs() -> Vec<(&'static str, DublinCoreCatalog)> {
    vec![
        ("empty", factory::make_empty_catalog()),
        ("standard", factory::make_empty_standard_catalog()),
        ("episode", factory::make_episode_catalog(None, None).snapshot()),
        (
            "episode with series",
            factory::make_episode_catalog(Some("e-1"), Some("s-1")).snapshot(),
        ),
        ("series", factory::make_identified_series_catalog(None).snapshot()),
        ("populated episode", populated_episode()),
        ("populated series", populated_series()),
    ]
}

#[test]
fn xml_round_trip_preserves_catalogs() -> Result<()> {
    for (label, catalog) in factory_catalogs() {
        let text = xml::write(&catalog)?;
        let back = xml::read(&text)?;
        assert_eq!(back, catalog, "xml round trip of {label}:\n{text}");
    }
    Ok(())
}

#[test]
fn json_round_trip_preserves_catalogs() -> Result<()> {
    for (label, catalog) in factory_catalogs() {
        let text = json::write(&catalog)?;
        let back = json::read(&text)?;
        assert_eq!(back, catalog, "json round trip of {label}:\n{text}");
    }
    Ok(())
}

#[test]
fn compact_output_round_trips_too() -> Result<()> {
    let catalog = populated_episode();
    for format in [Format::Xml, Format::Json] {
        let text = format.write(&catalog, &WriteOptions::compact())?;
        assert_eq!(format.read(&text)?, catalog, "{format} compact round trip");
    }
    Ok(())
}

#[test]
fn detecting_reader_matches_explicit_codec() -> Result<()> {
    for (label, catalog) in factory_catalogs() {
        let as_json = json::write(&catalog)?;
        assert_eq!(read_str(&as_json)?, json::read(&as_json)?, "json {label}");

        let as_xml = xml::write(&catalog)?;
        assert_eq!(read_str(&as_xml)?, xml::read(&as_xml)?, "xml {label}");
    }
    Ok(())
}

#[test]
fn converting_between_formats_is_lossless() -> Result<()> {
    let catalog = populated_series();
    let via_xml = xml::read(&xml::write(&catalog)?)?;
    let via_both = json::read(&json::write(&via_xml)?)?;
    assert_eq!(via_both, catalog);
    Ok(())
}

#[test]
fn episode_xml_uses_opencast_layout() -> Result<()> {
    let episode = factory::make_episode_catalog(Some("e-1"), None);
    episode.set_created(Some("2024-03-01T10:00:00Z"));
    let text = xml::write(&episode.snapshot())?;

    assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(text.contains(r#"<?dublincore-catalog flavor="dublincore/episode"?>"#));
    assert!(text.contains(r#"xmlns="http://www.opencastproject.org/xsd/1.0/dublincore/""#));
    assert!(text.contains(r#"<dcterms:identifier>e-1</dcterms:identifier>"#));
    assert!(text.contains(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T10:00:00Z</dcterms:created>"#
    ));
    assert!(text.ends_with("</dublincore>"));
    Ok(())
}
