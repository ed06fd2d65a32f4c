//! End-to-end flow: load a catalog, search it, stage cards, print-set edits.

use proxy_sheet::{read_catalog, Catalog, CatalogIndex, PrintSet, StagingId, Watermark};
use std::io::Write;
use tempfile::NamedTempFile;

const CATALOG_JSON: &str = r#"[
    {"id": "a1", "n": "Fyendal's Spring Tunic", "ed": "WTR"},
    {"id": "a2", "n": "Twinning Blade", "ed": "WTR"}
]"#;

fn load_fixture_catalog() -> Catalog {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG_JSON.as_bytes()).unwrap();
    let records = read_catalog(file.path().to_str().unwrap()).unwrap();
    Catalog::from_records(records)
}

#[test]
fn test_search_and_stage_flow() {
    let catalog = load_fixture_catalog();
    let index = CatalogIndex::build(catalog.cards());
    let mut print_set = PrintSet::new();

    // "twin" matches only Twinning Blade
    let hits = index.query("twin");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a2");

    // Stage the hit; the new entry carries the session default watermark
    let card = catalog.get(&hits[0].id).unwrap();
    print_set.add(card);
    assert_eq!(print_set.len(), 1);
    assert_eq!(print_set.entries()[0].card.id, "a2");
    assert_eq!(print_set.entries()[0].watermark, Watermark::Proxy);

    // Staging the other card re-sorts the set by display name
    let tunic = catalog.get("a1").unwrap();
    print_set.add(tunic);
    let names: Vec<&str> = print_set
        .entries()
        .iter()
        .map(|e| e.card.name.as_str())
        .collect();
    assert_eq!(names, vec!["Fyendal's Spring Tunic", "Twinning Blade"]);

    // Positional removal of the first entry leaves only the blade
    print_set.remove_at(0);
    assert_eq!(print_set.len(), 1);
    assert_eq!(print_set.entries()[0].card.id, "a2");
}

#[test]
fn test_original_default_search_finds_the_tunic() {
    let catalog = load_fixture_catalog();
    let index = CatalogIndex::build(catalog.cards());

    let hits = index.query("fyen");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a1");
}

#[test]
fn test_staged_watermarks_are_independent() {
    let catalog = load_fixture_catalog();
    let mut print_set = PrintSet::new();

    let blade = catalog.get("a2").unwrap();
    let first = print_set.add(blade);
    let second = print_set.add(blade);

    print_set.set_watermark(first, Watermark::Missing);
    print_set.set_default_watermark(Watermark::InBox);

    assert_eq!(watermark_of(&print_set, first), Watermark::Missing);
    assert_eq!(watermark_of(&print_set, second), Watermark::Proxy);

    // The new default only seeds entries staged afterwards
    let third = print_set.add(blade);
    assert_eq!(watermark_of(&print_set, third), Watermark::InBox);
}

fn watermark_of(set: &PrintSet, id: StagingId) -> Watermark {
    set.entries()
        .iter()
        .find(|e| e.staging_id == id)
        .unwrap()
        .watermark
}
