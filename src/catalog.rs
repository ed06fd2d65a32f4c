use crate::error::SheetResult;
use crate::models::CardRecord;
use std::collections::HashMap;

/// Read a card catalog from a JSON file.
///
/// The file holds an array of objects with short field names:
/// `[{"id": "a2", "n": "Twinning Blade", "ed": "WTR"}, ...]`.
/// An empty array is a valid catalog.
pub fn read_catalog(path: &str) -> SheetResult<Vec<CardRecord>> {
    let data = std::fs::read_to_string(path)?;
    let cards: Vec<CardRecord> = serde_json::from_str(&data)?;
    Ok(cards)
}

/// The loaded card catalog with an id lookup table.
///
/// Read-only after construction; records are handed out by reference and
/// copied only when staged for printing.
#[derive(Default)]
pub struct Catalog {
    cards: Vec<CardRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_records(cards: Vec<CardRecord>) -> Self {
        let by_id = cards
            .iter()
            .enumerate()
            .map(|(i, card)| (card.id.clone(), i))
            .collect();
        Self { cards, by_id }
    }

    /// Look up a record by catalog id
    pub fn get(&self, id: &str) -> Option<&CardRecord> {
        self.by_id.get(id).map(|&i| &self.cards[i])
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_catalog_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_catalog_parses_short_field_names() {
        let file = write_catalog_file(
            r#"[{"id":"a1","n":"Fyendal's Spring Tunic","ed":"WTR"},
                {"id":"a2","n":"Twinning Blade","ed":"WTR"}]"#,
        );

        let cards = read_catalog(file.path().to_str().unwrap()).unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, "a1");
        assert_eq!(cards[0].name, "Fyendal's Spring Tunic");
        assert_eq!(cards[0].edition, "WTR");
        assert_eq!(cards[1].name, "Twinning Blade");
    }

    #[test]
    fn test_read_catalog_empty_array_is_valid() {
        let file = write_catalog_file("[]");
        let cards = read_catalog(file.path().to_str().unwrap()).unwrap();
        assert!(cards.is_empty());
    }

    #[test]
    fn test_read_catalog_missing_file_is_io_error() {
        let result = read_catalog("/nonexistent/catalog.json");
        assert!(matches!(result, Err(crate::error::SheetError::Io(_))));
    }

    #[test]
    fn test_read_catalog_malformed_json_is_parse_error() {
        let file = write_catalog_file("not json");
        let result = read_catalog(file.path().to_str().unwrap());
        assert!(matches!(result, Err(crate::error::SheetError::Parse(_))));
    }

    #[test]
    fn test_catalog_lookup_by_id() {
        let file = write_catalog_file(r#"[{"id":"a2","n":"Twinning Blade","ed":"WTR"}]"#);
        let catalog = Catalog::from_records(read_catalog(file.path().to_str().unwrap()).unwrap());

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a2").unwrap().name, "Twinning Blade");
        assert!(catalog.get("zz").is_none());
    }
}
