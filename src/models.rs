use serde::Deserialize;
use std::fmt;

/// Watermark labels that can be overlaid on a printed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Watermark {
    #[default]
    Proxy,
    Missing,
    InBox,
}

impl Watermark {
    /// Returns the display label (e.g., "Proxy", "In Box")
    pub fn as_str(&self) -> &'static str {
        match self {
            Watermark::Proxy => "Proxy",
            Watermark::Missing => "Missing",
            Watermark::InBox => "In Box",
        }
    }

    /// Parse a display label into a Watermark
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "proxy" => Some(Watermark::Proxy),
            "missing" => Some(Watermark::Missing),
            "in box" => Some(Watermark::InBox),
            _ => None,
        }
    }

    /// Returns all watermark options, in display order
    pub fn all() -> &'static [Watermark] {
        &[Watermark::Proxy, Watermark::Missing, Watermark::InBox]
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog card as supplied by the data source.
///
/// The catalog JSON uses short field names (`n`, `ed`); `id` is the only
/// field guaranteed unique.
#[derive(Debug, Deserialize, Clone)]
pub struct CardRecord {
    pub id: String,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "ed")]
    pub edition: String,
}

/// Identifier of a staged print-set entry.
///
/// Distinct from the catalog id: the same catalog card may be staged more
/// than once. Unique for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StagingId(pub(crate) u64);

impl fmt::Display for StagingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card staged for printing: an owned copy of the catalog record plus the
/// session-unique staging id and its own watermark.
#[derive(Debug, Clone)]
pub struct StagedCard {
    pub staging_id: StagingId,
    pub card: CardRecord,
    pub watermark: Watermark,
}
