use crate::catalog::Catalog;
use crate::index::{CatalogIndex, SearchHit};
use crate::print_set::PrintSet;
use std::time::Instant;

#[derive(PartialEq)]
pub enum Screen {
    Welcome,
    Search,
    PrintSheet,
}

/// Session-wide state shared by all screens: the loaded catalog, its index
/// (built once per load) and the print set being assembled.
pub struct AppState {
    pub current_screen: Screen,
    pub catalog_path: String,
    pub catalog: Catalog,
    pub index: Option<CatalogIndex>,
    pub print_set: PrintSet,
    pub load_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_screen: Screen::Welcome,
            catalog_path: String::new(),
            catalog: Catalog::default(),
            index: None,
            print_set: PrintSet::new(),
            load_error: None,
        }
    }
}

pub struct SearchState {
    pub search_term: String,
    pub last_search_term: String,
    pub search_needs_update: bool,
    pub last_search_time: Instant,
    pub hits: Vec<SearchHit>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            last_search_term: String::new(),
            search_needs_update: false,
            last_search_time: Instant::now(),
            hits: Vec::new(),
        }
    }
}
