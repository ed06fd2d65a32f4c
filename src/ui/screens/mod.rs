mod print_sheet;
mod search;
mod welcome;

pub use print_sheet::{PrintSheetScreen, PrintSheetState};
pub use search::SearchScreen;
pub use welcome::WelcomeScreen;
