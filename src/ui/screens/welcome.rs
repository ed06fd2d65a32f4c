use crate::catalog::{read_catalog, Catalog};
use crate::index::CatalogIndex;
use crate::ui::state::{AppState, Screen};
use eframe::egui;
use log::{error, info};

pub struct WelcomeScreen;

impl WelcomeScreen {
    pub fn show(ui: &mut egui::Ui, app_state: &mut AppState) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("Proxy Sheet");
            ui.label("Search a card catalog and build a print sheet");
            ui.add_space(20.0);

            ui.horizontal(|ui| {
                ui.label("Catalog JSON:");
                if ui.button("Browse").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("JSON", &["json"])
                        .pick_file()
                    {
                        app_state.catalog_path = path.display().to_string();
                    }
                }
                ui.text_edit_singleline(&mut app_state.catalog_path);
            });

            ui.add_space(10.0);

            if ui.button("Load Catalog").clicked() && !app_state.catalog_path.is_empty() {
                Self::load_catalog(app_state);
            }

            if let Some(ref err) = app_state.load_error {
                ui.add_space(10.0);
                ui.colored_label(egui::Color32::RED, err);
            }

            if app_state.index.is_some() {
                ui.add_space(10.0);
                ui.label(format!("Loaded {} cards", app_state.catalog.len()));
                ui.add_space(20.0);

                if ui.button("Search Cards").clicked() {
                    app_state.current_screen = Screen::Search;
                }

                ui.add_space(10.0);

                if ui.button("Print Sheet").clicked() {
                    app_state.current_screen = Screen::PrintSheet;
                }
            }
        });
    }

    fn load_catalog(app_state: &mut AppState) {
        info!("Loading catalog: {}", app_state.catalog_path);
        match read_catalog(&app_state.catalog_path) {
            Ok(cards) => {
                info!("Loaded {} cards", cards.len());
                // The index is built once per loaded catalog and never mutated
                app_state.index = Some(CatalogIndex::build(&cards));
                app_state.catalog = Catalog::from_records(cards);
                app_state.load_error = None;
            }
            Err(e) => {
                error!("Error loading catalog: {}", e);
                app_state.load_error = Some(format!("Error loading catalog: {}", e));
            }
        }
    }
}
