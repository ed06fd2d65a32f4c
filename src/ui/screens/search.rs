use crate::models::CardRecord;
use crate::ui::state::{AppState, Screen, SearchState};
use eframe::egui;
use log::debug;
use std::time::Instant;

pub struct SearchScreen;

impl SearchScreen {
    const SEARCH_DEBOUNCE_MS: u64 = 300; // Wait 300ms after user stops typing

    fn check_delayed_search(app_state: &AppState, state: &mut SearchState) {
        if state.search_needs_update
            && state.last_search_time.elapsed().as_millis() >= Self::SEARCH_DEBOUNCE_MS as u128
        {
            if state.search_term != state.last_search_term {
                Self::perform_search(app_state, state);
                state.last_search_term = state.search_term.clone();
            }
            state.search_needs_update = false;
        }
    }

    pub fn show(ctx: &egui::Context, app_state: &mut AppState, state: &mut SearchState) {
        // Check if we need to perform a delayed search
        Self::check_delayed_search(app_state, state);

        // Staging actions collected during rendering, applied afterwards
        // (avoids borrowing the print set while iterating results)
        let mut add_actions: Vec<CardRecord> = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Menu").clicked() {
                    app_state.current_screen = Screen::Welcome;
                }
                if ui.button("Print Sheet →").clicked() {
                    app_state.current_screen = Screen::PrintSheet;
                }
            });
            ui.add_space(10.0);

            ui.heading("Card Search");
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label("Search:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search_term)
                        .desired_width(300.0)
                        .hint_text("Card name or edition..."),
                );

                if response.changed() {
                    // Mark that we need to update search and reset the timer
                    state.search_needs_update = true;
                    state.last_search_time = Instant::now();
                }

                if ui.button("Clear").clicked() {
                    state.search_term.clear();
                    state.last_search_term.clear();
                    state.hits.clear();
                    state.search_needs_update = false;
                }
            });

            ui.add_space(10.0);

            ui.label(format!(
                "Staged for printing: {}",
                app_state.print_set.len()
            ));

            ui.add_space(5.0);
            ui.separator();

            if state.hits.is_empty() {
                if !state.search_term.trim().is_empty() {
                    ui.label("No matching cards");
                }
                return;
            }

            ui.label(format!("Found {} cards", state.hits.len()));
            ui.add_space(5.0);

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 20.0)
                .show(ui, |ui| {
                    egui::Grid::new("search_results")
                        .num_columns(3)
                        .spacing([10.0, 4.0])
                        .striped(true)
                        .show(ui, |ui| {
                            ui.strong("");
                            ui.strong("Name");
                            ui.strong("Edition");
                            ui.end_row();

                            for hit in &state.hits {
                                // Every hit id comes from the indexed catalog
                                let Some(card) = app_state.catalog.get(&hit.id) else {
                                    continue;
                                };

                                if ui.button("Add").clicked() {
                                    add_actions.push(card.clone());
                                }
                                ui.label(&card.name);
                                ui.label(&card.edition);
                                ui.end_row();
                            }
                        });
                });
        });

        for card in add_actions {
            let staging_id = app_state.print_set.add(&card);
            debug!("Added {} to print set as {}", card.name, staging_id);
        }
    }

    fn perform_search(app_state: &AppState, state: &mut SearchState) {
        let Some(ref index) = app_state.index else {
            state.hits.clear();
            return;
        };

        debug!("Performing search for: '{}'", state.search_term);
        state.hits = index.query(&state.search_term);
    }
}
