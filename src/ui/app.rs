use eframe::{self, egui};
use egui::ViewportBuilder;

use super::{
    screens::{PrintSheetScreen, PrintSheetState, SearchScreen, WelcomeScreen},
    state::{AppState, Screen, SearchState},
};

#[derive(Default)]
pub struct ProxySheetApp {
    app_state: AppState,
    search_state: SearchState,
    sheet_state: PrintSheetState,
}

impl eframe::App for ProxySheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.app_state.current_screen {
            Screen::Welcome => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    WelcomeScreen::show(ui, &mut self.app_state);
                });
            }
            Screen::Search => {
                SearchScreen::show(ctx, &mut self.app_state, &mut self.search_state);
            }
            Screen::PrintSheet => {
                PrintSheetScreen::show(ctx, &mut self.app_state, &mut self.sheet_state);
            }
        }
    }
}

pub fn launch_gui() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([900.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Proxy Sheet",
        options,
        Box::new(|_cc| Ok(Box::new(ProxySheetApp::default()))),
    )
}
