//! Print Sheet Screen
//!
//! Renders the staged cards as tiles, each card image with its watermark
//! label drawn on top. Watermarks can be changed per entry; removal is by
//! staging id, so a stale row can never remove the wrong entry.

use crate::images::{card_image_url, ImageCache};
use crate::models::{StagingId, Watermark};
use crate::ui::state::{AppState, Screen};
use eframe::egui;
use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::Semaphore;

/// Message sent from background image loader tasks. Empty data marks a
/// failed fetch so the loading flag gets cleared on the UI thread.
struct LoadedImage {
    card_id: String,
    image_data: Vec<u8>,
}

/// State for the print sheet screen
pub struct PrintSheetState {
    /// Card textures keyed by catalog id (duplicate entries share one)
    images: HashMap<String, egui::TextureHandle>,
    /// Images currently being loaded
    loading_images: HashSet<String>,
    /// Image cache for fetching from disk/network
    image_cache: ImageCache,
    /// Tokio runtime for background image loading
    runtime: Runtime,
    image_sender: UnboundedSender<LoadedImage>,
    image_receiver: UnboundedReceiver<LoadedImage>,
    /// Limits concurrent image requests
    request_semaphore: Arc<Semaphore>,
}

impl Default for PrintSheetState {
    fn default() -> Self {
        let (tx, rx) = unbounded_channel();
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");
        Self {
            images: HashMap::new(),
            loading_images: HashSet::new(),
            image_cache: ImageCache::new(),
            runtime,
            image_sender: tx,
            image_receiver: rx,
            request_semaphore: Arc::new(Semaphore::new(5)), // Max 5 concurrent requests
        }
    }
}

pub struct PrintSheetScreen;

impl PrintSheetScreen {
    const CARD_TILE_WIDTH: f32 = 220.0;
    const CARD_IMAGE_HEIGHT: f32 = 300.0;

    pub fn show(ctx: &egui::Context, app_state: &mut AppState, state: &mut PrintSheetState) {
        // Poll for loaded images from background tasks (non-blocking)
        Self::poll_loaded_images(ctx, state);

        // Trigger image loading for staged cards we don't have yet
        let card_ids: Vec<String> = app_state
            .print_set
            .entries()
            .iter()
            .map(|e| e.card.id.clone())
            .collect();
        for card_id in &card_ids {
            if !state.images.contains_key(card_id) && !state.loading_images.contains(card_id) {
                Self::load_card_image(ctx, state, card_id);
            }
        }

        // Mutations collected during rendering, applied afterwards
        let mut remove_action: Option<StagingId> = None;
        let mut watermark_changes: Vec<(StagingId, Watermark)> = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Search").clicked() {
                    app_state.current_screen = Screen::Search;
                }

                ui.add_space(20.0);
                ui.heading("Cards To Print");
                ui.add_space(20.0);
                ui.label(format!("{} cards", app_state.print_set.len()));

                let loading_count = state.loading_images.len();
                if loading_count > 0 {
                    ui.add_space(10.0);
                    ui.spinner();
                    ui.label(format!("Loading {} images...", loading_count));
                }
            });

            ui.add_space(5.0);

            // Default watermark for newly staged cards; existing entries
            // keep whatever they were given
            ui.horizontal(|ui| {
                ui.label("Default watermark:");
                let mut default_watermark = app_state.print_set.default_watermark();
                egui::ComboBox::from_id_salt("default_watermark")
                    .selected_text(default_watermark.as_str())
                    .show_ui(ui, |ui| {
                        for wm in Watermark::all() {
                            ui.selectable_value(&mut default_watermark, *wm, wm.as_str());
                        }
                    });
                if default_watermark != app_state.print_set.default_watermark() {
                    app_state.print_set.set_default_watermark(default_watermark);
                }
            });

            ui.separator();

            if app_state.print_set.is_empty() {
                ui.add_space(20.0);
                ui.label("No cards staged yet. Add some from the search screen.");
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    Self::show_card_tiles(ui, app_state, state, &mut remove_action, &mut watermark_changes);
                });
        });

        for (staging_id, watermark) in watermark_changes {
            app_state.print_set.set_watermark(staging_id, watermark);
        }
        if let Some(staging_id) = remove_action {
            app_state.print_set.remove(staging_id);
        }
    }

    fn show_card_tiles(
        ui: &mut egui::Ui,
        app_state: &AppState,
        state: &PrintSheetState,
        remove_action: &mut Option<StagingId>,
        watermark_changes: &mut Vec<(StagingId, Watermark)>,
    ) {
        let available_width = ui.available_width();
        let cols = ((available_width / Self::CARD_TILE_WIDTH).floor() as usize).max(1);

        let entries = app_state.print_set.entries();
        let indices: Vec<usize> = (0..entries.len()).collect();

        for chunk in indices.chunks(cols) {
            ui.horizontal_wrapped(|ui| {
                for &i in chunk {
                    let entry = &entries[i];

                    ui.vertical(|ui| {
                        ui.set_width(Self::CARD_TILE_WIDTH);

                        // Card image with the watermark label painted on top
                        if let Some(texture) = state.images.get(&entry.card.id) {
                            let aspect = texture.size()[0] as f32 / texture.size()[1] as f32;
                            let width = Self::CARD_IMAGE_HEIGHT * aspect;
                            let size = egui::vec2(width, Self::CARD_IMAGE_HEIGHT);

                            let response = ui.image((texture.id(), size));
                            Self::paint_watermark(ui, response.rect, entry.watermark);
                        } else {
                            ui.add_sized(
                                [Self::CARD_TILE_WIDTH, Self::CARD_IMAGE_HEIGHT],
                                egui::Label::new(egui::RichText::new("Loading...").weak()),
                            );
                        }

                        ui.label(egui::RichText::new(&entry.card.name).size(16.0).strong());
                        ui.label(format!("({})", entry.card.edition));

                        ui.horizontal(|ui| {
                            let mut watermark = entry.watermark;
                            egui::ComboBox::from_id_salt(("watermark", entry.staging_id))
                                .selected_text(watermark.as_str())
                                .show_ui(ui, |ui| {
                                    for wm in Watermark::all() {
                                        ui.selectable_value(&mut watermark, *wm, wm.as_str());
                                    }
                                });
                            if watermark != entry.watermark {
                                watermark_changes.push((entry.staging_id, watermark));
                            }

                            if ui.button("Remove").clicked() {
                                *remove_action = Some(entry.staging_id);
                            }
                        });
                    });
                }
            });
        }
    }

    fn paint_watermark(ui: &egui::Ui, rect: egui::Rect, watermark: Watermark) {
        let pos = rect.center_top() + egui::vec2(0.0, 18.0);
        let font = egui::FontId::proportional(18.0);
        let painter = ui.painter();
        // Offset shadow keeps the label readable on light card art
        painter.text(
            pos + egui::vec2(1.0, 1.0),
            egui::Align2::CENTER_CENTER,
            watermark.as_str(),
            font.clone(),
            egui::Color32::BLACK,
        );
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            watermark.as_str(),
            font,
            egui::Color32::WHITE,
        );
    }

    /// Poll the channel for loaded images and create textures (non-blocking)
    fn poll_loaded_images(ctx: &egui::Context, state: &mut PrintSheetState) {
        while let Ok(loaded) = state.image_receiver.try_recv() {
            debug!("Received loaded image for {}", loaded.card_id);

            match Self::texture_from_bytes(ctx, &loaded.card_id, &loaded.image_data) {
                Some(texture) => {
                    state.images.insert(loaded.card_id.clone(), texture);
                    info!("Created texture for {}", loaded.card_id);
                }
                None => {
                    error!("Failed to decode image for {}", loaded.card_id);
                }
            }

            state.loading_images.remove(&loaded.card_id);
        }

        // Request repaint if still loading images
        if !state.loading_images.is_empty() {
            ctx.request_repaint();
        }
    }

    fn texture_from_bytes(
        ctx: &egui::Context,
        card_id: &str,
        bytes: &[u8],
    ) -> Option<egui::TextureHandle> {
        let image = image::load_from_memory(bytes).ok()?;
        let rgba = image.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let pixels = rgba.into_raw();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);

        Some(ctx.load_texture(
            format!("card_{}", card_id),
            color_image,
            egui::TextureOptions::LINEAR,
        ))
    }

    /// Load a card image: disk cache synchronously, network in a tokio task
    fn load_card_image(ctx: &egui::Context, state: &mut PrintSheetState, card_id: &str) {
        debug!("Starting image load for {}", card_id);
        state.loading_images.insert(card_id.to_string());

        // Disk cache first (fast, keep synchronous)
        if let Some(bytes) = state.image_cache.get(card_id) {
            if let Some(texture) = Self::texture_from_bytes(ctx, card_id, &bytes) {
                state.images.insert(card_id.to_string(), texture);
                state.loading_images.remove(card_id);
                return;
            }
            warn!("Failed to decode cached image for {}", card_id);
        }

        info!("Image cache miss for {}, spawning fetch task", card_id);

        let sender = state.image_sender.clone();
        let cache_dir = state.image_cache.cache_dir().to_path_buf();
        let ctx_clone = ctx.clone();
        let semaphore = state.request_semaphore.clone();
        let card_id = card_id.to_string();

        state.runtime.spawn(async move {
            // Limit concurrent requests against the image host
            let _permit = semaphore.acquire().await.unwrap();
            Self::fetch_image_async(sender, cache_dir, card_id, ctx_clone).await;
        });
    }

    /// Fetch a card image over HTTP and hand the bytes back to the UI thread
    async fn fetch_image_async(
        sender: UnboundedSender<LoadedImage>,
        cache_dir: std::path::PathBuf,
        card_id: String,
        ctx: egui::Context,
    ) {
        let url = card_image_url(&card_id);
        debug!("Async: fetching image from {}", url);

        let client = match reqwest::Client::builder()
            .user_agent("proxy_sheet/1.0")
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to create HTTP client: {}", e);
                return;
            }
        };

        let image_data = match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => match response.bytes().await {
                Ok(bytes) => {
                    let cache_path = cache_dir.join(format!("{}.png", card_id.to_lowercase()));
                    if let Err(e) = std::fs::write(&cache_path, &bytes) {
                        warn!("Failed to cache image: {}", e);
                    }
                    info!("Async: fetched image for {}", card_id);
                    bytes.to_vec()
                }
                Err(e) => {
                    error!("Async: failed to read image body for {}: {}", card_id, e);
                    Vec::new()
                }
            },
            Ok(response) => {
                warn!(
                    "Async: image host returned {} for {}",
                    response.status(),
                    card_id
                );
                Vec::new()
            }
            Err(e) => {
                error!("Async: failed to fetch image for {}: {}", card_id, e);
                Vec::new()
            }
        };

        let _ = sender.send(LoadedImage {
            card_id,
            image_data,
        });
        ctx.request_repaint();
    }
}
