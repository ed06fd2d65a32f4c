//! Card image retrieval.
//!
//! Image addresses are derived deterministically from the catalog id; bytes
//! are cached on disk so a card is fetched at most once. Image availability
//! is a display concern only and never affects the print set.

use crate::error::{SheetError, SheetResult};

/// Base address of the card image host.
pub const IMAGE_BASE_URL: &str = "https://images.thepitchzone.com/cards/";

/// Image address for a catalog card: base URL + id + ".png"
pub fn card_image_url(card_id: &str) -> String {
    format!("{}{}.png", IMAGE_BASE_URL, card_id)
}

/// Persistent cache for card images
/// Stores images as files in the cache directory
pub struct ImageCache {
    cache_dir: std::path::PathBuf,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCache {
    /// Create a new image cache
    pub fn new() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("proxy_sheet")
            .join("images");

        // Create directory if needed
        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            log::warn!("Failed to create image cache directory: {}", e);
        }

        log::info!("Image cache directory: {:?}", cache_dir);
        Self { cache_dir }
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &std::path::Path {
        &self.cache_dir
    }

    /// Generate a filename from a catalog card id
    fn filename(card_id: &str) -> String {
        format!("{}.png", card_id.to_lowercase())
    }

    /// Get the full path for a cached image
    fn path(&self, card_id: &str) -> std::path::PathBuf {
        self.cache_dir.join(Self::filename(card_id))
    }

    /// Check if an image is cached
    pub fn contains(&self, card_id: &str) -> bool {
        self.path(card_id).exists()
    }

    /// Get a cached image
    pub fn get(&self, card_id: &str) -> Option<Vec<u8>> {
        let path = self.path(card_id);
        match std::fs::read(&path) {
            Ok(bytes) => {
                log::debug!("Image cache hit for {}", card_id);
                Some(bytes)
            }
            Err(_) => None,
        }
    }

    /// Store an image in the cache
    pub fn insert(&self, card_id: &str, bytes: &[u8]) {
        let path = self.path(card_id);
        if let Err(e) = std::fs::write(&path, bytes) {
            log::warn!("Failed to cache image: {}", e);
        } else {
            log::debug!("Cached image for {}", card_id);
        }
    }
}

/// Fetch card image bytes
pub fn fetch_image(url: &str) -> SheetResult<Vec<u8>> {
    log::debug!("Fetching image: {}", url);

    let response = reqwest::blocking::Client::new()
        .get(url)
        .header("User-Agent", "proxy_sheet/1.0")
        .send()?;

    if response.status().is_success() {
        Ok(response.bytes()?.to_vec())
    } else {
        Err(SheetError::HttpStatus(response.status()))
    }
}

/// Fetch a card image, checking the cache first
pub fn fetch_image_cached(cache: &ImageCache, card_id: &str) -> SheetResult<Vec<u8>> {
    if let Some(bytes) = cache.get(card_id) {
        return Ok(bytes);
    }

    let url = card_image_url(card_id);
    log::info!("Image cache miss for {}, fetching {}", card_id, url);
    let bytes = fetch_image(&url)?;

    cache.insert(card_id, &bytes);

    Ok(bytes)
}

#[cfg(test)]
#[path = "images_tests.rs"]
mod tests;
