//! Text service

use gallery_core::ports::TextStore;
use gallery_core::{Result, TextEntry, ValidatedTextUpdate};
use std::sync::Arc;
use tracing::debug;

pub struct TextService {
    store: Arc<dyn TextStore>,
}

impl TextService {
    pub fn new(store: Arc<dyn TextStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<TextEntry>> {
        self.store.list_texts().await
    }

    /// Succeeds whether or not the key exists
    pub async fn update(&self, update: ValidatedTextUpdate) -> Result<()> {
        let changed = self.store.update_text(&update.key, &update.value).await?;
        debug!("Update text {}: {} row(s) changed", update.key, changed);
        Ok(())
    }
}
