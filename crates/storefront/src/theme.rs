use shared::domain::Theme;
use storage::StoreAdapter;
use tracing::debug;

use crate::error::StorefrontError;

pub const THEME_KEY: &str = "theme";

pub struct ThemePreference {
    store: StoreAdapter,
    theme: Theme,
}

impl ThemePreference {
    pub async fn restore(store: StoreAdapter) -> Self {
        let theme = store.get(THEME_KEY, Theme::default()).await;
        Self { store, theme }
    }

    pub fn current(&self) -> Theme {
        self.theme
    }

    pub async fn set(&mut self, theme: Theme) -> Result<(), StorefrontError> {
        self.store.set(THEME_KEY, &theme).await?;
        self.theme = theme;
        debug!("theme: now {}", theme.as_str());
        Ok(())
    }

    pub async fn toggle(&mut self) -> Result<Theme, StorefrontError> {
        let next = self.theme.toggled();
        self.set(next).await?;
        Ok(next)
    }
}
