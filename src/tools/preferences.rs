//! Reader preference tools.

use crate::domain::Theme;
use crate::error::PreferencesResult;
use crate::preferences::{PreferenceStore, Preferences};
use std::sync::Arc;

/// Read and update the stored preference record.
#[derive(Clone)]
pub struct PreferenceTools {
    store: Arc<dyn PreferenceStore>,
}

/// Fields to change; `None` leaves a field as stored.
#[derive(Debug, Clone, Default)]
pub struct UpdatePreferencesParams {
    pub theme: Option<Theme>,

    /// Flip the stored theme; ignored when `theme` is given
    pub toggle_theme: bool,

    pub toc_visible: Option<bool>,
}

impl PreferenceTools {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Stored preferences, or the defaults when none are stored.
    pub fn get(&self) -> Preferences {
        Preferences::load(self.store.as_ref())
    }

    /// Apply `params` to the stored record and save it.
    pub fn update(&self, params: UpdatePreferencesParams) -> PreferencesResult<Preferences> {
        let mut prefs = self.get();

        match params.theme {
            Some(theme) => prefs.theme = theme,
            None if params.toggle_theme => prefs.theme = prefs.theme.toggled(),
            None => {}
        }
        if let Some(visible) = params.toc_visible {
            prefs.toc_visible = visible;
        }

        prefs.save(self.store.as_ref())?;
        tracing::debug!(theme = %prefs.theme, toc_visible = prefs.toc_visible, "Preferences updated");
        Ok(prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferenceStore;

    #[test]
    fn test_update_merges_fields() {
        let tools = PreferenceTools::new(Arc::new(MemoryPreferenceStore::new()));
        assert_eq!(tools.get(), Preferences::default());

        tools
            .update(UpdatePreferencesParams {
                toc_visible: Some(true),
                ..Default::default()
            })
            .unwrap();
        let prefs = tools
            .update(UpdatePreferencesParams {
                toggle_theme: true,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(prefs.theme, Theme::Dark);
        assert!(prefs.toc_visible);
        assert_eq!(tools.get(), prefs);
    }

    #[test]
    fn test_explicit_theme_wins_over_toggle() {
        let tools = PreferenceTools::new(Arc::new(MemoryPreferenceStore::new()));
        let prefs = tools
            .update(UpdatePreferencesParams {
                theme: Some(Theme::Light),
                toggle_theme: true,
                toc_visible: None,
            })
            .unwrap();
        assert_eq!(prefs.theme, Theme::Light);
    }
}
