//! Editor selection
//!
//! Answers "which rich-text editor is active?" from a shared preference store.
//! New installs get Aztec without anything being written; the first explicit
//! `enable` is what gets persisted.

use std::sync::Arc;

use crate::store::KeyValueStore;
use crate::types::{EditorVariant, PrefValue, Setting};

/// Store key holding the active variant's name
pub const ACTIVE_EDITOR_KEY: &str = "editor.active";

/// Variant used while nothing has been stored
pub const DEFAULT_EDITOR: EditorVariant = EditorVariant::Aztec;

/// Editor preference backed by a shared `KeyValueStore`.
///
/// Cheap to construct; building a second instance on the same store is how a
/// relaunch looks from the store's point of view.
#[derive(Clone)]
pub struct EditorSettings {
    store: Arc<dyn KeyValueStore>,
}

impl EditorSettings {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored selection, or `Inherit` if only the default applies.
    ///
    /// Values that don't name a known variant are ignored (and left in place).
    pub fn selection(&self) -> Setting<EditorVariant> {
        let Some(value) = self.store.get(ACTIVE_EDITOR_KEY) else {
            return Setting::Inherit;
        };

        match value.as_str().map(str::parse::<EditorVariant>) {
            Some(Ok(variant)) => Setting::Value(variant),
            _ => {
                log::warn!("ignoring unrecognized {ACTIVE_EDITOR_KEY} value '{value}'");
                Setting::Inherit
            }
        }
    }

    /// The active editor
    pub fn editor(&self) -> EditorVariant {
        self.selection().resolve(DEFAULT_EDITOR)
    }

    pub fn is_enabled(&self, variant: EditorVariant) -> bool {
        self.editor() == variant
    }

    /// Make `variant` the active editor, deactivating every other one.
    pub fn enable(&self, variant: EditorVariant) {
        log::debug!("enabling {variant} editor");
        self.store.set(ACTIVE_EDITOR_KEY, PrefValue::from(variant.as_str()));
    }

    /// True once the user has picked an editor
    pub fn has_explicit_selection(&self) -> bool {
        self.selection().is_set()
    }

    /// Forget the stored selection so the default applies again.
    pub fn reset(&self) {
        log::debug!("clearing editor selection");
        self.store.remove(ACTIVE_EDITOR_KEY);
    }
}

impl std::fmt::Debug for EditorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSettings")
            .field("selection", &self.selection())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EphemeralStore;

    #[test]
    fn test_fresh_store_defaults_to_aztec() {
        let settings = EditorSettings::new(EphemeralStore::shared());

        assert!(settings.is_enabled(EditorVariant::Aztec));
        assert!(!settings.is_enabled(EditorVariant::Legacy));
        assert_eq!(settings.selection(), Setting::Inherit);
    }

    #[test]
    fn test_default_is_not_written() {
        let store = EphemeralStore::shared();
        let settings = EditorSettings::new(store.clone());

        let _ = settings.is_enabled(EditorVariant::Aztec);
        let _ = settings.editor();

        assert!(store.is_empty());
        assert!(!settings.has_explicit_selection());
    }

    #[test]
    fn test_enable_is_exclusive() {
        let settings = EditorSettings::new(EphemeralStore::shared());

        settings.enable(EditorVariant::Legacy);
        assert!(settings.is_enabled(EditorVariant::Legacy));
        assert!(!settings.is_enabled(EditorVariant::Aztec));

        settings.enable(EditorVariant::Aztec);
        assert!(settings.is_enabled(EditorVariant::Aztec));
        assert!(!settings.is_enabled(EditorVariant::Legacy));
    }

    #[test]
    fn test_explicit_aztec_is_persisted() {
        let store = EphemeralStore::shared();
        let settings = EditorSettings::new(store.clone());

        settings.enable(EditorVariant::Aztec);

        assert!(settings.has_explicit_selection());
        assert_eq!(store.get(ACTIVE_EDITOR_KEY), Some(PrefValue::from("aztec")));
    }

    #[test]
    fn test_enable_is_idempotent() {
        let store = EphemeralStore::shared();
        let settings = EditorSettings::new(store.clone());

        settings.enable(EditorVariant::Legacy);
        settings.enable(EditorVariant::Legacy);

        assert_eq!(store.len(), 1);
        assert_eq!(settings.selection(), Setting::Value(EditorVariant::Legacy));
    }

    #[test]
    fn test_reset_restores_default() {
        let store = EphemeralStore::shared();
        let settings = EditorSettings::new(store.clone());

        settings.enable(EditorVariant::Legacy);
        settings.reset();
        settings.reset();

        assert!(settings.is_enabled(EditorVariant::Aztec));
        assert!(store.is_empty());
    }

    #[test]
    fn test_unrecognized_values_fall_back_to_default() {
        let store = EphemeralStore::shared();
        let settings = EditorSettings::new(store.clone());

        store.set(ACTIVE_EDITOR_KEY, PrefValue::from("gutenberg"));
        assert!(settings.is_enabled(EditorVariant::Aztec));
        assert!(!settings.has_explicit_selection());

        store.set(ACTIVE_EDITOR_KEY, PrefValue::Bool(false));
        assert!(settings.is_enabled(EditorVariant::Aztec));

        // Left untouched for whoever wrote it
        assert_eq!(store.get(ACTIVE_EDITOR_KEY), Some(PrefValue::Bool(false)));
    }

    #[test]
    fn test_settings_share_store() {
        let store = EphemeralStore::shared();
        let first = EditorSettings::new(store.clone());
        let second = EditorSettings::new(store);

        first.enable(EditorVariant::Legacy);
        assert!(second.is_enabled(EditorVariant::Legacy));
    }
}
