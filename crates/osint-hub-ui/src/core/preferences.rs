//! Typed accessors for the persisted user preferences.
//!
//! Every accessor goes through [`Storage`], so a broken or full store only ever
//! yields defaults and dropped writes.

use serde::Deserialize;

use crate::core::storage::{KeyValueStore, Storage, StorageKey};
use crate::core::theme::ThemeMode;

/// Language used when nothing valid is stored.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Earlier builds stored the dark-mode flag itself.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTheme {
    Flag(bool),
    Named(ThemeMode),
}

/// Preference accessors keyed by [`StorageKey`].
#[derive(Clone)]
pub struct Preferences<S> {
    storage: Storage<S>,
    history_limit: usize,
}

impl<S: KeyValueStore> Preferences<S> {
    /// Wrap `storage`, remembering at most `history_limit` searches.
    #[must_use]
    pub fn new(storage: Storage<S>, history_limit: usize) -> Self {
        Self {
            storage,
            history_limit: history_limit.max(1),
        }
    }

    /// Underlying storage wrapper.
    #[must_use]
    pub const fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Stored theme, defaulting to dark.
    #[must_use]
    pub fn load_theme(&self) -> ThemeMode {
        match self.storage.get(StorageKey::Theme.as_str(), None) {
            Some(StoredTheme::Flag(is_dark)) => ThemeMode::from_dark(is_dark),
            Some(StoredTheme::Named(mode)) => mode,
            None => ThemeMode::default(),
        }
    }

    /// Persist the theme.
    pub fn persist_theme(&self, mode: ThemeMode) {
        self.storage.set(StorageKey::Theme.as_str(), &mode);
    }

    /// Favorited tool identifiers, oldest first.
    #[must_use]
    pub fn load_favorites(&self) -> Vec<String> {
        self.storage.get_or_default(StorageKey::Favorites.as_str())
    }

    /// Add or remove `id`; returns whether it is now a favorite.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        let mut favorites = self.load_favorites();
        let now_favorite = if let Some(index) = favorites.iter().position(|entry| entry == id) {
            favorites.remove(index);
            false
        } else {
            favorites.push(id.to_string());
            true
        };
        self.storage
            .set(StorageKey::Favorites.as_str(), &favorites);
        now_favorite
    }

    /// Whether `id` is a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.load_favorites().iter().any(|entry| entry == id)
    }

    /// Recent searches, most recent first.
    #[must_use]
    pub fn load_search_history(&self) -> Vec<String> {
        let mut history: Vec<String> =
            self.storage.get_or_default(StorageKey::SearchHistory.as_str());
        history.truncate(self.history_limit);
        history
    }

    /// Remember `query` at the front of the history.
    ///
    /// Blank queries are ignored; repeats move to the front. Repeats are matched
    /// case-insensitively across the full Unicode range.
    pub fn record_search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let mut history = self.load_search_history();
        let folded = query.to_lowercase();
        history.retain(|entry| entry.to_lowercase() != folded);
        history.insert(0, query.to_string());
        history.truncate(self.history_limit);
        self.storage
            .set(StorageKey::SearchHistory.as_str(), &history);
    }

    /// Forget all searches.
    pub fn clear_search_history(&self) {
        self.storage.remove(StorageKey::SearchHistory.as_str());
    }

    /// Stored interface language, or [`DEFAULT_LANGUAGE`].
    #[must_use]
    pub fn load_language(&self) -> String {
        let stored: String = self.storage.get_or_default(StorageKey::Language.as_str());
        normalize_language_tag(&stored).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    /// Persist a language tag; invalid tags are ignored.
    pub fn persist_language(&self, tag: &str) {
        if let Some(language) = normalize_language_tag(tag) {
            self.storage
                .set(StorageKey::Language.as_str(), &language);
        }
    }
}

/// Reduce a language tag (`pt-BR`, `en_US`) to its lower-cased primary
/// subtag, or `None` when it is not two or three ASCII letters.
#[must_use]
pub fn normalize_language_tag(tag: &str) -> Option<String> {
    let primary = tag.trim().split(['-', '_']).next()?;
    let valid = (2..=3).contains(&primary.len())
        && primary.chars().all(|ch| ch.is_ascii_alphabetic());
    valid.then(|| primary.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    fn preferences() -> Preferences<MemoryStore> {
        Preferences::new(Storage::new(MemoryStore::new()), 3)
    }

    fn seed(prefs: &Preferences<MemoryStore>, key: StorageKey, raw: &str) {
        prefs
            .storage()
            .store()
            .set_item(key.as_str(), raw)
            .expect("seed store");
    }

    #[test]
    fn theme_defaults_to_dark_and_round_trips() {
        let prefs = preferences();
        assert_eq!(prefs.load_theme(), ThemeMode::Dark);
        prefs.persist_theme(ThemeMode::Light);
        assert_eq!(prefs.load_theme(), ThemeMode::Light);
    }

    #[test]
    fn theme_accepts_legacy_flag_and_ignores_garbage() {
        let prefs = preferences();
        seed(&prefs, StorageKey::Theme, "false");
        assert_eq!(prefs.load_theme(), ThemeMode::Light);
        seed(&prefs, StorageKey::Theme, "\"sepia\"");
        assert_eq!(prefs.load_theme(), ThemeMode::Dark);
    }

    #[test]
    fn favorites_toggle_in_insertion_order() {
        let prefs = preferences();
        assert!(prefs.toggle_favorite("shodan"));
        assert!(prefs.toggle_favorite("maltego"));
        assert!(prefs.is_favorite("shodan"));
        assert!(!prefs.toggle_favorite("shodan"));
        assert_eq!(prefs.load_favorites(), vec!["maltego".to_string()]);
    }

    #[test]
    fn search_history_dedupes_and_caps() {
        let prefs = preferences();
        for query in ["whois", "  ", "dns", "WHOIS", "exif", "geoint"] {
            prefs.record_search(query);
        }
        assert_eq!(
            prefs.load_search_history(),
            vec!["geoint".to_string(), "exif".to_string(), "WHOIS".to_string()]
        );

        prefs.clear_search_history();
        assert!(prefs.load_search_history().is_empty());
    }

    #[test]
    fn search_history_folds_non_ascii_case() {
        let prefs = preferences();
        prefs.record_search("Ärzte");
        prefs.record_search("ärzte");
        prefs.record_search("ΣΟΦΙΑ");
        prefs.record_search("σοφια");
        assert_eq!(
            prefs.load_search_history(),
            vec!["σοφια".to_string(), "ärzte".to_string()]
        );
    }

    #[test]
    fn language_is_normalized() {
        let prefs = preferences();
        assert_eq!(prefs.load_language(), "en");
        prefs.persist_language("pt-BR");
        assert_eq!(prefs.load_language(), "pt");
        prefs.persist_language("not a tag");
        assert_eq!(prefs.load_language(), "pt");
        seed(&prefs, StorageKey::Language, "\"x1\"");
        assert_eq!(prefs.load_language(), "en");
    }

    #[test]
    fn normalize_language_tag_handles_separators() {
        assert_eq!(normalize_language_tag("en_US").as_deref(), Some("en"));
        assert_eq!(normalize_language_tag(" FIL ").as_deref(), Some("fil"));
        assert_eq!(normalize_language_tag(""), None);
        assert_eq!(normalize_language_tag("english"), None);
    }
}
