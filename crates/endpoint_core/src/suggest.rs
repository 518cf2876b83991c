//! Incremental completion for a partially typed endpoint URL.
//!
//! Every fragment returned by [`SuggestionEngine::suggest`] is the text to
//! *append* to the input; nothing already typed is repeated.

use crate::UrlSuggestionTable;

/// Upper bound on the number of fragments offered at once.
pub const MAX_SUGGESTIONS: usize = 5;

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Live text of the URL field and the suggestions derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputState {
    pub value: String,
    pub suggestions: Vec<String>,
    pub suggestions_visible: bool,
}

impl InputState {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Hides and forgets the current suggestion list.
    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestions_visible = false;
    }
}

/// Stateless suggestion lookup over a [`UrlSuggestionTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuggestionEngine {
    table: UrlSuggestionTable,
}

impl SuggestionEngine {
    pub fn new(table: UrlSuggestionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &UrlSuggestionTable {
        &self.table
    }

    /// Returns at most [`MAX_SUGGESTIONS`] fragments to append to `input`.
    ///
    /// After a trailing dot the whole `tlds` table is offered with its
    /// leading dot removed, since the dot is already typed:
    /// `suggest("https://api.")` yields `["com", "io", "net", "org", "co"]`,
    /// not `[".com", ...]`. Accepting a fragment therefore never produces
    /// `api..com`.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return completions(self.table.protocols, "");
        }

        let Some(rest) = strip_scheme(input) else {
            return completions(self.table.protocols, input);
        };

        if let Some(slash) = rest.rfind('/') {
            let typed = &rest[slash..];
            return completions(self.table.paths, typed);
        }

        if input.ends_with('.') {
            return completions(self.table.tlds, ".");
        }

        let labels: Vec<&str> = rest.split('.').collect();
        match labels.as_slice() {
            [single] => {
                let subdomains = completions(self.table.subdomains, single);
                if subdomains.is_empty() {
                    completions(self.table.tlds, "")
                } else {
                    subdomains
                }
            }
            [.., last] => completions(self.table.tlds, &format!(".{last}")),
            [] => Vec::new(),
        }
    }

    /// Recomputes `state.suggestions` from `state.value`.
    ///
    /// An empty fragment means the value already ends in a complete entry;
    /// it is kept in the list but alone it does not make the list visible.
    pub fn refresh(&self, state: &mut InputState) {
        state.suggestions = self.suggest(&state.value);
        state.suggestions_visible = state.suggestions.iter().any(|s| !s.is_empty());
    }

    /// Appends suggestion `index` to the value and recomputes suggestions.
    ///
    /// Returns `false` without touching `state` when `index` is out of range.
    pub fn accept(&self, state: &mut InputState, index: usize) -> bool {
        let Some(fragment) = state.suggestions.get(index).cloned() else {
            return false;
        };
        state.value.push_str(&fragment);
        self.refresh(state);
        true
    }
}

fn strip_scheme(input: &str) -> Option<&str> {
    SCHEMES
        .iter()
        .find_map(|scheme| input.strip_prefix(scheme))
}

/// Entries of `table` that start with `typed`, with `typed` removed.
fn completions(table: &[&str], typed: &str) -> Vec<String> {
    table
        .iter()
        .filter_map(|entry| entry.strip_prefix(typed))
        .take(MAX_SUGGESTIONS)
        .map(ToOwned::to_owned)
        .collect()
}
