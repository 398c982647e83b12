//! Palette entries and the fuzzy filter over them.

use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher, Utf32Str,
};
use platform_host::NavigationService;
use portfolio_commands::content;
use portfolio_store::{ModalId, Store};
use terminal_contract::CommandDescriptor;

/// What selecting an entry does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// Go to an in-site route.
    Navigate(String),
    /// Put `command ` into the terminal input box.
    Prefill(String),
}

/// One selectable palette row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Primary text, matched first.
    pub label: String,
    /// Secondary text, also searchable.
    pub detail: String,
    /// Effect on activation.
    pub action: PaletteAction,
}

/// Site sections followed by the public commands, in that order.
pub fn default_entries(commands: &[CommandDescriptor]) -> Vec<PaletteEntry> {
    let sections = content::DIRECTORIES.iter().map(|directory| PaletteEntry {
        label: directory.name.to_string(),
        detail: directory.route.to_string(),
        action: PaletteAction::Navigate(directory.route.to_string()),
    });
    let commands = commands
        .iter()
        .filter(|descriptor| descriptor.is_public())
        .map(|descriptor| PaletteEntry {
            label: descriptor.name.clone(),
            detail: descriptor.description.clone(),
            action: PaletteAction::Prefill(descriptor.name.clone()),
        });
    sections.chain(commands).collect()
}

/// Fuzzy filter with smart case: an all-lowercase query ignores case.
pub struct PaletteFilter {
    matcher: Matcher,
}

impl Default for PaletteFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteFilter {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Entries matching `query`, best score first; ties keep declaration order. A blank query
    /// returns every entry in declaration order.
    pub fn filter<'a>(&mut self, entries: &'a [PaletteEntry], query: &str) -> Vec<&'a PaletteEntry> {
        let query = query.trim();
        if query.is_empty() {
            return entries.iter().collect();
        }

        let pattern = Pattern::new(
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut buf = Vec::new();
        let mut scored = entries
            .iter()
            .filter_map(|entry| {
                let label = pattern.score(Utf32Str::new(&entry.label, &mut buf), &mut self.matcher);
                let detail =
                    pattern.score(Utf32Str::new(&entry.detail, &mut buf), &mut self.matcher);
                // Label hits outrank detail-only hits.
                let score = match (label, detail) {
                    (Some(label), _) => u64::from(label) + u64::from(u32::MAX),
                    (None, Some(detail)) => u64::from(detail),
                    (None, None) => return None,
                };
                Some((score, entry))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|left, right| right.0.cmp(&left.0));
        scored.into_iter().map(|(_, entry)| entry).collect()
    }
}

/// Applies `entry` and closes the palette.
pub fn activate(store: &Store, navigation: &dyn NavigationService, entry: &PaletteEntry) {
    match &entry.action {
        PaletteAction::Navigate(route) => {
            navigation.push(route);
            store.set_route(route.clone());
        }
        PaletteAction::Prefill(command) => {
            store.set_input(format!("{command} "));
        }
    }
    store.set_search_query("");
    store.set_modal_open(ModalId::Search, false);
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use platform_host::RecordingNavigationService;
    use portfolio_commands::{builtin_registry, SiteConfig};
    use pretty_assertions::assert_eq;

    use super::*;

    fn entries() -> Vec<PaletteEntry> {
        let registry = builtin_registry(Rc::new(SiteConfig::default())).expect("registry");
        default_entries(&registry.descriptors())
    }

    fn labels(found: Vec<&PaletteEntry>) -> Vec<String> {
        found.into_iter().map(|entry| entry.label.clone()).collect()
    }

    #[test]
    fn blank_query_keeps_declaration_order() {
        let entries = entries();
        let found = PaletteFilter::new().filter(&entries, "  ");
        assert_eq!(found.len(), entries.len());
        assert_eq!(found[0].label, "about");
        assert!(!entries.iter().any(|entry| entry.label == "cls"));
    }

    #[test]
    fn best_label_match_comes_first() {
        let entries = entries();
        let found = labels(PaletteFilter::new().filter(&entries, "exp"));
        assert_eq!(found.first().map(String::as_str), Some("experience"));
    }

    #[test]
    fn unmatched_query_is_empty() {
        let entries = entries();
        assert!(PaletteFilter::new().filter(&entries, "zzqx").is_empty());
    }

    #[test]
    fn uppercase_query_is_case_sensitive() {
        let entries = vec![
            PaletteEntry {
                label: "blogs".into(),
                detail: "/blogs".into(),
                action: PaletteAction::Navigate("/blogs".into()),
            },
            PaletteEntry {
                label: "Blog archive".into(),
                detail: String::new(),
                action: PaletteAction::Navigate("/archive".into()),
            },
        ];
        let mut filter = PaletteFilter::new();
        assert_eq!(labels(filter.filter(&entries, "Blog")), vec!["Blog archive"]);
        assert_eq!(filter.filter(&entries, "blog").len(), 2);
    }

    #[test]
    fn activation_navigates_and_closes() {
        let store = Store::global();
        let navigation = RecordingNavigationService::default();
        store.set_modal_open(ModalId::Search, true);
        store.set_search_query("boo");

        let entry = entries()
            .into_iter()
            .find(|entry| entry.label == "books")
            .expect("books entry");
        activate(&store, &navigation, &entry);

        assert_eq!(navigation.pushed(), vec!["/books"]);
        let state = store.snapshot();
        assert_eq!(state.ui.route, "/books");
        assert!(state.search_query.is_empty());
        assert!(!state.ui.modals.search);
    }

    #[test]
    fn command_entries_prefill_the_terminal() {
        let store = Store::global();
        let entry = entries()
            .into_iter()
            .find(|entry| entry.label == "theme")
            .expect("theme entry");
        activate(&store, &RecordingNavigationService::default(), &entry);
        assert_eq!(store.read(|state| state.terminal.input.clone()), "theme ");
    }
}
