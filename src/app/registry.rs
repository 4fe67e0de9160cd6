//! Tab registry - the ordered set of tabs and the single active pointer.
//!
//! Invariants held after every public operation:
//! - at least one tab exists
//! - exactly one tab is active, and it resolves to an existing tab

use crate::app::panel::{duplicate_title, title_from_url, TabPanel};
use crate::constants::DEFAULT_TITLE;
use crate::models::{RequestState, ResponseOutcome, TabId};

/// One independent request/response context
#[derive(Clone, Debug)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    /// Set once the user renames the tab; URL edits stop touching the title
    pub title_edited: bool,
    pub panel: TabPanel,
}

impl Tab {
    /// Re-derive the title after a URL edit
    pub fn url_edited(&mut self) {
        if !self.title_edited {
            self.title = title_from_url(&self.panel.url);
        }
    }
}

pub struct TabRegistry {
    tabs: Vec<Tab>,
    active: Option<TabId>,
    next_id: u64,
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistry {
    /// A registry holding one fresh default tab
    pub fn new() -> Self {
        let mut registry = TabRegistry {
            tabs: Vec::new(),
            active: None,
            next_id: 1,
        };
        registry.create_tab(None);
        registry
    }

    /// Append a tab, seeded from `seed` or with defaults, and activate it
    pub fn create_tab(&mut self, seed: Option<RequestState>) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;

        let title = match &seed {
            Some(state) => duplicate_title(&state.url),
            None => DEFAULT_TITLE.to_string(),
        };

        self.tabs.push(Tab {
            id,
            title,
            title_edited: false,
            panel: TabPanel::new(seed.unwrap_or_default()),
        });
        self.active = Some(id);
        tracing::debug!(tab = %id, count = self.tabs.len(), "Tab created");
        id
    }

    /// Activate `id`, falling back to the first tab (or a new one) when the
    /// id is stale
    pub fn activate(&mut self, id: TabId) {
        if self.active == Some(id) {
            return;
        }
        if self.position(id).is_some() {
            self.active = Some(id);
        } else {
            tracing::debug!(tab = %id, "Activation of unknown tab, falling back");
            self.activate_fallback();
        }
    }

    /// Remove a tab. In-flight requests keep running; their results are
    /// dropped by [`TabRegistry::complete`].
    pub fn close(&mut self, id: TabId) {
        let Some(pos) = self.position(id) else {
            return;
        };
        self.tabs.remove(pos);
        tracing::debug!(tab = %id, count = self.tabs.len(), "Tab closed");

        if self.active == Some(id) || self.tabs.is_empty() {
            self.active = None;
            self.activate_fallback();
        }
    }

    /// Copy the live request state of `id` into a new tab
    pub fn duplicate(&mut self, id: TabId) -> Option<TabId> {
        let seed = self.get(id)?.panel.read_state();
        Some(self.create_tab(Some(seed)))
    }

    /// Activate the tab after the active one, wrapping around
    pub fn next(&mut self) {
        let idx = (self.active_index() + 1) % self.tabs.len();
        self.active = Some(self.tabs[idx].id);
    }

    /// Activate the tab before the active one, wrapping around
    pub fn prev(&mut self) {
        let idx = self
            .active_index()
            .checked_sub(1)
            .unwrap_or(self.tabs.len() - 1);
        self.active = Some(self.tabs[idx].id);
    }

    /// Hand-edit a title. A blank title reverts to automatic derivation.
    pub fn rename(&mut self, id: TabId, title: &str) {
        if let Some(tab) = self.get_mut(id) {
            let title = title.trim();
            if title.is_empty() {
                tab.title_edited = false;
                tab.url_edited();
            } else {
                tab.title = title.to_string();
                tab.title_edited = true;
            }
        }
    }

    /// Route an executor outcome to the owning tab. Returns false when the
    /// tab is gone or was not waiting for this request.
    pub fn complete(&mut self, id: TabId, request_id: u64, outcome: ResponseOutcome) -> bool {
        match self.get_mut(id) {
            Some(tab) => tab.panel.finish_send(request_id, outcome),
            None => false,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn active_id(&self) -> TabId {
        self.active().id
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active_index()]
    }

    pub fn active_mut(&mut self) -> &mut Tab {
        let idx = self.active_index();
        &mut self.tabs[idx]
    }

    fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    // The registry is never empty between public calls
    fn active_index(&self) -> usize {
        self.active.and_then(|id| self.position(id)).unwrap_or(0)
    }

    fn activate_fallback(&mut self) {
        match self.tabs.first() {
            Some(first) => self.active = Some(first.id),
            None => {
                self.create_tab(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Header, HttpMethod};

    fn assert_invariants(registry: &TabRegistry) {
        assert!(!registry.is_empty());
        let active = registry.active.expect("an active tab");
        assert_eq!(registry.tabs().iter().filter(|t| t.id == active).count(), 1);
    }

    #[test]
    fn test_new_registry_has_one_default_tab() {
        let registry = TabRegistry::new();
        assert_eq!(registry.len(), 1);
        let tab = registry.active();
        assert_eq!(tab.title, "Untitled");
        assert_eq!(tab.panel.read_state(), RequestState::default());
        assert_invariants(&registry);
    }

    #[test]
    fn test_create_appends_and_activates() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        let second = registry.create_tab(None);
        assert_ne!(first, second);
        assert_eq!(registry.active_id(), second);
        assert_eq!(registry.tabs()[1].id, second);
    }

    #[test]
    fn test_closing_last_tab_creates_fresh_one() {
        let mut registry = TabRegistry::new();
        let only = registry.active_id();
        registry.active_mut().panel.url = "https://example.com".to_string();
        registry.close(only);

        assert_eq!(registry.len(), 1);
        let fresh = registry.active();
        assert_ne!(fresh.id, only);
        assert_eq!(fresh.panel.read_state(), RequestState::default());
        assert_invariants(&registry);
    }

    #[test]
    fn test_close_active_activates_first() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        registry.create_tab(None);
        let third = registry.create_tab(None);
        registry.close(third);
        assert_eq!(registry.active_id(), first);
        assert_invariants(&registry);
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        let second = registry.create_tab(None);
        registry.close(first);
        assert_eq!(registry.active_id(), second);
        registry.close(first);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_activate_stale_id_falls_back() {
        let mut registry = TabRegistry::new();
        let first = registry.active_id();
        let second = registry.create_tab(None);
        registry.close(second);
        for _ in 0..3 {
            registry.activate(second);
            assert_eq!(registry.active_id(), first);
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut registry = TabRegistry::new();
        let mut seen = vec![registry.active_id()];
        for _ in 0..10 {
            let id = registry.active_id();
            registry.close(id);
            let id = registry.create_tab(None);
            assert!(!seen.contains(&id));
            seen.push(id);
        }
    }

    #[test]
    fn test_invariants_hold_over_operation_sequences() {
        let mut registry = TabRegistry::new();
        let mut known = vec![registry.active_id()];
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let pick = known[(seed as usize / 4) % known.len()];

            match seed % 4 {
                0 => known.push(registry.create_tab(None)),
                1 => registry.activate(pick),
                2 => registry.close(pick),
                _ => {
                    if let Some(id) = registry.duplicate(pick) {
                        known.push(id);
                    }
                }
            }
            known.extend(registry.tabs().iter().map(|t| t.id));
            known.sort();
            known.dedup();
            assert_invariants(&registry);
        }
    }

    #[test]
    fn test_duplicate_copies_live_state() {
        let mut registry = TabRegistry::new();
        let source = registry.active_id();
        {
            let panel = &mut registry.active_mut().panel;
            panel.method = HttpMethod::POST;
            panel.url = "https://example.com/api/users?page=1".to_string();
            panel.body = r#"{"name":"x"}"#.to_string();
            panel.headers.push(Header::new("X-Trace", "1"));
        }
        let expected = registry.get(source).unwrap().panel.read_state();

        let copy = registry.duplicate(source).unwrap();
        assert_eq!(registry.active_id(), copy);
        assert_eq!(registry.get(copy).unwrap().panel.read_state(), expected);
        assert_eq!(registry.get(copy).unwrap().title, "users");

        // Later edits to the source don't leak into the copy
        let panel = &mut registry.get_mut(source).unwrap().panel;
        panel.headers[0].value = "text/plain".to_string();
        panel.body.push_str("!!");
        assert_eq!(registry.get(copy).unwrap().panel.read_state(), expected);
    }

    #[test]
    fn test_duplicate_unknown_tab() {
        let mut registry = TabRegistry::new();
        let id = registry.active_id();
        registry.close(id);
        assert_eq!(registry.duplicate(id), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_edits_are_isolated_between_tabs() {
        let mut registry = TabRegistry::new();
        let a = registry.active_id();
        let b = registry.create_tab(None);
        let before = registry.get(b).unwrap().panel.read_state();

        let panel = &mut registry.get_mut(a).unwrap().panel;
        panel.url = "https://a.example".to_string();
        panel.body = "body".to_string();
        panel.headers[0].key = "Accept".to_string();
        panel.add_header_row();

        assert_eq!(registry.get(b).unwrap().panel.read_state(), before);
    }

    #[test]
    fn test_url_edit_updates_title_until_renamed() {
        let mut registry = TabRegistry::new();
        let id = registry.active_id();
        let tab = registry.active_mut();
        tab.panel.url = "https://www.example.com/path".to_string();
        tab.url_edited();
        assert_eq!(tab.title, "example.com");

        registry.rename(id, "  My API  ");
        let tab = registry.active_mut();
        assert_eq!(tab.title, "My API");
        tab.panel.url = "https://other.org".to_string();
        tab.url_edited();
        assert_eq!(tab.title, "My API");

        registry.rename(id, "");
        assert_eq!(registry.active().title, "other.org");
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut registry = TabRegistry::new();
        let a = registry.active_id();
        let b = registry.create_tab(None);
        registry.next();
        assert_eq!(registry.active_id(), a);
        registry.prev();
        assert_eq!(registry.active_id(), b);
    }

    #[test]
    fn test_complete_discards_closed_tab() {
        let mut registry = TabRegistry::new();
        let id = registry.active_id();
        registry.active_mut().panel.url = "http://localhost:1".to_string();
        let pending = registry.active_mut().panel.begin_send().unwrap();
        registry.create_tab(None);
        registry.close(id);

        assert!(!registry.complete(id, pending.request_id, ResponseOutcome::failure("late")));
        assert_invariants(&registry);
    }

    #[test]
    fn test_complete_routes_to_owner_only() {
        let mut registry = TabRegistry::new();
        let a = registry.active_id();
        registry.active_mut().panel.url = "http://a".to_string();
        let pending = registry.active_mut().panel.begin_send().unwrap();
        let b = registry.create_tab(None);

        assert!(registry.complete(a, pending.request_id, ResponseOutcome::failure("err")));
        assert!(!registry.get(a).unwrap().panel.is_pending());
        assert_eq!(
            registry.get(b).unwrap().panel.response,
            crate::models::ResponseView::Empty
        );
    }
}
