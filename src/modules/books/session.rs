//! Intent handling: what the presentation layer talks to.

use novalib_storage::KeyValueStore;
use serde::Serialize;

use super::id::{Clock, SystemClock};
use super::models::{BookId, BookRecord, BookStatus};
use super::store::InventoryStore;
use super::view::{compute_stats, filter_by_title, InventoryStats};

/// A user action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add { title: String, author: String },
    ToggleStatus(BookId),
    Remove(BookId),
    SetSearchText(String),
}

/// What applying an [`Intent`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Added(BookId),
    /// Add was refused because title or author was empty.
    Rejected,
    Toggled { id: BookId, status: BookStatus },
    Removed(BookRecord),
    NotFound(BookId),
    SearchUpdated,
}

/// Everything the presentation layer needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryView<'a> {
    pub search_text: &'a str,
    /// Records matching the search, newest first.
    pub records: Vec<&'a BookRecord>,
    /// Counts over the whole collection, not just the matches.
    pub stats: InventoryStats,
}

/// The store plus the active search text.
#[derive(Debug)]
pub struct InventorySession<S, C = SystemClock> {
    store: InventoryStore<S, C>,
    search_text: String,
}

impl<S: KeyValueStore, C: Clock> InventorySession<S, C> {
    pub fn new(store: InventoryStore<S, C>) -> Self {
        Self {
            store,
            search_text: String::new(),
        }
    }

    /// Apply one intent to completion.
    pub fn dispatch(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::Add { title, author } => match self.store.add(&title, &author) {
                Some(id) => IntentOutcome::Added(id),
                None => IntentOutcome::Rejected,
            },
            Intent::ToggleStatus(id) => match self.store.toggle_status(&id) {
                Some(status) => IntentOutcome::Toggled { id, status },
                None => IntentOutcome::NotFound(id),
            },
            Intent::Remove(id) => match self.store.remove(&id) {
                Some(record) => IntentOutcome::Removed(record),
                None => IntentOutcome::NotFound(id),
            },
            Intent::SetSearchText(text) => {
                self.search_text = text;
                IntentOutcome::SearchUpdated
            }
        }
    }

    pub fn view(&self) -> InventoryView<'_> {
        let books = self.store.get_all();
        InventoryView {
            search_text: &self.search_text,
            records: filter_by_title(books, &self.search_text).collect(),
            stats: compute_stats(books),
        }
    }

    /// Turn user-typed id text into the id of a stored record when one
    /// matches, else into its parsed form.
    pub fn resolve_id(&self, raw: &str) -> BookId {
        match self.store.find_id(raw) {
            Some(id) => id.clone(),
            None => match raw.parse() {
                Ok(id) => id,
                Err(never) => match never {},
            },
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn store(&self) -> &InventoryStore<S, C> {
        &self.store
    }
}
