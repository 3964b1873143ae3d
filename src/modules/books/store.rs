//! The inventory store: sole owner of the book collection.

use novalib_storage::KeyValueStore;

use super::id::{Clock, IdGenerator, SystemClock};
use super::models::{BookId, BookRecord, BookStatus};
use super::persistence::BookArchive;

/// Authoritative in-memory collection with write-through persistence.
///
/// Records are kept newest-first. Every accepted mutation is followed by a
/// full write of the collection; a failed write is logged and the in-memory
/// state stays as mutated.
#[derive(Debug)]
pub struct InventoryStore<S, C = SystemClock> {
    books: Vec<BookRecord>,
    archive: BookArchive<S>,
    ids: IdGenerator<C>,
    unsaved: bool,
}

impl<S: KeyValueStore> InventoryStore<S> {
    /// Load the persisted collection and take ownership of the archive.
    pub fn initialize(archive: BookArchive<S>) -> Self {
        Self::initialize_with_clock(archive, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> InventoryStore<S, C> {
    pub fn initialize_with_clock(archive: BookArchive<S>, clock: C) -> Self {
        let books = archive.load();

        let mut ids = IdGenerator::with_clock(clock);
        if let Some(highest) = books.iter().filter_map(|b| b.id.as_numeric()).max() {
            ids.observe(highest);
        }

        tracing::info!(key = archive.key(), count = books.len(), "inventory initialized");

        Self {
            books,
            archive,
            ids,
            unsaved: false,
        }
    }

    /// Add a book at the front of the collection.
    ///
    /// Returns `None` without touching storage when either field is empty.
    /// Values are taken as given; whitespace is not trimmed.
    pub fn add(&mut self, title: &str, author: &str) -> Option<BookId> {
        if title.is_empty() || author.is_empty() {
            tracing::debug!("rejected book with empty title or author");
            return None;
        }

        let books = &self.books;
        let id = self
            .ids
            .next_id(|n| books.iter().any(|b| b.id.as_numeric() == Some(n)));
        self.books
            .insert(0, BookRecord::new(id.clone(), title, author));
        tracing::info!(book_id = %id, title, "book added");

        self.persist();
        Some(id)
    }

    /// Flip the status of the book with `id`; returns the new status.
    pub fn toggle_status(&mut self, id: &BookId) -> Option<BookStatus> {
        let toggled = self.books.iter_mut().find(|b| &b.id == id).map(|book| {
            book.status = book.status.toggled();
            book.status
        });

        match toggled {
            Some(status) => tracing::info!(book_id = %id, %status, "book status toggled"),
            None => tracing::debug!(book_id = %id, "toggle ignored; no such book"),
        }

        self.persist();
        toggled
    }

    /// Remove the book with `id`; returns the removed record.
    pub fn remove(&mut self, id: &BookId) -> Option<BookRecord> {
        let removed = self
            .books
            .iter()
            .position(|b| &b.id == id)
            .map(|index| self.books.remove(index));

        match &removed {
            Some(book) => tracing::info!(book_id = %id, title = %book.title, "book removed"),
            None => tracing::debug!(book_id = %id, "remove ignored; no such book"),
        }

        self.persist();
        removed
    }

    /// The current collection, newest first.
    pub fn get_all(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn get(&self, id: &BookId) -> Option<&BookRecord> {
        self.books.iter().find(|b| &b.id == id)
    }

    /// Find the id a user typed as `raw`.
    ///
    /// The parsed form wins; otherwise a record whose id renders as `raw`
    /// matches, so a stored text id `"42"` is reachable as `42`.
    pub fn find_id(&self, raw: &str) -> Option<&BookId> {
        let parsed: BookId = match raw.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        };

        self.get(&parsed)
            .or_else(|| self.books.iter().find(|b| b.id.to_string() == raw))
            .map(|b| &b.id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// True when the most recent write to storage failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn archive(&self) -> &BookArchive<S> {
        &self.archive
    }

    fn persist(&mut self) {
        match self.archive.save(&self.books) {
            Ok(()) => self.unsaved = false,
            Err(error) => {
                self.unsaved = true;
                tracing::warn!(
                    key = self.archive.key(),
                    %error,
                    "failed to persist inventory; keeping in-memory state"
                );
            }
        }
    }
}
