//! Book inventory: records, their store, and the views derived from them.

pub mod id;
pub mod models;
pub mod persistence;
pub mod session;
pub mod store;
pub mod view;

pub use models::{BookId, BookRecord, BookStatus};
pub use persistence::{BookArchive, DEFAULT_STORAGE_KEY};
pub use session::{Intent, IntentOutcome, InventorySession, InventoryView};
pub use store::InventoryStore;
pub use view::{compute_stats, filter_by_title, InventoryStats};
