//! # Storage Layer
//!
//! This module defines the storage abstraction for binder. The
//! [`RecordStore`] trait allows the rest of the crate to work with different
//! backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Keep command logic **decoupled** from persistence details
//! - Let the sync adapter treat local and remote changes uniformly
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: production SQLite storage
//!   - WAL journal mode (side files live next to the database)
//!   - `ON DELETE CASCADE` from items to their owning tab
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!
//! ## Write Model
//!
//! Mutations (`save_*`, `delete_*`) are staged in memory and become durable
//! and observable only at [`RecordStore::commit`], which writes the staged
//! change set in a single transaction and notifies subscribers. A commit on
//! a clean store is a no-op and emits nothing. Remote change sets bypass the
//! stage: [`RecordStore::apply_remote`] merges them directly so live readers
//! observe them without a restart.

use crate::error::Result;
use crate::model::{Item, Tab};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc::{self, Receiver, Sender};
use uuid::Uuid;

pub mod context;
pub mod memory;
pub mod sqlite;

pub use context::StoreContext;

/// The records touched by one commit or one remote merge. Also the payload
/// exchanged with a sync service; the wire envelope around it is the
/// service's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub tabs: Vec<Tab>,
    pub items: Vec<Item>,
    pub deleted_tabs: Vec<Uuid>,
    pub deleted_items: Vec<Uuid>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
            && self.items.is_empty()
            && self.deleted_tabs.is_empty()
            && self.deleted_items.is_empty()
    }
}

/// Notification delivered to store subscribers.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A local commit made the contained changes durable.
    Committed(ChangeSet),
    /// A remote change set was merged into the live store.
    RemoteMerged(ChangeSet),
}

/// Abstract interface for tab/item storage.
pub trait RecordStore {
    /// All tabs, pinned first, then alphabetical by title.
    fn fetch_tabs(&self) -> Result<Vec<Tab>>;

    /// Items of one tab: not-done first, then due date descending with
    /// undated items last, then alphabetical by title.
    fn fetch_items(&self, tab_id: &Uuid) -> Result<Vec<Item>>;

    fn get_tab(&self, id: &Uuid) -> Result<Tab>;

    fn get_item(&self, id: &Uuid) -> Result<Item>;

    /// Stage a create or update. Staging the same id twice keeps the latest
    /// record; an item staged under a new `tab_id` moves, it is never
    /// duplicated.
    fn save_tab(&mut self, tab: &Tab) -> Result<()>;

    fn save_item(&mut self, item: &Item) -> Result<()>;

    /// Stage a tab deletion. Committing it cascades to the tab's items.
    fn delete_tab(&mut self, id: &Uuid) -> Result<()>;

    fn delete_item(&mut self, id: &Uuid) -> Result<()>;

    /// Whether any staged changes are waiting for [`RecordStore::commit`].
    fn has_changes(&self) -> bool;

    /// Write staged changes in one transaction, notify subscribers, clear
    /// the stage. No-op when nothing is staged.
    fn commit(&mut self) -> Result<()>;

    /// Merge a remote change set directly into durable storage and notify
    /// subscribers with [`StoreEvent::RemoteMerged`].
    fn apply_remote(&mut self, changes: &ChangeSet) -> Result<()>;

    /// Register a change observer. Every subscriber receives every event;
    /// disconnected receivers are dropped on the next emission.
    fn subscribe(&mut self) -> Receiver<StoreEvent>;
}

/// Staged, uncommitted mutations keyed by record id.
#[derive(Debug, Default)]
pub(crate) struct PendingChanges {
    tabs: BTreeMap<Uuid, Tab>,
    items: BTreeMap<Uuid, Item>,
    deleted_tabs: BTreeSet<Uuid>,
    deleted_items: BTreeSet<Uuid>,
}

impl PendingChanges {
    pub fn stage_tab(&mut self, tab: &Tab) {
        self.deleted_tabs.remove(&tab.id);
        self.tabs.insert(tab.id, tab.clone());
    }

    pub fn stage_item(&mut self, item: &Item) {
        self.deleted_items.remove(&item.id);
        self.items.insert(item.id, item.clone());
    }

    pub fn stage_tab_deletion(&mut self, id: &Uuid) {
        self.tabs.remove(id);
        self.deleted_tabs.insert(*id);
    }

    pub fn stage_item_deletion(&mut self, id: &Uuid) {
        self.items.remove(id);
        self.deleted_items.insert(*id);
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
            && self.items.is_empty()
            && self.deleted_tabs.is_empty()
            && self.deleted_items.is_empty()
    }

    pub fn as_change_set(&self) -> ChangeSet {
        ChangeSet {
            tabs: self.tabs.values().cloned().collect(),
            items: self.items.values().cloned().collect(),
            deleted_tabs: self.deleted_tabs.iter().copied().collect(),
            deleted_items: self.deleted_items.iter().copied().collect(),
        }
    }

    pub fn clear(&mut self) {
        self.tabs.clear();
        self.items.clear();
        self.deleted_tabs.clear();
        self.deleted_items.clear();
    }
}

/// Fan-out list of store observers.
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<StoreEvent>>,
}

impl Subscribers {
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    pub fn emit(&mut self, event: &StoreEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TabColor;

    #[test]
    fn staging_the_same_tab_twice_keeps_the_latest() {
        let mut pending = PendingChanges::default();
        let mut tab = Tab::new("First", "", TabColor::Accent);
        pending.stage_tab(&tab);
        tab.set_title("Second");
        pending.stage_tab(&tab);

        let changes = pending.as_change_set();
        assert_eq!(changes.tabs.len(), 1);
        assert_eq!(changes.tabs[0].title, "Second");
    }

    #[test]
    fn deleting_supersedes_a_staged_save_and_vice_versa() {
        let mut pending = PendingChanges::default();
        let tab = Tab::new("Doomed", "", TabColor::Accent);

        pending.stage_tab(&tab);
        pending.stage_tab_deletion(&tab.id);
        let changes = pending.as_change_set();
        assert!(changes.tabs.is_empty());
        assert_eq!(changes.deleted_tabs, vec![tab.id]);

        pending.stage_tab(&tab);
        let changes = pending.as_change_set();
        assert_eq!(changes.tabs.len(), 1);
        assert!(changes.deleted_tabs.is_empty());
    }

    #[test]
    fn subscribers_drop_disconnected_receivers() {
        let mut subs = Subscribers::default();
        let rx_kept = subs.subscribe();
        let rx_dropped = subs.subscribe();
        drop(rx_dropped);

        subs.emit(&StoreEvent::Committed(ChangeSet::default()));
        assert!(rx_kept.try_recv().is_ok());
        assert_eq!(subs.senders.len(), 1);
    }
}
