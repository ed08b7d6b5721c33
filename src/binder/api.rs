//! # API Facade
//!
//! The single entry point for every organizer operation, regardless of the
//! UI sitting on top. A thin dispatch layer: business logic lives in
//! `commands/*.rs`, persistence behind [`RecordStore`].
//!
//! `BinderApi<S: RecordStore>` is generic over the storage backend:
//! - Production: `BinderApi<SqliteStore>`, owned by a `StoreContext`
//! - Testing: `BinderApi<InMemoryStore>`
//!
//! The facade never touches stdout, never exits the process, and returns
//! structured `Result` values for the caller to surface or ignore.

use crate::commands::load::ItemGroups;
use crate::commands::{self, CmdResult, ItemDraft, TabDraft};
use crate::error::Result;
use crate::store::{ChangeSet, RecordStore, StoreEvent};
use std::sync::mpsc::Receiver;
use uuid::Uuid;

pub struct BinderApi<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> BinderApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_tabs(&self) -> Result<CmdResult> {
        commands::load::tabs(&self.store)
    }

    pub fn load_items(&self, tab_id: &Uuid) -> Result<CmdResult> {
        commands::load::items(&self.store, tab_id)
    }

    pub fn load_item_groups(&self, tab_id: &Uuid) -> Result<ItemGroups> {
        commands::load::item_groups(&self.store, tab_id)
    }

    pub fn create_tab(&mut self, draft: &TabDraft) -> Result<CmdResult> {
        commands::create::tab(&mut self.store, draft)
    }

    pub fn update_tab(&mut self, id: Uuid, draft: &TabDraft) -> Result<CmdResult> {
        commands::update::tab(&mut self.store, id, draft)
    }

    pub fn delete_tab(&mut self, id: Uuid) -> Result<CmdResult> {
        commands::delete::tab(&mut self.store, id)
    }

    pub fn toggle_pin_tab(&mut self, id: Uuid) -> Result<CmdResult> {
        commands::pinning::toggle_tab(&mut self.store, id)
    }

    pub fn create_item(&mut self, tab_id: Uuid, draft: &ItemDraft) -> Result<CmdResult> {
        commands::create::item(&mut self.store, tab_id, draft)
    }

    pub fn update_item(&mut self, id: Uuid, draft: &ItemDraft) -> Result<CmdResult> {
        commands::update::item(&mut self.store, id, draft)
    }

    pub fn move_item(&mut self, id: Uuid, new_tab_id: Uuid) -> Result<CmdResult> {
        commands::update::move_item(&mut self.store, id, new_tab_id)
    }

    pub fn delete_item(&mut self, id: Uuid) -> Result<CmdResult> {
        commands::delete::item(&mut self.store, id)
    }

    pub fn toggle_pin_item(&mut self, id: Uuid) -> Result<CmdResult> {
        commands::pinning::toggle_item(&mut self.store, id)
    }

    pub fn toggle_done(&mut self, id: Uuid) -> Result<CmdResult> {
        commands::done::toggle(&mut self.store, id)
    }

    /// Register a store observer; see [`RecordStore::subscribe`].
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.store.subscribe()
    }

    /// Merge a remote change set into the live store. Used by the sync
    /// wiring; see [`RecordStore::apply_remote`].
    pub fn apply_remote(&mut self, changes: &ChangeSet) -> Result<()> {
        self.store.apply_remote(changes)
    }
}
