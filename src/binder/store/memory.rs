use super::{ChangeSet, PendingChanges, RecordStore, StoreEvent, Subscribers};
use crate::error::{BinderError, Result};
use crate::model::{Item, Tab};
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data; mirrors the staging, sorting, and cascade
/// semantics of the SQLite backend.
#[derive(Default)]
pub struct InMemoryStore {
    tabs: HashMap<Uuid, Tab>,
    items: HashMap<Uuid, Item>,
    pending: PendingChanges,
    subscribers: Subscribers,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_change_set(&mut self, changes: &ChangeSet) {
        for tab in &changes.tabs {
            self.tabs.insert(tab.id, tab.clone());
        }
        for item in &changes.items {
            self.items.insert(item.id, item.clone());
        }
        for id in &changes.deleted_items {
            self.items.remove(id);
        }
        for id in &changes.deleted_tabs {
            self.tabs.remove(id);
            // Engine-level cascade in the SQLite backend; mirrored here.
            self.items.retain(|_, item| item.tab_id != *id);
        }
    }
}

impl RecordStore for InMemoryStore {
    fn fetch_tabs(&self) -> Result<Vec<Tab>> {
        let mut tabs: Vec<Tab> = self.tabs.values().cloned().collect();
        tabs.sort_by(Tab::display_cmp);
        Ok(tabs)
    }

    fn fetch_items(&self, tab_id: &Uuid) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .items
            .values()
            .filter(|item| item.tab_id == *tab_id)
            .cloned()
            .collect();
        items.sort_by(Item::display_cmp);
        Ok(items)
    }

    fn get_tab(&self, id: &Uuid) -> Result<Tab> {
        self.tabs
            .get(id)
            .cloned()
            .ok_or(BinderError::TabNotFound(*id))
    }

    fn get_item(&self, id: &Uuid) -> Result<Item> {
        self.items
            .get(id)
            .cloned()
            .ok_or(BinderError::ItemNotFound(*id))
    }

    fn save_tab(&mut self, tab: &Tab) -> Result<()> {
        self.pending.stage_tab(tab);
        Ok(())
    }

    fn save_item(&mut self, item: &Item) -> Result<()> {
        self.pending.stage_item(item);
        Ok(())
    }

    fn delete_tab(&mut self, id: &Uuid) -> Result<()> {
        self.pending.stage_tab_deletion(id);
        Ok(())
    }

    fn delete_item(&mut self, id: &Uuid) -> Result<()> {
        self.pending.stage_item_deletion(id);
        Ok(())
    }

    fn has_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    fn commit(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let changes = self.pending.as_change_set();
        self.apply_change_set(&changes);
        self.pending.clear();
        self.subscribers.emit(&StoreEvent::Committed(changes));
        Ok(())
    }

    fn apply_remote(&mut self, changes: &ChangeSet) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        self.apply_change_set(changes);
        self.subscribers.emit(&StoreEvent::RemoteMerged(changes.clone()));
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.subscribers.subscribe()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::TabColor;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_tab(mut self, title: &str) -> Self {
            let tab = Tab::new(title, "folder", TabColor::Accent);
            self.store.save_tab(&tab).unwrap();
            self.store.commit().unwrap();
            self
        }

        pub fn with_pinned_tab(mut self, title: &str) -> Self {
            let mut tab = Tab::new(title, "folder", TabColor::Accent);
            tab.is_pinned = true;
            self.store.save_tab(&tab).unwrap();
            self.store.commit().unwrap();
            self
        }

        pub fn with_items(mut self, tab_title: &str, count: usize) -> Self {
            let tab = Tab::new(tab_title, "folder", TabColor::Accent);
            self.store.save_tab(&tab).unwrap();
            for i in 0..count {
                let mut item = Item::new(tab.id);
                item.set_title(&format!("Test Item {}", i + 1));
                self.store.save_item(&item).unwrap();
            }
            self.store.commit().unwrap();
            self
        }
    }
}
