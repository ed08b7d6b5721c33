use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Item;
use crate::store::RecordStore;
use uuid::Uuid;

/// All tabs in display order: pinned first, then alphabetical.
pub fn tabs<S: RecordStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_tabs(store.fetch_tabs()?))
}

/// One tab's items in display order: not-done first, then due date
/// descending (undated last), then alphabetical.
pub fn items<S: RecordStore>(store: &S, tab_id: &Uuid) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_items(store.fetch_items(tab_id)?))
}

/// The section partitions a tab detail view renders.
#[derive(Debug, Default)]
pub struct ItemGroups {
    pub pinned: Vec<Item>,
    pub unpinned: Vec<Item>,
    pub done: Vec<Item>,
}

/// One tab's items partitioned into the pinned / unpinned / done sections,
/// preserving display order within each section.
pub fn item_groups<S: RecordStore>(store: &S, tab_id: &Uuid) -> Result<ItemGroups> {
    let mut groups = ItemGroups::default();
    for item in store.fetch_items(tab_id)? {
        if item.is_done {
            groups.done.push(item);
        } else if item.is_pinned {
            groups.pinned.push(item);
        } else {
            groups.unpinned.push(item);
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, ItemDraft, TabDraft};
    use crate::model::TabColor;
    use crate::store::memory::InMemoryStore;
    use crate::store::RecordStore;

    #[test]
    fn lists_tabs_pinned_first_then_alphabetical() {
        let mut store = InMemoryStore::new();
        for title in ["Work", "Archive", "Home"] {
            create::tab(&mut store, &TabDraft::new(title, "", TabColor::Accent)).unwrap();
        }
        let mut pinned = store
            .fetch_tabs()
            .unwrap()
            .into_iter()
            .find(|t| t.title == "Work")
            .unwrap();
        pinned.is_pinned = true;
        store.save_tab(&pinned).unwrap();
        store.commit().unwrap();

        let titles: Vec<String> = tabs(&store)
            .unwrap()
            .listed_tabs
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Work", "Archive", "Home"]);
    }

    #[test]
    fn partitions_items_into_sections() {
        let mut store = InMemoryStore::new();
        let owner = create::tab(&mut store, &TabDraft::new("Today", "", TabColor::Accent))
            .unwrap()
            .affected_tabs
            .remove(0);

        let mut pinned = create::item(&mut store, owner.id, &ItemDraft::new("pinned"))
            .unwrap()
            .affected_items
            .remove(0);
        pinned.is_pinned = true;
        store.save_item(&pinned).unwrap();

        let mut finished = create::item(&mut store, owner.id, &ItemDraft::new("finished"))
            .unwrap()
            .affected_items
            .remove(0);
        finished.is_done = true;
        store.save_item(&finished).unwrap();

        create::item(&mut store, owner.id, &ItemDraft::new("plain")).unwrap();
        store.commit().unwrap();

        let groups = item_groups(&store, &owner.id).unwrap();
        assert_eq!(groups.pinned.len(), 1);
        assert_eq!(groups.pinned[0].title, "pinned");
        assert_eq!(groups.unpinned.len(), 1);
        assert_eq!(groups.unpinned[0].title, "plain");
        assert_eq!(groups.done.len(), 1);
        assert_eq!(groups.done[0].title, "finished");
    }
}
