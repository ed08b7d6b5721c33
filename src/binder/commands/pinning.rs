use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RecordStore;
use uuid::Uuid;

pub fn toggle_tab<S: RecordStore>(store: &mut S, id: Uuid) -> Result<CmdResult> {
    let mut tab = store.get_tab(&id)?;
    tab.is_pinned = !tab.is_pinned;
    store.save_tab(&tab)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_tabs(vec![tab]))
}

pub fn toggle_item<S: RecordStore>(store: &mut S, id: Uuid) -> Result<CmdResult> {
    let mut item = store.get_item(&id)?;
    item.is_pinned = !item.is_pinned;
    store.save_item(&item)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_items(vec![item]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, ItemDraft, TabDraft};
    use crate::model::TabColor;
    use crate::store::memory::InMemoryStore;
    use crate::store::RecordStore;

    #[test]
    fn pinned_tab_moves_to_the_front_of_the_list() {
        let mut store = InMemoryStore::new();
        create::tab(&mut store, &TabDraft::new("Alpha", "", TabColor::Accent)).unwrap();
        let zulu = create::tab(&mut store, &TabDraft::new("Zulu", "", TabColor::Accent))
            .unwrap()
            .affected_tabs
            .remove(0);

        toggle_tab(&mut store, zulu.id).unwrap();

        let tabs = store.fetch_tabs().unwrap();
        assert_eq!(tabs[0].title, "Zulu");
        assert!(tabs[0].is_pinned);
    }

    #[test]
    fn toggling_twice_restores_the_original_state() {
        let mut store = InMemoryStore::new();
        let owner = create::tab(&mut store, &TabDraft::new("Today", "", TabColor::Accent))
            .unwrap()
            .affected_tabs
            .remove(0);
        let item = create::item(&mut store, owner.id, &ItemDraft::new("task"))
            .unwrap()
            .affected_items
            .remove(0);
        assert!(!item.is_pinned);

        toggle_item(&mut store, item.id).unwrap();
        assert!(store.get_item(&item.id).unwrap().is_pinned);

        toggle_item(&mut store, item.id).unwrap();
        assert!(!store.get_item(&item.id).unwrap().is_pinned);
    }
}
