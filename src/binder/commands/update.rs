use crate::commands::{CmdResult, ItemDraft, TabDraft};
use crate::error::Result;
use crate::store::RecordStore;
use uuid::Uuid;

pub fn tab<S: RecordStore>(store: &mut S, id: Uuid, draft: &TabDraft) -> Result<CmdResult> {
    let mut tab = store.get_tab(&id)?;
    tab.set_title(&draft.title);
    tab.set_icon(&draft.icon);
    tab.color = draft.color;
    store.save_tab(&tab)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_tabs(vec![tab]))
}

pub fn item<S: RecordStore>(store: &mut S, id: Uuid, draft: &ItemDraft) -> Result<CmdResult> {
    let mut item = store.get_item(&id)?;
    item.set_title(&draft.title);
    item.set_notes(&draft.notes);
    item.set_icon(&draft.icon);
    item.due_date = draft.due_date;
    store.save_item(&item)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_items(vec![item]))
}

/// Reassign an item to another tab. The item moves; it is never duplicated.
pub fn move_item<S: RecordStore>(store: &mut S, id: Uuid, new_tab_id: Uuid) -> Result<CmdResult> {
    store.get_tab(&new_tab_id)?;
    let mut item = store.get_item(&id)?;
    item.tab_id = new_tab_id;
    store.save_item(&item)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_items(vec![item]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::TabColor;
    use crate::store::memory::InMemoryStore;
    use crate::store::RecordStore;

    #[test]
    fn updates_keep_the_id_and_trim_fields() {
        let mut store = InMemoryStore::new();
        let created = create::tab(&mut store, &TabDraft::new("Drafts", "", TabColor::Accent))
            .unwrap()
            .affected_tabs
            .remove(0);

        let updated = tab(
            &mut store,
            created.id,
            &TabDraft::new("  Notes ", " pencil ", TabColor::Indigo),
        )
        .unwrap()
        .affected_tabs
        .remove(0);

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Notes");
        assert_eq!(updated.icon, "pencil");
        assert_eq!(store.fetch_tabs().unwrap().len(), 1);
    }

    #[test]
    fn moving_an_item_never_duplicates_it() {
        let mut store = InMemoryStore::new();
        let from = create::tab(&mut store, &TabDraft::new("From", "", TabColor::Accent))
            .unwrap()
            .affected_tabs
            .remove(0);
        let to = create::tab(&mut store, &TabDraft::new("To", "", TabColor::Accent))
            .unwrap()
            .affected_tabs
            .remove(0);
        let item = create::item(&mut store, from.id, &ItemDraft::new("wandering"))
            .unwrap()
            .affected_items
            .remove(0);

        move_item(&mut store, item.id, to.id).unwrap();

        assert!(store.fetch_items(&from.id).unwrap().is_empty());
        let moved = store.fetch_items(&to.id).unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, item.id);
    }
}
