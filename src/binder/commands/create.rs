use crate::commands::{CmdResult, ItemDraft, TabDraft};
use crate::error::Result;
use crate::model::{Item, Tab};
use crate::store::RecordStore;
use uuid::Uuid;

pub fn tab<S: RecordStore>(store: &mut S, draft: &TabDraft) -> Result<CmdResult> {
    let tab = Tab::new(&draft.title, &draft.icon, draft.color);
    store.save_tab(&tab)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_tabs(vec![tab]))
}

pub fn item<S: RecordStore>(store: &mut S, tab_id: Uuid, draft: &ItemDraft) -> Result<CmdResult> {
    // The owning tab must exist before an item can point at it.
    store.get_tab(&tab_id)?;

    let mut item = Item::new(tab_id);
    item.set_title(&draft.title);
    item.set_notes(&draft.notes);
    item.set_icon(&draft.icon);
    item.due_date = draft.due_date;

    store.save_item(&item)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_items(vec![item]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BinderError;
    use crate::model::TabColor;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn created_tab_round_trips_with_a_fresh_id() {
        let mut store = InMemoryStore::new();
        let draft = TabDraft::new("Groceries", "cart", TabColor::Green);
        let created = tab(&mut store, &draft).unwrap().affected_tabs.remove(0);

        let fetched = store.fetch_tabs().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].title, "Groceries");
        assert_eq!(fetched[0].icon, "cart");
        assert_eq!(fetched[0].color, TabColor::Green);
        assert_eq!(fetched[0].id, created.id);

        let second = tab(&mut store, &draft).unwrap().affected_tabs.remove(0);
        assert_ne!(second.id, created.id);
    }

    #[test]
    fn item_creation_requires_an_existing_tab() {
        let mut store = InMemoryStore::new();
        let err = item(&mut store, Uuid::new_v4(), &ItemDraft::new("orphan")).unwrap_err();
        assert!(matches!(err, BinderError::TabNotFound(_)));
    }

    #[test]
    fn created_item_is_committed_and_trimmed() {
        let mut store = InMemoryStore::new();
        let owner = tab(&mut store, &TabDraft::new("Chores", "", TabColor::Accent))
            .unwrap()
            .affected_tabs
            .remove(0);

        let draft = ItemDraft::new("  sweep the stairs ").with_notes(" both flights ");
        let created = item(&mut store, owner.id, &draft)
            .unwrap()
            .affected_items
            .remove(0);

        assert_eq!(created.title, "sweep the stairs");
        assert_eq!(created.notes, "both flights");
        assert!(!store.has_changes());
        assert_eq!(store.fetch_items(&owner.id).unwrap().len(), 1);
    }
}
