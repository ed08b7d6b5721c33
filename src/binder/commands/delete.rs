use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RecordStore;
use uuid::Uuid;

/// Delete a tab. Its items go with it (engine cascade).
pub fn tab<S: RecordStore>(store: &mut S, id: Uuid) -> Result<CmdResult> {
    let tab = store.get_tab(&id)?;
    store.delete_tab(&id)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_tabs(vec![tab]))
}

pub fn item<S: RecordStore>(store: &mut S, id: Uuid) -> Result<CmdResult> {
    let item = store.get_item(&id)?;
    store.delete_item(&id)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_items(vec![item]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, ItemDraft, TabDraft};
    use crate::error::BinderError;
    use crate::model::TabColor;
    use crate::store::memory::InMemoryStore;
    use crate::store::RecordStore;

    #[test]
    fn deleting_a_tab_removes_it_and_its_items() {
        let mut store = InMemoryStore::new();
        let owner = create::tab(&mut store, &TabDraft::new("Doomed", "", TabColor::Accent))
            .unwrap()
            .affected_tabs
            .remove(0);
        create::item(&mut store, owner.id, &ItemDraft::new("first")).unwrap();
        create::item(&mut store, owner.id, &ItemDraft::new("second")).unwrap();

        tab(&mut store, owner.id).unwrap();

        assert!(store.fetch_tabs().unwrap().is_empty());
        assert!(store.fetch_items(&owner.id).unwrap().is_empty());
    }

    #[test]
    fn deleting_a_missing_record_reports_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            tab(&mut store, Uuid::new_v4()).unwrap_err(),
            BinderError::TabNotFound(_)
        ));
        assert!(matches!(
            item(&mut store, Uuid::new_v4()).unwrap_err(),
            BinderError::ItemNotFound(_)
        ));
    }
}
