use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RecordStore;
use uuid::Uuid;

pub fn toggle<S: RecordStore>(store: &mut S, id: Uuid) -> Result<CmdResult> {
    let mut item = store.get_item(&id)?;
    item.is_done = !item.is_done;
    store.save_item(&item)?;
    store.commit()?;

    Ok(CmdResult::default().with_affected_items(vec![item]))
}
