//! One-shot relocation of the database from the legacy private location to
//! the shared app-group location.
//!
//! Runs at startup, before the store context exists and before anything
//! reads the store. There is no separate "migration done" marker: the
//! absence of a file at the legacy path is the completion state, so after a
//! successful run every later startup takes the fast path.
//!
//! Failure semantics are deliberately blunt. The content copy and the
//! removal of the legacy primary file are fatal when they fail: no retry,
//! no rollback. Cleanup of the side files and the asset cache is
//! best-effort and never aborts the migration.

use crate::error::{BinderError, Result};
use crate::locator::{self, StorePaths};
use crate::store::sqlite::SqliteStore;
use std::fs;
use tracing::{debug, info};

/// Open the store for this launch, relocating it first if a database still
/// exists at the legacy path.
///
/// The returned store is always rooted at the shared path. The caller
/// attaches sync only after this returns, which keeps a partially-relocated
/// store from announcing itself to the sync service.
pub fn open_at_startup(paths: &StorePaths) -> Result<SqliteStore> {
    if !paths.legacy.exists() {
        debug!(shared = %paths.shared.display(), "no legacy store, migration not needed");
        return SqliteStore::open(&paths.shared);
    }

    info!(
        legacy = %paths.legacy.display(),
        shared = %paths.shared.display(),
        "relocating store to the shared location"
    );

    // Sync stays detached while the legacy store is open.
    let legacy = SqliteStore::open(&paths.legacy)?;

    legacy
        .backup_to(&paths.shared)
        .map_err(|e| BinderError::Migration(format!("content copy to shared location: {e}")))?;

    fs::remove_file(&paths.legacy)
        .map_err(|e| BinderError::Migration(format!("removing legacy database: {e}")))?;

    for side in locator::sidecar_paths(&paths.legacy) {
        if let Err(e) = fs::remove_file(&side) {
            debug!(path = %side.display(), error = %e, "legacy side file not removed");
        }
    }
    let assets = locator::asset_cache_dir(&paths.legacy);
    if let Err(e) = fs::remove_dir_all(&assets) {
        debug!(path = %assets.display(), error = %e, "legacy asset cache not removed");
    }

    // Detach the legacy handle before reopening at the shared path.
    drop(legacy);

    info!("store relocation complete");
    SqliteStore::open(&paths.shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, Tab, TabColor};
    use crate::store::RecordStore;
    use std::path::Path;

    fn paths_in(dir: &Path) -> StorePaths {
        StorePaths::new(&dir.join("private"), &dir.join("shared"))
    }

    fn seed_legacy(paths: &StorePaths) -> (Tab, Item) {
        let mut legacy = SqliteStore::open(&paths.legacy).unwrap();
        let tab = Tab::new("Groceries", "cart", TabColor::Green);
        legacy.save_tab(&tab).unwrap();
        let mut item = Item::new(tab.id);
        item.set_title("Buy milk");
        legacy.save_item(&item).unwrap();
        legacy.commit().unwrap();
        (tab, item)
    }

    #[test]
    fn relocates_content_and_removes_the_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let (tab, item) = seed_legacy(&paths);

        let store = open_at_startup(&paths).unwrap();

        assert!(paths.shared.exists());
        assert!(!paths.legacy.exists());
        for side in locator::sidecar_paths(&paths.legacy) {
            assert!(!side.exists());
        }
        assert_eq!(store.fetch_tabs().unwrap(), vec![tab.clone()]);
        assert_eq!(
            store
                .fetch_items(&tab.id)
                .unwrap()
                .into_iter()
                .map(|i| i.id)
                .collect::<Vec<_>>(),
            vec![item.id]
        );
    }

    #[test]
    fn removes_the_asset_cache_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        seed_legacy(&paths);

        let assets = locator::asset_cache_dir(&paths.legacy);
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("blob"), b"cached").unwrap();

        open_at_startup(&paths).unwrap();
        assert!(!assets.exists());
    }

    #[test]
    fn missing_side_files_do_not_abort_the_migration() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        seed_legacy(&paths);

        // Ensure the checkpoint left no side files behind, then migrate.
        for side in locator::sidecar_paths(&paths.legacy) {
            let _ = fs::remove_file(side);
        }
        assert!(open_at_startup(&paths).is_ok());
    }

    #[test]
    fn without_a_legacy_file_opens_the_shared_store_directly() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());

        let mut first = SqliteStore::open(&paths.shared).unwrap();
        let tab = Tab::new("Existing", "", TabColor::Accent);
        first.save_tab(&tab).unwrap();
        first.commit().unwrap();
        drop(first);

        let store = open_at_startup(&paths).unwrap();
        assert_eq!(store.fetch_tabs().unwrap(), vec![tab]);
        assert!(!paths.legacy.exists());
    }
}
