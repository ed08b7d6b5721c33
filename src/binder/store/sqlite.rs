use super::{ChangeSet, PendingChanges, RecordStore, StoreEvent, Subscribers};
use crate::error::{BinderError, Result};
use crate::model::{Item, Tab, TabColor};
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::backup::Backup;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Production SQLite backend.
///
/// WAL journal mode keeps the conventional `-wal`/`-shm` side files next to
/// the database; the migration relies on that layout when cleaning up the
/// legacy location.
pub struct SqliteStore {
    conn: Connection,
    pending: PendingChanges,
    subscribers: Subscribers,
}

impl SqliteStore {
    /// Open (or create) a database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "opening record store");
        let conn = Connection::open(path)
            .map_err(|e| BinderError::Config(format!("cannot open store at {}: {e}", path.display())))?;
        Self::init(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS tabs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                icon TEXT NOT NULL,
                color TEXT NOT NULL,
                is_pinned INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                tab_id TEXT NOT NULL REFERENCES tabs(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                notes TEXT NOT NULL,
                icon TEXT NOT NULL,
                date_added INTEGER,
                due_date INTEGER,
                is_pinned INTEGER NOT NULL DEFAULT 0,
                is_done INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_items_tab ON items(tab_id);
            ",
        )?;

        Ok(Self {
            conn,
            pending: PendingChanges::default(),
            subscribers: Subscribers::default(),
        })
    }

    /// Full-content copy of this database into a new file at `dest`, via the
    /// engine's online backup.
    pub fn backup_to(&self, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut target = Connection::open(dest)?;
        let backup = Backup::new(&self.conn, &mut target)?;
        backup.run_to_completion(100, Duration::from_millis(0), None)?;
        Ok(())
    }

    fn write_change_set(&mut self, changes: &ChangeSet) -> Result<()> {
        let tx = self.conn.transaction()?;
        // Tabs before items so new items never dangle on their foreign key;
        // item deletions before tab deletions for the same reason.
        for tab in &changes.tabs {
            upsert_tab(&tx, tab)?;
        }
        for item in &changes.items {
            upsert_item(&tx, item)?;
        }
        for id in &changes.deleted_items {
            tx.execute("DELETE FROM items WHERE id = ?1", params![id.to_string()])?;
        }
        for id in &changes.deleted_tabs {
            tx.execute("DELETE FROM tabs WHERE id = ?1", params![id.to_string()])?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn upsert_tab(conn: &Connection, tab: &Tab) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO tabs (id, title, icon, color, is_pinned)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            tab.id.to_string(),
            tab.title,
            tab.icon,
            tab.color.as_str(),
            tab.is_pinned as i32,
        ],
    )?;
    Ok(())
}

fn upsert_item(conn: &Connection, item: &Item) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO items
            (id, tab_id, title, notes, icon, date_added, due_date, is_pinned, is_done)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            item.id.to_string(),
            item.tab_id.to_string(),
            item.title,
            item.notes,
            item.icon,
            item.date_added.timestamp_millis(),
            item.due_date.map(|d| d.timestamp_millis()),
            item.is_pinned as i32,
            item.is_done as i32,
        ],
    )?;
    Ok(())
}

fn row_to_tab(row: &rusqlite::Row) -> rusqlite::Result<Tab> {
    let id_str: String = row.get(0)?;
    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let color_str: String = row.get(3)?;
    // Unrecognized stored colors fall back to the accent color.
    let color: TabColor = color_str.parse().unwrap_or_default();

    Ok(Tab {
        id,
        title: row.get(1)?,
        icon: row.get(2)?,
        color,
        is_pinned: row.get(4)?,
    })
}

fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
    let id_str: String = row.get(0)?;
    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let tab_str: String = row.get(1)?;
    let tab_id = Uuid::parse_str(&tab_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let date_added: Option<i64> = row.get(5)?;
    let due_date: Option<i64> = row.get(6)?;

    Ok(Item {
        id,
        tab_id,
        title: row.get(2)?,
        notes: row.get(3)?,
        icon: row.get(4)?,
        date_added: date_added.map(millis_to_utc).unwrap_or_else(Item::distant_past),
        due_date: due_date.map(millis_to_utc),
        is_pinned: row.get(7)?,
        is_done: row.get(8)?,
    })
}

fn millis_to_utc(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(Item::distant_past)
}

const TAB_COLUMNS: &str = "id, title, icon, color, is_pinned";
const ITEM_COLUMNS: &str = "id, tab_id, title, notes, icon, date_added, due_date, is_pinned, is_done";

impl RecordStore for SqliteStore {
    fn fetch_tabs(&self) -> Result<Vec<Tab>> {
        let sql = format!(
            "SELECT {TAB_COLUMNS} FROM tabs
             ORDER BY is_pinned DESC, title COLLATE NOCASE ASC, title ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let tabs = stmt
            .query_map([], row_to_tab)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tabs)
    }

    fn fetch_items(&self, tab_id: &Uuid) -> Result<Vec<Item>> {
        // NULL sorts below every value, so `due_date DESC` places undated
        // items after all dated ones within each done group.
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE tab_id = ?1
             ORDER BY is_done ASC, due_date DESC, title COLLATE NOCASE ASC, title ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map([tab_id.to_string()], row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn get_tab(&self, id: &Uuid) -> Result<Tab> {
        let sql = format!("SELECT {TAB_COLUMNS} FROM tabs WHERE id = ?1");
        self.conn
            .query_row(&sql, [id.to_string()], row_to_tab)
            .optional()?
            .ok_or(BinderError::TabNotFound(*id))
    }

    fn get_item(&self, id: &Uuid) -> Result<Item> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1");
        self.conn
            .query_row(&sql, [id.to_string()], row_to_item)
            .optional()?
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
        self.write_change_set(&changes)?;
        self.pending.clear();
        self.subscribers.emit(&StoreEvent::Committed(changes));
        Ok(())
    }

    fn apply_remote(&mut self, changes: &ChangeSet) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        self.write_change_set(changes)?;
        self.subscribers.emit(&StoreEvent::RemoteMerged(changes.clone()));
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.subscribers.subscribe()
    }
}
